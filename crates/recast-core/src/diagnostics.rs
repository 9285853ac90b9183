//! Diagnostic callbacks.
//!
//! The engine never writes to a terminal. Every message, warning, error and
//! exit request goes through a [`Diagnostics`] implementation supplied by the
//! host, so a console CLI, an interactive front end and a test harness can
//! each decide how (and whether) to show them.
//!
//! # Suppression
//!
//! Each callback carries a `quiet` flag. Quiet calls must not change control
//! flow; hosts only use the flag to decide whether the text is shown.
//! [`Reporter`] derives the flag from [`ProcessOptions`] for the engine.

use recast_model::{ExitCode, ProcessOptions};

/// Request to end processing, passed to [`Diagnostics::exit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRequest {
    pub code: ExitCode,
    pub message: Option<String>,
    /// Do not print the message.
    pub quiet: bool,
    /// Wait for confirmation before exiting.
    pub pause: bool,
    /// Terminate the process. Hosts that keep running ignore this.
    pub terminate: bool,
}

/// Host capability for presenting engine output.
pub trait Diagnostics {
    fn message(&mut self, text: &str, quiet: bool);

    fn warning(&mut self, text: &str, quiet: bool);

    fn error(&mut self, text: &str, quiet: bool);

    /// Processing has reached a final state. Implementations may terminate
    /// the process when `request.terminate` is set; when they return, the
    /// engine reports the failure through its `Result`.
    fn exit(&mut self, request: &ExitRequest);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn message(&mut self, text: &str, quiet: bool) {
        (**self).message(text, quiet);
    }

    fn warning(&mut self, text: &str, quiet: bool) {
        (**self).warning(text, quiet);
    }

    fn error(&mut self, text: &str, quiet: bool) {
        (**self).error(text, quiet);
    }

    fn exit(&mut self, request: &ExitRequest) {
        (**self).exit(request);
    }
}

/// One captured callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    Message { text: String, quiet: bool },
    Warning { text: String, quiet: bool },
    Error { text: String, quiet: bool },
    Exit(ExitRequest),
}

/// Host that records every callback, for tests and embedding applications
/// that render diagnostics later.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    pub events: Vec<DiagnosticEvent>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Message { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Warning { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Error { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn exits(&self) -> Vec<&ExitRequest> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Exit(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn message(&mut self, text: &str, quiet: bool) {
        self.events.push(DiagnosticEvent::Message {
            text: text.to_string(),
            quiet,
        });
    }

    fn warning(&mut self, text: &str, quiet: bool) {
        self.events.push(DiagnosticEvent::Warning {
            text: text.to_string(),
            quiet,
        });
    }

    fn error(&mut self, text: &str, quiet: bool) {
        self.events.push(DiagnosticEvent::Error {
            text: text.to_string(),
            quiet,
        });
    }

    fn exit(&mut self, request: &ExitRequest) {
        self.events.push(DiagnosticEvent::Exit(request.clone()));
    }
}

/// Forwards engine output to a [`Diagnostics`] host with the suppression
/// flags of the active options applied.
pub struct Reporter<'a> {
    sink: &'a mut dyn Diagnostics,
    quiet: bool,
    suppress_warnings: bool,
    suppress_errors: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a mut dyn Diagnostics, options: &ProcessOptions) -> Self {
        Self {
            sink,
            quiet: options.quiet,
            suppress_warnings: options.suppress_warnings,
            suppress_errors: options.suppress_errors,
        }
    }

    pub fn message(&mut self, text: impl AsRef<str>) {
        self.sink.message(text.as_ref(), self.quiet);
    }

    pub fn warning(&mut self, text: impl AsRef<str>) {
        self.sink.warning(text.as_ref(), self.suppress_warnings);
    }

    pub fn error(&mut self, text: impl AsRef<str>) {
        self.sink.error(text.as_ref(), self.suppress_errors);
    }
}
