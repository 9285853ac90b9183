//! Console diagnostics host.

use std::io::{self, Stdout, Write};

use recast_core::{Diagnostics, ExitRequest};
use recast_model::ExitCode;

/// Prints engine messages to a writer and routes warnings and errors
/// through `tracing`.
///
/// Quiet callbacks are only logged at debug level.
pub struct ConsoleDiagnostics<W: Write = Stdout> {
    out: W,
    terminate: bool,
    exit_code: Option<ExitCode>,
}

impl ConsoleDiagnostics<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleDiagnostics<W> {
    /// Host that never terminates the process.
    pub fn new(out: W) -> Self {
        Self {
            out,
            terminate: false,
            exit_code: None,
        }
    }

    /// Allow exit requests to end the process.
    #[must_use]
    pub fn with_termination(mut self, enable: bool) -> Self {
        self.terminate = enable;
        self
    }

    /// Code of the last exit request.
    pub fn exit_code(&self) -> Option<ExitCode> {
        self.exit_code
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one line of output.
    pub fn print(&mut self, text: &str) {
        if let Err(error) = writeln!(self.out, "{text}") {
            tracing::debug!(%error, "console write failed");
        }
    }

    fn wait_for_enter(&mut self) {
        self.print("Press Enter to exit");
        if let Err(error) = self.out.flush() {
            tracing::debug!(%error, "console flush failed");
        }
        let mut line = String::new();
        if let Err(error) = io::stdin().read_line(&mut line) {
            tracing::debug!(%error, "could not read from stdin");
        }
    }
}

impl<W: Write> Diagnostics for ConsoleDiagnostics<W> {
    fn message(&mut self, text: &str, quiet: bool) {
        if quiet {
            tracing::debug!(quiet, "{text}");
        } else {
            self.print(text);
        }
    }

    fn warning(&mut self, text: &str, quiet: bool) {
        if quiet {
            tracing::debug!(quiet, "warning: {text}");
        } else {
            tracing::warn!("{text}");
        }
    }

    fn error(&mut self, text: &str, quiet: bool) {
        if quiet {
            tracing::debug!(quiet, "error: {text}");
        } else {
            tracing::error!("{text}");
        }
    }

    fn exit(&mut self, request: &ExitRequest) {
        self.exit_code = Some(request.code);
        let code = request.code;

        if code.is_failure() {
            self.print(&format!("Error: {} (exit code {})", code.name(), code.code()));
        }
        match &request.message {
            Some(message) if request.quiet => tracing::debug!(quiet = true, "{message}"),
            Some(message) => self.print(message),
            None => {}
        }

        if request.pause {
            self.wait_for_enter();
        }
        if let Err(error) = self.out.flush() {
            tracing::debug!(%error, "console flush failed");
        }
        if request.terminate && self.terminate {
            std::process::exit(code.code());
        }
    }
}
