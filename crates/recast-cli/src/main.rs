//! recast command line.

use std::io;

use clap::Parser;
use recast_cli::cli::{Cli, Command};
use recast_cli::commands::{run_convert, run_exit_codes};
use recast_cli::console::ConsoleDiagnostics;
use recast_cli::logging::{init_logging, log_config_from_cli};
use recast_model::ExitCode;

fn main() {
    let cli = parse_cli();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(ExitCode::UnknownError.code());
    }
    let exit_code = match &cli.command {
        Command::Convert(args) => {
            let mut console = ConsoleDiagnostics::stdout().with_termination(true);
            run_convert(args, &mut console)
        }
        Command::ExitCodes => match run_exit_codes(&mut io::stdout()) {
            Ok(()) => ExitCode::InfoShown,
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::UnknownError
            }
        },
    };
    std::process::exit(exit_code.code());
}

/// Parses arguments; usage errors exit with `InvalidArgument`, help and
/// version output with `InfoShown`.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = if error.use_stderr() {
                ExitCode::InvalidArgument
            } else {
                ExitCode::InfoShown
            };
            if let Err(print_error) = error.print() {
                eprintln!("error: {print_error}");
            }
            std::process::exit(code.code());
        }
    }
}
