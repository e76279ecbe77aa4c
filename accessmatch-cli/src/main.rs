//! Entry point for the `accessmatch` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use accessmatch_cli::CliError;

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn main() -> ExitCode {
    match accessmatch_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            if let Err(print_failure) = err.print() {
                eprintln!("accessmatch: {print_failure}");
            }
            ExitCode::from(code)
        }
        Err(err) => {
            eprintln!("accessmatch: {err}");
            ExitCode::FAILURE
        }
    }
}
