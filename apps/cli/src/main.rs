//! # PEX
//!
//! Entry point for the `pex` command.
//!
//! Exit status: 0 on success, 2 for validation/not-found errors, 3 for a
//! rejected login, 4 for an unreadable backup, 1 for anything else.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match pex_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.code.exit_code())
        }
    }
}
