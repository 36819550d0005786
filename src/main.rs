//! Shellmate - terminal assistant for shell questions

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = shellmate_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
