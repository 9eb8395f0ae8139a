//! # czk CLI
//!
//! Command-line interface for the duplicate report planner.
//!
//! ## Usage
//! ```bash
//! czk test ~/Photos --media images --top 20
//! czk execute ~/Photos --out-dir ~/reports
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
