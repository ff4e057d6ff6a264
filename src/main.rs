//! garlicd-config: resolve and inspect the effective garlicd
//! configuration.
//!
//! Runs the full resolution pass (command line over settings file over
//! defaults), applies the validation hook, and prints the merged
//! settings with their provenance.

use std::process::ExitCode;

use garlicd_config::{Outcome, resolve};

mod app;

use app::{exit_code, setup_tracing, validate};

fn main() -> ExitCode {
    setup_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let outcome = match resolve(&args) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{e}");
            return exit_code::CONFIG_ERROR;
        }
    };

    match outcome {
        Outcome::Help(text) => {
            print!("{text}");
            exit_code::SUCCESS
        }
        Outcome::Ready(settings) => {
            // Validation runs after the merge and before anything
            // trusts the settings.
            if let Err(e) = validate(&settings) {
                eprintln!("Configuration error: {e}");
                return exit_code::CONFIG_ERROR;
            }
            print!("{settings}");
            exit_code::SUCCESS
        }
    }
}
