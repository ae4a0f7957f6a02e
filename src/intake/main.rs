//! # Intake CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/intake/cli/`,
//! while this file only invokes `cli::run()` and handles process
//! termination. Everything from the API facade inward is UI agnostic—see
//! the library documentation for the full layering.
//!
//! From the CLI vantage point:
//!
//! - `cli/setup.rs` — clap argument parsing and the version string
//! - `cli/commands.rs` — context wiring and per-command handlers
//! - `cli/render.rs` — tables, filter summaries, and colored messages
//!
//! Errors bubble up here as [`intake::error::IntakeError`]; the process
//! prints them to stderr and exits non-zero. No other module calls
//! `std::process::exit`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
