//! # CLI Behavior
//!
//! This is **one possible UI client** for the intake registry—not the
//! application itself. The CLI is the only place that knows about terminal
//! I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Naked Execution (`intake`)
//!
//! Running `intake` with no arguments defaults to `intake list`. Browsing the
//! registry is the most common operation and should be the path of least
//! resistance.
//!
//! ## Duplicate Resolution
//!
//! `intake add` checks the registry for potential duplicates before saving.
//! When one is found and `--on-duplicate` was not given, the CLI shows the
//! matching rows and prompts for a decision—but only when stdin is a terminal.
//! In pipes and scripts it prints the rows plus a hint to re-run with
//! `--on-duplicate replace|keep|cancel`, so automation never blocks on input.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Output formatting (tables, filter summaries, colored messages)
//! - `setup`: Argument parsing via clap, version string

mod commands;
mod render;
mod setup;

pub use commands::run;
