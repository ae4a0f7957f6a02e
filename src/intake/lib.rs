//! # Intake Architecture
//!
//! Intake is a **UI-agnostic registry library**. This is not a CLI application that happens
//! to have some library code—it's a library that happens to have a CLI client.
//!
//! This distinction drives the entire architecture and should guide all development.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract TableStore trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Registry
//!
//! The data is one fixed-shape table: eight named columns, persisted as a
//! CSV file that is the single source of truth, with a best-effort XLSX
//! mirror written next to it. Rows are addressed by their 1-based position.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a web form, a REST API, or any other UI.
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`validate`, `dedupe`, `filter`, `export`): Thorough unit
//!    tests of the pure logic. This is where the lion's share of testing lives.
//!
//! 2. **Commands** (`commands/*.rs`): Tests against `InMemoryStore`, plus
//!    `tempfile` where a command writes real files.
//!
//! 3. **CLI** (`cli/` + thin `main.rs`): End-to-end tests driving the
//!    binary (`tests/cli_e2e.rs`).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Column`, `Record`, `Draft`, `Table`)
//! - [`validate`]: Field validation with accumulated errors
//! - [`dedupe`]: Duplicate detection and resolution outcomes
//! - [`filter`]: Adaptive per-column filtering and global search
//! - [`export`]: CSV/XLSX byte-level exporters
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod store;
pub mod validate;
