//! # Storage Layer
//!
//! This module defines the storage abstraction for the registry. The
//! [`TableStore`] trait allows the application to work with different
//! storage backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (database, cloud, etc.) without changing core logic
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - The CSV file is authoritative and written on every save
//!   - An XLSX mirror is written next to it best-effort; a mirror failure
//!     is logged and swallowed, never surfaced
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── patients.csv        # The registry (header + one line per record)
//! ├── patients.xlsx       # Best-effort mirror of the same table
//! └── config.json         # Configuration
//! ```
//!
//! Loading repairs legacy files: missing columns come back as empty cells,
//! unknown columns are dropped, and entry dates are normalized to ISO form
//! with unparsable values coerced to the empty sentinel.

use crate::error::Result;
use crate::model::Table;

pub mod fs;
pub mod memory;

/// Abstract interface for registry storage.
pub trait TableStore {
    /// Load the whole table. A store with nothing persisted yet returns an
    /// empty table, not an error.
    fn load(&self) -> Result<Table>;

    /// Persist the whole table, replacing what was there.
    fn save(&mut self, table: &Table) -> Result<()>;
}
