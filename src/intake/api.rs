//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as
//! the single entry point for all registry operations, regardless of the UI
//! being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over TableStore
//!
//! `IntakeApi<S: TableStore>` is generic over the storage backend:
//! - Production: `IntakeApi<FileStore>`
//! - Testing: `IntakeApi<InMemoryStore>`
//!
//! This enables testing the API layer without touching the filesystem.

use crate::commands;
use crate::dedupe::DupResolution;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::model::Draft;
use crate::store::TableStore;
use std::path::{Path, PathBuf};

/// The main API facade for registry operations.
///
/// Generic over `TableStore` to allow different storage backends.
/// All UI clients (CLI, web, etc.) should interact through this API.
pub struct IntakeApi<S: TableStore> {
    store: S,
    data_dir: PathBuf,
}

impl<S: TableStore> IntakeApi<S> {
    pub fn new(store: S, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn add_record(
        &mut self,
        draft: &Draft,
        resolution: Option<DupResolution>,
    ) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, draft, resolution)
    }

    pub fn list_records(
        &self,
        clauses: &[String],
        search: Option<String>,
    ) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, clauses, search)
    }

    pub fn delete_rows(&mut self, numbers: &[usize]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, numbers)
    }

    pub fn export(
        &self,
        out_dir: &Path,
        format: ExportFormat,
        view: ExportView,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, out_dir, format, view)
    }

    pub fn filters(&self) -> Result<commands::CmdResult> {
        commands::filters::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn backup(&self, out_dir: &Path) -> Result<commands::CmdResult> {
        commands::backup::run(&self.store, &self.data_dir, out_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::ExportView;
pub use crate::commands::{CmdMessage, CmdResult, DisplayRow, MessageLevel};
