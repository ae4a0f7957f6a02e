use crate::config::IntakeConfig;
use crate::filter::ColumnSpec;
use crate::model::{Column, Record};

pub mod add;
pub mod backup;
pub mod config;
pub mod delete;
pub mod export;
pub mod filters;
pub mod helpers;
pub mod list;

/// A record paired with its user-facing row number. Numbers are 1-based
/// and refer to the full table, so they stay stable across filtered views.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub row_no: usize,
    pub record: Record,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Rows to display, already filtered and numbered.
    pub rows: Vec<DisplayRow>,
    /// Rows that collide with a record the caller tried to add.
    pub duplicates: Vec<DisplayRow>,
    /// Size of the full table the rows were drawn from.
    pub total: usize,
    /// Inferred filter control per column, for the `filters` command.
    pub column_specs: Vec<(Column, ColumnSpec)>,
    pub config: Option<IntakeConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_rows(mut self, rows: Vec<DisplayRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_duplicates(mut self, duplicates: Vec<DisplayRow>) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    pub fn with_column_specs(mut self, specs: Vec<(Column, ColumnSpec)>) -> Self {
        self.column_specs = specs;
        self
    }

    pub fn with_config(mut self, config: IntakeConfig) -> Self {
        self.config = Some(config);
        self
    }
}
