use thiserror::Error;

use crate::validate::FieldError;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Row not found: {0}")]
    RowNotFound(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<FieldError>),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
