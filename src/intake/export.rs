//! Byte-level exporters. CSV is the authoritative format and always
//! succeeds for a well-formed table; XLSX is produced when the `xlsx`
//! feature is compiled in and silently replaced by CSV bytes otherwise, so
//! a requested download never comes back empty-handed.

use tracing::warn;

use crate::error::{IntakeError, Result};
use crate::model::{Column, Table};

pub const FULL_STEM: &str = "patients_full";
pub const FILTERED_STEM: &str = "patients_filtered";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Fixed artifact names: `patients_full.*` for the whole registry,
/// `patients_filtered.*` for the current view.
pub fn artifact_name(filtered: bool, format: ExportFormat) -> String {
    let stem = if filtered { FILTERED_STEM } else { FULL_STEM };
    format!("{}.{}", stem, format.extension())
}

/// Serializes the table as CSV: header row, then one line per record.
pub fn csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Column::ALL.iter().map(|c| c.label()))?;
    for record in &table.rows {
        writer.write_record(Column::ALL.iter().map(|&c| record.get(c)))?;
    }
    writer
        .into_inner()
        .map_err(|e| IntakeError::Export(e.to_string()))
}

/// Serializes the table as a single-sheet workbook. Cells in numeric-shaped
/// columns are written as numbers so spreadsheet tools see them as such;
/// everything else stays text.
#[cfg(feature = "xlsx")]
pub fn try_xlsx_bytes(table: &Table) -> Result<Vec<u8>> {
    use rust_xlsxwriter::Workbook;

    use crate::filter::{parse_number, ColumnSpec};

    let numeric: Vec<bool> = Column::ALL
        .iter()
        .map(|&c| {
            matches!(
                ColumnSpec::infer(table, c),
                ColumnSpec::NumericRange { .. } | ColumnSpec::NumericToggle { .. }
            )
        })
        .collect();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (ci, column) in Column::ALL.iter().enumerate() {
        sheet
            .write_string(0, ci as u16, column.label())
            .map_err(|e| IntakeError::Export(e.to_string()))?;
    }
    for (ri, record) in table.rows.iter().enumerate() {
        for (ci, &column) in Column::ALL.iter().enumerate() {
            let cell = record.get(column);
            let row = (ri + 1) as u32;
            let col = ci as u16;
            let written = match parse_number(cell) {
                Some(n) if numeric[ci] => sheet.write_number(row, col, n),
                _ => sheet.write_string(row, col, cell),
            };
            written.map_err(|e| IntakeError::Export(e.to_string()))?;
        }
    }
    workbook
        .save_to_buffer()
        .map_err(|e| IntakeError::Export(e.to_string()))
}

#[cfg(not(feature = "xlsx"))]
pub fn try_xlsx_bytes(_table: &Table) -> Result<Vec<u8>> {
    Err(IntakeError::Export(
        "XLSX support is not compiled in (enable the `xlsx` feature)".to_string(),
    ))
}

/// The export path never refuses: when XLSX generation is unavailable or
/// fails, the caller gets CSV bytes and a warning in the log.
pub fn xlsx_or_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    match try_xlsx_bytes(table) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            warn!("xlsx export unavailable, falling back to csv bytes: {}", e);
            csv_bytes(table)
        }
    }
}
