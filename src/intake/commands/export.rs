use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::{artifact_name, csv_bytes, xlsx_or_csv_bytes, ExportFormat};
use crate::store::TableStore;
use std::fs;
use std::path::Path;

use super::helpers::build_filter_config;

/// Which rows an export covers.
#[derive(Debug, Clone)]
pub enum ExportView {
    Full,
    Filtered {
        clauses: Vec<String>,
        search: Option<String>,
    },
}

/// Writes the requested artifact into `out_dir` under its fixed name.
/// The artifact always materializes: an XLSX request degrades to CSV bytes
/// when the workbook cannot be built.
pub fn run<S: TableStore>(
    store: &S,
    out_dir: &Path,
    format: ExportFormat,
    view: ExportView,
) -> Result<CmdResult> {
    let table = store.load()?;
    let (table, filtered) = match view {
        ExportView::Full => (table, false),
        ExportView::Filtered { clauses, search } => {
            let config = build_filter_config(&table, &clauses, search)?;
            (config.apply(&table), true)
        }
    };

    let bytes = match format {
        ExportFormat::Csv => csv_bytes(&table)?,
        ExportFormat::Xlsx => xlsx_or_csv_bytes(&table)?,
    };
    let filename = artifact_name(filtered, format);
    let path = out_dir.join(&filename);
    fs::write(&path, &bytes)?;

    let mut result = CmdResult::default().with_total(table.len());
    result.add_message(CmdMessage::success(format!(
        "Exported {} row(s) to {}",
        table.len(),
        path.display()
    )));
    Ok(result)
}
