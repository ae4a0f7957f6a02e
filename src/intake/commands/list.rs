use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::TableStore;

use super::helpers::{build_filter_config, numbered_rows};

/// Lists the registry, filtered by the given clauses and search term. Row
/// numbers refer to the full table, so a filtered listing still shows where
/// each row really lives.
pub fn run<S: TableStore>(
    store: &S,
    clauses: &[String],
    search: Option<String>,
) -> Result<CmdResult> {
    let table = store.load()?;
    let config = build_filter_config(&table, clauses, search)?;
    let keep = config.matching_rows(&table);

    let mut result = CmdResult::default()
        .with_rows(numbered_rows(&table, &keep))
        .with_total(table.len());

    if table.is_empty() {
        result.add_message(CmdMessage::info(
            "No records found. Add one with `intake add`.",
        ));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Showing {} of {} row(s)",
            keep.len(),
            table.len()
        )));
    }
    Ok(result)
}
