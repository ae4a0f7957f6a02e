use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::ColumnSpec;
use crate::store::TableStore;

/// Reports the filter control each column currently supports, so a front
/// end can build its widgets (and a CLI user can see what `--where` will
/// accept).
pub fn run<S: TableStore>(store: &S) -> Result<CmdResult> {
    let table = store.load()?;
    let specs = ColumnSpec::infer_all(&table);

    let mut result = CmdResult::default()
        .with_column_specs(specs)
        .with_total(table.len());
    if table.is_empty() {
        result.add_message(CmdMessage::info(
            "No records yet; every filter is inactive.",
        ));
    }
    Ok(result)
}
