use crate::commands::{CmdMessage, CmdResult, DisplayRow};
use crate::dedupe::{find_duplicates, DupResolution};
use crate::error::{IntakeError, Result};
use crate::model::{Draft, Record};
use crate::store::TableStore;

use super::helpers::numbered_rows;

/// Validates the draft and saves it, running the duplicate protocol.
///
/// When duplicates exist and no resolution was supplied, nothing is
/// persisted: the matching rows come back in `CmdResult::duplicates` so the
/// front end can ask, then call again with the chosen [`DupResolution`].
pub fn run<S: TableStore>(
    store: &mut S,
    draft: &Draft,
    resolution: Option<DupResolution>,
) -> Result<CmdResult> {
    let errors = crate::validate::validate(draft);
    if !errors.is_empty() {
        return Err(IntakeError::Validation(errors));
    }

    let record = Record::from_draft(draft);
    let mut table = store.load()?;
    let duplicates = find_duplicates(&table, &record);
    let mut result = CmdResult::default();

    if duplicates.is_empty() {
        table.push(record.clone());
        store.save(&table)?;
        result.rows = vec![DisplayRow {
            row_no: table.len(),
            record,
        }];
        result.total = table.len();
        result.add_message(CmdMessage::success("Record saved."));
        return Ok(result);
    }

    match resolution {
        None => {
            result.duplicates = numbered_rows(&table, &duplicates);
            result.total = table.len();
            result.add_message(CmdMessage::warning(format!(
                "Potential duplicate found: {} matching row(s). Nothing was saved.",
                duplicates.len()
            )));
        }
        Some(DupResolution::Replace) => {
            for &i in duplicates.iter().rev() {
                table.rows.remove(i);
            }
            table.push(record.clone());
            store.save(&table)?;
            result.rows = vec![DisplayRow {
                row_no: table.len(),
                record,
            }];
            result.total = table.len();
            result.add_message(CmdMessage::success(format!(
                "{} duplicate row(s) removed and new record saved.",
                duplicates.len()
            )));
        }
        Some(DupResolution::Keep) => {
            table.push(record.clone());
            store.save(&table)?;
            result.rows = vec![DisplayRow {
                row_no: table.len(),
                record,
            }];
            result.total = table.len();
            result.add_message(CmdMessage::success("Record saved (duplicates retained)."));
        }
        Some(DupResolution::Cancel) => {
            result.total = table.len();
            result.add_message(CmdMessage::info("Operation cancelled. No data saved."));
        }
    }

    Ok(result)
}
