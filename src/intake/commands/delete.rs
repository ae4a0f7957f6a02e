use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::TableStore;

use super::helpers::resolve_row_numbers;

/// Deletes rows by their 1-based numbers. All numbers are validated before
/// the first removal, so a typo cannot half-apply.
pub fn run<S: TableStore>(store: &mut S, numbers: &[usize]) -> Result<CmdResult> {
    let mut table = store.load()?;
    let positions = resolve_row_numbers(&table, numbers)?;
    let mut result = CmdResult::default();

    for &i in &positions {
        let record = &table.rows[i];
        result.add_message(CmdMessage::success(format!(
            "Row {} deleted: {} ({})",
            i + 1,
            record.patient_name,
            record.mobile_no
        )));
    }
    for &i in positions.iter().rev() {
        table.rows.remove(i);
    }
    store.save(&table)?;

    result.total = table.len();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} row(s).",
        positions.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deletes_the_requested_rows() {
        let mut store = StoreFixture::new().with_records(4).store;
        let result = run(&mut store, &[2, 4]).unwrap();

        let table = store.load().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].patient_name, "Patient 1");
        assert_eq!(table.rows[1].patient_name, "Patient 3");
        assert_eq!(result.total, 2);
    }

    #[test]
    fn an_invalid_number_aborts_before_any_removal() {
        let mut store = StoreFixture::new().with_records(3).store;
        assert!(run(&mut store, &[1, 9]).is_err());
        assert_eq!(store.load().unwrap().len(), 3);
    }

    #[test]
    fn repeated_numbers_delete_once() {
        let mut store = StoreFixture::new().with_records(3).store;
        run(&mut store, &[2, 2]).unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn messages_name_patient_and_mobile() {
        let mut store = StoreFixture::new()
            .with_record("Dr. Rao", "Asha", "9876543210")
            .store;
        let result = run(&mut store, &[1]).unwrap();
        assert_eq!(result.messages[0].content, "Row 1 deleted: Asha (9876543210)");
    }
}
