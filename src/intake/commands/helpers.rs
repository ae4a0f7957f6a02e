use super::DisplayRow;
use crate::error::{IntakeError, Result};
use crate::filter::{parse_clause, ColumnSpec, FilterConfig};
use crate::model::Table;

/// Pairs each surviving row position with its 1-based display number.
pub fn numbered_rows(table: &Table, positions: &[usize]) -> Vec<DisplayRow> {
    positions
        .iter()
        .map(|&i| DisplayRow {
            row_no: i + 1,
            record: table.rows[i].clone(),
        })
        .collect()
}

/// Builds a filter config from raw `--where` clauses and an optional search
/// term, validating every clause against the table's inferred column specs.
pub fn build_filter_config(
    table: &Table,
    clauses: &[String],
    search: Option<String>,
) -> Result<FilterConfig> {
    let specs = ColumnSpec::infer_all(table);
    let mut config = FilterConfig::new();
    for raw in clauses {
        let (column, filter) = parse_clause(raw, &specs)?;
        config.set(column, filter);
    }
    config.global_search = search;
    Ok(config)
}

/// Turns user row numbers into 0-based positions, sorted and de-duplicated.
/// Every number is checked before anything else happens, so a bad one
/// leaves the table untouched.
pub fn resolve_row_numbers(table: &Table, numbers: &[usize]) -> Result<Vec<usize>> {
    let mut positions = Vec::with_capacity(numbers.len());
    for &n in numbers {
        if n == 0 || n > table.len() {
            return Err(IntakeError::RowNotFound(n));
        }
        positions.push(n - 1);
    }
    positions.sort_unstable();
    positions.dedup();
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::TableStore;

    #[test]
    fn resolve_rejects_zero_and_out_of_range() {
        let store = StoreFixture::new().with_records(3).store;
        let table = store.load().unwrap();
        assert!(resolve_row_numbers(&table, &[0]).is_err());
        assert!(resolve_row_numbers(&table, &[4]).is_err());
        assert!(resolve_row_numbers(&table, &[1, 4]).is_err());
    }

    #[test]
    fn resolve_sorts_and_dedups() {
        let store = StoreFixture::new().with_records(5).store;
        let table = store.load().unwrap();
        assert_eq!(
            resolve_row_numbers(&table, &[5, 2, 2, 1]).unwrap(),
            vec![0, 1, 4]
        );
    }

    #[test]
    fn build_filter_config_reports_bad_clauses() {
        let store = StoreFixture::new().with_records(2).store;
        let table = store.load().unwrap();
        assert!(build_filter_config(&table, &["Ward=2".to_string()], None).is_err());
        let config =
            build_filter_config(&table, &[], Some("asha".to_string())).unwrap();
        assert!(!config.is_empty());
    }
}
