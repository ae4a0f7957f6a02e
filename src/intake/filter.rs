//! Column filtering.
//!
//! Filtering is adaptive: each column gets exactly one control, chosen by
//! inspecting the values it currently holds (`ColumnSpec::infer`), not by a
//! static schema. A `FilterConfig` then combines at most one `ColumnFilter`
//! per column with an optional global search; applying it is a pure function
//! of the table that preserves row order.

use chrono::NaiveDate;

use crate::error::{IntakeError, Result};
use crate::model::{parse_entry_date, Column, Record, Table};

/// Above this many distinct values a column is searched by substring
/// instead of offering every value as an option.
pub const MAX_OPTION_VALUES: usize = 50;

/// The filter control a column supports, inferred from its current values.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSpec {
    /// No non-blank values; the column cannot be filtered.
    Inactive,
    /// Entry dates spanning `min..=max`.
    DateRange { min: NaiveDate, max: NaiveDate },
    /// All values numeric, spanning `min..=max`.
    NumericRange { min: f64, max: f64 },
    /// All values numeric and identical; a range would be meaningless.
    NumericToggle { value: f64 },
    /// A small set of distinct values to pick from, sorted.
    OptionSet { options: Vec<String> },
    /// Too many distinct values to enumerate; matched by substring.
    FreeText { distinct: usize },
}

impl ColumnSpec {
    /// Chooses the control for one column. The date column only ever gets a
    /// date range; other columns degrade from numeric range to option set to
    /// free text as their values demand.
    pub fn infer(table: &Table, column: Column) -> ColumnSpec {
        let cells: Vec<&str> = table
            .column_values(column)
            .filter(|c| !c.trim().is_empty())
            .collect();
        if cells.is_empty() {
            return ColumnSpec::Inactive;
        }

        if column == Column::EntryDate {
            let dates: Vec<NaiveDate> =
                cells.iter().filter_map(|c| parse_entry_date(c)).collect();
            return match (dates.iter().min(), dates.iter().max()) {
                (Some(&min), Some(&max)) => ColumnSpec::DateRange { min, max },
                _ => ColumnSpec::Inactive,
            };
        }

        let numbers: Option<Vec<f64>> = cells.iter().map(|c| parse_number(c)).collect();
        if let Some(numbers) = numbers {
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            return if min < max {
                ColumnSpec::NumericRange { min, max }
            } else {
                ColumnSpec::NumericToggle { value: min }
            };
        }

        let mut options: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        options.sort();
        options.dedup();
        if options.len() <= MAX_OPTION_VALUES {
            ColumnSpec::OptionSet { options }
        } else {
            ColumnSpec::FreeText {
                distinct: options.len(),
            }
        }
    }

    /// Inference for every column, in table order.
    pub fn infer_all(table: &Table) -> Vec<(Column, ColumnSpec)> {
        Column::ALL
            .into_iter()
            .map(|c| (c, ColumnSpec::infer(table, c)))
            .collect()
    }

    /// Short human description, used in errors and the `filters` listing.
    pub fn describe(&self) -> String {
        match self {
            ColumnSpec::Inactive => "inactive (no values)".to_string(),
            ColumnSpec::DateRange { min, max } => format!("date range {} .. {}", min, max),
            ColumnSpec::NumericRange { min, max } => {
                format!("numeric range {} .. {}", fmt_number(*min), fmt_number(*max))
            }
            ColumnSpec::NumericToggle { value } => {
                format!("equality toggle (every value is {})", fmt_number(*value))
            }
            ColumnSpec::OptionSet { options } => format!("choice of {} value(s)", options.len()),
            ColumnSpec::FreeText { distinct } => {
                format!("substring search ({} distinct values)", distinct)
            }
        }
    }
}

/// One active filter on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    /// Keep rows whose date parses and falls inside `from..=to`.
    DateRange { from: NaiveDate, to: NaiveDate },
    /// Keep rows whose value parses and falls inside `lo..=hi`.
    NumericRange { lo: f64, hi: f64 },
    /// Keep rows whose value parses and equals `value` exactly.
    NumericEquals { value: f64 },
    /// Keep rows whose cell equals one of the selected values. An empty
    /// selection keeps everything.
    OneOf { selected: Vec<String> },
    /// Keep rows whose cell contains the pattern, case-insensitively. An
    /// empty pattern keeps everything.
    Substring { pattern: String },
}

impl ColumnFilter {
    /// Whether a single cell satisfies this filter. Cells that fail to
    /// parse as the expected shape never match.
    pub fn matches(&self, cell: &str) -> bool {
        match self {
            ColumnFilter::DateRange { from, to } => {
                parse_entry_date(cell).is_some_and(|d| *from <= d && d <= *to)
            }
            ColumnFilter::NumericRange { lo, hi } => {
                parse_number(cell).is_some_and(|v| *lo <= v && v <= *hi)
            }
            ColumnFilter::NumericEquals { value } => {
                parse_number(cell).is_some_and(|v| v == *value)
            }
            ColumnFilter::OneOf { selected } => {
                selected.is_empty() || selected.iter().any(|s| s == cell)
            }
            ColumnFilter::Substring { pattern } => {
                pattern.is_empty() || cell.to_lowercase().contains(&pattern.to_lowercase())
            }
        }
    }
}

/// A full filter pass: per-column filters ANDed together, then the global
/// search term ORed across the text-shaped columns.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub filters: Vec<(Column, ColumnFilter)>,
    pub global_search: Option<String>,
}

impl FilterConfig {
    pub fn new() -> Self {
        FilterConfig::default()
    }

    /// Sets the filter for a column, replacing any previous one.
    pub fn set(&mut self, column: Column, filter: ColumnFilter) {
        if let Some(entry) = self.filters.iter_mut().find(|(c, _)| *c == column) {
            entry.1 = filter;
        } else {
            self.filters.push((column, filter));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
            && self
                .global_search
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
    }

    /// Positions of the rows that survive, in table order.
    pub fn matching_rows(&self, table: &Table) -> Vec<usize> {
        let term = self
            .global_search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        let searchable = match term {
            Some(_) => searchable_columns(&ColumnSpec::infer_all(table)),
            None => Vec::new(),
        };

        table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.row_matches(row, term.as_deref(), &searchable))
            .map(|(i, _)| i)
            .collect()
    }

    /// Materializes the surviving rows as a new table.
    pub fn apply(&self, table: &Table) -> Table {
        Table {
            rows: self
                .matching_rows(table)
                .into_iter()
                .map(|i| table.rows[i].clone())
                .collect(),
        }
    }

    fn row_matches(&self, row: &Record, term: Option<&str>, searchable: &[Column]) -> bool {
        if !self.filters.iter().all(|(c, f)| f.matches(row.get(*c))) {
            return false;
        }
        match term {
            None => true,
            Some(t) => searchable
                .iter()
                .any(|c| row.get(*c).to_lowercase().contains(t)),
        }
    }
}

/// Columns the global search looks at: everything that did not infer as
/// numeric. The date column participates; blank columns simply never match.
pub fn searchable_columns(specs: &[(Column, ColumnSpec)]) -> Vec<Column> {
    specs
        .iter()
        .filter(|(_, spec)| {
            !matches!(
                spec,
                ColumnSpec::NumericRange { .. } | ColumnSpec::NumericToggle { .. }
            )
        })
        .map(|(c, _)| *c)
        .collect()
}

/// Parses one `COLUMN=SPEC` / `COLUMN~PATTERN` clause against the inferred
/// specs. The operator decides the family; the column's spec decides what
/// the right-hand side may contain.
pub fn parse_clause(
    raw: &str,
    specs: &[(Column, ColumnSpec)],
) -> Result<(Column, ColumnFilter)> {
    let op_pos = raw.find(['=', '~']).ok_or_else(|| {
        IntakeError::Api(format!(
            "Invalid filter '{}': expected COLUMN=SPEC or COLUMN~PATTERN",
            raw
        ))
    })?;
    let (label, rest) = raw.split_at(op_pos);
    let op = rest.as_bytes()[0] as char;
    let value = &rest[1..];

    let column = Column::from_label(label)
        .ok_or_else(|| IntakeError::Api(format!("Unknown column: '{}'", label.trim())))?;
    let spec = specs
        .iter()
        .find(|(c, _)| *c == column)
        .map(|(_, s)| s)
        .ok_or_else(|| IntakeError::Api(format!("No spec inferred for {}", column)))?;

    if op == '~' {
        return match spec {
            ColumnSpec::OptionSet { .. } | ColumnSpec::FreeText { .. } => {
                Ok((
                    column,
                    ColumnFilter::Substring {
                        pattern: value.to_string(),
                    },
                ))
            }
            _ => Err(IntakeError::Api(format!(
                "{} is {}; substring filters apply to text columns",
                column,
                spec.describe()
            ))),
        };
    }

    let filter = match spec {
        ColumnSpec::Inactive => {
            return Err(IntakeError::Api(format!(
                "{} has no values to filter",
                column
            )))
        }
        ColumnSpec::DateRange { .. } => {
            let (from, to) = match value.split_once("..") {
                Some((a, b)) => (parse_clause_date(a)?, parse_clause_date(b)?),
                None => {
                    let d = parse_clause_date(value)?;
                    (d, d)
                }
            };
            if from > to {
                return Err(IntakeError::Api(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    from, to
                )));
            }
            ColumnFilter::DateRange { from, to }
        }
        ColumnSpec::NumericRange { .. } => match value.split_once("..") {
            Some((a, b)) => {
                let lo = parse_clause_number(a)?;
                let hi = parse_clause_number(b)?;
                if lo > hi {
                    return Err(IntakeError::Api(format!(
                        "Invalid range: start ({}) must be <= end ({})",
                        fmt_number(lo),
                        fmt_number(hi)
                    )));
                }
                ColumnFilter::NumericRange { lo, hi }
            }
            None => ColumnFilter::NumericEquals {
                value: parse_clause_number(value)?,
            },
        },
        ColumnSpec::NumericToggle { .. } => {
            if value.contains("..") {
                return Err(IntakeError::Api(format!(
                    "{} holds a single value; use {}=VALUE",
                    column, column
                )));
            }
            ColumnFilter::NumericEquals {
                value: parse_clause_number(value)?,
            }
        }
        ColumnSpec::OptionSet { options } => {
            let mut selected = Vec::new();
            for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let canonical = options
                    .iter()
                    .find(|o| o.to_lowercase() == part.to_lowercase())
                    .ok_or_else(|| {
                        IntakeError::Api(format!(
                            "Unknown value '{}' for {}; expected one of: {}",
                            part,
                            column,
                            options.join(", ")
                        ))
                    })?;
                selected.push(canonical.clone());
            }
            ColumnFilter::OneOf { selected }
        }
        ColumnSpec::FreeText { .. } => {
            return Err(IntakeError::Api(format!(
                "{} holds free text; use {}~PATTERN to match a substring",
                column, column
            )))
        }
    };
    Ok((column, filter))
}

fn parse_clause_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        IntakeError::Api(format!("Invalid date '{}': expected YYYY-MM-DD", raw.trim()))
    })
}

fn parse_clause_number(raw: &str) -> Result<f64> {
    parse_number(raw).ok_or_else(|| IntakeError::Api(format!("Invalid number: '{}'", raw.trim())))
}

/// A cell counts as numeric when it parses to a finite float.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integers render without a trailing `.0`.
pub(crate) fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, doctor: &str, city: &str, goal: &str) -> Record {
        Record {
            entry_date: date.to_string(),
            doctor_name: doctor.to_string(),
            area_code: "560001".to_string(),
            city: city.to_string(),
            patient_name: format!("{} patient", doctor),
            mobile_no: "9876543210".to_string(),
            disease: "Flu".to_string(),
            goal_amount: goal.to_string(),
        }
    }

    fn sample_table() -> Table {
        Table {
            rows: vec![
                record("2024-01-10", "Dr. Rao", "Pune", "100"),
                record("2024-02-05", "Dr. Mehta", "Mumbai", "200"),
                record("2024-03-01", "Dr. Rao", "Pune", "300"),
                record("2024-03-20", "Dr. Kumar", "Nashik", "400"),
                record("2024-04-15", "Dr. Mehta", "Mumbai", "500"),
            ],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn infers_date_range_for_entry_date() {
        let spec = ColumnSpec::infer(&sample_table(), Column::EntryDate);
        assert_eq!(
            spec,
            ColumnSpec::DateRange {
                min: date(2024, 1, 10),
                max: date(2024, 4, 15),
            }
        );
    }

    #[test]
    fn infers_numeric_range_when_values_spread() {
        let spec = ColumnSpec::infer(&sample_table(), Column::GoalAmount);
        assert_eq!(spec, ColumnSpec::NumericRange { min: 100.0, max: 500.0 });
    }

    #[test]
    fn infers_toggle_when_every_value_is_equal() {
        let spec = ColumnSpec::infer(&sample_table(), Column::AreaCode);
        assert_eq!(spec, ColumnSpec::NumericToggle { value: 560001.0 });
    }

    #[test]
    fn infers_option_set_for_small_text_columns() {
        let spec = ColumnSpec::infer(&sample_table(), Column::City);
        assert_eq!(
            spec,
            ColumnSpec::OptionSet {
                options: vec![
                    "Mumbai".to_string(),
                    "Nashik".to_string(),
                    "Pune".to_string(),
                ],
            }
        );
    }

    #[test]
    fn infers_free_text_above_the_option_limit() {
        let mut table = Table::new();
        for i in 0..(MAX_OPTION_VALUES + 1) {
            table.push(record("2024-01-10", "Dr. Rao", &format!("City {}", i), "100"));
        }
        match ColumnSpec::infer(&table, Column::City) {
            ColumnSpec::FreeText { distinct } => assert_eq!(distinct, MAX_OPTION_VALUES + 1),
            other => panic!("expected free text, got {:?}", other),
        }
    }

    #[test]
    fn blank_column_is_inactive() {
        let mut table = sample_table();
        for row in &mut table.rows {
            row.disease = "  ".to_string();
        }
        assert_eq!(ColumnSpec::infer(&table, Column::Disease), ColumnSpec::Inactive);
        assert_eq!(ColumnSpec::infer(&Table::new(), Column::City), ColumnSpec::Inactive);
    }

    #[test]
    fn legacy_text_in_a_numeric_column_demotes_it() {
        let mut table = sample_table();
        table.rows[2].goal_amount = "pending".to_string();
        let spec = ColumnSpec::infer(&table, Column::GoalAmount);
        assert!(matches!(spec, ColumnSpec::OptionSet { .. }));
    }

    #[test]
    fn unparsable_dates_leave_the_date_column_inactive() {
        let mut table = sample_table();
        for row in &mut table.rows {
            row.entry_date = "soon".to_string();
        }
        assert_eq!(ColumnSpec::infer(&table, Column::EntryDate), ColumnSpec::Inactive);
    }

    #[test]
    fn numeric_range_bounds_are_inclusive() {
        let table = sample_table();
        let mut config = FilterConfig::new();
        config.set(
            Column::GoalAmount,
            ColumnFilter::NumericRange { lo: 200.0, hi: 400.0 },
        );
        assert_eq!(config.matching_rows(&table), vec![1, 2, 3]);
    }

    #[test]
    fn degenerate_numeric_range_matches_exact_values_only() {
        let table = sample_table();
        let mut config = FilterConfig::new();
        config.set(
            Column::GoalAmount,
            ColumnFilter::NumericRange { lo: 300.0, hi: 300.0 },
        );
        assert_eq!(config.matching_rows(&table), vec![2]);
    }

    #[test]
    fn date_filter_drops_rows_whose_date_does_not_parse() {
        let mut table = sample_table();
        table.rows[1].entry_date = String::new();
        let mut config = FilterConfig::new();
        config.set(
            Column::EntryDate,
            ColumnFilter::DateRange {
                from: date(2024, 1, 1),
                to: date(2024, 12, 31),
            },
        );
        assert_eq!(config.matching_rows(&table), vec![0, 2, 3, 4]);
    }

    #[test]
    fn empty_selection_and_empty_pattern_keep_everything() {
        let table = sample_table();
        let mut config = FilterConfig::new();
        config.set(Column::City, ColumnFilter::OneOf { selected: vec![] });
        config.set(
            Column::DoctorName,
            ColumnFilter::Substring {
                pattern: String::new(),
            },
        );
        assert_eq!(config.matching_rows(&table).len(), table.len());
    }

    #[test]
    fn default_config_returns_the_table_unchanged() {
        let table = sample_table();
        let filtered = FilterConfig::default().apply(&table);
        assert_eq!(filtered, table);
        assert!(FilterConfig::default().apply(&Table::new()).is_empty());
    }

    #[test]
    fn filters_compose_with_and_semantics_preserving_order() {
        let table = sample_table();
        let mut config = FilterConfig::new();
        config.set(
            Column::City,
            ColumnFilter::OneOf {
                selected: vec!["Pune".to_string(), "Mumbai".to_string()],
            },
        );
        config.set(
            Column::GoalAmount,
            ColumnFilter::NumericRange { lo: 150.0, hi: 600.0 },
        );
        assert_eq!(config.matching_rows(&table), vec![1, 2, 4]);
    }

    #[test]
    fn date_range_and_substring_compose() {
        let table = Table {
            rows: vec![
                record("2024-02-01", "Dr. Rao", "Pune", "100"),
                record("2024-02-15", "Dr. Mehta", "Mumbai", "200"),
                record("2024-06-01", "Dr. Rao", "Pune", "300"),
                record("eventually", "Dr. Rao", "Pune", "400"),
            ],
        };
        let mut config = FilterConfig::new();
        config.set(
            Column::EntryDate,
            ColumnFilter::DateRange {
                from: date(2024, 1, 1),
                to: date(2024, 3, 31),
            },
        );
        config.set(
            Column::DoctorName,
            ColumnFilter::Substring {
                pattern: "rao".to_string(),
            },
        );
        // Only row 0 is both in the window and a Rao row; the last row
        // matches the substring but its date never satisfies a range.
        assert_eq!(config.matching_rows(&table), vec![0]);
    }

    #[test]
    fn substring_matching_is_case_insensitive() {
        let table = sample_table();
        let mut config = FilterConfig::new();
        config.set(
            Column::DoctorName,
            ColumnFilter::Substring {
                pattern: "MEHTA".to_string(),
            },
        );
        assert_eq!(config.matching_rows(&table), vec![1, 4]);
    }

    #[test]
    fn global_search_skips_numeric_columns() {
        let table = sample_table();
        // "200" appears only in Goal Amount, which is numeric-shaped.
        let config = FilterConfig {
            filters: Vec::new(),
            global_search: Some("200".to_string()),
        };
        assert!(config.matching_rows(&table).is_empty());

        let config = FilterConfig {
            filters: Vec::new(),
            global_search: Some("nash".to_string()),
        };
        assert_eq!(config.matching_rows(&table), vec![3]);
    }

    #[test]
    fn global_search_includes_the_date_column() {
        let table = sample_table();
        let config = FilterConfig {
            filters: Vec::new(),
            global_search: Some("2024-03".to_string()),
        };
        assert_eq!(config.matching_rows(&table), vec![2, 3]);
    }

    #[test]
    fn blank_search_term_keeps_everything() {
        let table = sample_table();
        let config = FilterConfig {
            filters: Vec::new(),
            global_search: Some("   ".to_string()),
        };
        assert_eq!(config.matching_rows(&table).len(), table.len());
    }

    #[test]
    fn parse_clause_builds_filters_by_spec() {
        let table = sample_table();
        let specs = ColumnSpec::infer_all(&table);

        let (column, filter) = parse_clause("Goal Amount=200..400", &specs).unwrap();
        assert_eq!(column, Column::GoalAmount);
        assert_eq!(filter, ColumnFilter::NumericRange { lo: 200.0, hi: 400.0 });

        let (_, filter) = parse_clause("Entry Date=2024-01-01..2024-02-28", &specs).unwrap();
        assert_eq!(
            filter,
            ColumnFilter::DateRange {
                from: date(2024, 1, 1),
                to: date(2024, 2, 28),
            }
        );

        let (_, filter) = parse_clause("City=pune,Mumbai", &specs).unwrap();
        assert_eq!(
            filter,
            ColumnFilter::OneOf {
                selected: vec!["Pune".to_string(), "Mumbai".to_string()],
            }
        );

        let (_, filter) = parse_clause("Doctor Name~rao", &specs).unwrap();
        assert_eq!(
            filter,
            ColumnFilter::Substring {
                pattern: "rao".to_string(),
            }
        );

        let (_, filter) = parse_clause("Area Code=560001", &specs).unwrap();
        assert_eq!(filter, ColumnFilter::NumericEquals { value: 560001.0 });
    }

    #[test]
    fn parse_clause_rejects_malformed_input() {
        let table = sample_table();
        let specs = ColumnSpec::infer_all(&table);

        assert!(parse_clause("no operator here", &specs).is_err());
        assert!(parse_clause("Ward=abc", &specs).is_err());
        assert!(parse_clause("City=Atlantis", &specs).is_err());
        assert!(parse_clause("Goal Amount=400..200", &specs).is_err());
        assert!(parse_clause("Goal Amount=abc", &specs).is_err());
        assert!(parse_clause("Entry Date=whenever", &specs).is_err());
        assert!(parse_clause("Goal Amount~9", &specs).is_err());
        assert!(parse_clause("Area Code=1..9", &specs).is_err());
    }

    #[test]
    fn parse_clause_on_single_date_means_that_day() {
        let table = sample_table();
        let specs = ColumnSpec::infer_all(&table);
        let (_, filter) = parse_clause("Entry Date=2024-02-05", &specs).unwrap();
        assert_eq!(
            filter,
            ColumnFilter::DateRange {
                from: date(2024, 2, 5),
                to: date(2024, 2, 5),
            }
        );
    }

    #[test]
    fn fmt_number_drops_integral_fraction() {
        assert_eq!(fmt_number(500.0), "500");
        assert_eq!(fmt_number(2.5), "2.5");
    }
}
