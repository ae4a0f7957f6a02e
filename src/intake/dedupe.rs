//! Duplicate detection for incoming records. A row counts as a duplicate
//! when doctor and patient names match case-insensitively and the mobile
//! number matches exactly.

use crate::model::{Record, Table};

/// How the caller wants a detected duplicate handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DupResolution {
    /// Remove the matching rows, then append the new record.
    Replace,
    /// Append the new record and keep the matches.
    Keep,
    /// Save nothing.
    Cancel,
}

/// Positions of all rows that collide with `candidate`. Row order is
/// preserved so callers can show the matches as they appear in the table.
pub fn find_duplicates(table: &Table, candidate: &Record) -> Vec<usize> {
    let doctor = candidate.doctor_name.trim().to_lowercase();
    let patient = candidate.patient_name.trim().to_lowercase();
    let mobile = candidate.mobile_no.trim();

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.doctor_name.to_lowercase() == doctor
                && row.patient_name.to_lowercase() == patient
                && row.mobile_no == mobile
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(doctor: &str, patient: &str, mobile: &str) -> Record {
        Record {
            entry_date: "2024-01-15".to_string(),
            doctor_name: doctor.to_string(),
            area_code: "560001".to_string(),
            city: "Bengaluru".to_string(),
            patient_name: patient.to_string(),
            mobile_no: mobile.to_string(),
            disease: "Flu".to_string(),
            goal_amount: "250".to_string(),
        }
    }

    fn table_with(rows: Vec<Record>) -> Table {
        Table { rows }
    }

    #[test]
    fn matches_are_case_insensitive_on_names() {
        let table = table_with(vec![record("Dr. Rao", "Asha", "9876543210")]);
        let candidate = record("DR. RAO", "asha", "9876543210");
        assert_eq!(find_duplicates(&table, &candidate), vec![0]);
    }

    #[test]
    fn mobile_comparison_is_exact() {
        let table = table_with(vec![record("Dr. Rao", "Asha", "9876543210")]);
        let candidate = record("Dr. Rao", "Asha", "9876543211");
        assert!(find_duplicates(&table, &candidate).is_empty());
    }

    #[test]
    fn all_three_fields_must_match() {
        let table = table_with(vec![
            record("Dr. Rao", "Asha", "9876543210"),
            record("Dr. Rao", "Beena", "9876543210"),
            record("Dr. Mehta", "Asha", "9876543210"),
        ]);
        let candidate = record("dr. rao", "Asha", "9876543210");
        assert_eq!(find_duplicates(&table, &candidate), vec![0]);
    }

    #[test]
    fn reports_every_matching_row_in_order() {
        let table = table_with(vec![
            record("Dr. Rao", "Asha", "9876543210"),
            record("Dr. Mehta", "Beena", "9123456780"),
            record("dr. rao", "ASHA", "9876543210"),
        ]);
        let candidate = record("Dr. Rao", "Asha", "9876543210");
        assert_eq!(find_duplicates(&table, &candidate), vec![0, 2]);
    }

    #[test]
    fn candidate_whitespace_is_ignored() {
        let table = table_with(vec![record("Dr. Rao", "Asha", "9876543210")]);
        let candidate = record("  Dr. Rao ", " Asha", " 9876543210 ");
        assert_eq!(find_duplicates(&table, &candidate), vec![0]);
    }
}
