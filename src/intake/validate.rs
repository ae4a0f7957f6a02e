//! Field validation for new records. Every failing field produces its own
//! error so the caller can surface all of them at once.

use crate::model::{Column, Draft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Column,
    pub message: String,
}

impl FieldError {
    fn new(field: Column, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

const MIN_TEXT_LEN: usize = 3;
const MOBILE_LEN: usize = 10;

/// Checks every field and returns the accumulated errors. An empty vector
/// means the draft is ready to be turned into a `Record`.
pub fn validate(draft: &Draft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !valid_text(&draft.doctor_name) {
        errors.push(FieldError::new(
            Column::DoctorName,
            "Doctor's Name must be at least 3 characters.",
        ));
    }
    if let Some(message) = numeric_error("Area Code", &draft.area_code) {
        errors.push(FieldError::new(Column::AreaCode, message));
    }
    if !valid_text(&draft.city) {
        errors.push(FieldError::new(
            Column::City,
            "City must be at least 3 characters.",
        ));
    }
    if !valid_text(&draft.patient_name) {
        errors.push(FieldError::new(
            Column::PatientName,
            "Patient's Name must be at least 3 characters.",
        ));
    }
    if !valid_mobile(&draft.mobile_no) {
        errors.push(FieldError::new(
            Column::MobileNo,
            "Mobile number must be exactly 10 digits.",
        ));
    }
    if !valid_text(&draft.disease) {
        errors.push(FieldError::new(
            Column::Disease,
            "Disease must be at least 3 characters.",
        ));
    }
    if let Some(message) = numeric_error("Goal Amount", &draft.goal_amount) {
        errors.push(FieldError::new(Column::GoalAmount, message));
    }

    errors
}

/// Trimmed length of at least three characters.
pub fn valid_text(value: &str) -> bool {
    value.trim().chars().count() >= MIN_TEXT_LEN
}

/// Exactly ten ASCII digits, nothing else.
pub fn valid_mobile(value: &str) -> bool {
    let value = value.trim();
    value.len() == MOBILE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

fn numeric_error(label: &str, value: &str) -> Option<String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => {
            if v < 0.0 {
                Some(format!("{} must not be negative.", label))
            } else {
                None
            }
        }
        _ => Some(format!("{} must be numeric.", label)),
    }
}
