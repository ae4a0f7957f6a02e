use chrono::{NaiveDate, NaiveDateTime};

/// The eight registry columns, in persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    EntryDate,
    DoctorName,
    AreaCode,
    City,
    PatientName,
    MobileNo,
    Disease,
    GoalAmount,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::EntryDate,
        Column::DoctorName,
        Column::AreaCode,
        Column::City,
        Column::PatientName,
        Column::MobileNo,
        Column::Disease,
        Column::GoalAmount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::EntryDate => "Entry Date",
            Column::DoctorName => "Doctor Name",
            Column::AreaCode => "Area Code",
            Column::City => "City",
            Column::PatientName => "Patient Name",
            Column::MobileNo => "Mobile No",
            Column::Disease => "Disease",
            Column::GoalAmount => "Goal Amount",
        }
    }

    pub fn from_label(label: &str) -> Option<Column> {
        let label = label.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form input before validation. The date is parsed by the front end;
/// everything else arrives as text and is checked by `validate`.
#[derive(Debug, Clone)]
pub struct Draft {
    pub entry_date: NaiveDate,
    pub doctor_name: String,
    pub area_code: String,
    pub city: String,
    pub patient_name: String,
    pub mobile_no: String,
    pub disease: String,
    pub goal_amount: String,
}

/// One registry row. Cells are stored as text so the CSV round-trips
/// exactly (mobile numbers keep their leading zeros).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub entry_date: String,
    pub doctor_name: String,
    pub area_code: String,
    pub city: String,
    pub patient_name: String,
    pub mobile_no: String,
    pub disease: String,
    pub goal_amount: String,
}

impl Record {
    /// Builds the persisted row from a validated draft: text fields are
    /// trimmed, the date is rendered as ISO and numeric fields are coerced
    /// to integers.
    pub fn from_draft(draft: &Draft) -> Self {
        Record {
            entry_date: format_entry_date(draft.entry_date),
            doctor_name: draft.doctor_name.trim().to_string(),
            area_code: coerce_integer(&draft.area_code),
            city: draft.city.trim().to_string(),
            patient_name: draft.patient_name.trim().to_string(),
            mobile_no: draft.mobile_no.trim().to_string(),
            disease: draft.disease.trim().to_string(),
            goal_amount: coerce_integer(&draft.goal_amount),
        }
    }

    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::EntryDate => &self.entry_date,
            Column::DoctorName => &self.doctor_name,
            Column::AreaCode => &self.area_code,
            Column::City => &self.city,
            Column::PatientName => &self.patient_name,
            Column::MobileNo => &self.mobile_no,
            Column::Disease => &self.disease,
            Column::GoalAmount => &self.goal_amount,
        }
    }

    pub fn set(&mut self, column: Column, value: String) {
        match column {
            Column::EntryDate => self.entry_date = value,
            Column::DoctorName => self.doctor_name = value,
            Column::AreaCode => self.area_code = value,
            Column::City => self.city = value,
            Column::PatientName => self.patient_name = value,
            Column::MobileNo => self.mobile_no = value,
            Column::Disease => self.disease = value,
            Column::GoalAmount => self.goal_amount = value,
        }
    }

    pub fn entry_date(&self) -> Option<NaiveDate> {
        parse_entry_date(&self.entry_date)
    }
}

/// The registry table: rows in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Table { rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn column_values(&self, column: Column) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r.get(column))
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Best-effort date parsing for cells coming back from disk. Besides the
/// ISO form we write, legacy files carry datetimes and US-style dates.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(d);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

pub fn format_entry_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Numeric cells are persisted as integers, matching the form inputs.
fn coerce_integer(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{}", v.trunc() as i64),
        _ => raw.trim().to_string(),
    }
}
