use super::TableStore;
use crate::error::Result;
use crate::model::Table;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: Table,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Table) -> Self {
        Self { table }
    }
}

impl TableStore for InMemoryStore {
    fn load(&self) -> Result<Table> {
        Ok(self.table.clone())
    }

    fn save(&mut self, table: &Table) -> Result<()> {
        self.table = table.clone();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Record;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Appends `count` distinct well-formed records.
        pub fn with_records(mut self, count: usize) -> Self {
            let mut table = self.store.load().unwrap();
            for i in 0..count {
                table.push(sample_record(
                    &format!("Patient {}", i + 1),
                    &format!("9{:09}", i + 1),
                ));
            }
            self.store.save(&table).unwrap();
            self
        }

        /// Appends one record with the fields duplicate detection cares about.
        pub fn with_record(mut self, doctor: &str, patient: &str, mobile: &str) -> Self {
            let mut table = self.store.load().unwrap();
            let mut record = sample_record(patient, mobile);
            record.doctor_name = doctor.to_string();
            table.push(record);
            self.store.save(&table).unwrap();
            self
        }
    }

    pub fn sample_record(patient: &str, mobile: &str) -> Record {
        Record {
            entry_date: "2024-01-15".to_string(),
            doctor_name: "Dr. Rao".to_string(),
            area_code: "560001".to_string(),
            city: "Pune".to_string(),
            patient_name: patient.to_string(),
            mobile_no: mobile.to_string(),
            disease: "Flu".to_string(),
            goal_amount: "250".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn starts_empty() {
        let store = InMemoryStore::new();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_replaces_the_table() {
        let fixture = StoreFixture::new().with_records(3);
        let mut store = fixture.store;
        assert_eq!(store.load().unwrap().len(), 3);

        store.save(&Table::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_returns_a_copy() {
        let store = StoreFixture::new().with_records(1).store;
        let mut loaded = store.load().unwrap();
        loaded.rows[0].patient_name = "changed".to_string();
        assert_eq!(store.load().unwrap().rows[0].patient_name, "Patient 1");
    }
}
