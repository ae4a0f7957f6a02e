use super::TableStore;
use crate::error::Result;
use crate::export;
use crate::model::{parse_entry_date, Column, Record, Table};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-based storage: one CSV file per registry, plus an optional XLSX
/// mirror with the same stem.
pub struct FileStore {
    data_dir: PathBuf,
    csv_file: String,
    mirror_xlsx: bool,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            csv_file: "patients.csv".to_string(),
            mirror_xlsx: true,
        }
    }

    pub fn with_csv_file(mut self, name: &str) -> Self {
        self.csv_file = name.to_string();
        self
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror_xlsx = mirror;
        self
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_file)
    }

    pub fn xlsx_path(&self) -> PathBuf {
        self.csv_path().with_extension("xlsx")
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    /// Reads the CSV back into a table, repairing shape problems instead of
    /// failing: columns are matched by header name, absent ones become
    /// empty cells, unknown ones are dropped, short rows are padded.
    fn read_table(path: &Path) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers = reader.headers()?.clone();
        let positions: Vec<Option<usize>> = Column::ALL
            .iter()
            .map(|c| headers.iter().position(|h| h == c.label()))
            .collect();

        let mut table = Table::new();
        for row in reader.records() {
            let row = row?;
            let mut record = Record::default();
            for (ci, &column) in Column::ALL.iter().enumerate() {
                let cell = positions[ci].and_then(|p| row.get(p)).unwrap_or("");
                record.set(column, cell.to_string());
            }
            record.entry_date = match parse_entry_date(&record.entry_date) {
                Some(d) => crate::model::format_entry_date(d),
                None => String::new(),
            };
            table.push(record);
        }
        Ok(table)
    }
}

impl TableStore for FileStore {
    fn load(&self) -> Result<Table> {
        let path = self.csv_path();
        if !path.exists() {
            debug!("no registry at {}, starting empty", path.display());
            return Ok(Table::new());
        }
        let table = Self::read_table(&path)?;
        debug!("loaded {} row(s) from {}", table.len(), path.display());
        Ok(table)
    }

    fn save(&mut self, table: &Table) -> Result<()> {
        self.ensure_dir()?;
        let path = self.csv_path();
        fs::write(&path, export::csv_bytes(table)?)?;
        debug!("saved {} row(s) to {}", table.len(), path.display());

        if self.mirror_xlsx {
            // The mirror is best-effort; the CSV above is the source of truth.
            match export::try_xlsx_bytes(table) {
                Ok(bytes) => {
                    if let Err(e) = fs::write(self.xlsx_path(), bytes) {
                        warn!("could not write xlsx mirror: {}", e);
                    }
                }
                Err(e) => warn!("could not build xlsx mirror: {}", e),
            }
        }
        Ok(())
    }
}
