use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CSV_FILE: &str = "patients.csv";

/// Configuration for intake, stored in the data directory as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeConfig {
    /// File name of the primary CSV registry (e.g. "patients.csv")
    #[serde(default = "default_csv_file")]
    pub csv_file: String,

    /// Whether saves also write an XLSX mirror next to the CSV
    #[serde(default = "default_mirror_xlsx")]
    pub mirror_xlsx: bool,
}

fn default_csv_file() -> String {
    DEFAULT_CSV_FILE.to_string()
}

fn default_mirror_xlsx() -> bool {
    true
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            csv_file: DEFAULT_CSV_FILE.to_string(),
            mirror_xlsx: true,
        }
    }
}

impl IntakeConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(IntakeError::Io)?;
        let config: IntakeConfig =
            serde_json::from_str(&content).map_err(IntakeError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(IntakeError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(IntakeError::Serialization)?;
        fs::write(config_path, content).map_err(IntakeError::Io)?;
        Ok(())
    }

    /// Set the registry file name (appends .csv when no extension is given)
    pub fn set_csv_file(&mut self, name: &str) {
        let name = name.trim();
        if name.contains('.') {
            self.csv_file = name.to_string();
        } else {
            self.csv_file = format!("{}.csv", name);
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "csv-file" => Some(self.csv_file.clone()),
            "mirror-xlsx" => Some(self.mirror_xlsx.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "csv-file" => {
                if value.trim().is_empty() {
                    return Err("csv-file must not be empty".to_string());
                }
                self.set_csv_file(value);
                Ok(())
            }
            "mirror-xlsx" => match value.trim() {
                "true" => {
                    self.mirror_xlsx = true;
                    Ok(())
                }
                "false" => {
                    self.mirror_xlsx = false;
                    Ok(())
                }
                other => Err(format!("mirror-xlsx must be true or false, got '{}'", other)),
            },
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        vec![
            ("csv-file".to_string(), self.csv_file.clone()),
            ("mirror-xlsx".to_string(), self.mirror_xlsx.to_string()),
        ]
    }
}
