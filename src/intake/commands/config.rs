use crate::commands::{CmdMessage, CmdResult};
use crate::config::IntakeConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Shows or updates the persisted configuration. Unknown keys and rejected
/// values come back as error messages; the command itself still succeeds.
pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let config = IntakeConfig::load(data_dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => Ok(show_key(&config, &key)),
        ConfigAction::Set(key, value) => set_key(data_dir, config, &key, &value),
    }
}

fn show_key(config: &IntakeConfig, key: &str) -> CmdResult {
    let mut result = CmdResult::default();
    match config.get(key) {
        Some(value) => result.add_message(CmdMessage::info(value)),
        None => result.add_message(CmdMessage::error(format!("Unknown config key: {}", key))),
    }
    result
}

fn set_key(
    data_dir: &Path,
    mut config: IntakeConfig,
    key: &str,
    value: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if let Err(message) = config.set(key, value) {
        result.add_message(CmdMessage::error(message));
        return Ok(result);
    }
    config.save(data_dir)?;

    // `set` normalizes some values (csv-file gains its extension); the
    // confirmation echoes the stored form, not the raw input.
    let stored = config.get(key).unwrap_or_else(|| value.to_string());
    result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
    result.config = Some(config);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn show_all_returns_the_config() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(IntakeConfig::default()));
    }

    #[test]
    fn set_persists_and_reports_the_normalized_value() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("csv-file".to_string(), "clinic".to_string()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "csv-file set to clinic.csv");

        let shown = run(dir.path(), ConfigAction::ShowKey("csv-file".to_string())).unwrap();
        assert_eq!(shown.messages[0].content, "clinic.csv");
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("colour".to_string())).unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Error));

        let result = run(
            dir.path(),
            ConfigAction::Set("colour".to_string(), "blue".to_string()),
        )
        .unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Error));
        assert!(result.config.is_none());
    }

    #[test]
    fn bad_value_does_not_persist() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("mirror-xlsx".to_string(), "maybe".to_string()),
        )
        .unwrap();
        let loaded = IntakeConfig::load(dir.path()).unwrap();
        assert!(loaded.mirror_xlsx);
    }
}
