use crate::commands::{CmdMessage, CmdResult};
use crate::config::IntakeConfig;
use crate::error::Result;
use crate::export;
use crate::model::Table;
use crate::store::TableStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Archives the registry as a timestamped tar.gz in `out_dir`: the CSV,
/// the XLSX mirror when it can be built, and the configuration.
pub fn run<S: TableStore>(store: &S, data_dir: &Path, out_dir: &Path) -> Result<CmdResult> {
    let table = store.load()?;
    let config = IntakeConfig::load(data_dir)?;

    let now = Utc::now();
    let filename = format!("intake-{}.tar.gz", now.format("%Y-%m-%d_%H:%M:%S"));
    let file = File::create(out_dir.join(&filename))?;

    write_archive(file, &table, &config)?;

    let mut result = CmdResult::default().with_total(table.len());
    result.add_message(CmdMessage::success(format!(
        "Backed up {} row(s) to {}",
        table.len(),
        filename
    )));
    Ok(result)
}

fn write_archive<W: Write>(writer: W, table: &Table, config: &IntakeConfig) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    let csv_name = format!("intake/{}", config.csv_file);
    append_entry(&mut tar, &csv_name, &export::csv_bytes(table)?)?;

    match export::try_xlsx_bytes(table) {
        Ok(bytes) => {
            let xlsx_name = Path::new(&config.csv_file).with_extension("xlsx");
            append_entry(
                &mut tar,
                &format!("intake/{}", xlsx_name.display()),
                &bytes,
            )?;
        }
        Err(e) => warn!("backup skips the xlsx mirror: {}", e),
    }

    let config_json = serde_json::to_string_pretty(config)?;
    append_entry(&mut tar, "intake/config.json", config_json.as_bytes())?;

    tar.finish()?;
    Ok(())
}

fn append_entry<W: Write>(tar: &mut tar::Builder<W>, name: &str, content: &[u8]) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tar.append_data(&mut header, name, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::TableStore;

    #[test]
    fn archive_is_gzip() {
        let store = StoreFixture::new().with_records(2).store;
        let table = store.load().unwrap();

        let mut buf = Vec::new();
        write_archive(&mut buf, &table, &IntakeConfig::default()).unwrap();

        assert!(!buf.is_empty());
        // Gzip header is 1f 8b
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);
    }

    #[test]
    fn run_creates_a_timestamped_file() {
        let store = StoreFixture::new().with_records(1).store;
        let data_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();

        run(&store, data_dir.path(), out_dir.path()).unwrap();

        let names: Vec<String> = std::fs::read_dir(out_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("intake-"));
        assert!(names[0].ends_with(".tar.gz"));
    }

    #[test]
    fn empty_registry_still_backs_up() {
        let store = crate::store::memory::InMemoryStore::new();
        let data_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();

        let result = run(&store, data_dir.path(), out_dir.path()).unwrap();
        assert_eq!(result.total, 0);
    }
}
