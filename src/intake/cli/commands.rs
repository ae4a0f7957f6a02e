//! Per-command handlers.
//!
//! `run()` is called by `main.rs`: it parses arguments, wires the API over a
//! [`FileStore`], dispatches to a `handle_*` function, and prints whatever
//! the command returned. Business logic stays on the other side of the API.

use super::render::{print_config, print_messages, print_rows, print_specs};
use super::setup::{Cli, Commands, DuplicateChoice, FormatChoice};
use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use intake::api::{ConfigAction, ExportView, IntakeApi};
use intake::config::IntakeConfig;
use intake::dedupe::DupResolution;
use intake::error::{IntakeError, Result};
use intake::model::Draft;
use intake::store::fs::FileStore;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut api = init_api(&cli)?;

    match cli.command {
        Some(Commands::Add {
            date,
            doctor,
            area_code,
            city,
            patient,
            mobile,
            disease,
            goal,
            on_duplicate,
        }) => handle_add(
            &mut api,
            date,
            doctor,
            area_code,
            city,
            patient,
            mobile,
            disease,
            goal,
            on_duplicate,
        ),
        Some(Commands::List { clauses, search }) => handle_list(&api, &clauses, search),
        Some(Commands::Delete { rows }) => handle_delete(&mut api, &rows),
        Some(Commands::Filters) => handle_filters(&api),
        Some(Commands::Export {
            format,
            filtered,
            clauses,
            search,
            out,
        }) => handle_export(&api, format, filtered, clauses, search, out),
        Some(Commands::Backup { out }) => handle_backup(&api, out),
        Some(Commands::Config { key, value }) => handle_config(&api, key, value),
        None => handle_list(&api, &[], None),
    }
}

/// Log filtering comes from `INTAKE_LOG` (e.g. `INTAKE_LOG=debug`);
/// warnings and errors are shown by default. Logs go to stderr so they
/// never mix with command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("INTAKE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_api(cli: &Cli) -> Result<IntakeApi<FileStore>> {
    let data_dir = resolve_data_dir(cli)?;
    std::fs::create_dir_all(&data_dir)?;

    let config = IntakeConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone())
        .with_csv_file(&config.csv_file)
        .with_mirror(config.mirror_xlsx);

    Ok(IntakeApi::new(store, data_dir))
}

/// `--data` wins, then the `INTAKE_DATA` environment variable, then the
/// platform data directory (e.g. `~/.local/share/intake` on Linux).
fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data {
        return Ok(dir.clone());
    }
    if let Ok(dir) = std::env::var("INTAKE_DATA") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let dirs = ProjectDirs::from("com", "intake", "intake").ok_or_else(|| {
        IntakeError::Store(
            "could not determine a data directory; set INTAKE_DATA or pass --data".to_string(),
        )
    })?;
    Ok(dirs.data_dir().to_path_buf())
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    api: &mut IntakeApi<FileStore>,
    date: Option<NaiveDate>,
    doctor: String,
    area_code: String,
    city: String,
    patient: String,
    mobile: String,
    disease: String,
    goal: String,
    on_duplicate: Option<DuplicateChoice>,
) -> Result<()> {
    let draft = Draft {
        entry_date: date.unwrap_or_else(|| Local::now().date_naive()),
        doctor_name: doctor,
        area_code,
        city,
        patient_name: patient,
        mobile_no: mobile,
        disease,
        goal_amount: goal,
    };

    let result = match api.add_record(&draft, on_duplicate.map(Into::into)) {
        Ok(result) => result,
        Err(IntakeError::Validation(errors)) => {
            for error in &errors {
                eprintln!("{}", error.message.red());
            }
            return Err(IntakeError::Validation(errors));
        }
        Err(e) => return Err(e),
    };

    if result.duplicates.is_empty() {
        print_messages(&result.messages);
        return Ok(());
    }

    // Unresolved duplicates: show the matching rows, then ask. In a pipe we
    // cannot ask, so print a hint and leave the registry untouched.
    print_messages(&result.messages);
    print_rows(&result.duplicates);

    if !std::io::stdin().is_terminal() {
        println!(
            "{}",
            "Re-run with --on-duplicate replace|keep|cancel to resolve.".dimmed()
        );
        return Ok(());
    }

    let resolution = prompt_resolution()?;
    let result = api.add_record(&draft, Some(resolution))?;
    print_messages(&result.messages);
    Ok(())
}

fn prompt_resolution() -> Result<DupResolution> {
    loop {
        print!("Replace the matching row(s), keep both, or cancel? [replace/keep/cancel] ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        match line.trim().to_lowercase().as_str() {
            "r" | "replace" => return Ok(DupResolution::Replace),
            "k" | "keep" => return Ok(DupResolution::Keep),
            "c" | "cancel" | "" => return Ok(DupResolution::Cancel),
            other => eprintln!("Unrecognized choice: {}", other),
        }
    }
}

fn handle_list(
    api: &IntakeApi<FileStore>,
    clauses: &[String],
    search: Option<String>,
) -> Result<()> {
    let result = api.list_records(clauses, search)?;
    print_rows(&result.rows);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut IntakeApi<FileStore>, rows: &[usize]) -> Result<()> {
    let result = api.delete_rows(rows)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_filters(api: &IntakeApi<FileStore>) -> Result<()> {
    let result = api.filters()?;
    print_specs(&result.column_specs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    api: &IntakeApi<FileStore>,
    format: FormatChoice,
    filtered: bool,
    clauses: Vec<String>,
    search: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let out_dir = match out {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let view = if filtered || !clauses.is_empty() || search.is_some() {
        ExportView::Filtered { clauses, search }
    } else {
        ExportView::Full
    };

    let result = api.export(&out_dir, format.into(), view)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backup(api: &IntakeApi<FileStore>, out: Option<PathBuf>) -> Result<()> {
    let out_dir = match out {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let result = api.backup(&out_dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    api: &IntakeApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api.config(action)?;
    if key.is_none() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
