use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use intake::dedupe::DupResolution;
use intake::export::ExportFormat;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    // Use a static to compute the version string once
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "intake", bin_name = "intake", version = get_version())]
#[command(about = "Patient intake registry for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the registry files (overrides INTAKE_DATA)
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a patient record
    #[command(alias = "a", display_order = 1)]
    Add {
        /// Entry date as YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_entry_date_arg)]
        date: Option<NaiveDate>,

        /// Doctor's name
        #[arg(long)]
        doctor: String,

        /// Area code
        #[arg(long)]
        area_code: String,

        /// City
        #[arg(long)]
        city: String,

        /// Patient's name
        #[arg(long)]
        patient: String,

        /// 10-digit mobile number
        #[arg(long)]
        mobile: String,

        /// Disease
        #[arg(long)]
        disease: String,

        /// Goal amount
        #[arg(long)]
        goal: String,

        /// Resolution to apply when a potential duplicate is found
        #[arg(long, value_enum)]
        on_duplicate: Option<DuplicateChoice>,
    },

    /// List records, optionally filtered
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Filter clause, e.g. "City=Pune" or "Goal Amount=100..500" (repeatable)
        #[arg(long = "where", value_name = "CLAUSE")]
        clauses: Vec<String>,

        /// Case-insensitive search across text columns
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete one or more rows
    #[command(alias = "rm", display_order = 3)]
    Delete {
        /// Row numbers as shown by `intake list` (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        rows: Vec<usize>,
    },

    /// Show the filter control each column currently offers
    #[command(display_order = 4)]
    Filters,

    /// Export the registry to a file in the output directory
    #[command(display_order = 5)]
    Export {
        /// Output format
        #[arg(value_enum, default_value_t = FormatChoice::Csv)]
        format: FormatChoice,

        /// Export only the rows matching the active filters
        #[arg(long)]
        filtered: bool,

        /// Filter clause (repeatable, implies --filtered)
        #[arg(long = "where", value_name = "CLAUSE")]
        clauses: Vec<String>,

        /// Case-insensitive search across text columns (implies --filtered)
        #[arg(short, long)]
        search: Option<String>,

        /// Directory to write into (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Archive the registry files as a timestamped .tar.gz
    #[command(display_order = 6)]
    Backup {
        /// Directory to write into (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Get or set configuration values
    #[command(display_order = 7)]
    Config {
        /// Configuration key (omit to list all settings)
        key: Option<String>,

        /// Value to set (omit to show the current value)
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum DuplicateChoice {
    /// Remove the matching rows, then save the new record
    Replace,
    /// Save the new record alongside the matches
    Keep,
    /// Save nothing
    Cancel,
}

impl From<DuplicateChoice> for DupResolution {
    fn from(choice: DuplicateChoice) -> Self {
        match choice {
            DuplicateChoice::Replace => DupResolution::Replace,
            DuplicateChoice::Keep => DupResolution::Keep,
            DuplicateChoice::Cancel => DupResolution::Cancel,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FormatChoice {
    Csv,
    Xlsx,
}

impl From<FormatChoice> for ExportFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Csv => ExportFormat::Csv,
            FormatChoice::Xlsx => ExportFormat::Xlsx,
        }
    }
}

fn parse_entry_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'; expected YYYY-MM-DD", raw))
}
