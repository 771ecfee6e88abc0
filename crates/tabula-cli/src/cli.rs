//! Command-line interface for `tabula`.
//!
//! # Examples
//!
//! ```bash
//! # Print the first page
//! tabula --config table.toml --data partners.json
//!
//! # Sort by age descending, show page 2 with 25 rows
//! tabula -c table.toml -d partners.json --sort age --sort age --page 2 --page-size 25
//!
//! # Write a spreadsheet export into ./out
//! tabula -c table.toml -d partners.json --export xls --out-dir out
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tabula::export::ExportFormat;

/// Sort, page, select and export JSON records.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tabula",
    author,
    version,
    about = "Sort, page, select and export JSON records",
    long_about = "Loads a TOML table definition and a JSON record file, applies \
                  sort, page and selection arguments, then prints the page or \
                  writes an export file."
)]
pub struct Cli {
    /// TOML table definition
    #[arg(long, short = 'c', env = "TABULA_CONFIG")]
    pub config: PathBuf,

    /// JSON records, either a bare array or `{ "data": [...] }`
    #[arg(long, short = 'd', env = "TABULA_DATA")]
    pub data: PathBuf,

    /// Column key to click; repeat to toggle direction
    #[arg(long, short = 's', value_name = "KEY")]
    pub sort: Vec<String>,

    /// Page to show (1-based)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Row key to toggle; repeatable
    #[arg(long, value_name = "KEY")]
    pub select: Vec<String>,

    /// Toggle every row on the shown page
    #[arg(long)]
    pub select_page: bool,

    /// Write an export instead of printing the page
    #[arg(long, short = 'e', value_enum)]
    pub export: Option<ExportKind>,

    /// Directory receiving export files
    #[arg(long, short = 'o', default_value = ".", env = "TABULA_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Export formats accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Comma-separated values
    Csv,
    /// HTML table readable by spreadsheet applications
    Xls,
}

impl From<ExportKind> for ExportFormat {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Csv => Self::Csv,
            ExportKind::Xls => Self::Spreadsheet,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the verbosity count.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
