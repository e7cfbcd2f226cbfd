//! Output formatting utilities
//!
//! This module renders sweep results as a table, JSON or CSV, prints
//! diagnostics to stderr and shows a spinner while a sweep runs.

mod export;
mod formatter;
mod progress;
mod table;

pub use export::{CsvRow, parse_csv, render_csv, render_json};
pub use formatter::Formatter;
pub use progress::Spinner;
pub use table::{render_summary_table, render_upload_table};

/// Report format selected with `--fmt`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
    /// Disable colored output
    pub no_color: bool,
}
