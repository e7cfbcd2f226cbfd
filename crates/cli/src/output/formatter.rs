//! Output formatter for sweep reports and diagnostics
//!
//! Reports go to stdout in the selected format. Errors and warnings go to
//! stderr so that JSON and CSV output stays machine-readable.

use console::style;
use mpc_core::{Error, Result, SweepSummary, UploadRecord};

use super::{OutputConfig, OutputFormat, export, table};

/// Formatter for CLI output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Check if colors are enabled for stdout
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && self.config.format == OutputFormat::Table && console::colors_enabled()
    }

    fn stderr_colors(&self) -> bool {
        !self.config.no_color && console::colors_enabled_stderr()
    }

    /// Render the collected records to a string in the configured format
    pub fn render(&self, records: &[UploadRecord]) -> Result<String> {
        match self.config.format {
            OutputFormat::Json => Ok(export::render_json(records)?),
            OutputFormat::Csv => {
                let mut out = Vec::new();
                export::render_csv(records, &mut out)
                    .map_err(|e| Error::General(format!("Failed to write CSV: {e}")))?;
                String::from_utf8(out).map_err(|e| Error::General(e.to_string()))
            }
            OutputFormat::Table => {
                if records.is_empty() {
                    return Ok("No incomplete multipart uploads found".to_string());
                }
                let colors = self.colors_enabled();
                Ok(format!(
                    "{}\n\n{}",
                    table::render_upload_table(records, colors),
                    table::render_summary_table(&SweepSummary::from_records(records), colors)
                ))
            }
        }
    }

    /// Print the report to stdout
    pub fn report(&self, records: &[UploadRecord]) -> Result<()> {
        let rendered = self.render(records)?;
        if self.config.format == OutputFormat::Csv {
            print!("{rendered}");
        } else if records.is_empty() && self.colors_enabled() {
            println!("{}", style(rendered).yellow());
        } else {
            println!("{rendered}");
        }
        Ok(())
    }

    /// Output an error message
    pub fn error(&self, message: &str) {
        if self.stderr_colors() {
            eprintln!("{} {message}", style("✗").red().for_stderr());
        } else {
            eprintln!("✗ {message}");
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.stderr_colors() {
            eprintln!("{} {message}", style("⚠").yellow().for_stderr());
        } else {
            eprintln!("⚠ {message}");
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
