//! CLI definition and execution
//!
//! mpclean has a single command: scan multipart uploads, optionally abort
//! the stale ones, and print a report.

use clap::Parser;

use crate::exit_code::ExitCode;
use crate::output::{OutputConfig, OutputFormat};

mod sweep;

pub use sweep::SweepArgs;

/// mpclean - find and abort stale multipart uploads
///
/// Lists in-progress multipart uploads older than a threshold in one or all
/// buckets. With --doDelete the stale uploads are aborted.
///
/// Credentials are read from AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY.
#[derive(Parser, Debug)]
#[command(name = "mpclean")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  mpclean                                     List uploads older than 7 days in all buckets
  mpclean --bucket my-bucket --olderThan 3d   List uploads older than 3 days in one bucket
  mpclean --bucket my-bucket --olderThan 72h --doDelete
                                              Abort uploads older than 72 hours
  mpclean --fmt json                          Print the report as JSON")]
pub struct Cli {
    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Table)]
    pub fmt: OutputFormat,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

/// Execute the CLI and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        format: cli.fmt,
        no_color: cli.no_color,
    };

    sweep::execute(cli.sweep, output_config).await
}
