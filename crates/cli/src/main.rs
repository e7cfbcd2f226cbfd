//! mpclean - find and abort stale multipart uploads
//!
//! A command-line tool for S3-compatible object storage services.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mpclean::commands::{self, Cli};

const DEBUG_FILTER: &str = "mpclean=debug,mpc_core=debug,mpc_s3=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the report
    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;
    tracing::debug!(exit_code = %exit_code, "Finished");

    std::process::exit(exit_code.as_i32());
}
