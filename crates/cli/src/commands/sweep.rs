//! Sweep command - scan multipart uploads and optionally abort stale ones
//!
//! Configuration problems are reported before any request is sent. Once the
//! scan starts, a bucket that cannot be listed is reported and skipped.

use clap::Args;
use jiff::Timestamp;
use mpc_core::config::DEFAULT_REGION;
use mpc_core::{AgeSpec, BucketScope, Credentials, Settings, SettingsManager, SweepConfig, Sweeper};
use mpc_s3::{ClientOptions, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Scan options
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Bucket to scan (default: all buckets)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Select uploads started before this age, e.g. '7d' (days) or '72h' (hours)
    #[arg(long = "olderThan", default_value = "7d")]
    pub older_than: String,

    /// Abort the selected uploads instead of only listing them
    #[arg(long = "doDelete", default_value = "false")]
    pub do_delete: bool,

    /// Custom S3 endpoint URL
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Region (default: us-east-1)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, default_value = "false")]
    pub path_style: bool,
}

impl SweepArgs {
    /// Build the immutable run configuration, fixing the cutoff at `now`
    pub fn sweep_config(&self, now: Timestamp) -> mpc_core::Result<SweepConfig> {
        let cutoff = AgeSpec::parse(&self.older_than)?.cutoff(now)?;
        Ok(SweepConfig {
            scope: BucketScope::from_option(self.bucket.clone()),
            cutoff,
            delete_requested: self.do_delete,
        })
    }

    /// Merge flags over settings-file values
    pub fn client_options(&self, credentials: Credentials, settings: Settings) -> ClientOptions {
        ClientOptions {
            credentials,
            region: self
                .region
                .clone()
                .or(settings.region)
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: self.endpoint_url.clone().or(settings.endpoint_url),
            path_style: self.path_style || settings.path_style,
        }
    }
}

/// Execute the sweep
pub async fn execute(args: SweepArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let config = match args.sweep_config(Timestamp::now()) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let settings = match SettingsManager::new().and_then(|m| m.load()) {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&format!("Failed to load settings: {e}"));
            return ExitCode::UsageError;
        }
    };

    let client = match S3Client::new(args.client_options(credentials, settings)).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };

    tracing::debug!(
        scope = ?config.scope,
        cutoff = %config.cutoff.instant(),
        delete = config.delete_requested,
        "Sweep configured"
    );

    let spinner = Spinner::start(formatter.config(), "Scanning multipart uploads...");
    let result = Sweeper::new(&client).run(&config).await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(r) => r,
        Err(e) => {
            formatter.error(&format!("Failed to list buckets: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    for bucket_error in &report.errors {
        formatter.error(&bucket_error.to_string());
    }

    if let Err(e) = formatter.report(&report.records) {
        formatter.error(&e.to_string());
        return ExitCode::GeneralError;
    }

    if !report.errors.is_empty() {
        formatter.warning(&format!(
            "{} bucket(s) could not be scanned; the report covers the remaining buckets",
            report.errors.len()
        ));
    }

    ExitCode::Success
}
