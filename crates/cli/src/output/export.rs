//! Machine-readable report formats
//!
//! JSON is `{"files": [...], "total": N}`. CSV uses the header
//! `Bucket,Key,Size,ModTime,ShouldDelete,DeleteSuccess`, where
//! `DeleteSuccess` is `true`, `false` or `not_executed`.

use std::io;

use jiff::Timestamp;
use mpc_core::{DeletionOutcome, UploadRecord};
use serde::{Deserialize, Deserializer, Serialize};

const CSV_HEADER: [&str; 6] = [
    "Bucket",
    "Key",
    "Size",
    "ModTime",
    "ShouldDelete",
    "DeleteSuccess",
];

const NOT_EXECUTED: &str = "not_executed";

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [UploadRecord],
    total: usize,
}

/// Render records as a pretty-printed JSON document
pub fn render_json(records: &[UploadRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        files: records,
        total: records.len(),
    })
}

fn outcome_label(outcome: DeletionOutcome) -> &'static str {
    match outcome {
        DeletionOutcome::NotAttempted => NOT_EXECUTED,
        DeletionOutcome::Succeeded => "true",
        DeletionOutcome::Failed => "false",
    }
}

/// Write records as CSV, header first
pub fn render_csv<W: io::Write>(records: &[UploadRecord], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for record in records {
        let size = record.size.to_string();
        let mod_time = record.started_at.strftime("%Y-%m-%dT%H:%M:%SZ").to_string();
        wtr.write_record([
            record.bucket.as_str(),
            record.key.as_str(),
            size.as_str(),
            mod_time.as_str(),
            if record.eligible_for_deletion { "true" } else { "false" },
            outcome_label(record.deletion_outcome),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// One row of a CSV report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CsvRow {
    pub bucket: String,
    pub key: String,
    pub size: u64,
    pub mod_time: Timestamp,
    pub should_delete: bool,
    #[serde(deserialize_with = "deserialize_outcome")]
    pub delete_success: DeletionOutcome,
}

impl From<&UploadRecord> for CsvRow {
    fn from(record: &UploadRecord) -> Self {
        Self {
            bucket: record.bucket.clone(),
            key: record.key.clone(),
            size: record.size,
            mod_time: record.started_at,
            should_delete: record.eligible_for_deletion,
            delete_success: record.deletion_outcome,
        }
    }
}

fn deserialize_outcome<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DeletionOutcome, D::Error> {
    let label = String::deserialize(deserializer)?;
    match label.as_str() {
        NOT_EXECUTED => Ok(DeletionOutcome::NotAttempted),
        "true" => Ok(DeletionOutcome::Succeeded),
        "false" => Ok(DeletionOutcome::Failed),
        other => Err(serde::de::Error::custom(format!(
            "invalid DeleteSuccess value '{other}'"
        ))),
    }
}

/// Read a CSV report back into rows
pub fn parse_csv<R: io::Read>(reader: R) -> Result<Vec<CsvRow>, csv::Error> {
    csv::Reader::from_reader(reader).deserialize().collect()
}
