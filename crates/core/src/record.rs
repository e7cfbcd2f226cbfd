//! Scan results
//!
//! An [`UploadRecord`] is built once per discovered upload and never changed
//! after it is collected.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Result of an abort attempt for one upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum DeletionOutcome {
    /// No abort was issued for this upload
    #[default]
    NotAttempted,
    Succeeded,
    Failed,
}

impl DeletionOutcome {
    pub fn is_not_attempted(&self) -> bool {
        matches!(self, DeletionOutcome::NotAttempted)
    }

    pub fn from_abort<T, E>(result: &std::result::Result<T, E>) -> Self {
        if result.is_ok() {
            DeletionOutcome::Succeeded
        } else {
            DeletionOutcome::Failed
        }
    }
}

impl From<Option<bool>> for DeletionOutcome {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => DeletionOutcome::NotAttempted,
            Some(true) => DeletionOutcome::Succeeded,
            Some(false) => DeletionOutcome::Failed,
        }
    }
}

impl From<DeletionOutcome> for Option<bool> {
    fn from(value: DeletionOutcome) -> Self {
        match value {
            DeletionOutcome::NotAttempted => None,
            DeletionOutcome::Succeeded => Some(true),
            DeletionOutcome::Failed => Some(false),
        }
    }
}

/// One in-progress multipart upload discovered during a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Bucket containing the upload
    pub bucket: String,

    /// Object key the upload targets
    pub key: String,

    /// Upload ID, unique together with bucket and key
    pub upload_id: String,

    /// Bytes already uploaded across fetched parts
    pub size: u64,

    /// When the upload was initiated
    #[serde(rename = "mod_time")]
    pub started_at: Timestamp,

    /// Whether the upload started before the run's cutoff
    #[serde(rename = "should_delete")]
    pub eligible_for_deletion: bool,

    /// Outcome of the abort, if one was issued
    #[serde(
        rename = "delete_success",
        default,
        skip_serializing_if = "DeletionOutcome::is_not_attempted"
    )]
    pub deletion_outcome: DeletionOutcome,
}

/// Aggregate statistics over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub total_files: usize,
    pub total_size: u64,
    pub eligible_files: usize,
    pub eligible_size: u64,
    pub deleted_files: usize,
    pub deleted_size: u64,
}

impl SweepSummary {
    pub fn from_records(records: &[UploadRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.total_files += 1;
            acc.total_size += record.size;
            if record.eligible_for_deletion {
                acc.eligible_files += 1;
                acc.eligible_size += record.size;
            }
            if record.deletion_outcome == DeletionOutcome::Succeeded {
                acc.deleted_files += 1;
                acc.deleted_size += record.size;
            }
            acc
        })
    }
}
