//! Scan-and-sweep engine
//!
//! Walks every in-progress multipart upload in the configured buckets,
//! classifies each one against the run's cutoff and, when deletion was
//! requested, aborts the eligible ones inline. Buckets, pages and uploads
//! are processed strictly one after another.

use std::fmt;

use futures::{Stream, TryStreamExt, stream};
use tracing::{debug, info, warn};

use crate::config::{BucketScope, SweepConfig};
use crate::error::{Error, Result};
use crate::record::{DeletionOutcome, UploadRecord};
use crate::traits::{PageToken, UploadDescriptor, UploadPage, UploadStore};

/// A bucket whose scan failed
#[derive(Debug)]
pub struct BucketError {
    pub bucket: String,
    pub error: Error,
}

impl fmt::Display for BucketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error processing bucket {}: {}", self.bucket, self.error)
    }
}

/// Everything a sweep produced
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Records in bucket order, then page order, then in-page order
    pub records: Vec<UploadRecord>,

    /// One entry per bucket whose scan failed
    pub errors: Vec<BucketError>,
}

enum Cursor {
    Start,
    Next(PageToken),
    Done,
}

async fn next_page<S>(store: &S, bucket: &str, cursor: Cursor) -> Result<Option<(UploadPage, Cursor)>>
where
    S: UploadStore + ?Sized,
{
    let sent = match cursor {
        Cursor::Done => return Ok(None),
        Cursor::Start => None,
        Cursor::Next(token) => Some(token),
    };

    let page = store.list_multipart_uploads(bucket, sent.clone()).await?;
    let cursor = match &page.next {
        None => Cursor::Done,
        // A truncated listing must hand back markers that move past the last request
        Some(next) if next.is_empty() || sent.as_ref() == Some(next) => {
            return Err(Error::Network(format!(
                "upload listing for bucket {bucket} did not advance (key marker {:?}, upload id marker {:?})",
                next.key_marker, next.upload_id_marker
            )));
        }
        Some(next) => Cursor::Next(next.clone()),
    };
    Ok(Some((page, cursor)))
}

/// Lazy sequence of upload listing pages for one bucket
///
/// The stream ends after the first page that carries no continuation token,
/// or yields the listing error and ends. A page whose token is empty or
/// repeats the token just sent is an error, so a stuck listing cannot loop.
pub fn upload_pages<'a, S>(store: &'a S, bucket: &'a str) -> impl Stream<Item = Result<UploadPage>> + 'a
where
    S: UploadStore + ?Sized,
{
    stream::try_unfold(Cursor::Start, move |cursor| next_page(store, bucket, cursor))
}

/// Drives a sweep against an [`UploadStore`]
pub struct Sweeper<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> Sweeper<'a, S>
where
    S: UploadStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Sweep every bucket in scope
    ///
    /// Fails only when the bucket list itself cannot be fetched. A bucket
    /// whose listing fails contributes no records and one [`BucketError`].
    pub async fn run(&self, config: &SweepConfig) -> Result<SweepReport> {
        let buckets = match &config.scope {
            BucketScope::Single(bucket) => vec![bucket.clone()],
            BucketScope::All => self.store.list_buckets().await?,
        };
        debug!(count = buckets.len(), cutoff = %config.cutoff.instant(), "Starting sweep");

        let mut report = SweepReport::default();
        for bucket in buckets {
            match self.sweep_bucket(&bucket, config).await {
                Ok(records) => {
                    info!(bucket = %bucket, uploads = records.len(), "Bucket scanned");
                    report.records.extend(records);
                }
                Err(error) => {
                    warn!(bucket = %bucket, error = %error, "Bucket scan failed");
                    report.errors.push(BucketError { bucket, error });
                }
            }
        }

        Ok(report)
    }

    /// Sweep a single bucket, returning its records in listing order
    pub async fn sweep_bucket(&self, bucket: &str, config: &SweepConfig) -> Result<Vec<UploadRecord>> {
        let mut records = Vec::new();
        let mut pages = std::pin::pin!(upload_pages(self.store, bucket));

        while let Some(page) = pages.try_next().await? {
            debug!(bucket, uploads = page.uploads.len(), "Fetched upload page");
            for upload in page.uploads {
                records.push(self.sweep_upload(bucket, upload, config).await);
            }
        }

        Ok(records)
    }

    async fn sweep_upload(&self, bucket: &str, upload: UploadDescriptor, config: &SweepConfig) -> UploadRecord {
        let size = self.uploaded_size(bucket, &upload).await;
        let eligible = config.cutoff.is_eligible(upload.started_at);

        let deletion_outcome = if eligible && config.delete_requested {
            let result = self
                .store
                .abort_multipart_upload(bucket, &upload.key, &upload.upload_id)
                .await;
            match &result {
                Ok(()) => info!(bucket, key = %upload.key, upload_id = %upload.upload_id, "Aborted upload"),
                Err(e) => warn!(bucket, key = %upload.key, upload_id = %upload.upload_id, error = %e, "Failed to abort upload"),
            }
            DeletionOutcome::from_abort(&result)
        } else {
            DeletionOutcome::NotAttempted
        };

        UploadRecord {
            bucket: bucket.to_string(),
            key: upload.key,
            upload_id: upload.upload_id,
            size,
            started_at: upload.started_at,
            eligible_for_deletion: eligible,
            deletion_outcome,
        }
    }

    /// Sum of part sizes; stops at the first failed lookup and keeps what it has.
    async fn uploaded_size(&self, bucket: &str, upload: &UploadDescriptor) -> u64 {
        let mut total: u64 = 0;
        let mut marker: Option<String> = None;

        loop {
            let page = match self
                .store
                .list_parts(bucket, &upload.key, &upload.upload_id, marker.clone())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    debug!(bucket, key = %upload.key, error = %e, "Part lookup failed");
                    break;
                }
            };

            total = page.sizes.iter().fold(total, |acc, size| acc.saturating_add(*size));

            match page.next_part_marker {
                Some(next) if marker.as_deref() != Some(next.as_str()) => marker = Some(next),
                _ => break,
            }
        }

        total
    }
}
