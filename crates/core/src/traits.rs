//! UploadStore trait definition
//!
//! This trait defines the storage operations the sweep engine needs.
//! It allows the engine to be decoupled from the specific S3 SDK implementation.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An in-progress multipart upload as reported by the storage service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    /// Object key the upload targets
    pub key: String,

    /// Upload ID assigned by the service
    pub upload_id: String,

    /// When the upload was initiated
    pub started_at: Timestamp,
}

impl UploadDescriptor {
    pub fn new(key: impl Into<String>, upload_id: impl Into<String>, started_at: Timestamp) -> Self {
        Self {
            key: key.into(),
            upload_id: upload_id.into(),
            started_at,
        }
    }
}

/// Continuation markers for the next page of a multipart upload listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_marker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id_marker: Option<String>,
}

impl PageToken {
    /// True when neither marker is set, so the token cannot move a listing forward
    pub fn is_empty(&self) -> bool {
        self.key_marker.is_none() && self.upload_id_marker.is_none()
    }
}

/// One page of a multipart upload listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPage {
    /// Uploads on this page, in service order
    pub uploads: Vec<UploadDescriptor>,

    /// Token for the next page; `None` on the last page
    pub next: Option<PageToken>,
}

/// One page of an upload's part listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartPage {
    /// Sizes in bytes of the parts on this page
    pub sizes: Vec<u64>,

    /// Part number marker for the next page; `None` on the last page
    pub next_part_marker: Option<String>,
}

/// Trait for the storage operations used by the sweep engine
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// List bucket names visible to the credentials
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// List one page of in-progress multipart uploads in a bucket
    async fn list_multipart_uploads(
        &self,
        bucket: &str,
        token: Option<PageToken>,
    ) -> Result<UploadPage>;

    /// List one page of the parts already uploaded for an upload
    async fn list_parts(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_marker: Option<String>,
    ) -> Result<PartPage>;

    /// Abort an in-progress multipart upload
    async fn abort_multipart_upload(&self, bucket: &str, key: &str, upload_id: &str) -> Result<()>;
}
