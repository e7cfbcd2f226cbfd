//! mpc-core: Core library for the mpclean multipart upload sweeper
//!
//! This crate provides the core functionality for mpclean, including:
//! - Age threshold parsing and classification
//! - Run configuration and credential loading
//! - UploadStore trait for the storage operations a sweep needs
//! - The scan-and-sweep engine and its result records
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the engine to be tested without a storage service.

pub mod age;
pub mod config;
pub mod error;
pub mod record;
pub mod sweep;
pub mod traits;

pub use age::{AgeSpec, AgeUnit, Cutoff};
pub use config::{BucketScope, Credentials, Settings, SettingsManager, SweepConfig};
pub use error::{Error, Result};
pub use record::{DeletionOutcome, SweepSummary, UploadRecord};
pub use sweep::{BucketError, SweepReport, Sweeper, upload_pages};
pub use traits::{PageToken, PartPage, UploadDescriptor, UploadPage, UploadStore};
