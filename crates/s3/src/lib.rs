//! mpc-s3: S3 SDK adapter for mpclean
//!
//! This crate provides the implementation of the UploadStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;

pub use client::{ClientOptions, S3Client};
