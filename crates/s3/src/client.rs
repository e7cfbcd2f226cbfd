//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the UploadStore trait from mpc-core.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;

use mpc_core::{Credentials, Error, PageToken, PartPage, Result, UploadDescriptor, UploadPage, UploadStore};

/// Connection options for [`S3Client`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub credentials: Credentials,
    pub region: String,
    pub endpoint_url: Option<String>,
    pub path_style: bool,
}

impl ClientOptions {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            region: mpc_core::config::DEFAULT_REGION.to_string(),
            endpoint_url: None,
            path_style: false,
        }
    }

    /// Reject options the SDK would only fail on at request time
    pub fn validate(&self) -> Result<()> {
        let Credentials {
            access_key,
            secret_key,
        } = &self.credentials;
        if access_key.trim().is_empty() || secret_key.trim().is_empty() {
            return Err(Error::ClientConstruction(
                "access key and secret key must not be blank".into(),
            ));
        }
        if access_key.chars().any(char::is_whitespace) {
            return Err(Error::ClientConstruction(
                "access key must not contain whitespace".into(),
            ));
        }

        if self.region.trim().is_empty() {
            return Err(Error::ClientConstruction("region must not be empty".into()));
        }

        if let Some(endpoint) = &self.endpoint_url {
            let url = url::Url::parse(endpoint)
                .map_err(|e| Error::ClientConstruction(format!("invalid endpoint '{endpoint}': {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::ClientConstruction(format!(
                    "endpoint '{endpoint}' must use http or https"
                )));
            }
        }

        Ok(())
    }
}

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from connection options
    pub async fn new(options: ClientOptions) -> Result<Self> {
        options.validate()?;

        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            options.credentials.access_key.clone(),
            options.credentials.secret_key.clone(),
            None, // session token
            None, // expiry
            "mpclean-static-credentials",
        );

        // Build SDK config
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(options.region.clone()));
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(options.path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Map an SDK failure onto the core taxonomy
fn classify_error(message: String) -> Error {
    const AUTH_CODES: [&str; 5] = [
        "AccessDenied",
        "InvalidAccessKeyId",
        "SignatureDoesNotMatch",
        "InvalidToken",
        "Forbidden",
    ];

    if AUTH_CODES.iter().any(|code| message.contains(code)) {
        Error::Auth(message)
    } else {
        Error::Network(message)
    }
}

fn sdk_error<E: std::error::Error + 'static>(err: E) -> Error {
    classify_error(DisplayErrorContext(&err).to_string())
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}

#[async_trait]
impl UploadStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let mut buckets = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let response = self
                .inner
                .list_buckets()
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(sdk_error)?;

            buckets.extend(
                response
                    .buckets()
                    .iter()
                    .filter_map(|b| b.name().map(str::to_string)),
            );

            match response.continuation_token() {
                Some(token) if !token.is_empty() => continuation_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(buckets)
    }

    async fn list_multipart_uploads(&self, bucket: &str, token: Option<PageToken>) -> Result<UploadPage> {
        let token = token.unwrap_or_default();
        let response = self
            .inner
            .list_multipart_uploads()
            .bucket(bucket)
            .set_key_marker(token.key_marker)
            .set_upload_id_marker(token.upload_id_marker)
            .send()
            .await
            .map_err(sdk_error)?;

        let mut uploads = Vec::with_capacity(response.uploads().len());
        for upload in response.uploads() {
            let (Some(key), Some(upload_id), Some(initiated)) =
                (upload.key(), upload.upload_id(), upload.initiated().and_then(to_timestamp))
            else {
                tracing::warn!(bucket, key = ?upload.key(), "Skipping upload with incomplete listing entry");
                continue;
            };
            uploads.push(UploadDescriptor::new(key, upload_id, initiated));
        }

        let next = response.is_truncated().unwrap_or(false).then(|| PageToken {
            key_marker: response.next_key_marker().map(str::to_string),
            upload_id_marker: response.next_upload_id_marker().map(str::to_string),
        });

        Ok(UploadPage { uploads, next })
    }

    async fn list_parts(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_marker: Option<String>,
    ) -> Result<PartPage> {
        let response = self
            .inner
            .list_parts()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .set_part_number_marker(part_marker)
            .send()
            .await
            .map_err(sdk_error)?;

        let sizes = response
            .parts()
            .iter()
            .map(|p| p.size().unwrap_or(0).max(0) as u64)
            .collect();

        let next_part_marker = if response.is_truncated().unwrap_or(false) {
            response.next_part_number_marker().map(str::to_string)
        } else {
            None
        };

        Ok(PartPage {
            sizes,
            next_part_marker,
        })
    }

    async fn abort_multipart_upload(&self, bucket: &str, key: &str, upload_id: &str) -> Result<()> {
        self.inner
            .abort_multipart_upload()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}
