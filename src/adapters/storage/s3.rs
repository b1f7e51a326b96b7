//! S3 object store
//!
//! Uses the AWS SDK default chain for region and credentials unless the
//! configuration pins them. `endpoint` plus `force_path_style` cover MinIO and
//! other S3-compatible services.

use super::traits::{ObjectHeaders, ObjectStore};
use crate::config::StorageConfig;
use crate::domain::{Result, StorageError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use secrecy::ExposeSecret;
use std::path::Path;
use tracing::{debug, instrument};

/// Region used when a dry run has none configured
const DRY_RUN_REGION: &str = "us-east-1";

/// [`ObjectStore`] backed by one S3 bucket
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client for the configured bucket
    ///
    /// No request is sent; bad credentials surface on the first upload.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(config.force_path_style);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let secret: &str = secret_access_key.expose_secret().as_ref();
            builder = builder.credentials_provider(Credentials::new(
                access_key_id.clone(),
                secret.to_string(),
                None,
                None,
                "facility-feed-config",
            ));
        }

        let s3_config = builder.build();
        if s3_config.region().is_none() {
            return Err(StorageError::ClientInitFailed(
                "no region configured (set storage.region or AWS_REGION)".to_string(),
            )
            .into());
        }

        debug!(bucket = %config.bucket, endpoint = ?config.endpoint, "S3 client initialized");

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }

    /// Build a client without consulting the AWS environment
    ///
    /// Dry runs never send a request, so a missing region or credential
    /// chain is not an error. The configured region is kept when present.
    pub fn for_dry_run(config: &StorageConfig) -> Self {
        let region = config
            .region
            .clone()
            .unwrap_or_else(|| DRY_RUN_REGION.to_string());

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region))
            .force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        debug!(bucket = %config.bucket, "S3 client initialized for dry run");

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, headers), fields(bucket = %self.bucket))]
    async fn put_file(&self, path: &Path, key: &str, headers: &ObjectHeaders) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(&headers.content_type);

        if let Some(encoding) = &headers.content_encoding {
            request = request.content_encoding(encoding);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn exists(&self, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.as_service_error().map(|se| se.is_not_found()).unwrap_or(false) {
                    Ok(false)
                } else {
                    Err(StorageError::HeadFailed {
                        key: key.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                    .into())
                }
            }
        }
    }

    fn describe(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}
