//! Amazon S3 storage implementation
//!
//! Also works against S3 compatible object stores when an endpoint is
//! configured. Requires the `s3` feature; without it every operation fails.

use crate::config::S3Config;
use crate::utils::error::{ApiError, Result};
use tracing::info;
#[cfg(feature = "s3")]
use tracing::debug;

#[cfg(feature = "s3")]
use aws_sdk_s3 as aws_s3;

use super::types::ObjectMetadata;

/// S3 file storage
#[derive(Debug, Clone)]
pub struct S3Storage {
    bucket: String,
    signed_url_expiry: u64,
    #[cfg(feature = "s3")]
    client: aws_s3::Client,
}

impl S3Storage {
    /// Create a new S3 storage instance
    #[cfg(feature = "s3")]
    pub async fn new(config: &S3Config, signed_url_expiry: u64) -> Result<Self> {
        use aws_s3::config::{Credentials, Region};

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id.clone(),
                secret_access_key.clone(),
                None,
                None,
                "biohub-config",
            ));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let shared_config = loader.load().await;
        let s3_config = aws_s3::config::Builder::from(&shared_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        info!(
            "S3 file storage initialized: bucket={}, region={}",
            config.bucket, config.region
        );

        Ok(Self {
            bucket: config.bucket.clone(),
            signed_url_expiry,
            client: aws_s3::Client::from_conf(s3_config),
        })
    }

    /// Create a new S3 storage instance
    #[cfg(not(feature = "s3"))]
    pub async fn new(config: &S3Config, signed_url_expiry: u64) -> Result<Self> {
        info!(
            "S3 storage configured for bucket {} but the `s3` feature is disabled",
            config.bucket
        );
        Ok(Self {
            bucket: config.bucket.clone(),
            signed_url_expiry,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload an object with user metadata
    #[cfg(feature = "s3")]
    pub async fn store(&self, key: &str, content: Vec<u8>, metadata: &ObjectMetadata) -> Result<()> {
        use aws_s3::primitives::ByteStream;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(content))
            .metadata("filename", metadata.filename.clone());

        if let Some(username) = &metadata.username {
            request = request.metadata("username", username.clone());
        }
        if let Some(email) = &metadata.email {
            request = request.metadata("email", email.clone());
        }

        request
            .send()
            .await
            .map_err(|e| ApiError::FileStorage(format!("S3 upload failed: {}", e)))?;

        debug!("File uploaded to S3: {}", key);
        Ok(())
    }

    #[cfg(not(feature = "s3"))]
    pub async fn store(&self, _key: &str, _content: Vec<u8>, _metadata: &ObjectMetadata) -> Result<()> {
        Err(feature_disabled())
    }

    /// Presigned GET URL
    #[cfg(feature = "s3")]
    pub async fn presigned_url(&self, key: &str) -> Result<String> {
        use aws_s3::presigning::PresigningConfig;
        use std::time::Duration;

        let presigning = PresigningConfig::expires_in(Duration::from_secs(self.signed_url_expiry))
            .map_err(|e| ApiError::FileStorage(format!("Invalid presigning config: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| ApiError::FileStorage(format!("S3 presigning failed: {}", e)))?;

        Ok(request.uri().to_string())
    }

    #[cfg(not(feature = "s3"))]
    pub async fn presigned_url(&self, _key: &str) -> Result<String> {
        let _ = self.signed_url_expiry;
        Err(feature_disabled())
    }

    /// Delete an object
    #[cfg(feature = "s3")]
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ApiError::FileStorage(format!("S3 deletion failed: {}", e)))?;

        debug!("File deleted from S3: {}", key);
        Ok(())
    }

    #[cfg(not(feature = "s3"))]
    pub async fn delete(&self, _key: &str) -> Result<()> {
        Err(feature_disabled())
    }
}

#[cfg(not(feature = "s3"))]
fn feature_disabled() -> ApiError {
    ApiError::FileStorage("S3 feature not enabled".to_string())
}
