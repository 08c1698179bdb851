//! Backend selection and dispatch

use super::types::{AttachmentStore, FileStorage, ObjectMetadata};
use super::{LocalStorage, S3Storage};
use crate::config::FileStorageConfig;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;

impl FileStorage {
    /// Create the backend named by `storage_type`
    pub async fn new(config: &FileStorageConfig) -> Result<Self> {
        match config.storage_type.as_str() {
            "local" => {
                let path = config.local_path.as_deref().unwrap_or("./data/attachments");
                Ok(Self::Local(
                    LocalStorage::new(path, config.local_base_url.as_deref()).await?,
                ))
            }
            "s3" => {
                let s3 = config.s3.as_ref().ok_or_else(|| {
                    ApiError::Config("S3 storage requires an s3 section".to_string())
                })?;
                Ok(Self::S3(S3Storage::new(s3, config.signed_url_expiry).await?))
            }
            other => Err(ApiError::Config(format!(
                "Unsupported storage type: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl AttachmentStore for FileStorage {
    async fn upload(&self, key: &str, content: Vec<u8>, metadata: &ObjectMetadata) -> Result<()> {
        match self {
            Self::Local(storage) => storage.store(key, &content, metadata).await,
            Self::S3(storage) => storage.store(key, content, metadata).await,
        }
    }

    async fn signed_url(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Local(storage) => storage.url(key).await,
            Self::S3(storage) => storage.presigned_url(key).await.map(Some),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self {
            Self::Local(storage) => storage.delete(key).await,
            Self::S3(storage) => storage.delete(key).await,
        }
    }
}
