//! Object storage types

use super::{LocalStorage, S3Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Object storage backend
#[derive(Debug, Clone)]
pub enum FileStorage {
    /// Local file system storage
    Local(LocalStorage),
    /// Amazon S3 (or compatible) storage
    S3(S3Storage),
}

/// Metadata stored alongside every uploaded object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Original file name as uploaded
    pub filename: String,
    /// Identifier of the uploading user
    pub username: Option<String>,
    /// Email of the uploading user
    pub email: Option<String>,
}

/// Operations the API needs from an object store
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store `content` under `key`, replacing any existing object
    async fn upload(&self, key: &str, content: Vec<u8>, metadata: &ObjectMetadata) -> Result<()>;

    /// Time limited GET URL for `key`, `None` when it cannot be produced
    async fn signed_url(&self, key: &str) -> Result<Option<String>>;

    /// Remove the object stored under `key`
    async fn delete(&self, key: &str) -> Result<()>;
}
