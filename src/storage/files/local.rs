//! Local file system storage implementation
//!
//! Development backend. Objects live under `base_path/{key}` with a
//! `{key}.meta` JSON sidecar holding the upload metadata.

use crate::utils::error::{ApiError, Result};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::types::ObjectMetadata;

/// Local file storage
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage instance
    pub async fn new(base_path: &str, base_url: Option<&str>) -> Result<Self> {
        let path = PathBuf::from(base_path);

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                ApiError::FileStorage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("file://{}", path.display()));

        info!("Local file storage initialized at: {}", path.display());
        Ok(Self {
            base_path: path,
            base_url,
        })
    }

    /// Store an object
    pub async fn store(&self, key: &str, content: &[u8], metadata: &ObjectMetadata) -> Result<()> {
        let file_path = self.file_path(key)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ApiError::FileStorage(format!("Failed to create directory: {}", e))
            })?;
        }

        fs::write(&file_path, content)
            .await
            .map_err(|e| ApiError::FileStorage(format!("Failed to write file: {}", e)))?;

        let sidecar = serde_json::to_string_pretty(metadata).map_err(|e| {
            ApiError::FileStorage(format!("Failed to serialize metadata: {}", e))
        })?;
        fs::write(Self::metadata_path(&file_path), sidecar)
            .await
            .map_err(|e| ApiError::FileStorage(format!("Failed to write metadata: {}", e)))?;

        debug!("File stored: {} ({} bytes)", key, content.len());
        Ok(())
    }

    /// Retrieve object content
    #[cfg(test)]
    pub(crate) async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let file_path = self.file_path(key)?;

        if !file_path.exists() {
            return Err(ApiError::NotFound(format!("File not found: {}", key)));
        }

        fs::read(&file_path)
            .await
            .map_err(|e| ApiError::FileStorage(format!("Failed to read file: {}", e)))
    }

    /// Read the metadata sidecar of an object
    #[cfg(test)]
    pub(crate) async fn metadata(&self, key: &str) -> Result<ObjectMetadata> {
        let metadata_path = Self::metadata_path(&self.file_path(key)?);

        let content = fs::read_to_string(&metadata_path)
            .await
            .map_err(|e| ApiError::FileStorage(format!("Failed to read metadata: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| ApiError::FileStorage(format!("Failed to parse metadata: {}", e)))
    }

    /// URL of an existing object
    pub async fn url(&self, key: &str) -> Result<Option<String>> {
        if !self.file_path(key)?.exists() {
            return Ok(None);
        }
        Ok(Some(format!("{}/{}", self.base_url, key)))
    }

    /// Delete an object and its sidecar
    pub async fn delete(&self, key: &str) -> Result<()> {
        let file_path = self.file_path(key)?;
        let metadata_path = Self::metadata_path(&file_path);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| ApiError::FileStorage(format!("Failed to delete file: {}", e)))?;
        }

        if metadata_path.exists() {
            fs::remove_file(&metadata_path).await.map_err(|e| {
                ApiError::FileStorage(format!("Failed to delete metadata: {}", e))
            })?;
        }

        debug!("File deleted: {}", key);
        Ok(())
    }

    /// Resolve a key below the base path, refusing anything that escapes it
    fn file_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let is_contained = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_contained {
            return Err(ApiError::FileStorage(format!("Invalid object key: {}", key)));
        }

        Ok(self.base_path.join(relative))
    }

    fn metadata_path(file_path: &Path) -> PathBuf {
        let mut path = file_path.as_os_str().to_owned();
        path.push(".meta");
        PathBuf::from(path)
    }
}
