//! Object storage configuration

use super::default_signed_url_expiry;
use serde::{Deserialize, Serialize};

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStorageConfig {
    /// Storage type (`local` or `s3`)
    #[serde(default = "default_storage_type")]
    pub storage_type: String,
    /// Local storage path
    pub local_path: Option<String>,
    /// Base URL under which locally stored objects are served
    pub local_base_url: Option<String>,
    /// S3 configuration
    pub s3: Option<S3Config>,
    /// Lifetime of presigned download URLs in seconds
    #[serde(default = "default_signed_url_expiry")]
    pub signed_url_expiry: u64,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            storage_type: default_storage_type(),
            local_path: Some("./data/attachments".to_string()),
            local_base_url: None,
            s3: None,
            signed_url_expiry: default_signed_url_expiry(),
        }
    }
}

impl FileStorageConfig {
    /// Validate object storage configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.storage_type.as_str() {
            "local" => {
                if self.local_path.as_deref().is_none_or(str::is_empty) {
                    return Err("Local storage requires local_path".to_string());
                }
            }
            "s3" => {
                let s3 = self
                    .s3
                    .as_ref()
                    .ok_or_else(|| "S3 storage requires an s3 section".to_string())?;
                if s3.bucket.is_empty() {
                    return Err("S3 bucket name is required".to_string());
                }
            }
            other => return Err(format!("Unsupported storage type: {}", other)),
        }

        if self.signed_url_expiry == 0 {
            return Err("Signed URL expiry cannot be 0".to_string());
        }

        Ok(())
    }
}

/// S3 configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID
    pub access_key_id: Option<String>,
    /// Secret access key
    pub secret_access_key: Option<String>,
    /// Endpoint URL (for S3-compatible services)
    pub endpoint: Option<String>,
}

fn default_storage_type() -> String {
    "local".to_string()
}

fn default_region() -> String {
    "ca-central-1".to_string()
}
