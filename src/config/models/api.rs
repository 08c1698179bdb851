//! Top level API configuration

use super::*;
use serde::{Deserialize, Serialize};

/// API configuration, the root of `config/api.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub object_storage: FileStorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
