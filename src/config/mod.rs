//! Configuration management for the API
//!
//! Configuration is read from a YAML file, overridden from the environment and
//! validated once at startup.

mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{ApiError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the API
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API configuration
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let mut api: ApiConfig = serde_yaml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {}", e)))?;
        api.apply_env_overrides()?;

        let config = Self { api };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults and environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut api = ApiConfig::default();
        api.apply_env_overrides()?;

        let config = Self { api };
        config.validate()?;
        Ok(config)
    }

    pub fn server(&self) -> &ServerConfig {
        &self.api.server
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.api.database
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.api.auth
    }

    pub fn object_storage(&self) -> &FileStorageConfig {
        &self.api.object_storage
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.api.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.api
            .server
            .validate()
            .map_err(|e| ApiError::Config(format!("Server config error: {}", e)))?;

        self.api
            .database
            .validate()
            .map_err(|e| ApiError::Config(format!("Database config error: {}", e)))?;

        self.api
            .auth
            .validate()
            .map_err(|e| ApiError::Config(format!("Auth config error: {}", e)))?;

        self.api
            .object_storage
            .validate()
            .map_err(|e| ApiError::Config(format!("Object storage config error: {}", e)))?;

        self.api
            .logging
            .validate()
            .map_err(|e| ApiError::Config(format!("Logging config error: {}", e)))?;

        models::auth::warn_insecure_config(&self.api.auth);

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.api)
            .map_err(|e| ApiError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
