//! Database configuration

use super::*;
use serde::{Deserialize, Serialize};

const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/biohub";

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Schema placed first on the search path of every connection
    pub schema: Option<String>,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum idle connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Log every SQL statement at debug level
    #[serde(default)]
    pub sql_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            schema: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            sql_logging: false,
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL is required".to_string());
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err("Only PostgreSQL database URLs are supported".to_string());
        }

        if self.max_connections == 0 {
            return Err("Max connections cannot be 0".to_string());
        }

        if self.min_connections > self.max_connections {
            return Err("Min connections cannot exceed max connections".to_string());
        }

        Ok(())
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}
