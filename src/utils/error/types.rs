//! Error types for the API

use thiserror::Error;

/// Result type alias for the API
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Missing or invalid credentials
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    /// Authorization denied
    #[error("{0}")]
    Forbidden(String),

    /// Malformed request, missing parameters or a statement that could not be built
    #[error("{0}")]
    BadRequest(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stale revision or a row that could not be changed
    #[error("{0}")]
    Conflict(String),

    /// Object storage errors
    #[error("File storage error: {0}")]
    FileStorage(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
