//! Configuration data models
//!
//! This module defines all configuration structures used by the API.

#![allow(missing_docs)]

pub mod api;
pub mod auth;
pub mod file_storage;
pub mod logging;
pub mod server;
pub mod storage;

pub use api::*;
pub use auth::*;
pub use file_storage::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    6100
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    50 * 1024 * 1024 // 50MB, attachments are uploaded through the API
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_min_connections() -> u32 {
    1
}

pub fn default_connection_timeout() -> u64 {
    5
}

/// Lifetime of a presigned download URL in seconds
pub fn default_signed_url_expiry() -> u64 {
    300
}

pub fn default_true() -> bool {
    true
}
