//! # BioHub API
//!
//! REST API for managing conservation and research projects, their surveys,
//! file attachments and permits, with a public read-only view of published work.
//!
//! Every protected request is authorized against the caller's system roles and
//! their project-scoped roles, then executed inside a single database
//! transaction that is committed on success and rolled back on any failure.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use biohub_rs::{BioHub, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/api.yaml").await?;
//!     let api = BioHub::new(config).await?;
//!     api.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod models;
pub mod queries;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{ApiError, Result};

use tracing::info;

/// A configured API instance ready to serve requests
pub struct BioHub {
    server: server::HttpServer,
}

impl BioHub {
    /// Create a new API instance, connecting to the database and object store
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating BioHub API instance");
        let server = server::HttpServer::new(&config).await?;
        Ok(Self { server })
    }

    /// Run the HTTP server until shutdown
    pub async fn run(self) -> Result<()> {
        info!("Starting BioHub API");
        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information reported by `/api/version`
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_time: &'static str,
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_time: option_env!("BIOHUB_BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("BIOHUB_GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build information for this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
