//! Server startup with automatic configuration loading

use crate::config::{Config, warn_insecure_config};
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use crate::utils::logging::init_logging;
use tracing::{info, warn};

/// Default configuration file, relative to the working directory
pub const CONFIG_PATH: &str = "config/api.yaml";

/// Load configuration, initialize logging and serve until shutdown
///
/// Falls back to environment-only configuration when the file is missing.
pub async fn run_server() -> Result<()> {
    let (config, file_error) = match Config::from_file(CONFIG_PATH).await {
        Ok(config) => (config, None),
        Err(e) => (Config::from_env()?, Some(e)),
    };

    init_logging(config.logging());
    info!("Starting BioHub API v{}", crate::VERSION);
    match file_error {
        None => info!("Configuration loaded from {}", CONFIG_PATH),
        Some(e) => warn!("Using environment configuration, {} not loaded: {}", CONFIG_PATH, e),
    }
    warn_insecure_config(config.auth());

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );

    server.start().await
}
