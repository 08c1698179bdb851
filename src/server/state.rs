//! Application state shared across HTTP handlers

use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::storage::{AttachmentStore, ConnectionFactory};
use std::sync::Arc;

/// Resources every handler can reach
///
/// Cloned per worker; all fields are shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Per-request database connections
    pub connections: Arc<dyn ConnectionFactory>,
    pub jwt: Arc<JwtVerifier>,
    /// Attachment object store
    pub files: Arc<dyn AttachmentStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        connections: Arc<dyn ConnectionFactory>,
        jwt: JwtVerifier,
        files: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            connections,
            jwt: Arc::new(jwt),
            files,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
