//! Authentication configuration
//!
//! Tokens are issued by an external identity provider. The API only verifies
//! them, either with a shared HMAC secret or with the provider's RSA public key.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 signed tokens
    pub jwt_secret: Option<String>,
    /// PEM encoded RSA public key (or a path to one) for RS256 signed tokens
    pub jwt_public_key: Option<String>,
    /// Expected `iss` claim
    pub issuer: Option<String>,
    /// Expected `aud` claim
    pub audience: Option<String>,
    /// Clock skew tolerance in seconds
    #[serde(default = "default_leeway")]
    pub leeway: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_public_key: None,
            issuer: None,
            audience: None,
            leeway: default_leeway(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        match (&self.jwt_secret, &self.jwt_public_key) {
            (None, None) => {
                Err("Either jwt_secret or jwt_public_key must be configured".to_string())
            }
            (Some(_), Some(_)) => {
                Err("Only one of jwt_secret and jwt_public_key may be configured".to_string())
            }
            (Some(secret), None) if secret.len() < 32 => {
                Err("JWT secret must be at least 32 characters long".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Log warnings for settings that are acceptable in development only
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.issuer.is_none() {
        warn!("JWT issuer is not configured; tokens from any issuer will be accepted");
    }
    if config.audience.is_none() {
        warn!("JWT audience is not configured; audience will not be validated");
    }
}

fn default_leeway() -> u64 {
    60
}
