//! Token verification

use super::types::{JwtVerifier, TokenClaims};
use crate::config::AuthConfig;
use crate::utils::error::{ApiError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::{debug, warn};

impl JwtVerifier {
    /// Create a verifier from configuration
    ///
    /// `jwt_public_key` may hold the PEM text itself or a path to a PEM file.
    pub async fn new(config: &AuthConfig) -> Result<Self> {
        let (decoding_key, algorithm) = match (&config.jwt_public_key, &config.jwt_secret) {
            (Some(public_key), _) => {
                let pem = if public_key.trim_start().starts_with("-----BEGIN") {
                    public_key.clone()
                } else {
                    tokio::fs::read_to_string(public_key).await.map_err(|e| {
                        ApiError::Config(format!("Failed to read JWT public key: {}", e))
                    })?
                };
                (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256)
            }
            (None, Some(secret)) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            (None, None) => {
                return Err(ApiError::Config(
                    "No JWT verification key configured".to_string(),
                ));
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway;
        match &config.issuer {
            Some(issuer) => validation.set_issuer(&[issuer]),
            None => validation.iss = None,
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                warn!("JWT verification failed: {}", e);
                ApiError::Jwt(e)
            })?;

        debug!("Token verified for user: {}", token_data.claims.user_identifier());
        Ok(token_data.claims)
    }
}
