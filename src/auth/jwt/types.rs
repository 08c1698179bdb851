//! JWT types and data structures

use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Verifies bearer tokens issued by the identity provider
#[derive(Clone)]
pub struct JwtVerifier {
    pub(super) decoding_key: DecodingKey,
    pub(super) validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("issuer", &self.validation.iss)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Claims the API reads from a verified token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject, the identity provider's user id
    pub sub: String,
    /// Expiration timestamp
    pub exp: u64,
    /// Issued at timestamp
    #[serde(default)]
    pub iat: Option<u64>,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
    /// `{identifier}@{source}`, e.g. `jdoe@idir`
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

impl TokenClaims {
    /// User identifier used to look up the system user
    ///
    /// The part of `preferred_username` before `@`, falling back to `sub`.
    pub fn user_identifier(&self) -> &str {
        self.preferred_username
            .as_deref()
            .and_then(|name| name.split('@').next())
            .filter(|identifier| !identifier.is_empty())
            .unwrap_or(&self.sub)
    }

    /// Identity source (`IDIR`, `BCEID`, ...) from the `preferred_username` suffix
    pub fn identity_source(&self) -> Option<String> {
        self.preferred_username
            .as_deref()
            .and_then(|name| name.split_once('@'))
            .map(|(_, source)| source.to_uppercase())
            .filter(|source| !source.is_empty())
    }
}
