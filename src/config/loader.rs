//! Environment overrides
//!
//! Deployment settings arrive as environment variables and take precedence over
//! the YAML file.

use super::models::*;
use crate::utils::error::{ApiError, Result};
use std::str::FromStr;
use tracing::debug;

impl ApiConfig {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying configuration overrides from environment");

        if let Some(host) = var("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("API_PORT") {
            self.server.port = parse("API_PORT", &port)?;
        }
        if let Some(workers) = var("API_WORKERS") {
            self.server.workers = Some(parse("API_WORKERS", &workers)?);
        }

        if let Some(url) = var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(schema) = var("DB_SCHEMA") {
            self.database.schema = Some(schema);
        }
        if let Some(max) = var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", &max)?;
        }

        if let Some(secret) = var("JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(key) = var("JWT_PUBLIC_KEY") {
            self.auth.jwt_public_key = Some(key);
        }
        if let Some(issuer) = var("JWT_ISSUER") {
            self.auth.issuer = Some(issuer);
        }
        if let Some(audience) = var("JWT_AUDIENCE") {
            self.auth.audience = Some(audience);
        }

        if let Some(storage_type) = var("OBJECT_STORE_TYPE") {
            self.object_storage.storage_type = storage_type;
        }
        if let Some(path) = var("OBJECT_STORE_LOCAL_PATH") {
            self.object_storage.local_path = Some(path);
        }
        if let Some(bucket) = var("OBJECT_STORE_BUCKET_NAME") {
            self.s3_mut().bucket = bucket;
        }
        if let Some(endpoint) = var("OBJECT_STORE_URL") {
            self.s3_mut().endpoint = Some(endpoint);
        }
        if let Some(access_key_id) = var("OBJECT_STORE_ACCESS_KEY_ID") {
            self.s3_mut().access_key_id = Some(access_key_id);
        }
        if let Some(secret) = var("OBJECT_STORE_SECRET_KEY_ID") {
            self.s3_mut().secret_access_key = Some(secret);
        }
        if let Some(expiry) = var("OBJECT_STORE_SIGNED_URL_EXPIRY") {
            self.object_storage.signed_url_expiry =
                parse("OBJECT_STORE_SIGNED_URL_EXPIRY", &expiry)?;
        }

        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = var("LOG_JSON") {
            self.logging.json = parse("LOG_JSON", &json)?;
        }

        Ok(())
    }

    fn s3_mut(&mut self) -> &mut S3Config {
        self.object_storage.s3.get_or_insert_with(|| S3Config {
            bucket: String::new(),
            region: "ca-central-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
        })
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| ApiError::Config(format!("Invalid {}: {}", key, e)))
}
