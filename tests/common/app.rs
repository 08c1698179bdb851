//! Test application state

use async_trait::async_trait;
use biohub_rs::auth::{JwtVerifier, TokenClaims};
use biohub_rs::config::{AuthConfig, Config};
use biohub_rs::server::AppState;
use biohub_rs::storage::database::testing::{RecordingConnection, RecordingFactory};
use biohub_rs::storage::files::{AttachmentStore, ObjectMetadata};
use biohub_rs::{ApiError, Result};
use jsonwebtoken::{EncodingKey, Header, encode};
use parking_lot::Mutex;
use std::sync::Arc;

pub const SECRET: &str = "integration_test_secret_0123456789abcdef";

/// Attachment store that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub uploads: Mutex<Vec<(String, Vec<u8>, ObjectMetadata)>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_uploads: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploads.lock().iter().map(|(key, _, _)| key.clone()).collect()
    }
}

#[async_trait]
impl AttachmentStore for MemoryStore {
    async fn upload(&self, key: &str, content: Vec<u8>, metadata: &ObjectMetadata) -> Result<()> {
        if self.fail_uploads {
            return Err(ApiError::file_storage("bucket unavailable"));
        }
        self.uploads
            .lock()
            .push((key.to_string(), content, metadata.clone()));
        Ok(())
    }

    async fn signed_url(&self, key: &str) -> Result<Option<String>> {
        Ok(Some(format!("https://objects.test/{}?signature=abc", key)))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.deleted.lock().push(key.to_string());
        Ok(())
    }
}

/// Application state backed by a scripted connection and a memory store
pub struct TestApp {
    pub connection: RecordingConnection,
    pub store: Arc<MemoryStore>,
    pub state: actix_web::web::Data<AppState>,
}

impl TestApp {
    pub async fn new(connection: RecordingConnection) -> Self {
        Self::with_store(connection, MemoryStore::default()).await
    }

    pub async fn with_store(connection: RecordingConnection, store: MemoryStore) -> Self {
        let auth = AuthConfig {
            jwt_secret: Some(SECRET.to_string()),
            leeway: 0,
            ..AuthConfig::default()
        };
        let jwt = JwtVerifier::new(&auth).await.unwrap();

        let mut config = Config::default();
        config.api.auth = auth;

        let store = Arc::new(store);
        let state = AppState::new(
            config,
            Arc::new(RecordingFactory::new(connection.clone())),
            jwt,
            store.clone(),
        );

        Self {
            connection,
            store,
            state: actix_web::web::Data::new(state),
        }
    }
}

/// `Authorization` header for a token issued to `username@idir`
pub fn bearer(username: &str) -> (&'static str, String) {
    let claims = TokenClaims {
        sub: format!("{}-sub", username),
        exp: chrono::Utc::now().timestamp() as u64 + 600,
        iat: Some(chrono::Utc::now().timestamp() as u64),
        iss: None,
        preferred_username: Some(format!("{}@idir", username)),
        email: Some(format!("{}@example.com", username)),
        given_name: None,
        family_name: None,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    ("Authorization", format!("Bearer {}", token))
}
