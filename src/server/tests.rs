//! HTTP level tests for the server wiring

use crate::auth::{JwtVerifier, TokenClaims};
use crate::config::{AuthConfig, Config};
use crate::server::create_app;
use crate::server::middleware::REQUEST_ID_HEADER;
use crate::server::state::AppState;
use crate::storage::database::testing::{ConnectionCall, RecordingConnection, RecordingFactory};
use crate::storage::files::{AttachmentStore, ObjectMetadata};
use crate::utils::error::Result;
use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use std::sync::Arc;

const SECRET: &str = "server_test_secret_0123456789abcdef";

struct NullStore;

#[async_trait]
impl AttachmentStore for NullStore {
    async fn upload(&self, _key: &str, _content: Vec<u8>, _metadata: &ObjectMetadata) -> Result<()> {
        Ok(())
    }

    async fn signed_url(&self, key: &str) -> Result<Option<String>> {
        Ok(Some(format!("https://files.test/{}", key)))
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

async fn state(connection: RecordingConnection) -> web::Data<AppState> {
    let auth = AuthConfig {
        jwt_secret: Some(SECRET.to_string()),
        ..AuthConfig::default()
    };
    let jwt = JwtVerifier::new(&auth).await.unwrap();
    let mut config = Config::default();
    config.api.auth = auth;

    web::Data::new(AppState::new(
        config,
        Arc::new(RecordingFactory::new(connection)),
        jwt,
        Arc::new(NullStore),
    ))
}

fn token() -> String {
    let claims = TokenClaims {
        sub: "f0e1d2c3".to_string(),
        exp: chrono::Utc::now().timestamp() as u64 + 300,
        iat: None,
        iss: None,
        preferred_username: Some("jdoe@idir".to_string()),
        email: None,
        given_name: None,
        family_name: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[actix_web::test]
async fn test_version() {
    let app = test::init_service(create_app(state(RecordingConnection::new()).await)).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], crate::NAME);
    assert_eq!(body["version"], crate::VERSION);
}

#[actix_web::test]
async fn test_health_commits_and_releases() {
    let connection = RecordingConnection::new().with_rows(vec![json!({"?column?": 1})]);
    let app = test::init_service(create_app(state(connection.clone()).await)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(
        connection.calls(),
        vec![
            ConnectionCall::Open,
            ConnectionCall::Query("SELECT 1".to_string()),
            ConnectionCall::Commit,
            ConnectionCall::Release,
        ]
    );
}

#[actix_web::test]
async fn test_health_reports_unreachable_database() {
    let connection = RecordingConnection::new().failing_open();
    let app = test::init_service(create_app(state(connection.clone()).await)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(connection.count(&ConnectionCall::Rollback), 0);
    assert_eq!(connection.count(&ConnectionCall::Release), 1);
}

#[actix_web::test]
async fn test_request_id_is_echoed() {
    let app = test::init_service(create_app(state(RecordingConnection::new()).await)).await;

    let req = test::TestRequest::get()
        .uri("/api/version")
        .insert_header((REQUEST_ID_HEADER, "req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
}

#[actix_web::test]
async fn test_error_body_carries_request_id() {
    let app = test::init_service(create_app(state(RecordingConnection::new()).await)).await;

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header((REQUEST_ID_HEADER, "req-77"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["request_id"], "req-77");
}

#[actix_web::test]
async fn test_protected_route_needs_token() {
    let connection = RecordingConnection::new();
    let app = test::init_service(create_app(state(connection.clone()).await)).await;

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    assert!(connection.calls().is_empty());
}

#[actix_web::test]
async fn test_unknown_user_is_denied_and_rolled_back() {
    let connection = RecordingConnection::new().with_empty();
    let app = test::init_service(create_app(state(connection.clone()).await)).await;

    let req = test::TestRequest::get()
        .uri("/api/user/self")
        .insert_header(("Authorization", format!("Bearer {}", token())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Access Denied");
    assert_eq!(connection.count(&ConnectionCall::Commit), 0);
    assert_eq!(connection.count(&ConnectionCall::Rollback), 1);
    assert_eq!(connection.count(&ConnectionCall::Release), 1);
}

#[actix_web::test]
async fn test_bad_path_param_is_rejected_before_any_query() {
    let connection = RecordingConnection::new();
    let app = test::init_service(create_app(state(connection.clone()).await)).await;

    let req = test::TestRequest::get()
        .uri("/api/project/0/view")
        .insert_header(("Authorization", format!("Bearer {}", token())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Missing required path param `projectId`");
    assert!(connection.calls().is_empty());
}

#[actix_web::test]
async fn test_public_signed_url_needs_attachment_type() {
    let app = test::init_service(create_app(state(RecordingConnection::new()).await)).await;

    let req = test::TestRequest::get()
        .uri("/api/public/project/1/attachments/2/getSignedUrl")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
