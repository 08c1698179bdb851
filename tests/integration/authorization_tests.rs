//! Authorization decisions and what they do to the request transaction

use crate::common::{TestApp, bearer, fixtures};
use actix_web::http::StatusCode;
use actix_web::test;
use biohub_rs::auth::roles::{project_role, system_role};
use biohub_rs::server::create_app;
use biohub_rs::storage::database::testing::{ConnectionCall, RecordingConnection};
use serde_json::Value;

#[actix_web::test]
async fn test_unreadable_body_is_rejected_before_the_transaction() {
    let app = TestApp::new(RecordingConnection::new()).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/project")
        .insert_header(bearer("jdoe"))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Missing required request body");
    assert!(app.connection.calls().is_empty());
}

#[actix_web::test]
async fn test_missing_project_role_is_access_denied() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/publish")
        .insert_header(bearer("jdoe"))
        .set_json(serde_json::json!({"publish": true}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Access Denied");

    assert_eq!(
        app.connection.calls().last(),
        Some(&ConnectionCall::Release)
    );
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 0);
    assert_eq!(app.connection.count(&ConnectionCall::Release), 1);
    // system user and participation lookups only, no publish statement
    assert_eq!(app.connection.statements().len(), 2);
}

#[actix_web::test]
async fn test_viewer_may_not_publish() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::VIEWER])]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/publish")
        .insert_header(bearer("jdoe"))
        .set_json(serde_json::json!({"publish": true}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_system_admin_skips_project_lookup() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::SYSTEM_ADMIN])])
        .with_rows(vec![fixtures::id_row(5)]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/publish")
        .insert_header(bearer("jdoe"))
        .set_json(serde_json::json!({"publish": true}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let statements = app.connection.statements();
    assert_eq!(statements.len(), 2);
    assert!(statements[1].text().starts_with("UPDATE project"));
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
}

#[actix_web::test]
async fn test_failed_role_lookup_denies() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_query_error("relation project_participation does not exist");
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/project/5/view")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}

#[actix_web::test]
async fn test_user_projects_need_system_admin() {
    let connection = RecordingConnection::new().with_rows(vec![fixtures::system_user(&[
        system_role::PROJECT_ADMIN,
    ])]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/user/14/projects")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_self_returns_resolved_user() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::CREATOR])]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/user/self")
        .insert_header(bearer("jdoe"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body["id"], fixtures::USER_ID);
    assert_eq!(body["role_names"][0], system_role::CREATOR);

    let lookup = &app.connection.statements()[0];
    assert_eq!(lookup.values()[0], sea_orm::Value::from("jdoe"));
}
