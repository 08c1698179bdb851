//! `/api/public` routes

use crate::common::TestApp;
use actix_web::http::StatusCode;
use actix_web::test;
use biohub_rs::server::create_app;
use biohub_rs::storage::database::testing::{ConnectionCall, RecordingConnection};
use serde_json::{Value, json};

#[actix_web::test]
async fn test_search_needs_no_token() {
    let connection = RecordingConnection::new().with_rows(vec![
        json!({"id": 1, "name": "Moose", "geometry": {"type": "Point", "coordinates": [-123.1, 49.2]}}),
        json!({"id": 2, "name": "Caribou", "geometry": null}),
    ]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/public/search").to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    assert_eq!(body[0]["geometry"][0]["type"], "Point");
    assert_eq!(body[1]["geometry"], json!([]));
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
}

#[actix_web::test]
async fn test_signed_url_for_unsecured_attachment() {
    let connection = RecordingConnection::new()
        .with_rows(vec![json!({"key": "projects/1/plan.pdf", "security_token": null})]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/public/project/1/attachments/2/getSignedUrl?attachmentType=Other")
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body, json!("https://objects.test/projects/1/plan.pdf?signature=abc"));
}

#[actix_web::test]
async fn test_secured_attachment_has_no_public_url() {
    let connection = RecordingConnection::new()
        .with_rows(vec![json!({"key": "projects/1/plan.pdf", "security_token": "6f1d"})]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/public/project/1/attachments/2/getSignedUrl?attachmentType=Report")
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn test_public_attachment_list_reads_unsecured_rows() {
    let connection = RecordingConnection::new()
        .with_rows(vec![json!({"id": 1, "file_name": "a.csv"})])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/public/project/1/attachments/list")
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body["attachmentsList"].as_array().unwrap().len(), 1);

    let statements = app.connection.statements();
    assert!(statements[0].text().contains("security_token IS NULL"));
    assert!(statements[1].text().contains("project_report_attachment"));
}

#[actix_web::test]
async fn test_public_database_failure_rolls_back() {
    let connection = RecordingConnection::new().with_query_error("statement timeout");
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/public/projects").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        app.connection.calls().last(),
        Some(&ConnectionCall::Release)
    );
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}
