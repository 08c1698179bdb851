//! Survey and observation submission routes

use crate::common::{MemoryStore, TestApp, bearer, fixtures};
use actix_web::http::StatusCode;
use actix_web::test;
use biohub_rs::auth::roles::project_role;
use biohub_rs::server::create_app;
use biohub_rs::storage::database::testing::{ConnectionCall, RecordingConnection};
use serde_json::{Value, json};

#[actix_web::test]
async fn test_editor_creates_survey() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::EDITOR])])
        .with_rows(vec![fixtures::id_row(9)])
        .with_rows(vec![fixtures::id_row(1)]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/project/5/survey/create")
        .insert_header(bearer("jdoe"))
        .set_json(fixtures::survey_body())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"id": 9}));
    assert_eq!(
        app.connection.calls().last(),
        Some(&ConnectionCall::Release)
    );
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
}

#[actix_web::test]
async fn test_viewer_cannot_create_survey() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::VIEWER])]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/project/5/survey/create")
        .insert_header(bearer("jdoe"))
        .set_json(fixtures::survey_body())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.connection.statements().len(), 2);
}

#[actix_web::test]
async fn test_missing_survey_is_not_found() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::VIEWER])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/project/5/survey/9/view")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_submission_is_stored_after_commit() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::PROJECT_LEAD])])
        .with_rows(vec![fixtures::id_row(31)])
        .with_rows(vec![fixtures::id_row(31)]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let (content_type, body) = fixtures::multipart("moose.zip", "PK..", &[]);
    let req = test::TestRequest::post()
        .uri("/api/project/5/survey/9/observation/submission/upload")
        .insert_header(bearer("jdoe"))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(
        app.store.uploaded_keys(),
        vec!["projects/5/surveys/9/submissions/31/moose.zip".to_string()]
    );
    let uploads = app.store.uploads.lock();
    assert_eq!(uploads[0].2.filename, "moose.zip");
    assert_eq!(uploads[0].2.username.as_deref(), Some("jdoe@idir"));
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
}

#[actix_web::test]
async fn test_submission_store_failure_after_commit() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::EDITOR])])
        .with_rows(vec![fixtures::id_row(31)])
        .with_rows(vec![fixtures::id_row(31)]);
    let app = TestApp::with_store(connection, MemoryStore::failing()).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let (content_type, body) = fixtures::multipart("moose.zip", "PK..", &[]);
    let req = test::TestRequest::post()
        .uri("/api/project/5/survey/9/observation/submission/upload")
        .insert_header(bearer("jdoe"))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // the record was already committed
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 0);
}

#[actix_web::test]
async fn test_upload_without_file() {
    let app = TestApp::new(RecordingConnection::new()).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let boundary = "empty-boundary";
    let req = test::TestRequest::post()
        .uri("/api/project/5/survey/9/observation/submission/upload")
        .insert_header(bearer("jdoe"))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
        ))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Missing upload data");
    assert!(app.connection.calls().is_empty());
}

#[actix_web::test]
async fn test_lead_cannot_publish_survey_of_another_project() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(1, &[project_role::PROJECT_LEAD])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/1/survey/99/publish")
        .insert_header(bearer("jdoe"))
        .set_json(json!({"publish": true}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let publish = &app.connection.statements()[2];
    assert!(publish.text().ends_with("WHERE id = $1 AND p_id = $3 RETURNING id"));
    assert_eq!(publish.values()[2], sea_orm::Value::from(1i64));
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}

#[actix_web::test]
async fn test_submission_for_survey_of_another_project_is_rejected() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(1, &[project_role::EDITOR])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let (content_type, body) = fixtures::multipart("obs.zip", "PK", &[]);
    let req = test::TestRequest::post()
        .uri("/api/project/1/survey/99/observation/submission/upload")
        .insert_header(bearer("jdoe"))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(app.connection.statements()[2].text().contains("s.p_id = $2"));
    assert!(app.store.uploaded_keys().is_empty());
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 0);
}
