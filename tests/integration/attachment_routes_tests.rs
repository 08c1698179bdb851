//! Project and survey attachment routes

use crate::common::{MemoryStore, TestApp, bearer, fixtures};
use actix_web::http::StatusCode;
use actix_web::test;
use biohub_rs::auth::roles::{project_role, system_role};
use biohub_rs::server::create_app;
use biohub_rs::storage::database::testing::{ConnectionCall, RecordingConnection};
use serde_json::{Value, json};

#[actix_web::test]
async fn test_report_upload_is_recorded_and_stored() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::EDITOR])])
        .with_empty()
        .with_rows(vec![json!({"id": 12, "revision_count": 0})]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let (content_type, body) =
        fixtures::multipart("plan.pdf", "%PDF", &[("attachmentType", "Report")]);
    let req = test::TestRequest::post()
        .uri("/api/project/5/attachments/upload")
        .insert_header(bearer("jdoe"))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["attachmentId"], 12);

    let statements = app.connection.statements();
    assert!(statements[3].text().starts_with("INSERT INTO project_report_attachment"));
    assert_eq!(app.store.uploaded_keys(), vec!["projects/5/plan.pdf".to_string()]);
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
}

#[actix_web::test]
async fn test_failed_store_rolls_back_upload() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::EDITOR])])
        .with_rows(vec![json!({"id": 12, "revision_count": 1})]);
    let app = TestApp::with_store(connection, MemoryStore::failing()).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let (content_type, body) = fixtures::multipart("notes.csv", "a,b", &[]);
    let req = test::TestRequest::post()
        .uri("/api/project/5/survey/9/attachments/upload")
        .insert_header(bearer("jdoe"))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert!(app.connection.statements()[2].text().starts_with("UPDATE survey_attachment"));
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 0);
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}

#[actix_web::test]
async fn test_viewer_lists_survey_attachments() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::VIEWER])])
        .with_rows(vec![json!({"id": 1, "file_name": "a.csv", "file_size": 3})])
        .with_rows(vec![json!({"id": 2, "file_name": "b.pdf", "security_token": "9c1e"})]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/project/5/survey/9/attachments/list")
        .insert_header(bearer("jdoe"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    let list = body["attachmentsList"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["fileType"], "Other");
    assert_eq!(list[1]["fileType"], "Report");
    assert_eq!(list[1]["securityToken"], "9c1e");
}

#[actix_web::test]
async fn test_signed_url_is_null_without_key() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::VIEWER])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/project/5/attachments/3/getSignedUrl?attachmentType=Other")
        .insert_header(bearer("jdoe"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn test_delete_removes_object_after_commit() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::PROJECT_LEAD])])
        .with_rows(vec![json!({"key": "projects/5/plan.pdf"})]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::delete()
        .uri("/api/project/5/attachments/3/delete?attachmentType=Report")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(app.connection.statements()[2].text().contains("project_report_attachment"));
    assert_eq!(*app.store.deleted.lock(), vec!["projects/5/plan.pdf".to_string()]);
}

#[actix_web::test]
async fn test_make_secure_needs_project_administrator() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/attachments/3/makeSecure")
        .insert_header(bearer("jdoe"))
        .set_json(json!({"attachmentType": "Other"}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_make_secure_and_unsecure() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::PROJECT_ADMIN])])
        .with_rows(vec![fixtures::id_row(3)])
        .with_rows(vec![fixtures::system_user(&[system_role::PROJECT_ADMIN])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/attachments/3/makeSecure")
        .insert_header(bearer("jdoe"))
        .set_json(json!({"attachmentType": "Other"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body, json!(1));

    let req = test::TestRequest::put()
        .uri("/api/project/5/attachments/3/makeUnsecure")
        .insert_header(bearer("jdoe"))
        .set_json(json!({"attachmentType": "Report", "securityToken": "stale"}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Failed to unsecure record");
}

#[actix_web::test]
async fn test_make_unsecure_needs_token() {
    let app = TestApp::new(RecordingConnection::new()).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/attachments/3/makeUnsecure")
        .insert_header(bearer("jdoe"))
        .set_json(json!({"attachmentType": "Report"}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(app.connection.calls().is_empty());
}

#[actix_web::test]
async fn test_survey_outside_path_project_cannot_be_touched() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(1, &[project_role::EDITOR])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::delete()
        .uri("/api/project/1/survey/99/attachments/5/delete")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let delete = &app.connection.statements()[2];
    assert!(delete.text().contains("s_id IN (SELECT id FROM survey WHERE p_id = $3)"));
    assert_eq!(
        delete.values(),
        &[
            sea_orm::Value::from(5i64),
            sea_orm::Value::from(99i64),
            sea_orm::Value::from(1i64)
        ]
    );
    assert!(app.store.deleted.lock().is_empty());
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 0);
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}
