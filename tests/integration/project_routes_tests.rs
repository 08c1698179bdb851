//! `/api/project` routes

use crate::common::{TestApp, bearer, fixtures};
use actix_web::http::StatusCode;
use actix_web::test;
use biohub_rs::auth::roles::{project_role, system_role};
use biohub_rs::server::create_app;
use biohub_rs::storage::database::testing::{ConnectionCall, RecordingConnection};
use serde_json::{Value, json};

fn create_body() -> Value {
    json!({
        "coordinator": {
            "first_name": "Jane",
            "last_name": "Doe",
            "email_address": "jane@example.com",
            "coordinator_agency": "Ministry of Forests",
            "share_contact_details": "true"
        },
        "project": {
            "project_name": "Caribou recovery",
            "project_type": 1,
            "start_date": "2021-04-01"
        },
        "objectives": {"objectives": "Recover the herd"},
        "species": {"focal_species": ["Caribou"]}
    })
}

#[actix_web::test]
async fn test_creator_creates_project_and_becomes_lead() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::CREATOR])])
        .with_rows(vec![fixtures::id_row(5)])
        .with_rows(vec![fixtures::id_row(1)])
        .with_rows(vec![fixtures::id_row(1)]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/project")
        .insert_header(bearer("jdoe"))
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"id": 5}));

    let statements = app.connection.statements();
    assert_eq!(statements.len(), 4);
    assert!(statements[1].text().starts_with("INSERT INTO project"));
    assert!(statements[3].text().contains("project_participation"));
    assert_eq!(
        statements[3].values()[2],
        sea_orm::Value::from(project_role::PROJECT_LEAD)
    );
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 0);
}

#[actix_web::test]
async fn test_failed_child_insert_rolls_back_creation() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::CREATOR])])
        .with_rows(vec![fixtures::id_row(5)])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/project")
        .insert_header(bearer("jdoe"))
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Failed to insert project focal species data");
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 0);
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
    assert_eq!(app.connection.count(&ConnectionCall::Release), 1);
}

#[actix_web::test]
async fn test_stale_update_conflicts() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::EDITOR])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/update")
        .insert_header(bearer("jdoe"))
        .set_json(json!({
            "objectives": {"objectives": "Updated", "revision_count": 2}
        }))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Failed to update stale project data");
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}

#[actix_web::test]
async fn test_update_with_empty_permit_list() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::PROJECT_LEAD])]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/update")
        .insert_header(bearer("jdoe"))
        .set_json(json!({"permit": {"permits": []}}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Missing request body entity `permit`");
}

#[actix_web::test]
async fn test_publish_needs_flag() {
    let app = TestApp::new(RecordingConnection::new()).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/project/5/publish")
        .insert_header(bearer("jdoe"))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(app.connection.calls().is_empty());
}

#[actix_web::test]
async fn test_delete_removes_objects_after_commit() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::project_user(5, &[project_role::PROJECT_LEAD])])
        .with_rows(vec![json!({"publish_timestamp": null})])
        .with_rows(vec![
            json!({"key": "projects/5/plan.pdf"}),
            json!({"key": null}),
            json!({"key": "projects/5/surveys/2/submissions/7/obs.zip"}),
        ])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::delete()
        .uri("/api/project/5/delete")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
    assert_eq!(
        *app.store.deleted.lock(),
        vec![
            "projects/5/plan.pdf".to_string(),
            "projects/5/surveys/2/submissions/7/obs.zip".to_string()
        ]
    );
    let statements = app.connection.statements();
    assert_eq!(statements[4].text(), "CALL api_delete_project($1)");
}

#[actix_web::test]
async fn test_published_project_is_not_deleted() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::SYSTEM_ADMIN])])
        .with_rows(vec![json!({"publish_timestamp": "2021-06-01T00:00:00"})]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::delete()
        .uri("/api/project/5/delete")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.deleted.lock().is_empty());
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}

#[actix_web::test]
async fn test_project_list_is_filtered_for_participants() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::CREATOR])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(bearer("jdoe"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body, json!([]));

    let list = &app.connection.statements()[1];
    assert_eq!(list.values(), &[sea_orm::Value::from(fixtures::USER_ID)]);
}

#[actix_web::test]
async fn test_project_list_is_unfiltered_for_admins() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[system_role::PROJECT_ADMIN])])
        .with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(bearer("jdoe"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(app.connection.statements()[1].values().is_empty());
}
