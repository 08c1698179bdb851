//! `/api/permit` routes

use crate::common::{TestApp, bearer, fixtures};
use actix_web::http::StatusCode;
use actix_web::test;
use biohub_rs::server::create_app;
use biohub_rs::storage::database::testing::{ConnectionCall, RecordingConnection};
use serde_json::{Value, json};

fn permit_body(permits: Value) -> Value {
    json!({
        "coordinator": {
            "first_name": "Jane",
            "last_name": "Doe",
            "email_address": "jane@example.com",
            "coordinator_agency": "Ministry of Forests",
            "share_contact_details": false
        },
        "permit": {"permits": permits}
    })
}

#[actix_web::test]
async fn test_any_known_user_creates_permits() {
    let connection = RecordingConnection::new()
        .with_rows(vec![fixtures::system_user(&[])])
        .with_rows(vec![fixtures::id_row(40)])
        .with_rows(vec![fixtures::id_row(41)]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/permit/create")
        .insert_header(bearer("jdoe"))
        .set_json(permit_body(json!([
            {"permit_number": "P-1", "permit_type": "Park Use Permit"},
            {"permit_number": "P-2", "permit_type": "Wildlife Permit"}
        ])))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body, json!({"ids": [40, 41]}));
    assert_eq!(app.connection.count(&ConnectionCall::Commit), 1);
}

#[actix_web::test]
async fn test_empty_permit_list_is_rejected() {
    let connection = RecordingConnection::new().with_rows(vec![fixtures::system_user(&[])]);
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/permit/create")
        .insert_header(bearer("jdoe"))
        .set_json(permit_body(json!([])))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.connection.count(&ConnectionCall::Rollback), 1);
}

#[actix_web::test]
async fn test_unknown_user_cannot_list_permits() {
    let connection = RecordingConnection::new().with_empty();
    let app = TestApp::new(connection).await;
    let service = test::init_service(create_app(app.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/permit/list")
        .insert_header(bearer("stranger"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
