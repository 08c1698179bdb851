//! Unauthenticated service endpoints

use crate::server::state::AppState;
use crate::storage::database::{SqlStatement, run_in_transaction};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::warn;

/// `GET /health`, reports whether the database answers
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let mut connection = state.connections.api_user_connection();
    let database = run_in_transaction(connection.as_mut(), |conn| {
        Box::pin(async move { conn.query(&SqlStatement::new("SELECT 1")).await.map(|_| ()) })
    })
    .await;

    let timestamp = chrono::Utc::now().to_rfc3339();
    match database {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "timestamp": timestamp,
            "version": crate::VERSION
        })),
        Err(e) => {
            warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "timestamp": timestamp,
                "version": crate::VERSION
            }))
        }
    }
}

/// `GET /api/version`
pub async fn version() -> HttpResponse {
    HttpResponse::Ok().json(crate::build_info())
}
