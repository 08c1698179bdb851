//! `/api/public` routes
//!
//! No authentication. Everything runs on the API user connection and only
//! ever exposes published projects.

use super::{AttachmentTypeQuery, path_id, run_public};
use crate::server::state::AppState;
use crate::services::{attachment_service, public_service};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/public/search", web::get().to(search))
        .route("/public/projects", web::get().to(get_project_list))
        .route("/public/project/{projectId}/view", web::get().to(get_project))
        .route(
            "/public/project/{projectId}/attachments/list",
            web::get().to(get_attachments),
        )
        .route(
            "/public/project/{projectId}/attachments/{attachmentId}/getSignedUrl",
            web::get().to(get_signed_url),
        );
}

async fn search(state: web::Data<AppState>) -> Result<HttpResponse> {
    let results = run_public(&state, |conn| Box::pin(public_service::search(conn))).await?;
    Ok(HttpResponse::Ok().json(results))
}

async fn get_project_list(state: web::Data<AppState>) -> Result<HttpResponse> {
    let projects = run_public(&state, |conn| Box::pin(public_service::get_project_list(conn))).await?;
    Ok(HttpResponse::Ok().json(projects))
}

async fn get_project(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let project = run_public(&state, move |conn| {
        Box::pin(public_service::get_project(conn, project_id))
    })
    .await?;
    Ok(HttpResponse::Ok().json(project))
}

async fn get_attachments(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let data = run_public(&state, move |conn| {
        Box::pin(public_service::get_attachments(conn, project_id))
    })
    .await?;
    Ok(HttpResponse::Ok().json(data))
}

/// Signed URL of an unsecured attachment of a published project, else `null`
async fn get_signed_url(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<AttachmentTypeQuery>,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let attachment_id = path_id(&req, "attachmentId")?;
    let attachment_type = query.required_attachment_type()?;

    let key = run_public(&state, move |conn| {
        Box::pin(public_service::get_attachment_key(
            conn,
            project_id,
            attachment_id,
            attachment_type,
        ))
    })
    .await?;

    let url = attachment_service::signed_url(state.files.as_ref(), key.as_deref()).await;
    Ok(HttpResponse::Ok().json(url))
}
