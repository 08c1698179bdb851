//! `/api/project` routes

use super::{path_id, required_body, run_authorized};
use crate::auth::roles::project_role::{EDITOR, PROJECT_LEAD, VIEWER};
use crate::auth::roles::system_role::{CREATOR, PROJECT_ADMIN, SYSTEM_ADMIN};
use crate::auth::{AuthorizationRule, AuthorizationScheme, user_has_valid_role};
use crate::models::project::{PostProjectObject, PutProjectObject};
use crate::models::{IdResponse, PublishRequest};
use crate::server::authorize::system_user_id;
use crate::server::extractors::AuthenticatedUser;
use crate::server::state::AppState;
use crate::services::project_service;
use crate::utils::error::{ApiError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::warn;

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/project", web::post().to(create_project))
        .route("/projects", web::get().to(get_project_list))
        .route("/project/{projectId}/view", web::get().to(get_project))
        .route("/project/{projectId}/update", web::put().to(update_project))
        .route("/project/{projectId}/publish", web::put().to(publish_project))
        .route("/project/{projectId}/delete", web::delete().to(delete_project));
}

/// Scheme requiring one of `roles` on `project_id`
pub(super) fn project_scheme(roles: &[&str], project_id: i64) -> AuthorizationScheme {
    AuthorizationScheme::all(vec![AuthorizationRule::project_role(
        roles.iter().copied(),
        project_id,
    )])
}

pub(super) const READ_ROLES: [&str; 3] = [PROJECT_LEAD, EDITOR, VIEWER];
pub(super) const WRITE_ROLES: [&str; 2] = [PROJECT_LEAD, EDITOR];

async fn create_project(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: Option<web::Json<PostProjectObject>>,
) -> Result<HttpResponse> {
    let body = required_body(body)?;
    let scheme = AuthorizationScheme::all(vec![AuthorizationRule::system_role([
        PROJECT_ADMIN,
        CREATOR,
    ])]);

    let id = run_authorized(&state, user, Some(scheme), move |conn, context| {
        Box::pin(async move {
            let system_user_id = system_user_id(&context)?;
            project_service::create_project(conn, &body, system_user_id).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

/// Every project for administrators, the caller's own projects otherwise
async fn get_project_list(state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
    let projects = run_authorized(&state, user, None, |conn, context| {
        Box::pin(async move {
            let filter = if user_has_valid_role(&[SYSTEM_ADMIN, PROJECT_ADMIN], context.system_roles()) {
                None
            } else {
                Some(system_user_id(&context)?)
            };
            project_service::get_project_list(conn, filter).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(projects))
}

async fn get_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;

    let project = run_authorized(
        &state,
        user,
        Some(project_scheme(&READ_ROLES, project_id)),
        move |conn, _context| Box::pin(async move { project_service::get_project(conn, project_id).await }),
    )
    .await?;

    Ok(HttpResponse::Ok().json(project))
}

async fn update_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    body: Option<web::Json<PutProjectObject>>,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let body = required_body(body)?;

    run_authorized(
        &state,
        user,
        Some(project_scheme(&WRITE_ROLES, project_id)),
        move |conn, context| {
            Box::pin(async move {
                let system_user_id = system_user_id(&context)?;
                project_service::update_project(conn, project_id, &body, system_user_id).await
            })
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(IdResponse { id: project_id }))
}

async fn publish_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    body: Option<web::Json<PublishRequest>>,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let publish = required_body(body)?
        .publish
        .ok_or_else(ApiError::missing_body)?;

    let id = run_authorized(
        &state,
        user,
        Some(project_scheme(&[PROJECT_LEAD], project_id)),
        move |conn, _context| {
            Box::pin(async move { project_service::update_publish_status(conn, project_id, publish).await })
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

/// Delete the project, then its stored objects
async fn delete_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;

    let keys = run_authorized(
        &state,
        user,
        Some(project_scheme(&[PROJECT_LEAD], project_id)),
        move |conn, _context| Box::pin(async move { project_service::delete_project(conn, project_id).await }),
    )
    .await?;

    for key in &keys {
        if let Err(e) = state.files.delete(key).await {
            warn!(project_id, key = %key, "Failed to delete project object: {}", e);
        }
    }

    Ok(HttpResponse::Ok().json(true))
}
