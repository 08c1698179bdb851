//! `/api/user` routes

use super::{path_id, run_authorized};
use crate::auth::roles::system_role::SYSTEM_ADMIN;
use crate::auth::{AuthorizationRule, AuthorizationScheme};
use crate::server::extractors::AuthenticatedUser;
use crate::server::state::AppState;
use crate::services::user_service;
use crate::utils::error::{ApiError, Result};
use actix_web::{HttpRequest, HttpResponse, web};

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/self", web::get().to(get_self))
        .route("/user/{userId}/projects", web::get().to(get_user_projects));
}

/// The caller's own system user record
async fn get_self(state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
    let system_user = run_authorized(&state, user, None, |_conn, context| {
        Box::pin(async move {
            context
                .system_user()
                .cloned()
                .ok_or_else(ApiError::access_denied)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(system_user))
}

async fn get_user_projects(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let user_id = path_id(&req, "userId")?;
    let scheme = AuthorizationScheme::all(vec![AuthorizationRule::system_role([SYSTEM_ADMIN])]);

    let projects = run_authorized(&state, user, Some(scheme), move |conn, _context| {
        Box::pin(async move { user_service::get_user_projects(conn, user_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(projects))
}
