//! `/api/permit` routes

use super::{required_body, run_authorized};
use crate::models::permit::{CreatePermitsResponse, PostPermitNoSamplingObject};
use crate::server::authorize::system_user_id;
use crate::server::extractors::AuthenticatedUser;
use crate::server::state::AppState;
use crate::services::permit_service;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/permit/create", web::post().to(create_permits))
        .route("/permit/list", web::get().to(get_permits));
}

/// Permits held outside any project
async fn create_permits(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: Option<web::Json<PostPermitNoSamplingObject>>,
) -> Result<HttpResponse> {
    let body = required_body(body)?;

    let ids = run_authorized(&state, user, None, move |conn, context| {
        Box::pin(async move {
            let system_user_id = system_user_id(&context)?;
            permit_service::create_no_sample_permits(conn, &body, system_user_id).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CreatePermitsResponse { ids }))
}

async fn get_permits(state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
    let permits = run_authorized(&state, user, None, |conn, context| {
        Box::pin(async move {
            let system_user_id = system_user_id(&context)?;
            permit_service::get_permits(conn, system_user_id).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(permits))
}
