//! `/api/project/{projectId}/survey` routes

use super::project::{READ_ROLES, WRITE_ROLES, project_scheme};
use super::{path_id, required_body, run_authorized};
use crate::auth::roles::project_role::PROJECT_LEAD;
use crate::models::survey::PostSurveyObject;
use crate::models::{IdResponse, PublishRequest};
use crate::server::extractors::AuthenticatedUser;
use crate::server::state::AppState;
use crate::services::survey_service;
use crate::utils::error::{ApiError, Result};
use actix_web::{HttpRequest, HttpResponse, web};

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/project/{projectId}/survey/create", web::post().to(create_survey))
        .route("/project/{projectId}/surveys", web::get().to(get_survey_list))
        .route("/project/{projectId}/survey/{surveyId}/view", web::get().to(get_survey))
        .route(
            "/project/{projectId}/survey/{surveyId}/publish",
            web::put().to(publish_survey),
        );
}

async fn create_survey(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    body: Option<web::Json<PostSurveyObject>>,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let body = required_body(body)?;

    let id = run_authorized(
        &state,
        user,
        Some(project_scheme(&WRITE_ROLES, project_id)),
        move |conn, _context| Box::pin(async move { survey_service::create_survey(conn, project_id, &body).await }),
    )
    .await?;

    Ok(HttpResponse::Ok().json(IdResponse { id }))
}

async fn get_survey_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;

    let surveys = run_authorized(
        &state,
        user,
        Some(project_scheme(&READ_ROLES, project_id)),
        move |conn, _context| Box::pin(async move { survey_service::get_survey_list(conn, project_id).await }),
    )
    .await?;

    Ok(HttpResponse::Ok().json(surveys))
}

async fn get_survey(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let survey_id = path_id(&req, "surveyId")?;

    let survey = run_authorized(
        &state,
        user,
        Some(project_scheme(&READ_ROLES, project_id)),
        move |conn, _context| {
            Box::pin(async move { survey_service::get_survey(conn, project_id, survey_id).await })
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(survey))
}

async fn publish_survey(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    body: Option<web::Json<PublishRequest>>,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let survey_id = path_id(&req, "surveyId")?;
    let publish = required_body(body)?
        .publish
        .ok_or_else(ApiError::missing_body)?;

    let id = run_authorized(
        &state,
        user,
        Some(project_scheme(&[PROJECT_LEAD], project_id)),
        move |conn, _context| {
            Box::pin(async move { survey_service::update_publish_status(conn, project_id, survey_id, publish).await })
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(IdResponse { id }))
}
