//! Observation submission upload and status

use super::project::{READ_ROLES, WRITE_ROLES, project_scheme};
use super::{path_id, read_upload, run_authorized};
use crate::models::IdResponse;
use crate::server::extractors::AuthenticatedUser;
use crate::server::state::AppState;
use crate::services::occurrence_service;
use crate::storage::files::ObjectMetadata;
use crate::utils::error::Result;
use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/project/{projectId}/survey/{surveyId}/observation/submission/upload",
        web::post().to(upload_submission),
    )
    .route(
        "/project/{projectId}/survey/{surveyId}/observation/submission/get",
        web::get().to(get_submission),
    );
}

/// Record the submission, commit, then store the file under the derived key
async fn upload_submission(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    payload: Multipart,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let survey_id = path_id(&req, "surveyId")?;
    let form = read_upload(payload).await?;

    let metadata = ObjectMetadata {
        filename: form.file_name.clone(),
        username: user.claims.preferred_username.clone(),
        email: user.claims.email.clone(),
    };
    let file_name = form.file_name.clone();

    let prepared = run_authorized(
        &state,
        user,
        Some(project_scheme(&WRITE_ROLES, project_id)),
        move |conn, _context| {
            Box::pin(async move {
                occurrence_service::prepare_submission(conn, project_id, survey_id, &file_name).await
            })
        },
    )
    .await?;

    state.files.upload(&prepared.key, form.content, &metadata).await?;
    info!(survey_id, submission_id = prepared.submission_id, "Stored occurrence submission");

    Ok(HttpResponse::Ok().json(IdResponse {
        id: prepared.submission_id,
    }))
}

/// Latest submission of the survey, `null` when there is none
async fn get_submission(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let project_id = path_id(&req, "projectId")?;
    let survey_id = path_id(&req, "surveyId")?;

    let submission = run_authorized(
        &state,
        user,
        Some(project_scheme(&READ_ROLES, project_id)),
        move |conn, _context| {
            Box::pin(async move { occurrence_service::get_latest_submission(conn, project_id, survey_id).await })
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(submission))
}
