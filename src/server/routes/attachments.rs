//! Attachment routes, mounted under both the project and the survey path

use super::project::{READ_ROLES, WRITE_ROLES, project_scheme};
use super::{AttachmentTypeQuery, path_id, read_upload, required_body, run_authorized};
use crate::auth::roles::system_role::PROJECT_ADMIN;
use crate::auth::{AuthorizationRule, AuthorizationScheme};
use crate::models::attachments::{AttachmentScope, AttachmentSecurityRequest, AttachmentType};
use crate::server::extractors::AuthenticatedUser;
use crate::server::state::AppState;
use crate::services::attachment_service;
use crate::storage::files::ObjectMetadata;
use crate::utils::error::{ApiError, Result};
use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::warn;

const PROJECT_PREFIX: &str = "/project/{projectId}/attachments";
const SURVEY_PREFIX: &str = "/project/{projectId}/survey/{surveyId}/attachments";

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    for prefix in [PROJECT_PREFIX, SURVEY_PREFIX] {
        cfg.route(&format!("{prefix}/upload"), web::post().to(upload_attachment))
            .route(&format!("{prefix}/list"), web::get().to(get_attachments))
            .route(
                &format!("{prefix}/{{attachmentId}}/getSignedUrl"),
                web::get().to(get_signed_url),
            )
            .route(
                &format!("{prefix}/{{attachmentId}}/delete"),
                web::delete().to(delete_attachment),
            )
            .route(
                &format!("{prefix}/{{attachmentId}}/makeSecure"),
                web::put().to(make_secure),
            )
            .route(
                &format!("{prefix}/{{attachmentId}}/makeUnsecure"),
                web::put().to(make_unsecure),
            );
    }
}

/// Survey scope when the route carries a survey id, project scope otherwise
fn attachment_scope(req: &HttpRequest) -> Result<AttachmentScope> {
    let project_id = path_id(req, "projectId")?;
    if req.match_info().get("surveyId").is_some() {
        let survey_id = path_id(req, "surveyId")?;
        Ok(AttachmentScope::Survey {
            project_id,
            survey_id,
        })
    } else {
        Ok(AttachmentScope::Project { project_id })
    }
}

fn security_scheme() -> AuthorizationScheme {
    AuthorizationScheme::all(vec![AuthorizationRule::system_role([PROJECT_ADMIN])])
}

/// Record the file and store it; a failed store rolls the record back
async fn upload_attachment(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    payload: Multipart,
) -> Result<HttpResponse> {
    let scope = attachment_scope(&req)?;
    let form = read_upload(payload).await?;

    let attachment_type = form
        .field("attachmentType")
        .map(AttachmentType::parse)
        .unwrap_or_default();
    let metadata = ObjectMetadata {
        filename: form.file_name.clone(),
        username: user.claims.preferred_username.clone(),
        email: user.claims.email.clone(),
    };
    let files = state.files.clone();

    let response = run_authorized(
        &state,
        user,
        Some(project_scheme(&WRITE_ROLES, scope.project_id())),
        move |conn, _context| {
            Box::pin(async move {
                let size = form.size();
                let (response, key) = attachment_service::upsert_attachment(
                    conn,
                    &scope,
                    attachment_type,
                    &form.file_name,
                    size,
                )
                .await?;
                files.upload(&key, form.content, &metadata).await?;
                Ok(response)
            })
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(response))
}

async fn get_attachments(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let scope = attachment_scope(&req)?;

    let data = run_authorized(
        &state,
        user,
        Some(project_scheme(&READ_ROLES, scope.project_id())),
        move |conn, _context| Box::pin(async move { attachment_service::get_attachments(conn, &scope).await }),
    )
    .await?;

    Ok(HttpResponse::Ok().json(data))
}

/// Signed URL of the stored object, `null` when there is none
async fn get_signed_url(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    query: web::Query<AttachmentTypeQuery>,
) -> Result<HttpResponse> {
    let scope = attachment_scope(&req)?;
    let attachment_id = path_id(&req, "attachmentId")?;
    let attachment_type = query.attachment_type();

    let key = run_authorized(
        &state,
        user,
        Some(project_scheme(&READ_ROLES, scope.project_id())),
        move |conn, _context| {
            Box::pin(async move {
                attachment_service::get_attachment_key(conn, &scope, attachment_type, attachment_id).await
            })
        },
    )
    .await?;

    let url = attachment_service::signed_url(state.files.as_ref(), key.as_deref()).await;
    Ok(HttpResponse::Ok().json(url))
}

/// Delete the record, then the stored object
async fn delete_attachment(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    query: web::Query<AttachmentTypeQuery>,
) -> Result<HttpResponse> {
    let scope = attachment_scope(&req)?;
    let attachment_id = path_id(&req, "attachmentId")?;
    let attachment_type = query.attachment_type();

    let key = run_authorized(
        &state,
        user,
        Some(project_scheme(&WRITE_ROLES, scope.project_id())),
        move |conn, _context| {
            Box::pin(async move {
                attachment_service::delete_attachment(conn, &scope, attachment_type, attachment_id).await
            })
        },
    )
    .await?;

    if let Some(key) = key.filter(|key| !key.is_empty()) {
        if let Err(e) = state.files.delete(&key).await {
            warn!(attachment_id, key = %key, "Failed to delete attachment object: {}", e);
        }
    }

    Ok(HttpResponse::Ok().finish())
}

fn security_request(body: Option<web::Json<AttachmentSecurityRequest>>) -> Result<(AttachmentType, Option<String>)> {
    let body = required_body(body)?;
    let attachment_type = body
        .attachment_type
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(AttachmentType::parse)
        .ok_or_else(|| ApiError::missing_body_entity("attachmentType"))?;
    Ok((attachment_type, body.security_token))
}

async fn make_secure(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    body: Option<web::Json<AttachmentSecurityRequest>>,
) -> Result<HttpResponse> {
    let scope = attachment_scope(&req)?;
    let attachment_id = path_id(&req, "attachmentId")?;
    let (attachment_type, _) = security_request(body)?;

    run_authorized(&state, user, Some(security_scheme()), move |conn, _context| {
        Box::pin(async move {
            attachment_service::secure_attachment(conn, &scope, attachment_type, attachment_id).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(1))
}

async fn make_unsecure(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: AuthenticatedUser,
    body: Option<web::Json<AttachmentSecurityRequest>>,
) -> Result<HttpResponse> {
    let scope = attachment_scope(&req)?;
    let attachment_id = path_id(&req, "attachmentId")?;
    let (attachment_type, security_token) = security_request(body)?;
    let security_token = security_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::missing_body_entity("securityToken"))?;

    run_authorized(&state, user, Some(security_scheme()), move |conn, _context| {
        Box::pin(async move {
            attachment_service::unsecure_attachment(
                conn,
                &scope,
                attachment_type,
                attachment_id,
                &security_token,
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(1))
}
