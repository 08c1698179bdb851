//! HTTP route modules
//!
//! Every protected handler follows the same shape: authenticate the bearer
//! token, open a transaction, authorize against the route's scheme on that
//! transaction, run the service calls, commit. Object store side effects that
//! must not be undone by a rollback run after the commit.

mod attachments;
mod observation;
mod permit;
mod project;
mod public;
mod survey;
mod user;

use crate::auth::{AuthorizationContext, AuthorizationScheme};
use crate::models::attachments::AttachmentType;
use crate::server::authorize::authorize_request;
use crate::server::extractors::AuthenticatedUser;
use crate::server::state::AppState;
use crate::storage::database::{DbConnection, run_in_transaction};
use crate::utils::error::{ApiError, Result};
use actix_multipart::Multipart;
use actix_web::{HttpRequest, web};
use futures::StreamExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error};

/// Mount every `/api` route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(user::configure)
            .configure(project::configure)
            .configure(survey::configure)
            .configure(observation::configure)
            .configure(attachments::configure)
            .configure(permit::configure)
            .configure(public::configure),
    );
}

/// Authorize `user` against `scheme` and run `operations`, all in one transaction
pub(crate) async fn run_authorized<T, F>(
    state: &AppState,
    user: AuthenticatedUser,
    scheme: Option<AuthorizationScheme>,
    operations: F,
) -> Result<T>
where
    T: Send + 'static,
    F: for<'c> FnOnce(&'c mut dyn DbConnection, AuthorizationContext) -> BoxFuture<'c, Result<T>>
        + Send
        + 'static,
{
    let mut connection = state.connections.connection();
    run_in_transaction(connection.as_mut(), move |conn| {
        Box::pin(async move {
            let context = authorize_request(&mut *conn, &user, scheme.as_ref()).await?;
            operations(conn, context).await
        })
    })
    .await
}

/// Run `operations` in a transaction on the read-only API user connection
pub(crate) async fn run_public<T, F>(state: &AppState, operations: F) -> Result<T>
where
    F: for<'c> FnOnce(&'c mut dyn DbConnection) -> BoxFuture<'c, Result<T>>,
{
    let mut connection = state.connections.api_user_connection();
    run_in_transaction(connection.as_mut(), operations).await
}

/// A positive integer path parameter
pub(crate) fn path_id(req: &HttpRequest, name: &str) -> Result<i64> {
    req.match_info()
        .get(name)
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::missing_path_param(name))
}

/// JSON body, where a missing or unreadable body is a client error
pub(crate) fn required_body<T>(body: Option<web::Json<T>>) -> Result<T> {
    body.map(web::Json::into_inner).ok_or_else(ApiError::missing_body)
}

/// `?attachmentType=` query
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AttachmentTypeQuery {
    #[serde(rename = "attachmentType")]
    pub attachment_type: Option<String>,
}

impl AttachmentTypeQuery {
    /// Parsed type, `Other` when absent
    pub fn attachment_type(&self) -> AttachmentType {
        self.attachment_type
            .as_deref()
            .map(AttachmentType::parse)
            .unwrap_or_default()
    }

    /// Parsed type, rejecting a missing value
    pub fn required_attachment_type(&self) -> Result<AttachmentType> {
        match self.attachment_type.as_deref() {
            Some(value) if !value.is_empty() => Ok(AttachmentType::parse(value)),
            _ => Err(ApiError::missing_query_param("attachmentType")),
        }
    }
}

/// Multipart field that carries the uploaded file
pub(crate) const MEDIA_FIELD: &str = "media";

/// A single uploaded file plus the form's text fields
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub file_name: String,
    pub content: Vec<u8>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn size(&self) -> i64 {
        i64::try_from(self.content.len()).unwrap_or(i64::MAX)
    }
}

/// Read a multipart body holding exactly one `media` file
pub(crate) async fn read_upload(mut payload: Multipart) -> Result<UploadForm> {
    let mut form = UploadForm::default();
    let mut files = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            error!("Error reading multipart field: {}", e);
            ApiError::bad_request(format!("Invalid multipart data: {}", e))
        })?;

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| {
                error!("Error reading upload chunk: {}", e);
                ApiError::bad_request("Error reading file")
            })?;
            data.extend_from_slice(&bytes);
        }

        if name == MEDIA_FIELD {
            files += 1;
            form.file_name = file_name.unwrap_or_default();
            form.content = data;
        } else {
            form.fields
                .insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    match files {
        0 => Err(ApiError::bad_request("Missing upload data")),
        1 if form.file_name.is_empty() => Err(ApiError::bad_request("Missing upload data")),
        1 => {
            debug!(file_name = %form.file_name, size = form.content.len(), "Read upload");
            Ok(form)
        }
        _ => Err(ApiError::bad_request("Too many files uploaded, expected 1")),
    }
}
