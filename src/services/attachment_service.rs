//! Attachments of projects and surveys
//!
//! Rows live in the database, file contents in the object store. Database
//! work happens inside the request transaction; object store calls are left
//! to the caller so they run after a successful commit.

use super::{execute, execute_returning_id};
use crate::models::attachments::{
    AttachmentKeyRow, AttachmentRow, AttachmentScope, AttachmentType, GetAttachmentsData,
    UploadAttachmentResponse, UpsertedAttachmentRow,
};
use crate::queries::attachments as queries;
use crate::storage::database::DbConnection;
use crate::storage::files::{AttachmentStore, ObjectKey};
use crate::utils::error::{ApiError, Result};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

/// Object key for an attachment file
pub fn attachment_key(scope: &AttachmentScope, file_name: &str) -> String {
    match scope {
        AttachmentScope::Project { project_id } => ObjectKey::project_file(*project_id, file_name).build(),
        AttachmentScope::Survey {
            project_id,
            survey_id,
        } => ObjectKey::survey_file(*project_id, *survey_id, file_name).build(),
    }
}

/// Plain attachments and reports of the scope, merged
pub async fn get_attachments(
    connection: &mut dyn DbConnection,
    scope: &AttachmentScope,
) -> Result<GetAttachmentsData> {
    let attachments: Vec<AttachmentRow> = execute(
        connection,
        queries::get_attachments(scope, AttachmentType::Other),
        "get attachments",
    )
    .await?
    .rows_as()?;

    let reports: Vec<AttachmentRow> = execute(
        connection,
        queries::get_attachments(scope, AttachmentType::Report),
        "get report attachments",
    )
    .await?
    .rows_as()?;

    Ok(GetAttachmentsData::merge(attachments, reports))
}

/// Record an uploaded file, bumping the existing row of the same name
///
/// Returns the response body and the key the file must be stored under.
pub async fn upsert_attachment(
    connection: &mut dyn DbConnection,
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    file_name: &str,
    file_size: i64,
) -> Result<(UploadAttachmentResponse, String)> {
    let key = attachment_key(scope, file_name);

    let updated: Option<UpsertedAttachmentRow> = execute(
        connection,
        queries::update_existing_attachment(scope, attachment_type, file_name, file_size),
        "update attachment",
    )
    .await?
    .first_as()?;

    let row = match updated {
        Some(row) => row,
        None => execute(
            connection,
            queries::insert_attachment(scope, attachment_type, file_name, file_size, &key),
            "insert attachment",
        )
        .await?
        .first_as()?
        .ok_or_else(|| ApiError::bad_request("Failed to insert attachment data"))?,
    };

    info!(attachment_id = row.id, %attachment_type, "Recorded attachment");
    Ok((
        UploadAttachmentResponse {
            attachment_id: row.id,
            revision_count: row.revision_count,
        },
        key,
    ))
}

/// Stored key of one attachment, `None` when there is no such row
pub async fn get_attachment_key(
    connection: &mut dyn DbConnection,
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
) -> Result<Option<String>> {
    let row: Option<AttachmentKeyRow> = execute(
        connection,
        queries::get_attachment_key(scope, attachment_type, attachment_id),
        "get attachment key",
    )
    .await?
    .first_as()?;
    Ok(row.map(|row| row.key))
}

#[derive(Debug, Deserialize)]
struct DeletedRow {
    key: Option<String>,
}

/// Delete the attachment row, returning the key of the object to remove
pub async fn delete_attachment(
    connection: &mut dyn DbConnection,
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
) -> Result<Option<String>> {
    let row: DeletedRow = execute(
        connection,
        queries::delete_attachment(scope, attachment_type, attachment_id),
        "delete attachment",
    )
    .await?
    .first_as()?
    .ok_or_else(|| ApiError::bad_request("Failed to delete attachment record"))?;
    Ok(row.key)
}

pub async fn secure_attachment(
    connection: &mut dyn DbConnection,
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
) -> Result<()> {
    execute_returning_id(
        connection,
        queries::secure_attachment(scope, attachment_type, attachment_id, Uuid::new_v4()),
        "secure attachment",
        "Failed to secure record",
    )
    .await?;
    info!(attachment_id, %attachment_type, "Secured attachment");
    Ok(())
}

pub async fn unsecure_attachment(
    connection: &mut dyn DbConnection,
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
    security_token: &str,
) -> Result<()> {
    execute_returning_id(
        connection,
        queries::unsecure_attachment(scope, attachment_type, attachment_id, security_token),
        "unsecure attachment",
        "Failed to unsecure record",
    )
    .await?;
    info!(attachment_id, %attachment_type, "Unsecured attachment");
    Ok(())
}

/// Signed GET URL for a key; any failure yields `None`
pub async fn signed_url(store: &dyn AttachmentStore, key: Option<&str>) -> Option<String> {
    let key = key.filter(|key| !key.is_empty())?;
    match store.signed_url(key).await {
        Ok(url) => url,
        Err(e) => {
            warn!(key, "Failed to sign attachment URL: {}", e);
            None
        }
    }
}
