//! Read-only views of published projects

use super::execute;
use super::project_service;
use crate::models::attachments::{AttachmentKeyRow, AttachmentRow, AttachmentType, GetAttachmentsData};
use crate::models::project::ProjectViewObject;
use crate::models::public::{PublicProjectListItem, SearchResult, SearchRow};
use crate::queries::public as queries;
use crate::storage::database::DbConnection;
use crate::utils::error::{ApiError, Result};

/// Geometries of every published project
pub async fn search(connection: &mut dyn DbConnection) -> Result<Vec<SearchResult>> {
    let rows: Vec<SearchRow> = connection
        .query(&queries::get_public_search_results())
        .await?
        .rows_as()?;
    Ok(rows.into_iter().map(SearchResult::from).collect())
}

pub async fn get_project_list(connection: &mut dyn DbConnection) -> Result<Vec<PublicProjectListItem>> {
    connection
        .query(&queries::get_public_project_list())
        .await?
        .rows_as()
}

/// A published project; unpublished projects are reported as missing
pub async fn get_project(connection: &mut dyn DbConnection, project_id: i64) -> Result<ProjectViewObject> {
    let project = project_service::get_project(connection, project_id).await?;
    if !project.is_published() {
        return Err(ApiError::not_found("Failed to get project data"));
    }
    Ok(project.redact_private_contact())
}

/// Unsecured attachments and reports of a published project
pub async fn get_attachments(connection: &mut dyn DbConnection, project_id: i64) -> Result<GetAttachmentsData> {
    let attachments: Vec<AttachmentRow> = execute(
        connection,
        queries::get_public_project_attachments(project_id, AttachmentType::Other),
        "get public project attachments",
    )
    .await?
    .rows_as()?;

    let reports: Vec<AttachmentRow> = execute(
        connection,
        queries::get_public_project_attachments(project_id, AttachmentType::Report),
        "get public project reports",
    )
    .await?
    .rows_as()?;

    Ok(GetAttachmentsData::merge(attachments, reports))
}

/// Key of an unsecured attachment of a published project, `None` otherwise
pub async fn get_attachment_key(
    connection: &mut dyn DbConnection,
    project_id: i64,
    attachment_id: i64,
    attachment_type: AttachmentType,
) -> Result<Option<String>> {
    let row: Option<AttachmentKeyRow> = execute(
        connection,
        queries::get_public_attachment_key(project_id, attachment_id, attachment_type),
        "get public attachment key",
    )
    .await?
    .first_as()?;

    Ok(row
        .filter(|row| row.security_token.is_none())
        .map(|row| row.key))
}
