//! Reads served to anonymous callers. Every query is limited to published projects.

use super::attachments::attachment_table;
use super::positive;
use crate::models::attachments::{AttachmentScope, AttachmentType};
use crate::storage::database::SqlStatement;
use tracing::debug;

pub fn get_public_search_results() -> SqlStatement {
    debug!("get_public_search_results");

    SqlStatement::new(
        "SELECT p.id, p.name, public.ST_AsGeoJSON(p.geography)::json AS geometry \
         FROM project p \
         WHERE p.publish_timestamp IS NOT NULL",
    )
}

pub fn get_public_project_list() -> SqlStatement {
    debug!("get_public_project_list");

    SqlStatement::new(
        "SELECT p.id, p.name, p.start_date::text AS start_date, p.end_date::text AS end_date, \
           p.coordinator_agency_name AS coordinator_agency, pt.name AS project_type, \
           p.publish_timestamp::text AS publish_timestamp, \
           (SELECT json_agg(pr.name) FROM project_region pr WHERE pr.p_id = p.id) AS regions \
         FROM project p \
         LEFT JOIN project_type pt ON p.pt_id = pt.id \
         WHERE p.publish_timestamp IS NOT NULL \
         ORDER BY p.publish_timestamp DESC",
    )
}

/// Unsecured attachments of a published project
pub fn get_public_project_attachments(
    project_id: i64,
    attachment_type: AttachmentType,
) -> Option<SqlStatement> {
    debug!(project_id, %attachment_type, "get_public_project_attachments");

    let table = attachment_table(&AttachmentScope::Project { project_id }, attachment_type);

    Some(SqlStatement::with_values(
        format!(
            "SELECT a.id, a.file_name, a.create_date::text AS create_date, \
               a.update_date::text AS update_date, a.file_size::int8 AS file_size, \
               NULL::text AS security_token \
             FROM {table} a \
             JOIN project p ON a.p_id = p.id \
             WHERE a.p_id = $1 AND a.security_token IS NULL \
               AND p.publish_timestamp IS NOT NULL \
             ORDER BY a.id"
        ),
        vec![positive(project_id)?.into()],
    ))
}

/// Key of an attachment of a published project, with its security token
pub fn get_public_attachment_key(
    project_id: i64,
    attachment_id: i64,
    attachment_type: AttachmentType,
) -> Option<SqlStatement> {
    debug!(project_id, attachment_id, %attachment_type, "get_public_attachment_key");

    let table = attachment_table(&AttachmentScope::Project { project_id }, attachment_type);

    Some(SqlStatement::with_values(
        format!(
            "SELECT a.key, a.security_token::text AS security_token \
             FROM {table} a \
             JOIN project p ON a.p_id = p.id \
             WHERE a.id = $1 AND a.p_id = $2 AND p.publish_timestamp IS NOT NULL"
        ),
        vec![positive(attachment_id)?.into(), positive(project_id)?.into()],
    ))
}
