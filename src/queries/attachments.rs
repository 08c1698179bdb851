//! Attachment queries for project and survey scopes
//!
//! Four tables share one layout: `{project,survey}_{attachment,report_attachment}`.
//! Project tables are keyed by `p_id`, survey tables by `s_id`.

use super::{non_blank, positive};
use crate::models::attachments::{AttachmentScope, AttachmentType};
use crate::storage::database::SqlStatement;
use sea_orm::Value;
use tracing::debug;
use uuid::Uuid;

pub(crate) fn attachment_table(scope: &AttachmentScope, attachment_type: AttachmentType) -> &'static str {
    match (scope, attachment_type) {
        (AttachmentScope::Project { .. }, AttachmentType::Other) => "project_attachment",
        (AttachmentScope::Project { .. }, AttachmentType::Report) => "project_report_attachment",
        (AttachmentScope::Survey { .. }, AttachmentType::Other) => "survey_attachment",
        (AttachmentScope::Survey { .. }, AttachmentType::Report) => "survey_report_attachment",
    }
}

/// Owner of the scope's rows
///
/// A survey owner carries its project so every statement only matches
/// surveys of the project the caller was authorized on.
struct Owner {
    column: &'static str,
    id: i64,
    project_id: Option<i64>,
}

impl Owner {
    fn of(scope: &AttachmentScope) -> Option<Self> {
        match scope {
            AttachmentScope::Project { project_id } => Some(Self {
                column: "p_id",
                id: positive(*project_id)?,
                project_id: None,
            }),
            AttachmentScope::Survey {
                project_id,
                survey_id,
            } => Some(Self {
                column: "s_id",
                id: positive(*survey_id)?,
                project_id: Some(positive(*project_id)?),
            }),
        }
    }

    /// Filter binding the owner at `$first`, and its project at `$first + 1`
    fn filter(&self, first: usize) -> String {
        match self.project_id {
            None => format!("{} = ${first}", self.column),
            Some(_) => format!(
                "{column} = ${first} AND {column} IN (SELECT id FROM survey WHERE p_id = ${project})",
                column = self.column,
                project = first + 1,
            ),
        }
    }

    fn values(&self) -> Vec<Value> {
        let mut values = vec![self.id.into()];
        values.extend(self.project_id.map(Value::from));
        values
    }
}

fn with_owner(mut values: Vec<Value>, owner: &Owner) -> Vec<Value> {
    values.extend(owner.values());
    values
}

pub fn get_attachments(scope: &AttachmentScope, attachment_type: AttachmentType) -> Option<SqlStatement> {
    debug!(?scope, %attachment_type, "get_attachments");

    let table = attachment_table(scope, attachment_type);
    let owner = Owner::of(scope)?;

    Some(SqlStatement::with_values(
        format!(
            "SELECT id, file_name, create_date::text AS create_date, \
               update_date::text AS update_date, file_size::int8 AS file_size, \
               security_token::text AS security_token \
             FROM {table} WHERE {filter} ORDER BY id",
            filter = owner.filter(1),
        ),
        owner.values(),
    ))
}

/// Bump an existing attachment of the same name; no row when none exists
pub fn update_existing_attachment(
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    file_name: &str,
    file_size: i64,
) -> Option<SqlStatement> {
    debug!(?scope, %attachment_type, file_name, "update_existing_attachment");

    let table = attachment_table(scope, attachment_type);
    let owner = Owner::of(scope)?;

    Some(SqlStatement::with_values(
        format!(
            "UPDATE {table} SET file_size = $2, update_date = now(), \
               revision_count = revision_count + 1 \
             WHERE file_name = $1 AND {filter} \
             RETURNING id, revision_count",
            filter = owner.filter(3),
        ),
        with_owner(vec![non_blank(file_name)?.into(), file_size.into()], &owner),
    ))
}

/// Insert a new attachment row; a survey outside its project inserts nothing
pub fn insert_attachment(
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    file_name: &str,
    file_size: i64,
    key: &str,
) -> Option<SqlStatement> {
    debug!(?scope, %attachment_type, file_name, key, "insert_attachment");

    let table = attachment_table(scope, attachment_type);
    let owner = Owner::of(scope)?;
    let column = owner.column;

    let source = match owner.project_id {
        None => "VALUES ($1, $2, $2, $3, $4)",
        Some(_) => "SELECT $1, $2, $2, $3, $4 \
                    WHERE EXISTS (SELECT 1 FROM survey WHERE id = $1 AND p_id = $5)",
    };

    let mut values: Vec<Value> = vec![
        owner.id.into(),
        non_blank(file_name)?.into(),
        file_size.into(),
        non_blank(key)?.into(),
    ];
    values.extend(owner.project_id.map(Value::from));

    Some(SqlStatement::with_values(
        format!(
            "INSERT INTO {table} ({column}, file_name, title, file_size, key) {source} \
             RETURNING id, revision_count"
        ),
        values,
    ))
}

pub fn get_attachment_key(
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
) -> Option<SqlStatement> {
    debug!(?scope, %attachment_type, attachment_id, "get_attachment_key");

    let table = attachment_table(scope, attachment_type);
    let owner = Owner::of(scope)?;

    Some(SqlStatement::with_values(
        format!(
            "SELECT key, security_token::text AS security_token \
             FROM {table} WHERE id = $1 AND {filter}",
            filter = owner.filter(2),
        ),
        with_owner(vec![positive(attachment_id)?.into()], &owner),
    ))
}

/// Delete the row, returning the key of the stored object
pub fn delete_attachment(
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
) -> Option<SqlStatement> {
    debug!(?scope, %attachment_type, attachment_id, "delete_attachment");

    let table = attachment_table(scope, attachment_type);
    let owner = Owner::of(scope)?;

    Some(SqlStatement::with_values(
        format!(
            "DELETE FROM {table} WHERE id = $1 AND {filter} RETURNING key",
            filter = owner.filter(2),
        ),
        with_owner(vec![positive(attachment_id)?.into()], &owner),
    ))
}

/// Mark an attachment secure with a fresh token
pub fn secure_attachment(
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
    security_token: Uuid,
) -> Option<SqlStatement> {
    debug!(?scope, %attachment_type, attachment_id, "secure_attachment");

    let table = attachment_table(scope, attachment_type);
    let owner = Owner::of(scope)?;

    Some(SqlStatement::with_values(
        format!(
            "UPDATE {table} SET security_token = $1 \
             WHERE id = $2 AND {filter} RETURNING id",
            filter = owner.filter(3),
        ),
        with_owner(
            vec![security_token.into(), positive(attachment_id)?.into()],
            &owner,
        ),
    ))
}

/// Clear the security token, only when the caller presents the current one
pub fn unsecure_attachment(
    scope: &AttachmentScope,
    attachment_type: AttachmentType,
    attachment_id: i64,
    security_token: &str,
) -> Option<SqlStatement> {
    debug!(?scope, %attachment_type, attachment_id, "unsecure_attachment");

    let table = attachment_table(scope, attachment_type);
    let owner = Owner::of(scope)?;

    Some(SqlStatement::with_values(
        format!(
            "UPDATE {table} SET security_token = NULL \
             WHERE id = $1 AND security_token::text = $2 AND {filter} RETURNING id",
            filter = owner.filter(3),
        ),
        with_owner(
            vec![
                positive(attachment_id)?.into(),
                non_blank(security_token)?.into(),
            ],
            &owner,
        ),
    ))
}
