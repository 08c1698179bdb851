use crate::queries::positive;
use crate::storage::database::SqlStatement;
use sea_orm::Value;
use tracing::debug;

/// Publish or unpublish a row of `table`
///
/// Publishing an already published row keeps its original timestamp. A
/// `parent` column and id restrict the update to rows under that parent.
pub(crate) fn publish_row(
    table: &str,
    id: i64,
    publish: bool,
    parent: Option<(&str, i64)>,
) -> Option<SqlStatement> {
    let mut values: Vec<Value> = vec![positive(id)?.into(), publish.into()];
    let parent_filter = match parent {
        Some((column, parent_id)) => {
            values.push(positive(parent_id)?.into());
            format!(" AND {column} = $3")
        }
        None => String::new(),
    };

    Some(SqlStatement::with_values(
        format!(
            "UPDATE {table} SET publish_timestamp = CASE \
               WHEN $2 AND publish_timestamp IS NULL THEN now() \
               WHEN $2 THEN publish_timestamp \
               ELSE NULL END \
             WHERE id = $1{parent_filter} RETURNING id"
        ),
        values,
    ))
}

pub fn update_project_publish_status(project_id: i64, publish: bool) -> Option<SqlStatement> {
    debug!(project_id, publish, "update_project_publish_status");
    publish_row("project", project_id, publish, None)
}
