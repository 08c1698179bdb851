//! Writes for `PUT /api/project/{projectId}/update`

use crate::models::project::PutProjectObject;
use crate::queries::{non_blank, positive, push_geography};
use crate::storage::database::SqlStatement;
use tracing::debug;

/// Update the sections stored on the `project` row
///
/// Guarded by `revision_count`: a stale count matches no row. `None` when no
/// row-level section is present.
pub fn update_project(project_id: i64, data: &PutProjectObject) -> Option<SqlStatement> {
    debug!(project_id, "update_project");

    let project_id = positive(project_id)?;
    let revision_count = [
        data.project.as_ref().map(|s| s.revision_count),
        data.coordinator.as_ref().map(|s| s.revision_count),
        data.objectives.as_ref().map(|s| s.revision_count),
        data.location.as_ref().map(|s| s.revision_count),
    ]
    .into_iter()
    .flatten()
    .next()?;

    let mut statement = SqlStatement::new("UPDATE project SET ");

    if let Some(project) = &data.project {
        statement
            .push("name = ")
            .push_bind(non_blank(&project.name)?)
            .push(", pt_id = ")
            .push_bind(positive(project.project_type)?)
            .push(", start_date = ")
            .push_bind(project.start_date)
            .push(", end_date = ")
            .push_bind(project.end_date)
            .push(", comments = ")
            .push_bind(project.comments.clone())
            .push(", ");
    }

    if let Some(coordinator) = &data.coordinator {
        statement
            .push("coordinator_first_name = ")
            .push_bind(coordinator.first_name.as_str())
            .push(", coordinator_last_name = ")
            .push_bind(coordinator.last_name.as_str())
            .push(", coordinator_email_address = ")
            .push_bind(coordinator.email_address.as_str())
            .push(", coordinator_agency_name = ")
            .push_bind(coordinator.coordinator_agency.as_str())
            .push(", coordinator_public = ")
            .push_bind(coordinator.share_contact_details)
            .push(", ");
    }

    if let Some(objectives) = &data.objectives {
        statement
            .push("objectives = ")
            .push_bind(non_blank(&objectives.objectives)?)
            .push(", caveats = ")
            .push_bind(objectives.caveats.clone())
            .push(", ");
    }

    if let Some(location) = &data.location {
        statement
            .push("location_description = ")
            .push_bind(location.location_description.clone())
            .push(", geography = ");
        push_geography(&mut statement, &location.geometry);
        statement.push(", ");
    }

    statement
        .push("revision_count = revision_count + 1 WHERE id = ")
        .push_bind(project_id)
        .push(" AND revision_count = ")
        .push_bind(revision_count)
        .push(" RETURNING id");

    Some(statement)
}

/// Remove every permit of the project ahead of re-inserting them
pub fn delete_project_permits(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "delete_project_permits");

    Some(SqlStatement::with_values(
        "DELETE FROM permit WHERE p_id = $1 RETURNING id",
        vec![positive(project_id)?.into()],
    ))
}
