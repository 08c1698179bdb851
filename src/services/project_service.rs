//! Project lifecycle: create, view, update, publish and delete

use super::{execute, execute_returning_id};
use crate::auth::roles::project_role;
use crate::models::project::view::{FundingSourceRow, IucnRow, PermitRow, ProjectListRow, ProjectRow};
use crate::models::project::{
    PostPermit, PostProjectObject, ProjectListItem, ProjectViewObject, PutProjectObject,
};
use crate::queries::project::{create, delete, publish, update, view};
use crate::queries::user as user_queries;
use crate::storage::database::DbConnection;
use crate::utils::error::{ApiError, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Insert a project and all of its children, returning the new project id
///
/// The creator becomes the project's Project Lead.
pub async fn create_project(
    connection: &mut dyn DbConnection,
    body: &PostProjectObject,
    system_user_id: i64,
) -> Result<i64> {
    let project_id = execute_returning_id(
        connection,
        create::insert_project(&body.project, &body.objectives, &body.location, &body.coordinator),
        "insert project",
        "Failed to insert project boundary data",
    )
    .await?;
    debug!(project_id, "Inserted project row");

    for species in &body.species.focal_species {
        execute_returning_id(
            connection,
            create::insert_focal_species(species, project_id),
            "insert focal species",
            "Failed to insert project focal species data",
        )
        .await?;
    }

    for species in &body.species.ancillary_species {
        execute_returning_id(
            connection,
            create::insert_ancillary_species(species, project_id),
            "insert ancillary species",
            "Failed to insert project ancillary species data",
        )
        .await?;
    }

    for region in &body.location.regions {
        execute_returning_id(
            connection,
            create::insert_region(region, project_id),
            "insert project region",
            "Failed to insert project region data",
        )
        .await?;
    }

    for source in &body.funding.funding_sources {
        execute_returning_id(
            connection,
            create::insert_funding_source(source, project_id),
            "insert project funding source",
            "Failed to insert project funding data",
        )
        .await?;
    }

    for name in &body.partnerships.stakeholder_partnerships {
        execute_returning_id(
            connection,
            create::insert_stakeholder_partnership(name, project_id),
            "insert stakeholder partnership",
            "Failed to insert project stakeholder partner data",
        )
        .await?;
    }

    for first_nation_id in &body.partnerships.indigenous_partnerships {
        execute_returning_id(
            connection,
            create::insert_indigenous_nation(*first_nation_id, project_id),
            "insert first nation partnership",
            "Failed to insert project first nations partner data",
        )
        .await?;
    }

    insert_permits(connection, &body.permit.permits, project_id, system_user_id).await?;

    for classification in &body.iucn.classification_details {
        execute_returning_id(
            connection,
            create::insert_iucn_classification(classification, project_id),
            "insert project IUCN classification",
            "Failed to insert project IUCN data",
        )
        .await?;
    }

    for activity_id in &body.project.project_activities {
        execute_returning_id(
            connection,
            create::insert_activity(*activity_id, project_id),
            "insert project activity",
            "Failed to insert project activity data",
        )
        .await?;
    }

    for initiative_id in &body.project.climate_change_initiatives {
        execute_returning_id(
            connection,
            create::insert_climate_initiative(*initiative_id, project_id),
            "insert project climate change initiative",
            "Failed to insert climate initiative",
        )
        .await?;
    }

    execute_returning_id(
        connection,
        user_queries::add_project_role(project_id, system_user_id, project_role::PROJECT_LEAD),
        "insert project participation",
        "Failed to insert project team member",
    )
    .await?;

    info!(project_id, "Created project");
    Ok(project_id)
}

async fn insert_permits(
    connection: &mut dyn DbConnection,
    permits: &[PostPermit],
    project_id: i64,
    system_user_id: i64,
) -> Result<()> {
    for permit in permits {
        execute_returning_id(
            connection,
            create::insert_project_permit(permit, project_id, system_user_id),
            "insert project permit",
            "Failed to insert project permit data",
        )
        .await?;
    }
    Ok(())
}

/// Every project for administrators, participated projects otherwise
pub async fn get_project_list(
    connection: &mut dyn DbConnection,
    system_user_id: Option<i64>,
) -> Result<Vec<ProjectListItem>> {
    let response = execute(connection, view::get_project_list(system_user_id), "get project list").await?;
    let rows: Vec<ProjectListRow> = response.rows_as()?;
    Ok(rows.into_iter().map(ProjectListItem::from).collect())
}

pub async fn get_project(connection: &mut dyn DbConnection, project_id: i64) -> Result<ProjectViewObject> {
    let response = execute(connection, view::get_project(project_id), "get project").await?;
    let row: ProjectRow = response
        .first_as()?
        .ok_or_else(|| ApiError::not_found("Failed to get project data"))?;

    let permits: Vec<PermitRow> = execute(connection, view::get_project_permits(project_id), "get project permits")
        .await?
        .rows_as()?;
    let iucn: Vec<IucnRow> = execute(connection, view::get_project_iucn(project_id), "get project IUCN")
        .await?
        .rows_as()?;
    let funding: Vec<FundingSourceRow> =
        execute(connection, view::get_project_funding(project_id), "get project funding")
            .await?
            .rows_as()?;

    Ok(ProjectViewObject::from_rows(row, permits, iucn, funding))
}

/// Apply the sections present in `body`
pub async fn update_project(
    connection: &mut dyn DbConnection,
    project_id: i64,
    body: &PutProjectObject,
    system_user_id: i64,
) -> Result<()> {
    if body.is_empty() {
        return Err(ApiError::missing_body());
    }

    let updates_row = body.project.is_some()
        || body.coordinator.is_some()
        || body.objectives.is_some()
        || body.location.is_some();

    if updates_row {
        let response = execute(
            connection,
            update::update_project(project_id, body),
            "update project",
        )
        .await?;
        if response.is_empty() {
            return Err(ApiError::conflict("Failed to update stale project data"));
        }
    }

    if let Some(permit) = &body.permit {
        if permit.permits.is_empty() {
            return Err(ApiError::missing_body_entity("permit"));
        }

        let response = execute(
            connection,
            update::delete_project_permits(project_id),
            "delete project permits",
        )
        .await?;
        if response.is_empty() {
            return Err(ApiError::conflict("Failed to delete project permit data"));
        }

        insert_permits(connection, &permit.permits, project_id, system_user_id).await?;
    }

    info!(project_id, "Updated project");
    Ok(())
}

pub async fn update_publish_status(
    connection: &mut dyn DbConnection,
    project_id: i64,
    publish: bool,
) -> Result<i64> {
    execute_returning_id(
        connection,
        publish::update_project_publish_status(project_id, publish),
        "update project publish status",
        "Failed to update project publish status",
    )
    .await
}

#[derive(Debug, Deserialize)]
struct PublishStateRow {
    #[serde(default)]
    publish_timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KeyRow {
    key: Option<String>,
}

/// Delete an unpublished project, returning the object keys left to remove
pub async fn delete_project(connection: &mut dyn DbConnection, project_id: i64) -> Result<Vec<String>> {
    let state: PublishStateRow = execute(
        connection,
        delete::get_project_publish_state(project_id),
        "get project publish state",
    )
    .await?
    .first_as()?
    .ok_or_else(|| ApiError::not_found("Failed to get the project"))?;

    if state.publish_timestamp.is_some() {
        return Err(ApiError::bad_request(
            "Cannot delete a published project",
        ));
    }

    let keys: Vec<KeyRow> = execute(
        connection,
        delete::get_project_object_keys(project_id),
        "get project attachment keys",
    )
    .await?
    .rows_as()?;

    execute(connection, delete::delete_project(project_id), "delete project").await?;

    info!(project_id, "Deleted project");
    Ok(keys.into_iter().filter_map(|row| row.key).collect())
}
