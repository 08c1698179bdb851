//! Inserts for `POST /api/project`

use crate::models::project::{
    PostCoordinatorData, PostFundingSource, PostIucnClassification, PostLocationData,
    PostObjectivesData, PostPermit, PostProjectData,
};
use crate::queries::{non_blank, positive, push_geography};
use crate::storage::database::SqlStatement;
use tracing::debug;

/// The `project` row
pub fn insert_project(
    project: &PostProjectData,
    objectives: &PostObjectivesData,
    location: &PostLocationData,
    coordinator: &PostCoordinatorData,
) -> Option<SqlStatement> {
    debug!(name = %project.name, "insert_project");

    non_blank(&project.name)?;
    positive(project.project_type)?;

    let mut statement = SqlStatement::new(
        "INSERT INTO project (pt_id, name, objectives, location_description, start_date, \
         end_date, caveats, comments, coordinator_first_name, coordinator_last_name, \
         coordinator_email_address, coordinator_agency_name, coordinator_public, geography) \
         VALUES (",
    );
    statement
        .push_bind(project.project_type)
        .push(", ")
        .push_bind(project.name.as_str())
        .push(", ")
        .push_bind(objectives.objectives.as_str())
        .push(", ")
        .push_bind(location.location_description.clone())
        .push(", ")
        .push_bind(project.start_date)
        .push(", ")
        .push_bind(project.end_date)
        .push(", ")
        .push_bind(objectives.caveats.clone())
        .push(", ")
        .push_bind(project.comments.clone())
        .push(", ")
        .push_bind(coordinator.first_name.as_str())
        .push(", ")
        .push_bind(coordinator.last_name.as_str())
        .push(", ")
        .push_bind(coordinator.email_address.as_str())
        .push(", ")
        .push_bind(coordinator.coordinator_agency.as_str())
        .push(", ")
        .push_bind(coordinator.share_contact_details)
        .push(", ");
    push_geography(&mut statement, &location.geometry);
    statement.push(") RETURNING id");

    Some(statement)
}

fn insert_name(table: &str, name: &str, project_id: i64) -> Option<SqlStatement> {
    Some(SqlStatement::with_values(
        format!("INSERT INTO {table} (name, p_id) VALUES ($1, $2) RETURNING id"),
        vec![non_blank(name)?.into(), positive(project_id)?.into()],
    ))
}

pub fn insert_focal_species(species: &str, project_id: i64) -> Option<SqlStatement> {
    debug!(species, project_id, "insert_focal_species");
    insert_name("focal_species", species, project_id)
}

pub fn insert_ancillary_species(species: &str, project_id: i64) -> Option<SqlStatement> {
    debug!(species, project_id, "insert_ancillary_species");
    insert_name("ancillary_species", species, project_id)
}

pub fn insert_region(region: &str, project_id: i64) -> Option<SqlStatement> {
    debug!(region, project_id, "insert_region");
    insert_name("project_region", region, project_id)
}

pub fn insert_stakeholder_partnership(name: &str, project_id: i64) -> Option<SqlStatement> {
    debug!(name, project_id, "insert_stakeholder_partnership");
    insert_name("stakeholder_partnership", name, project_id)
}

pub fn insert_indigenous_nation(first_nation_id: i64, project_id: i64) -> Option<SqlStatement> {
    debug!(first_nation_id, project_id, "insert_indigenous_nation");

    Some(SqlStatement::with_values(
        "INSERT INTO project_first_nation (fn_id, p_id) VALUES ($1, $2) RETURNING id",
        vec![positive(first_nation_id)?.into(), positive(project_id)?.into()],
    ))
}

pub fn insert_funding_source(source: &PostFundingSource, project_id: i64) -> Option<SqlStatement> {
    debug!(
        investment_action_category = source.investment_action_category,
        project_id, "insert_funding_source"
    );

    Some(SqlStatement::with_values(
        "INSERT INTO project_funding_source (p_id, iac_id, funding_source_project_id, \
         funding_amount, funding_start_date, funding_end_date) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        vec![
            positive(project_id)?.into(),
            positive(source.investment_action_category)?.into(),
            source.agency_project_id.clone().into(),
            source.funding_amount.into(),
            source.start_date.into(),
            source.end_date.into(),
        ],
    ))
}

/// Permit the project samples under
pub fn insert_project_permit(
    permit: &PostPermit,
    project_id: i64,
    system_user_id: i64,
) -> Option<SqlStatement> {
    debug!(permit_number = %permit.permit_number, project_id, "insert_project_permit");

    Some(SqlStatement::with_values(
        "INSERT INTO permit (p_id, number, type, system_user_id) \
         VALUES ($1, $2, $3, $4) RETURNING id",
        vec![
            positive(project_id)?.into(),
            non_blank(&permit.permit_number)?.into(),
            non_blank(&permit.permit_type)?.into(),
            positive(system_user_id)?.into(),
        ],
    ))
}

pub fn insert_iucn_classification(
    classification: &PostIucnClassification,
    project_id: i64,
) -> Option<SqlStatement> {
    debug!(?classification, project_id, "insert_iucn_classification");

    Some(SqlStatement::with_values(
        "INSERT INTO project_iucn_action_classification (iucn3_id, p_id) \
         VALUES ($1, $2) RETURNING id",
        vec![
            positive(classification.sub_classification2)?.into(),
            positive(project_id)?.into(),
        ],
    ))
}

pub fn insert_activity(activity_id: i64, project_id: i64) -> Option<SqlStatement> {
    debug!(activity_id, project_id, "insert_activity");

    Some(SqlStatement::with_values(
        "INSERT INTO project_activity (a_id, p_id) VALUES ($1, $2) RETURNING id",
        vec![positive(activity_id)?.into(), positive(project_id)?.into()],
    ))
}

pub fn insert_climate_initiative(initiative_id: i64, project_id: i64) -> Option<SqlStatement> {
    debug!(initiative_id, project_id, "insert_climate_initiative");

    Some(SqlStatement::with_values(
        "INSERT INTO project_climate_initiative (cci_id, p_id) VALUES ($1, $2) RETURNING id",
        vec![positive(initiative_id)?.into(), positive(project_id)?.into()],
    ))
}
