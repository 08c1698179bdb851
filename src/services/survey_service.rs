use super::{execute, execute_returning_id};
use crate::models::survey::{PostSurveyObject, SurveyListItem, SurveyListRow, SurveyRow, SurveyViewObject};
use crate::queries::survey as queries;
use crate::storage::database::DbConnection;
use crate::utils::error::{ApiError, Result};
use tracing::info;

/// Insert a survey with its species and optional permit, returning its id
pub async fn create_survey(
    connection: &mut dyn DbConnection,
    project_id: i64,
    body: &PostSurveyObject,
) -> Result<i64> {
    let survey_id = execute_returning_id(
        connection,
        queries::insert_survey(project_id, body),
        "insert survey",
        "Failed to insert survey data",
    )
    .await?;

    let species = body
        .focal_species
        .iter()
        .map(|name| (name, true))
        .chain(body.ancillary_species.iter().map(|name| (name, false)));

    for (name, is_focal) in species {
        execute_returning_id(
            connection,
            queries::insert_survey_species(name, is_focal, survey_id),
            "insert survey species",
            "Failed to insert survey species data",
        )
        .await?;
    }

    if let Some(permit_number) = body.permit_number.as_deref().filter(|n| !n.is_empty()) {
        execute_returning_id(
            connection,
            queries::associate_survey_permit(project_id, survey_id, permit_number),
            "update permit",
            "Failed to associate permit with survey",
        )
        .await?;
    }

    info!(project_id, survey_id, "Created survey");
    Ok(survey_id)
}

pub async fn get_survey_list(
    connection: &mut dyn DbConnection,
    project_id: i64,
) -> Result<Vec<SurveyListItem>> {
    let rows: Vec<SurveyListRow> = execute(connection, queries::get_survey_list(project_id), "get survey list")
        .await?
        .rows_as()?;
    Ok(rows.into_iter().map(SurveyListItem::from).collect())
}

pub async fn get_survey(
    connection: &mut dyn DbConnection,
    project_id: i64,
    survey_id: i64,
) -> Result<SurveyViewObject> {
    let row: SurveyRow = execute(connection, queries::get_survey(project_id, survey_id), "get survey")
        .await?
        .first_as()?
        .ok_or_else(|| ApiError::not_found("Failed to get project survey details data"))?;
    Ok(row.into())
}

pub async fn update_publish_status(
    connection: &mut dyn DbConnection,
    project_id: i64,
    survey_id: i64,
    publish: bool,
) -> Result<i64> {
    execute_returning_id(
        connection,
        queries::update_survey_publish_status(project_id, survey_id, publish),
        "update survey publish status",
        "Failed to update survey publish status",
    )
    .await
}
