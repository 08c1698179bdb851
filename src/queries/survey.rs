//! Survey queries

use super::project::publish::publish_row;
use super::{non_blank, positive, push_geography};
use crate::models::survey::PostSurveyObject;
use crate::storage::database::SqlStatement;
use tracing::debug;

pub fn insert_survey(project_id: i64, survey: &PostSurveyObject) -> Option<SqlStatement> {
    debug!(project_id, name = %survey.survey_name, "insert_survey");

    let mut statement = SqlStatement::new(
        "INSERT INTO survey (p_id, name, objectives, start_date, end_date, \
         lead_first_name, lead_last_name, location_name, geography) VALUES (",
    );
    statement
        .push_bind(positive(project_id)?)
        .push(", ")
        .push_bind(non_blank(&survey.survey_name)?)
        .push(", ")
        .push_bind(non_blank(&survey.survey_purpose)?)
        .push(", ")
        .push_bind(survey.start_date)
        .push(", ")
        .push_bind(survey.end_date)
        .push(", ")
        .push_bind(survey.biologist_first_name.as_str())
        .push(", ")
        .push_bind(survey.biologist_last_name.as_str())
        .push(", ")
        .push_bind(survey.survey_area_name.as_str())
        .push(", ");
    push_geography(&mut statement, &survey.geometry);
    statement.push(") RETURNING id");

    Some(statement)
}

pub fn insert_survey_species(species: &str, is_focal: bool, survey_id: i64) -> Option<SqlStatement> {
    debug!(species, is_focal, survey_id, "insert_survey_species");

    Some(SqlStatement::with_values(
        "INSERT INTO study_species (s_id, name, is_focal) VALUES ($1, $2, $3) RETURNING id",
        vec![
            positive(survey_id)?.into(),
            non_blank(species)?.into(),
            is_focal.into(),
        ],
    ))
}

/// Attach one of the project's permits to the survey
pub fn associate_survey_permit(
    project_id: i64,
    survey_id: i64,
    permit_number: &str,
) -> Option<SqlStatement> {
    debug!(project_id, survey_id, permit_number, "associate_survey_permit");

    Some(SqlStatement::with_values(
        "UPDATE permit SET s_id = $1 WHERE p_id = $2 AND number = $3 RETURNING id",
        vec![
            positive(survey_id)?.into(),
            positive(project_id)?.into(),
            non_blank(permit_number)?.into(),
        ],
    ))
}

pub fn get_survey(project_id: i64, survey_id: i64) -> Option<SqlStatement> {
    debug!(project_id, survey_id, "get_survey");

    Some(SqlStatement::with_values(
        "SELECT s.id, s.name, s.objectives, s.start_date::text AS start_date, \
           s.end_date::text AS end_date, s.lead_first_name, s.lead_last_name, s.location_name, \
           public.ST_AsGeoJSON(s.geography)::json AS geometry, \
           s.publish_timestamp::text AS publish_timestamp, s.revision_count, \
           pe.number AS permit_number, pe.type AS permit_type, \
           (SELECT json_agg(ss.name) FROM study_species ss WHERE ss.s_id = s.id AND ss.is_focal) AS focal_species, \
           (SELECT json_agg(ss.name) FROM study_species ss WHERE ss.s_id = s.id AND NOT ss.is_focal) AS ancillary_species \
         FROM survey s \
         LEFT JOIN permit pe ON pe.s_id = s.id \
         WHERE s.id = $1 AND s.p_id = $2",
        vec![positive(survey_id)?.into(), positive(project_id)?.into()],
    ))
}

pub fn get_survey_list(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "get_survey_list");

    Some(SqlStatement::with_values(
        "SELECT s.id, s.name, s.start_date::text AS start_date, s.end_date::text AS end_date, \
           s.publish_timestamp::text AS publish_timestamp, \
           (SELECT json_agg(ss.name) FROM study_species ss WHERE ss.s_id = s.id) AS species \
         FROM survey s \
         WHERE s.p_id = $1 \
         ORDER BY s.start_date",
        vec![positive(project_id)?.into()],
    ))
}

/// Publish or unpublish a survey of the project; no row for a survey of another project
pub fn update_survey_publish_status(project_id: i64, survey_id: i64, publish: bool) -> Option<SqlStatement> {
    debug!(project_id, survey_id, publish, "update_survey_publish_status");
    publish_row("survey", survey_id, publish, Some(("p_id", project_id)))
}
