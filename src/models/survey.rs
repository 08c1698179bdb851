//! Survey request and response objects

use super::{null_as_empty, publish_status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// `POST /api/project/{projectId}/survey/create` request body
#[derive(Debug, Clone, Deserialize)]
pub struct PostSurveyObject {
    pub survey_name: String,
    pub survey_purpose: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub biologist_first_name: String,
    pub biologist_last_name: String,
    pub survey_area_name: String,
    /// Existing project permit to associate with the survey
    #[serde(default)]
    pub permit_number: Option<String>,
    #[serde(default)]
    pub focal_species: Vec<String>,
    #[serde(default)]
    pub ancillary_species: Vec<String>,
    #[serde(default)]
    pub geometry: Vec<JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyRow {
    pub id: i64,
    pub name: String,
    pub objectives: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub lead_first_name: String,
    pub lead_last_name: String,
    pub location_name: String,
    #[serde(default)]
    pub geometry: Option<JsonValue>,
    #[serde(default)]
    pub publish_timestamp: Option<String>,
    pub revision_count: i64,
    #[serde(default)]
    pub permit_number: Option<String>,
    #[serde(default)]
    pub permit_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub focal_species: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ancillary_species: Vec<String>,
}

/// `GET …/survey/{surveyId}/view` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyViewObject {
    pub id: i64,
    pub survey_name: String,
    pub survey_purpose: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub biologist_first_name: String,
    pub biologist_last_name: String,
    pub survey_area_name: String,
    pub geometry: Vec<JsonValue>,
    pub permit_number: Option<String>,
    pub permit_type: Option<String>,
    pub focal_species: Vec<String>,
    pub ancillary_species: Vec<String>,
    pub publish_date: Option<String>,
    pub revision_count: i64,
}

impl From<SurveyRow> for SurveyViewObject {
    fn from(row: SurveyRow) -> Self {
        Self {
            id: row.id,
            survey_name: row.name,
            survey_purpose: row.objectives,
            start_date: row.start_date,
            end_date: row.end_date,
            biologist_first_name: row.lead_first_name,
            biologist_last_name: row.lead_last_name,
            survey_area_name: row.location_name,
            geometry: row.geometry.into_iter().collect(),
            permit_number: row.permit_number,
            permit_type: row.permit_type,
            focal_species: row.focal_species,
            ancillary_species: row.ancillary_species,
            publish_date: row.publish_timestamp,
            revision_count: row.revision_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyListRow {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub species: Vec<String>,
    #[serde(default)]
    pub publish_timestamp: Option<String>,
}

/// One entry of `GET /api/project/{projectId}/surveys`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyListItem {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub species: Vec<String>,
    pub publish_status: String,
}

impl From<SurveyListRow> for SurveyListItem {
    fn from(row: SurveyListRow) -> Self {
        Self {
            publish_status: publish_status(row.publish_timestamp.as_deref()).to_string(),
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            species: row.species,
        }
    }
}
