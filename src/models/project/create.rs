//! `POST /api/project` request body

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Full project creation payload, one section per form step
#[derive(Debug, Clone, Deserialize)]
pub struct PostProjectObject {
    pub coordinator: PostCoordinatorData,
    #[serde(default)]
    pub permit: PostPermitData,
    pub project: PostProjectData,
    pub objectives: PostObjectivesData,
    #[serde(default)]
    pub location: PostLocationData,
    #[serde(default)]
    pub species: PostSpeciesData,
    #[serde(default)]
    pub iucn: PostIucnData,
    #[serde(default)]
    pub funding: PostFundingData,
    #[serde(default)]
    pub partnerships: PostPartnershipsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostCoordinatorData {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub coordinator_agency: String,
    /// Sent as a boolean or as the strings `"true"`/`"false"`
    #[serde(default, deserialize_with = "bool_or_string")]
    pub share_contact_details: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPermitData {
    #[serde(default)]
    pub permits: Vec<PostPermit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostPermit {
    pub permit_number: String,
    pub permit_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostProjectData {
    #[serde(rename = "project_name")]
    pub name: String,
    pub project_type: i64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub project_activities: Vec<i64>,
    #[serde(default)]
    pub climate_change_initiatives: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostObjectivesData {
    pub objectives: String,
    #[serde(default)]
    pub caveats: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostLocationData {
    #[serde(default)]
    pub location_description: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    /// GeoJSON features drawn on the map
    #[serde(default)]
    pub geometry: Vec<JsonValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostSpeciesData {
    #[serde(default)]
    pub focal_species: Vec<String>,
    #[serde(default)]
    pub ancillary_species: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostIucnData {
    #[serde(default)]
    pub classification_details: Vec<PostIucnClassification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PostIucnClassification {
    pub classification: i64,
    pub sub_classification1: i64,
    pub sub_classification2: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFundingData {
    #[serde(default)]
    pub funding_sources: Vec<PostFundingSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostFundingSource {
    pub investment_action_category: i64,
    #[serde(default)]
    pub agency_project_id: Option<String>,
    pub funding_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPartnershipsData {
    /// First nation ids
    #[serde(default)]
    pub indigenous_partnerships: Vec<i64>,
    #[serde(default)]
    pub stakeholder_partnerships: Vec<String>,
}

pub(crate) fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => Ok(text.eq_ignore_ascii_case("true")),
    }
}
