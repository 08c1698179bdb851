//! `PUT /api/project/{projectId}/update` request body
//!
//! Every section is optional; only the sections present are written. Sections
//! stored on the `project` row carry the `revision_count` the client last saw.

use super::create::{PostPermit, bool_or_string};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PutProjectObject {
    #[serde(default)]
    pub project: Option<PutProjectData>,
    #[serde(default)]
    pub coordinator: Option<PutCoordinatorData>,
    #[serde(default)]
    pub objectives: Option<PutObjectivesData>,
    #[serde(default)]
    pub location: Option<PutLocationData>,
    #[serde(default)]
    pub permit: Option<PutPermitData>,
}

impl PutProjectObject {
    pub fn is_empty(&self) -> bool {
        self.project.is_none()
            && self.coordinator.is_none()
            && self.objectives.is_none()
            && self.location.is_none()
            && self.permit.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PutProjectData {
    #[serde(rename = "project_name")]
    pub name: String,
    pub project_type: i64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
    pub revision_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PutCoordinatorData {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub coordinator_agency: String,
    #[serde(default, deserialize_with = "bool_or_string")]
    pub share_contact_details: bool,
    pub revision_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PutObjectivesData {
    pub objectives: String,
    #[serde(default)]
    pub caveats: Option<String>,
    pub revision_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PutLocationData {
    #[serde(default)]
    pub location_description: Option<String>,
    #[serde(default)]
    pub geometry: Vec<JsonValue>,
    pub revision_count: i64,
}

/// Replaces the project's permits wholesale
#[derive(Debug, Clone, Deserialize)]
pub struct PutPermitData {
    #[serde(default)]
    pub permits: Vec<PostPermit>,
}
