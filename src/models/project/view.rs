//! Project view and list response objects

use crate::models::{null_as_empty, publish_status};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

/// The `project` row with its single-column children aggregated
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub project_type: i64,
    pub objectives: String,
    #[serde(default)]
    pub caveats: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub coordinator_first_name: String,
    pub coordinator_last_name: String,
    pub coordinator_email_address: String,
    pub coordinator_agency_name: String,
    #[serde(default)]
    pub coordinator_public: bool,
    #[serde(default)]
    pub geometry: Option<JsonValue>,
    #[serde(default)]
    pub publish_timestamp: Option<String>,
    pub revision_count: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub project_activities: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub climate_change_initiatives: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub regions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub focal_species: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ancillary_species: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub indigenous_partnerships: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stakeholder_partnerships: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PermitRow {
    pub number: String,
    #[serde(rename = "type")]
    pub permit_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IucnRow {
    pub classification: i64,
    pub sub_classification1: i64,
    pub sub_classification2: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSourceRow {
    pub id: i64,
    pub investment_action_category: i64,
    #[serde(default)]
    pub investment_action_category_name: Option<String>,
    #[serde(default)]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub agency_project_id: Option<String>,
    pub funding_amount: f64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetProjectData {
    pub project_name: String,
    pub project_type: i64,
    pub project_activities: Vec<i64>,
    pub climate_change_initiatives: Vec<i64>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub comments: Option<String>,
    pub publish_date: Option<String>,
    pub revision_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetCoordinatorData {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub coordinator_agency: String,
    pub share_contact_details: bool,
    pub revision_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetObjectivesData {
    pub objectives: String,
    pub caveats: Option<String>,
    pub revision_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetLocationData {
    pub location_description: Option<String>,
    pub regions: Vec<String>,
    pub geometry: Vec<JsonValue>,
    pub revision_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetPermitData {
    pub permits: Vec<GetPermit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetPermit {
    pub permit_number: String,
    pub permit_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetSpeciesData {
    pub focal_species: Vec<String>,
    pub ancillary_species: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetIucnData {
    pub classification_details: Vec<IucnRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetFundingData {
    pub funding_sources: Vec<FundingSourceRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetPartnershipsData {
    pub indigenous_partnerships: Vec<i64>,
    pub stakeholder_partnerships: Vec<String>,
}

/// `GET /api/project/{projectId}/view` response
#[derive(Debug, Clone, Serialize)]
pub struct ProjectViewObject {
    pub id: i64,
    pub project: GetProjectData,
    pub coordinator: GetCoordinatorData,
    pub objectives: GetObjectivesData,
    pub location: GetLocationData,
    pub permit: GetPermitData,
    pub species: GetSpeciesData,
    pub iucn: GetIucnData,
    pub funding: GetFundingData,
    pub partnerships: GetPartnershipsData,
}

impl ProjectViewObject {
    pub fn from_rows(
        row: ProjectRow,
        permits: Vec<PermitRow>,
        iucn: Vec<IucnRow>,
        funding: Vec<FundingSourceRow>,
    ) -> Self {
        let geometry = row.geometry.map(as_feature).into_iter().collect();
        let revision_count = row.revision_count;

        Self {
            id: row.id,
            project: GetProjectData {
                project_name: row.name,
                project_type: row.project_type,
                project_activities: row.project_activities,
                climate_change_initiatives: row.climate_change_initiatives,
                start_date: row.start_date,
                end_date: row.end_date,
                comments: row.comments,
                publish_date: row.publish_timestamp,
                revision_count,
            },
            coordinator: GetCoordinatorData {
                first_name: row.coordinator_first_name,
                last_name: row.coordinator_last_name,
                email_address: row.coordinator_email_address,
                coordinator_agency: row.coordinator_agency_name,
                share_contact_details: row.coordinator_public,
                revision_count,
            },
            objectives: GetObjectivesData {
                objectives: row.objectives,
                caveats: row.caveats,
                revision_count,
            },
            location: GetLocationData {
                location_description: row.location_description,
                regions: row.regions,
                geometry,
                revision_count,
            },
            permit: GetPermitData {
                permits: permits
                    .into_iter()
                    .map(|permit| GetPermit {
                        permit_number: permit.number,
                        permit_type: permit.permit_type,
                    })
                    .collect(),
            },
            species: GetSpeciesData {
                focal_species: row.focal_species,
                ancillary_species: row.ancillary_species,
            },
            iucn: GetIucnData {
                classification_details: iucn,
            },
            funding: GetFundingData {
                funding_sources: funding,
            },
            partnerships: GetPartnershipsData {
                indigenous_partnerships: row.indigenous_partnerships,
                stakeholder_partnerships: row.stakeholder_partnerships,
            },
        }
    }

    /// Blank the coordinator's personal details unless they agreed to share them
    pub fn redact_private_contact(mut self) -> Self {
        if !self.coordinator.share_contact_details {
            self.coordinator.first_name.clear();
            self.coordinator.last_name.clear();
            self.coordinator.email_address.clear();
        }
        self
    }

    pub fn is_published(&self) -> bool {
        self.project.publish_date.is_some()
    }
}

fn as_feature(geometry: JsonValue) -> JsonValue {
    json!({"type": "Feature", "geometry": geometry, "properties": {}})
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListRow {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub coordinator_agency: String,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub regions: Vec<String>,
    #[serde(default)]
    pub publish_timestamp: Option<String>,
}

/// One entry of `GET /api/projects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListItem {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub coordinator_agency: String,
    pub project_type: Option<String>,
    pub regions: Vec<String>,
    pub publish_status: String,
}

impl From<ProjectListRow> for ProjectListItem {
    fn from(row: ProjectListRow) -> Self {
        Self {
            publish_status: publish_status(row.publish_timestamp.as_deref()).to_string(),
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            coordinator_agency: row.coordinator_agency,
            project_type: row.project_type,
            regions: row.regions,
        }
    }
}
