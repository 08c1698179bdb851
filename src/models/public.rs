//! Objects served without authentication

use super::null_as_empty;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One published project as shown on the public map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    pub geometry: Vec<JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub geometry: Option<JsonValue>,
}

impl From<SearchRow> for SearchResult {
    fn from(row: SearchRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            geometry: row.geometry.into_iter().collect(),
        }
    }
}

/// One entry of `GET /api/public/projects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProjectListItem {
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
