//! Permits held outside of any project

use super::project::{PostCoordinatorData, create::PostPermitData};
use serde::{Deserialize, Serialize};

/// `POST /api/permit/create` request body
///
/// No-sampling permits: the coordinator holds them but no project samples
/// under them.
#[derive(Debug, Clone, Deserialize)]
pub struct PostPermitNoSamplingObject {
    pub coordinator: PostCoordinatorData,
    pub permit: PostPermitData,
}

/// `POST /api/permit/create` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePermitsResponse {
    pub ids: Vec<i64>,
}

/// One entry of `GET /api/permit/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitListItem {
    pub id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub permit_type: String,
    pub coordinator_agency: String,
    #[serde(default)]
    pub project_name: Option<String>,
}
