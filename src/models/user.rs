//! User records resolved during authorization

use serde::{Deserialize, Serialize};

/// The authenticated caller as known to the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemUser {
    pub id: i64,
    pub user_identifier: String,
    #[serde(default)]
    pub role_ids: Vec<i64>,
    /// System role names, the system scope role set
    #[serde(default)]
    pub role_names: Vec<String>,
}

impl SystemUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role_names.iter().any(|name| name == role)
    }
}

/// A system user's participation in one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUser {
    pub project_id: i64,
    pub system_user_id: i64,
    #[serde(default)]
    pub project_role_ids: Vec<i64>,
    /// Project role names, the `project:{id}` scope role set
    #[serde(default)]
    pub project_role_names: Vec<String>,
}

/// One row of `GET /api/user/{userId}/projects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProject {
    pub project_id: i64,
    pub name: String,
    pub system_user_id: i64,
    pub project_role_id: i64,
    pub project_participation_id: i64,
}
