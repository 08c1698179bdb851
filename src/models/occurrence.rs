//! Observation (occurrence) submissions

use super::null_as_empty;
use serde::{Deserialize, Serialize};

/// Source recorded on submissions made through this API
pub const SUBMISSION_SOURCE: &str = "BioHub";

/// Folder that holds submission files under a survey
pub const SUBMISSION_FOLDER: &str = "submissions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionMessage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, rename = "type")]
    pub message_type: Option<String>,
    pub message: String,
}

/// Latest submission row joined with its status and messages
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRow {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub event_timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<SubmissionMessage>,
}

/// `GET …/observation/submission/get` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSubmission {
    pub id: i64,
    pub file_name: String,
    pub status: Option<String>,
    pub messages: Vec<SubmissionMessage>,
}

impl From<SubmissionRow> for LatestSubmission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            file_name: row.file_name,
            status: row.status,
            messages: row.messages,
        }
    }
}
