//! Attachment objects shared by project and survey routes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which record an attachment hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentScope {
    Project { project_id: i64 },
    Survey { project_id: i64, survey_id: i64 },
}

impl AttachmentScope {
    pub fn project_id(&self) -> i64 {
        match self {
            Self::Project { project_id } | Self::Survey { project_id, .. } => *project_id,
        }
    }

    pub fn survey_id(&self) -> Option<i64> {
        match self {
            Self::Project { .. } => None,
            Self::Survey { survey_id, .. } => Some(*survey_id),
        }
    }
}

/// Attachments are plain files or reports, stored in separate tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttachmentType {
    Report,
    #[default]
    Other,
}

impl AttachmentType {
    /// `"Report"` selects reports; anything else is a plain attachment
    pub fn parse(value: &str) -> Self {
        if value == "Report" {
            Self::Report
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "Report",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attachment or report row as selected for lists
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentRow {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub update_date: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub security_token: Option<String>,
}

/// One entry of an attachments list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentItem {
    pub id: i64,
    pub file_name: String,
    pub file_type: String,
    pub last_modified: Option<String>,
    pub size: Option<i64>,
    pub security_token: Option<String>,
}

impl AttachmentItem {
    pub fn from_row(row: AttachmentRow, attachment_type: AttachmentType) -> Self {
        Self {
            id: row.id,
            file_name: row.file_name,
            file_type: attachment_type.to_string(),
            last_modified: row.update_date.or(row.create_date),
            size: row.file_size,
            security_token: row.security_token,
        }
    }
}

/// `GET …/attachments/list` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAttachmentsData {
    pub attachments_list: Vec<AttachmentItem>,
}

impl GetAttachmentsData {
    /// Plain attachments first, then reports
    pub fn merge(attachments: Vec<AttachmentRow>, reports: Vec<AttachmentRow>) -> Self {
        let attachments_list = attachments
            .into_iter()
            .map(|row| AttachmentItem::from_row(row, AttachmentType::Other))
            .chain(
                reports
                    .into_iter()
                    .map(|row| AttachmentItem::from_row(row, AttachmentType::Report)),
            )
            .collect();

        Self { attachments_list }
    }
}

/// Row returned by an attachment upsert
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpsertedAttachmentRow {
    pub id: i64,
    pub revision_count: i64,
}

/// `POST …/attachments/upload` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAttachmentResponse {
    #[serde(rename = "attachmentId")]
    pub attachment_id: i64,
    pub revision_count: i64,
}

/// Body of `makeSecure` and `makeUnsecure`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSecurityRequest {
    #[serde(default)]
    pub attachment_type: Option<String>,
    #[serde(default)]
    pub security_token: Option<String>,
}

/// Key and token of a single attachment
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentKeyRow {
    pub key: String,
    #[serde(default)]
    pub security_token: Option<String>,
}
