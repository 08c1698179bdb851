//! Request bodies, response objects and database row shapes

pub mod attachments;
pub mod occurrence;
pub mod permit;
pub mod project;
pub mod public;
pub mod survey;
pub mod user;

use serde::{Deserialize, Deserializer, Serialize};

/// `{ "id": n }` response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: i64,
}

/// Row returned by `... RETURNING id`
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct IdRow {
    pub id: i64,
}

/// Body of the project and survey publish routes
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub publish: Option<bool>,
}

/// Publish status as shown in list views
pub fn publish_status(publish_timestamp: Option<&str>) -> &'static str {
    if publish_timestamp.is_some() {
        "Published"
    } else {
        "Unpublished"
    }
}

/// Aggregated array columns come back as JSON `null` when nothing matched
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
