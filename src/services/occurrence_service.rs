//! Observation submission records

use super::{execute, execute_returning_id};
use crate::models::occurrence::{LatestSubmission, SUBMISSION_FOLDER, SUBMISSION_SOURCE, SubmissionRow};
use crate::queries::occurrence as queries;
use crate::storage::database::DbConnection;
use crate::storage::files::ObjectKey;
use crate::utils::error::Result;
use tracing::info;

/// A submission row ready for its file to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    pub submission_id: i64,
    pub key: String,
}

/// Record a submission and the key its file will be stored under
///
/// The key embeds the submission id, so the row is inserted first and then
/// updated with the key.
pub async fn prepare_submission(
    connection: &mut dyn DbConnection,
    project_id: i64,
    survey_id: i64,
    file_name: &str,
) -> Result<PreparedSubmission> {
    let submission_id = execute_returning_id(
        connection,
        queries::insert_occurrence_submission(project_id, survey_id, SUBMISSION_SOURCE, file_name),
        "insert survey occurrence submission",
        "Failed to insert survey occurrence submission record",
    )
    .await?;

    let folder = format!("{}/{}", SUBMISSION_FOLDER, submission_id);
    let key = ObjectKey::submission_file(project_id, survey_id, &folder, file_name).build();

    execute_returning_id(
        connection,
        queries::update_occurrence_submission_key(submission_id, &key),
        "update survey occurrence submission",
        "Failed to update survey occurrence submission record",
    )
    .await?;

    info!(survey_id, submission_id, "Recorded occurrence submission");
    Ok(PreparedSubmission { submission_id, key })
}

pub async fn get_latest_submission(
    connection: &mut dyn DbConnection,
    project_id: i64,
    survey_id: i64,
) -> Result<Option<LatestSubmission>> {
    let row: Option<SubmissionRow> = execute(
        connection,
        queries::get_latest_occurrence_submission(project_id, survey_id),
        "get latest survey occurrence submission",
    )
    .await?
    .first_as()?;
    Ok(row.map(LatestSubmission::from))
}
