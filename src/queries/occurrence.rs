//! Observation submission queries

use super::{non_blank, positive};
use crate::storage::database::SqlStatement;
use tracing::debug;

/// Insert a submission for a survey of the project; no row when the survey
/// belongs to another project
pub fn insert_occurrence_submission(
    project_id: i64,
    survey_id: i64,
    source: &str,
    file_name: &str,
) -> Option<SqlStatement> {
    debug!(project_id, survey_id, source, file_name, "insert_occurrence_submission");

    Some(SqlStatement::with_values(
        "INSERT INTO occurrence_submission (survey_id, source, file_name, event_timestamp) \
         SELECT s.id, $3, $4, now() FROM survey s WHERE s.id = $1 AND s.p_id = $2 \
         RETURNING occurrence_submission_id AS id",
        vec![
            positive(survey_id)?.into(),
            positive(project_id)?.into(),
            non_blank(source)?.into(),
            non_blank(file_name)?.into(),
        ],
    ))
}

/// Record where the submission file was stored
pub fn update_occurrence_submission_key(submission_id: i64, key: &str) -> Option<SqlStatement> {
    debug!(submission_id, key, "update_occurrence_submission_key");

    Some(SqlStatement::with_values(
        "UPDATE occurrence_submission SET key = $1 \
         WHERE occurrence_submission_id = $2 \
         RETURNING occurrence_submission_id AS id",
        vec![non_blank(key)?.into(), positive(submission_id)?.into()],
    ))
}

/// Most recent submission of a survey with its status and messages
pub fn get_latest_occurrence_submission(project_id: i64, survey_id: i64) -> Option<SqlStatement> {
    debug!(project_id, survey_id, "get_latest_occurrence_submission");

    Some(SqlStatement::with_values(
        "SELECT os.occurrence_submission_id AS id, os.file_name, os.key, \
           os.event_timestamp::text AS event_timestamp, sst.name AS status, \
           json_agg(json_build_object('id', sm.submission_message_id, 'type', smt.name, \
             'message', sm.message)) FILTER (WHERE sm.submission_message_id IS NOT NULL) AS messages \
         FROM (SELECT * FROM occurrence_submission WHERE survey_id = $1 \
                 AND survey_id IN (SELECT id FROM survey WHERE p_id = $2) \
               ORDER BY event_timestamp DESC LIMIT 1) os \
         LEFT JOIN submission_status ss ON os.occurrence_submission_id = ss.occurrence_submission_id \
         LEFT JOIN submission_status_type sst ON ss.submission_status_type_id = sst.submission_status_type_id \
         LEFT JOIN submission_message sm ON ss.submission_status_id = sm.submission_status_id \
         LEFT JOIN submission_message_type smt ON sm.submission_message_type_id = smt.submission_message_type_id \
         GROUP BY os.occurrence_submission_id, os.file_name, os.key, os.event_timestamp, \
           ss.event_timestamp, sst.name \
         ORDER BY ss.event_timestamp DESC NULLS LAST",
        vec![positive(survey_id)?.into(), positive(project_id)?.into()],
    ))
}
