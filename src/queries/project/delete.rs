use crate::queries::positive;
use crate::storage::database::SqlStatement;
use tracing::debug;

/// Publish state of a project, no row when it does not exist
pub fn get_project_publish_state(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "get_project_publish_state");

    Some(SqlStatement::with_values(
        "SELECT id, publish_timestamp::text AS publish_timestamp FROM project WHERE id = $1",
        vec![positive(project_id)?.into()],
    ))
}

/// Object keys of every file stored for a project and its surveys
pub fn get_project_object_keys(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "get_project_object_keys");

    Some(SqlStatement::with_values(
        "SELECT key FROM project_attachment WHERE p_id = $1 \
         UNION ALL SELECT key FROM project_report_attachment WHERE p_id = $1 \
         UNION ALL SELECT sa.key FROM survey_attachment sa \
           JOIN survey s ON sa.s_id = s.id WHERE s.p_id = $1 \
         UNION ALL SELECT sra.key FROM survey_report_attachment sra \
           JOIN survey s ON sra.s_id = s.id WHERE s.p_id = $1 \
         UNION ALL SELECT os.key FROM occurrence_submission os \
           JOIN survey s ON os.survey_id = s.id WHERE s.p_id = $1 AND os.key IS NOT NULL",
        vec![positive(project_id)?.into()],
    ))
}

/// Delete the project and everything hanging off it
pub fn delete_project(project_id: i64) -> Option<SqlStatement> {
    debug!(project_id, "delete_project");

    Some(SqlStatement::with_values(
        "CALL api_delete_project($1)",
        vec![positive(project_id)?.into()],
    ))
}
