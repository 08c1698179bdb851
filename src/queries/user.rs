//! System user and project participation queries

use super::{non_blank, positive};
use crate::storage::database::SqlStatement;
use tracing::debug;

/// Active system user with their system roles
pub fn get_user_by_identifier(user_identifier: &str) -> Option<SqlStatement> {
    debug!(user_identifier, "get_user_by_identifier");

    let user_identifier = non_blank(user_identifier)?;

    Some(SqlStatement::with_values(
        "SELECT su.id, su.user_identifier, \
           coalesce(json_agg(sr.id) FILTER (WHERE sr.id IS NOT NULL), '[]') AS role_ids, \
           coalesce(json_agg(sr.name) FILTER (WHERE sr.name IS NOT NULL), '[]') AS role_names \
         FROM system_user su \
         LEFT JOIN system_user_role sur ON su.id = sur.su_id \
         LEFT JOIN system_role sr ON sur.sr_id = sr.id \
         WHERE su.user_identifier = $1 AND su.record_end_date IS NULL \
         GROUP BY su.id, su.user_identifier",
        vec![user_identifier.into()],
    ))
}

/// The user's participation in one project, roles aggregated
pub fn get_project_participation(project_id: i64, system_user_id: i64) -> Option<SqlStatement> {
    debug!(project_id, system_user_id, "get_project_participation");

    Some(SqlStatement::with_values(
        "SELECT pp.p_id AS project_id, pp.su_id AS system_user_id, \
           json_agg(pr.id) AS project_role_ids, \
           json_agg(pr.name) AS project_role_names \
         FROM project_participation pp \
         LEFT JOIN project_role pr ON pp.pr_id = pr.id \
         WHERE pp.p_id = $1 AND pp.su_id = $2 \
         GROUP BY pp.p_id, pp.su_id",
        vec![positive(project_id)?.into(), positive(system_user_id)?.into()],
    ))
}

/// Every project the user participates in
pub fn get_user_projects(system_user_id: i64) -> Option<SqlStatement> {
    debug!(system_user_id, "get_user_projects");

    Some(SqlStatement::with_values(
        "SELECT p.id AS project_id, p.name, pp.su_id AS system_user_id, \
           pp.pr_id AS project_role_id, pp.id AS project_participation_id \
         FROM project_participation pp \
         LEFT JOIN project p ON pp.p_id = p.id \
         WHERE pp.su_id = $1 \
         ORDER BY p.id",
        vec![positive(system_user_id)?.into()],
    ))
}

/// Grant the user a project role by role name
pub fn add_project_role(project_id: i64, system_user_id: i64, role_name: &str) -> Option<SqlStatement> {
    debug!(project_id, system_user_id, role_name, "add_project_role");

    Some(SqlStatement::with_values(
        "INSERT INTO project_participation (p_id, su_id, pr_id) \
         (SELECT $1, $2, id FROM project_role WHERE name = $3) \
         RETURNING id",
        vec![
            positive(project_id)?.into(),
            positive(system_user_id)?.into(),
            non_blank(role_name)?.into(),
        ],
    ))
}
