//! Permit queries

use super::{non_blank, positive};
use crate::models::project::{PostCoordinatorData, PostPermit};
use crate::storage::database::SqlStatement;
use tracing::debug;

/// Permit held by a coordinator with no project attached
pub fn insert_no_sample_permit(
    permit: &PostPermit,
    coordinator: &PostCoordinatorData,
    system_user_id: i64,
) -> Option<SqlStatement> {
    debug!(permit_number = %permit.permit_number, system_user_id, "insert_no_sample_permit");

    Some(SqlStatement::with_values(
        "INSERT INTO permit (number, type, coordinator_first_name, coordinator_last_name, \
         coordinator_email_address, coordinator_agency_name, system_user_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        vec![
            non_blank(&permit.permit_number)?.into(),
            non_blank(&permit.permit_type)?.into(),
            coordinator.first_name.as_str().into(),
            coordinator.last_name.as_str().into(),
            coordinator.email_address.as_str().into(),
            coordinator.coordinator_agency.as_str().into(),
            positive(system_user_id)?.into(),
        ],
    ))
}

/// Permits recorded by the user, with the project they belong to if any
pub fn get_permits_by_user(system_user_id: i64) -> Option<SqlStatement> {
    debug!(system_user_id, "get_permits_by_user");

    Some(SqlStatement::with_values(
        "SELECT pe.id, pe.number, pe.type, \
           coalesce(pe.coordinator_agency_name, p.coordinator_agency_name) AS coordinator_agency, \
           p.name AS project_name \
         FROM permit pe \
         LEFT JOIN project p ON pe.p_id = p.id \
         WHERE pe.system_user_id = $1 \
         ORDER BY pe.id",
        vec![positive(system_user_id)?.into()],
    ))
}
