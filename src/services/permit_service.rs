use super::{execute, execute_returning_id};
use crate::models::permit::{PermitListItem, PostPermitNoSamplingObject};
use crate::queries::permit as queries;
use crate::storage::database::DbConnection;
use crate::utils::error::{ApiError, Result};
use tracing::info;

/// Insert permits that are not tied to any project, returning their ids
pub async fn create_no_sample_permits(
    connection: &mut dyn DbConnection,
    body: &PostPermitNoSamplingObject,
    system_user_id: i64,
) -> Result<Vec<i64>> {
    if body.permit.permits.is_empty() {
        return Err(ApiError::missing_body_entity("permit"));
    }

    let mut ids = Vec::with_capacity(body.permit.permits.len());
    for permit in &body.permit.permits {
        let id = execute_returning_id(
            connection,
            queries::insert_no_sample_permit(permit, &body.coordinator, system_user_id),
            "insert no sample permit",
            "Failed to insert non-sampling permit data",
        )
        .await?;
        ids.push(id);
    }

    info!(count = ids.len(), "Created non-sampling permits");
    Ok(ids)
}

pub async fn get_permits(
    connection: &mut dyn DbConnection,
    system_user_id: i64,
) -> Result<Vec<PermitListItem>> {
    execute(connection, queries::get_permits_by_user(system_user_id), "get permits")
        .await?
        .rows_as()
}
