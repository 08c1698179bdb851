//! Business operations
//!
//! Services run on a connection already inside a transaction; they never open,
//! commit or release it themselves.

pub mod attachment_service;
pub mod occurrence_service;
pub mod permit_service;
pub mod project_service;
pub mod public_service;
pub mod survey_service;
pub mod user_service;

pub use user_service::ConnectionRoleLookup;

use crate::models::IdRow;
use crate::storage::database::{DbConnection, QueryResponse, SqlStatement};
use crate::utils::error::{ApiError, Result};

/// Run a built statement, `description` naming it when the builder refused
pub(crate) async fn execute(
    connection: &mut dyn DbConnection,
    statement: Option<SqlStatement>,
    description: &str,
) -> Result<QueryResponse> {
    let statement = statement.ok_or_else(|| ApiError::statement_build(description))?;
    connection.query(&statement).await
}

/// Run a statement that must affect at least one row and return its `id`
pub(crate) async fn execute_returning_id(
    connection: &mut dyn DbConnection,
    statement: Option<SqlStatement>,
    description: &str,
    failure: &str,
) -> Result<i64> {
    let response = execute(connection, statement, description).await?;
    response
        .first_as::<IdRow>()?
        .map(|row| row.id)
        .ok_or_else(|| ApiError::bad_request(failure))
}
