//! Request authorization inside the request transaction

use crate::auth::{AuthorizationContext, AuthorizationScheme, authorize};
use crate::server::extractors::AuthenticatedUser;
use crate::services::{ConnectionRoleLookup, user_service};
use crate::storage::database::DbConnection;
use crate::utils::error::{ApiError, Result};
use tracing::warn;

/// Resolve the caller's system user and check `scheme`
///
/// Runs on the request's own connection so that role lookups and the
/// operation share one transaction. Any denial, including a failed lookup,
/// is reported as `403 Access Denied`.
pub async fn authorize_request(
    connection: &mut dyn DbConnection,
    user: &AuthenticatedUser,
    scheme: Option<&AuthorizationScheme>,
) -> Result<AuthorizationContext> {
    let system_user = match user_service::get_system_user(connection, user.user_identifier()).await {
        Ok(system_user) => system_user,
        Err(e) => {
            warn!("Failed to resolve system user: {}", e);
            None
        }
    };

    let mut context = AuthorizationContext::new(system_user);
    let mut lookup = ConnectionRoleLookup::new(connection);

    if authorize(&mut context, scheme, &mut lookup).await {
        Ok(context)
    } else {
        warn!(user = user.user_identifier(), "Access denied");
        Err(ApiError::access_denied())
    }
}

/// The resolved system user id of an authorized context
pub fn system_user_id(context: &AuthorizationContext) -> Result<i64> {
    context.system_user_id().ok_or_else(ApiError::access_denied)
}
