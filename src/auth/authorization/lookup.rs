use crate::models::user::ProjectUser;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Resolves a caller's participation in a project
///
/// Called at most once per project per request; results are memoized in the
/// [`AuthorizationContext`](super::AuthorizationContext).
#[async_trait]
pub trait ProjectRoleLookup: Send {
    async fn project_user(
        &mut self,
        project_id: i64,
        system_user_id: i64,
    ) -> Result<Option<ProjectUser>>;
}
