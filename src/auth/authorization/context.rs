use super::lookup::ProjectRoleLookup;
use crate::auth::roles::system_role;
use crate::models::user::{ProjectUser, SystemUser};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Per-request authorization state
///
/// Holds the resolved system user and memoizes project participation per
/// project id. Created once per request and dropped with it.
#[derive(Debug, Default)]
pub struct AuthorizationContext {
    system_user: Option<SystemUser>,
    project_users: HashMap<i64, Option<ProjectUser>>,
}

impl AuthorizationContext {
    pub fn new(system_user: Option<SystemUser>) -> Self {
        Self {
            system_user,
            project_users: HashMap::new(),
        }
    }

    pub fn system_user(&self) -> Option<&SystemUser> {
        self.system_user.as_ref()
    }

    pub fn system_user_id(&self) -> Option<i64> {
        self.system_user.as_ref().map(|user| user.id)
    }

    /// System role set, `None` when no system user was resolved
    pub fn system_roles(&self) -> Option<&[String]> {
        self.system_user
            .as_ref()
            .map(|user| user.role_names.as_slice())
    }

    pub fn is_system_admin(&self) -> bool {
        self.system_user
            .as_ref()
            .is_some_and(|user| user.has_role(system_role::SYSTEM_ADMIN))
    }

    /// Project participation already resolved for `project_id`, if any
    pub fn resolved_project_user(&self, project_id: i64) -> Option<&ProjectUser> {
        self.project_users.get(&project_id).and_then(Option::as_ref)
    }

    /// Project participation for `project_id`, resolving it on first use
    pub async fn project_user(
        &mut self,
        project_id: i64,
        lookup: &mut dyn ProjectRoleLookup,
    ) -> Result<Option<&ProjectUser>> {
        if !self.project_users.contains_key(&project_id) {
            let Some(system_user_id) = self.system_user_id() else {
                return Ok(None);
            };
            let resolved = lookup.project_user(project_id, system_user_id).await?;
            self.project_users.insert(project_id, resolved);
        }

        Ok(self.resolved_project_user(project_id))
    }
}
