use super::context::AuthorizationContext;
use super::lookup::ProjectRoleLookup;
use super::matcher::user_has_valid_role;
use super::scheme::{AuthorizationRule, AuthorizationScheme};
use crate::utils::error::Result;
use tracing::{debug, warn};

/// Decide whether the caller in `context` satisfies `scheme`
///
/// Denies when there is no system user. Allows when there is no scheme or the
/// caller is a System Administrator. Otherwise `All` needs every rule to hold
/// and `Any` needs at least one. A failing project lookup denies.
pub async fn authorize(
    context: &mut AuthorizationContext,
    scheme: Option<&AuthorizationScheme>,
    lookup: &mut dyn ProjectRoleLookup,
) -> bool {
    match evaluate(context, scheme, lookup).await {
        Ok(decision) => decision,
        Err(e) => {
            warn!("Authorization lookup failed, denying request: {}", e);
            false
        }
    }
}

async fn evaluate(
    context: &mut AuthorizationContext,
    scheme: Option<&AuthorizationScheme>,
    lookup: &mut dyn ProjectRoleLookup,
) -> Result<bool> {
    if context.system_user().is_none() {
        debug!("No system user resolved for request");
        return Ok(false);
    }

    let Some(scheme) = scheme else {
        return Ok(true);
    };

    if context.is_system_admin() {
        return Ok(true);
    }

    match scheme {
        AuthorizationScheme::All(rules) => {
            for rule in rules {
                if !evaluate_rule(context, rule, lookup).await? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        AuthorizationScheme::Any(rules) => {
            for rule in rules {
                if evaluate_rule(context, rule, lookup).await? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

async fn evaluate_rule(
    context: &mut AuthorizationContext,
    rule: &AuthorizationRule,
    lookup: &mut dyn ProjectRoleLookup,
) -> Result<bool> {
    match rule {
        AuthorizationRule::SystemRole { valid_system_roles } => {
            Ok(user_has_valid_role(valid_system_roles, context.system_roles()))
        }
        AuthorizationRule::ProjectRole {
            valid_project_roles,
            project_id,
        } => {
            // No project to check roles against
            if *project_id <= 0 {
                return Ok(false);
            }
            if valid_project_roles.is_empty() {
                return Ok(true);
            }

            let held = context
                .project_user(*project_id, lookup)
                .await?
                .map(|user| user.project_role_names.as_slice());

            // No participation row means no project role set
            Ok(held.is_some() && user_has_valid_role(valid_project_roles, held))
        }
    }
}
