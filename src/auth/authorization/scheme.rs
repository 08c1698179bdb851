//! Authorization schemes, built per request from route parameters

/// A single role requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationRule {
    /// Caller holds one of these system roles
    SystemRole { valid_system_roles: Vec<String> },
    /// Caller holds one of these roles on `project_id`
    ProjectRole {
        valid_project_roles: Vec<String>,
        project_id: i64,
    },
}

impl AuthorizationRule {
    pub fn system_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SystemRole {
            valid_system_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn project_role<I, S>(roles: I, project_id: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ProjectRole {
            valid_project_roles: roles.into_iter().map(Into::into).collect(),
            project_id,
        }
    }
}

/// How a list of rules combines into a decision
///
/// `All` of zero rules allows; `Any` of zero rules denies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationScheme {
    All(Vec<AuthorizationRule>),
    Any(Vec<AuthorizationRule>),
}

impl AuthorizationScheme {
    pub fn all(rules: Vec<AuthorizationRule>) -> Self {
        Self::All(rules)
    }

    pub fn any(rules: Vec<AuthorizationRule>) -> Self {
        Self::Any(rules)
    }

    pub fn rules(&self) -> &[AuthorizationRule] {
        match self {
            Self::All(rules) | Self::Any(rules) => rules,
        }
    }
}
