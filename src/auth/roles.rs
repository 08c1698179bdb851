//! Role names as stored in the `system_role` and `project_role` tables
//!
//! Role matching is exact and case-sensitive, so these must match the
//! database values byte for byte.

/// System wide roles
pub mod system_role {
    pub const SYSTEM_ADMIN: &str = "System Administrator";
    pub const PROJECT_ADMIN: &str = "Project Administrator";
    pub const CREATOR: &str = "Creator";
}

/// Roles held on a single project
pub mod project_role {
    pub const PROJECT_LEAD: &str = "Project Lead";
    pub const EDITOR: &str = "Editor";
    pub const VIEWER: &str = "Viewer";
}
