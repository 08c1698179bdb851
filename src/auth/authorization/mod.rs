//! Role based authorization
//!
//! A request builds an [`AuthorizationScheme`] from its route parameters and
//! evaluates it against the caller's [`AuthorizationContext`]. Project roles
//! are resolved lazily through a [`ProjectRoleLookup`].

mod context;
mod evaluator;
mod lookup;
mod matcher;
mod scheme;


pub use context::AuthorizationContext;
pub use evaluator::authorize;
pub use lookup::ProjectRoleLookup;
pub use matcher::user_has_valid_role;
pub use scheme::{AuthorizationRule, AuthorizationScheme};
