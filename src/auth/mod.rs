//! Authentication and authorization
//!
//! Bearer tokens are verified by [`jwt::JwtVerifier`]. The verified user
//! identifier is then resolved to a system user whose roles, together with
//! lazily resolved project roles, are checked against an
//! [`AuthorizationScheme`] by [`authorization::authorize`].

pub mod authorization;
pub mod jwt;
pub mod roles;

pub use authorization::{
    AuthorizationContext, AuthorizationRule, AuthorizationScheme, ProjectRoleLookup, authorize,
    user_has_valid_role,
};
pub use jwt::{JwtVerifier, TokenClaims};
