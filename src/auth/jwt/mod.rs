//! JWT verification
//!
//! Tokens are issued by the identity provider; this module only verifies
//! signatures and standard claims and exposes the user identity they carry.

mod handler;
mod types;


pub use types::{JwtVerifier, TokenClaims};
