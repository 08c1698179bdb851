//! Request extractors

use crate::auth::TokenClaims;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::{Ready, ready};
use tracing::debug;

/// Caller with a verified bearer token
///
/// Extraction fails with `401` when the token is missing or invalid. Whether
/// the caller may do anything is decided later by authorization.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: TokenClaims,
}

impl AuthenticatedUser {
    pub fn user_identifier(&self) -> &str {
        self.claims.user_identifier()
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::internal("Application state is not configured"))?;

    let token = bearer_token(req).ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    let claims = state.jwt.verify_token(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid bearer token")
    })?;

    Ok(AuthenticatedUser { claims })
}
