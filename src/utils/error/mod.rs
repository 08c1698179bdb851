//! Error handling for the API
//!
//! A single [`ApiError`] enum is used throughout the crate. It renders as a JSON
//! error envelope through its `actix_web::ResponseError` implementation.

mod helpers;
mod response;
mod types;


pub use response::{ErrorDetail, ErrorResponse};
pub use types::{ApiError, Result};
