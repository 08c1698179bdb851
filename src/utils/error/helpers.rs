//! Helper functions for creating specific error types

use super::types::ApiError;

impl ApiError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    /// The only denial ever shown to a client
    pub fn access_denied() -> Self {
        Self::Forbidden("Access Denied".to_string())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn file_storage<S: Into<String>>(message: S) -> Self {
        Self::FileStorage(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn missing_path_param(name: &str) -> Self {
        Self::BadRequest(format!("Missing required path param `{}`", name))
    }

    pub fn missing_query_param(name: &str) -> Self {
        Self::BadRequest(format!("Missing required query param `{}`", name))
    }

    pub fn missing_body() -> Self {
        Self::BadRequest("Missing required request body".to_string())
    }

    pub fn missing_body_entity(name: &str) -> Self {
        Self::BadRequest(format!("Missing request body entity `{}`", name))
    }

    /// A database row did not match the shape it was read into
    pub fn row_decode(row_type: &str, error: serde_json::Error) -> Self {
        Self::Internal(format!("Failed to decode {} row: {}", row_type, error))
    }

    /// A query builder rejected its input
    pub fn statement_build(description: &str) -> Self {
        Self::BadRequest(format!("Failed to build SQL {} statement", description))
    }

    /// Whether the error is the client's fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_)
                | Self::Unauthorized(_)
                | Self::Forbidden(_)
                | Self::NotFound(_)
                | Self::Conflict(_)
                | Self::Jwt(_)
        )
    }
}
