// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::TokenError;
use crate::database::StoreError;
use crate::filter::FilterError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body.
    ///
    /// Credential rejections carry no detail at all; every other error uses
    /// the `{error, status, statusText}` shape also used by the users lookup.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Unauthorized(_) | ApiError::Forbidden(_) => json!({ "error": true }),
            _ => json!({
                "error": true,
                "status": self.status_code().as_u16(),
                "statusText": self.message(),
            }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                tracing::error!("Document store unavailable: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            StoreError::Query(msg) => {
                // Don't expose driver errors to clients
                tracing::error!("Document store query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            StoreError::Encoding(msg) => {
                tracing::error!("Document encoding error: {}", msg);
                ApiError::internal_server_error("Failed to encode document")
            }
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::PayloadNotObject => ApiError::bad_request(err.to_string()),
            TokenError::Invalid(_) => ApiError::forbidden(err.to_string()),
            TokenError::MissingSecret | TokenError::InvalidExpiry(_) | TokenError::Encoding(_) => {
                tracing::error!("Token service error: {}", err);
                ApiError::internal_server_error("Failed to issue token")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_render_bare_flag() {
        assert_eq!(ApiError::unauthorized("missing header").to_json(), json!({ "error": true }));
        assert_eq!(ApiError::forbidden("bad signature").to_json(), json!({ "error": true }));
    }

    #[test]
    fn other_errors_carry_status_and_text() {
        let err = ApiError::bad_request("Invalid identifier: nope");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_json(),
            json!({ "error": true, "status": 400, "statusText": "Invalid identifier: nope" })
        );
    }

    #[test]
    fn store_outage_maps_to_service_unavailable() {
        let err: ApiError = StoreError::Unavailable("server selection timeout".into()).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        // Driver details stay in the logs
        assert!(!err.message().contains("selection"));
    }

    #[test]
    fn query_failure_maps_to_internal_error() {
        let err: ApiError = StoreError::Query("E11000 duplicate key".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
