//! Error types for lectern-api

use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;

use lectern_auth::AuthError;
use lectern_authz::AuthzError;

/// Result type alias for lectern-api operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur in lectern-api.
///
/// Composes the lower crates' errors so handlers can use `?` throughout
/// and the response mapping still happens exactly once, here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// Authentication error from lectern-auth
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Authorization error from lectern-authz
    #[error(transparent)]
    Authz(#[from] AuthzError),

    /// Login failed. One message for a wrong password, an unknown email,
    /// and a deactivated account — no user-existence oracle.
    #[error("invalid email or password")]
    InvalidLogin,

    /// Anything else. Reported as an internal error, never folded into
    /// "unauthenticated".
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Auth(err) => err.into_response(),
            ApiError::Authz(err) => err.into_response(),
            ApiError::InvalidLogin => {
                let body = serde_json::json!({
                    "success": false,
                    "error": self.to_string(),
                    "code": "INVALID_CREDENTIALS",
                });
                (
                    StatusCode::UNAUTHORIZED,
                    [(http::header::CONTENT_TYPE, "application/json")],
                    body.to_string(),
                )
                    .into_response()
            }
            ApiError::Internal(detail) => {
                log::error!("internal error: {detail}");
                let body = serde_json::json!({
                    "success": false,
                    "error": "internal server error",
                    "code": "INTERNAL_ERROR",
                });
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(http::header::CONTENT_TYPE, "application/json")],
                    body.to_string(),
                )
                    .into_response()
            }
        }
    }
}
