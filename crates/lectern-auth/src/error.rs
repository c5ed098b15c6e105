//! Authentication error taxonomy and the response-boundary mapping.

use axum::response::IntoResponse;
use http::StatusCode;

/// Errors that can occur while extracting or verifying a credential.
///
/// Every failure is raised at the point of detection and mapped to a
/// response exactly once, by the [`IntoResponse`] impl below. Nothing in
/// this crate writes to the response anywhere else, and nothing is retried:
/// none of these failures are transient from the server's point of view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No `Authorization` header, or one that is not bearer-shaped.
    #[error("authentication required, please sign in")]
    MissingCredential,

    /// Signature is valid but the expiry is in the past.
    #[error("session expired, please sign in again")]
    ExpiredSession,

    /// Bad signature or malformed payload.
    #[error("invalid token")]
    InvalidCredential,

    /// The refresh path received a payload without the refresh
    /// discriminator tag — e.g. an access credential, or a forgery.
    #[error("invalid token")]
    WrongCredentialType,

    /// Invalid configuration detected at startup.
    #[error("configuration error: {message}")]
    Config {
        /// What is wrong with the configuration.
        message: String,
    },

    /// The signing library failed for a reason that is not the client's
    /// fault. Surfaces as an internal error, never as "unauthenticated".
    #[error("credential signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Machine-readable code carried in the response body.
    ///
    /// `WrongCredentialType` deliberately folds into `INVALID_CREDENTIAL`
    /// at the boundary: a caller probing the refresh endpoint learns
    /// nothing about why its token was rejected.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::ExpiredSession => "SESSION_EXPIRED",
            AuthError::InvalidCredential | AuthError::WrongCredentialType => "INVALID_CREDENTIAL",
            AuthError::Config { .. } | AuthError::Signing(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Whether this error should result in a 401 (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredential
                | AuthError::ExpiredSession
                | AuthError::InvalidCredential
                | AuthError::WrongCredentialType
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let message = if self.is_client_error() {
            self.to_string()
        } else {
            // Internal details stay in the logs.
            "internal server error".to_string()
        };
        let body = serde_json::json!({
            "success": false,
            "error": message,
            "code": self.code(),
        });
        (
            self.status(),
            [(http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AuthError::MissingCredential.to_string(),
            "authentication required, please sign in"
        );
        assert_eq!(
            AuthError::ExpiredSession.to_string(),
            "session expired, please sign in again"
        );
        assert_eq!(AuthError::InvalidCredential.to_string(), "invalid token");
    }

    #[test]
    fn test_wrong_credential_type_folds_into_invalid() {
        assert_eq!(AuthError::WrongCredentialType.code(), "INVALID_CREDENTIAL");
        assert_eq!(AuthError::WrongCredentialType.to_string(), "invalid token");
    }

    #[test]
    fn test_client_errors_are_401() {
        assert_eq!(
            AuthError::MissingCredential.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::ExpiredSession.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidCredential.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_errors_are_500() {
        let err = AuthError::Signing("key corrupt".to_string());
        assert!(!err.is_client_error());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = AuthError::ExpiredSession.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "SESSION_EXPIRED");
        assert_eq!(body["error"], "session expired, please sign in again");
    }

    #[tokio::test]
    async fn test_internal_response_hides_detail() {
        let response = AuthError::Signing("secret material dump".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal server error");
    }
}
