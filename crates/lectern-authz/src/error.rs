//! Authorization error taxonomy and the response-boundary mapping.

use axum::response::IntoResponse;
use http::StatusCode;

use lectern_core::Permission;

/// Errors produced by a route-policy check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AuthzError {
    /// A permission check was reached with no identity attached — the
    /// route is missing the identity middleware, or the check ran on an
    /// optional route for an anonymous caller.
    #[error("authentication required, please sign in")]
    Unauthenticated,

    /// The identity is present but lacks the listed permission(s).
    ///
    /// The list is the exact missing subset, so callers learn *which*
    /// permissions to request — not merely that the check failed.
    #[error("missing required permission(s): {}", join_permissions(.missing))]
    Forbidden {
        /// The requested permissions the identity does not hold.
        missing: Vec<Permission>,
    },
}

impl AuthzError {
    /// Machine-readable code carried in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthzError::Unauthenticated => "UNAUTHENTICATED",
            AuthzError::Forbidden { .. } => "FORBIDDEN",
        }
    }

    /// HTTP status this error surfaces as: 401 for a missing identity,
    /// 403 for an insufficient one.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthzError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthzError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> axum::response::Response {
        let mut body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
            "code": self.code(),
        });
        if let AuthzError::Forbidden { missing } = &self {
            body["missing"] = serde_json::json!(missing);
        }
        (
            self.status(),
            [(http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

fn join_permissions(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(Permission::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
