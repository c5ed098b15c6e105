//! Verified request identity and extraction helpers.

use serde::{Deserialize, Serialize};

use crate::ids::{RoleId, UserId};
use crate::permission::PermissionSet;

/// The verified identity attached to one request.
///
/// Decoded from a validated access credential and stored in HTTP request
/// extensions by the identity middleware. It lives for the duration of a
/// single request and is never persisted server-side. The permission set
/// is the snapshot taken when the credential was issued — a role edit does
/// not take effect until the user's next refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// The authenticated user's id.
    pub user_id: UserId,
    /// The role the user held at issuance time.
    pub role_id: RoleId,
    /// Permission snapshot taken at issuance time.
    pub permissions: PermissionSet,
    /// Credential issued-at, seconds since the Unix epoch.
    pub issued_at: i64,
    /// Credential expiry, seconds since the Unix epoch.
    pub expires_at: i64,
}

/// Extract the [`Identity`] from HTTP request `Parts`, if present.
///
/// Returns `None` on routes behind the optional-identity middleware when
/// the request carried no (or an unverifiable) credential.
pub fn identity_from_parts(parts: &http::request::Parts) -> Option<&Identity> {
    parts.extensions.get::<Identity>()
}
