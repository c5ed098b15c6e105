//! The two credential payloads.

use serde::{Deserialize, Serialize};

use lectern_core::{Identity, PermissionSet, RoleId, UserId};

/// Discriminator value carried by refresh credentials.
///
/// The tag is the only thing preventing an access credential (which has no
/// tag) or a forged payload from being accepted at the refresh endpoint,
/// so every refresh-path verification checks it.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Payload of an access credential.
///
/// Carries the identity plus the flat permission snapshot resolved at
/// issuance time. Temporal claims are filled in by the token service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The authenticated user.
    pub sub: UserId,
    /// The role the user held at issuance time.
    pub role: RoleId,
    /// Permission snapshot; not re-read from storage per request.
    pub perms: PermissionSet,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl From<AccessClaims> for Identity {
    fn from(claims: AccessClaims) -> Self {
        Identity {
            user_id: claims.sub,
            role_id: claims.role,
            permissions: claims.perms,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// Payload of a refresh credential.
///
/// Minimal on purpose: a stolen refresh credential must not leak the
/// permission snapshot, so it carries the user id and the discriminator
/// tag only — never permissions, never a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// The user this credential can mint new access credentials for.
    pub sub: UserId,
    /// Always [`REFRESH_TOKEN_TYPE`] when minted by us.
    pub token_type: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}
