//! Collaborator-interface records.
//!
//! Persistence is an external collaborator; these are the only two shapes
//! the auth core receives from it. Both are plain data — no query logic
//! lives in this workspace.

use serde::{Deserialize, Serialize};

use crate::ids::{RoleId, UserId};
use crate::permission::PermissionSet;

/// A user account as handed over by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user id.
    pub id: UserId,
    /// Login email, unique per account.
    pub email: String,
    /// Argon2 PHC-string password hash. Never serialized into responses
    /// by this workspace; the field exists so the login handler can verify.
    pub password_hash: String,
    /// The role this account holds.
    pub role_id: RoleId,
    /// Deactivated accounts cannot log in or refresh.
    pub active: bool,
}

/// A role as handed over by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Unique role id.
    pub id: RoleId,
    /// Human-readable role name. Display only — authorization never
    /// branches on it.
    pub name: String,
    /// The permissions this role grants.
    pub permissions: PermissionSet,
}
