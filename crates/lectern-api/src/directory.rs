//! The narrow persistence seam.
//!
//! The auth core receives exactly two shapes from storage: a user record
//! and a role record. [`UserDirectory`] is that seam; the real deployment
//! backs it with the platform's relational store, while
//! [`MemoryDirectory`] serves the dev binary and the tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use lectern_core::{RoleId, RoleRecord, UserId, UserRecord};

/// Read access to user and role records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user by login email.
    async fn user_by_email(&self, email: &str) -> Option<UserRecord>;

    /// Look up a user by id.
    async fn user_by_id(&self, id: UserId) -> Option<UserRecord>;

    /// Look up a role by id.
    async fn role_by_id(&self, id: RoleId) -> Option<RoleRecord>;
}

/// In-memory [`UserDirectory`].
#[derive(Default)]
pub struct MemoryDirectory {
    users: RwLock<HashMap<UserId, UserRecord>>,
    roles: RwLock<HashMap<RoleId, RoleRecord>>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record.
    pub fn upsert_user(&self, user: UserRecord) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id, user);
        }
    }

    /// Insert or replace a role record.
    ///
    /// Replacing a role does not touch credentials already issued — the
    /// permission snapshot inside them stays as minted until refresh.
    pub fn upsert_role(&self, role: RoleRecord) {
        if let Ok(mut roles) = self.roles.write() {
            roles.insert(role.id, role);
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn user_by_email(&self, email: &str) -> Option<UserRecord> {
        let users = self.users.read().ok()?;
        users.values().find(|u| u.email == email).cloned()
    }

    async fn user_by_id(&self, id: UserId) -> Option<UserRecord> {
        let users = self.users.read().ok()?;
        users.get(&id).cloned()
    }

    async fn role_by_id(&self, id: RoleId) -> Option<RoleRecord> {
        let roles = self.roles.read().ok()?;
        roles.get(&id).cloned()
    }
}
