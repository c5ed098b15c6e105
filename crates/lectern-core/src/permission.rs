//! The closed permission vocabulary and permission-set evaluation.
//!
//! Permissions are a fixed enumeration rather than free-form strings, so a
//! typo in a route policy fails at compile time instead of evaluating to
//! "always forbidden". The wire form is the snake_case string
//! (`"view_courses"`, `"delete_user"`, ...).
//!
//! One reserved value, [`Permission::All`] (`"all"`), is the super-admin
//! wildcard: a set containing it satisfies every check unconditionally.
//! The override is a function of the set alone — never of a role name.
//!
//! # Usage
//!
//! ```rust
//! use lectern_core::{Permission, PermissionSet};
//!
//! let set = PermissionSet::from_iter([Permission::ViewCourses]);
//! assert!(set.has(Permission::ViewCourses));
//! assert!(!set.has(Permission::EditCourse));
//! assert_eq!(
//!     set.missing(&[Permission::ViewCourses, Permission::EditCourse]),
//!     vec![Permission::EditCourse],
//! );
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::error::Error;

// ============================================================================
// Permission
// ============================================================================

/// A single capability of the platform.
///
/// Feature-action pairs, plus the reserved [`Permission::All`] wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// List and read courses.
    ViewCourses,
    /// Create a new course.
    CreateCourse,
    /// Edit an existing course.
    EditCourse,
    /// Delete a course.
    DeleteCourse,
    /// List and read user accounts.
    ViewUsers,
    /// Create a user account.
    CreateUser,
    /// Edit a user account.
    EditUser,
    /// Delete a user account.
    DeleteUser,
    /// Upload files to course storage.
    UploadFiles,
    /// Delete files from course storage.
    DeleteFiles,
    /// Read reports.
    ViewReports,
    /// Generate new reports.
    GenerateReports,
    /// Send notifications to users.
    SendNotifications,
    /// Create, edit, and delete roles.
    ManageRoles,
    /// Super-admin wildcard: grants every permission unconditionally.
    All,
}

impl Permission {
    /// Every member of the vocabulary, wildcard included.
    pub const VOCABULARY: [Permission; 15] = [
        Permission::ViewCourses,
        Permission::CreateCourse,
        Permission::EditCourse,
        Permission::DeleteCourse,
        Permission::ViewUsers,
        Permission::CreateUser,
        Permission::EditUser,
        Permission::DeleteUser,
        Permission::UploadFiles,
        Permission::DeleteFiles,
        Permission::ViewReports,
        Permission::GenerateReports,
        Permission::SendNotifications,
        Permission::ManageRoles,
        Permission::All,
    ];

    /// The canonical wire form of this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewCourses => "view_courses",
            Permission::CreateCourse => "create_course",
            Permission::EditCourse => "edit_course",
            Permission::DeleteCourse => "delete_course",
            Permission::ViewUsers => "view_users",
            Permission::CreateUser => "create_user",
            Permission::EditUser => "edit_user",
            Permission::DeleteUser => "delete_user",
            Permission::UploadFiles => "upload_files",
            Permission::DeleteFiles => "delete_files",
            Permission::ViewReports => "view_reports",
            Permission::GenerateReports => "generate_reports",
            Permission::SendNotifications => "send_notifications",
            Permission::ManageRoles => "manage_roles",
            Permission::All => "all",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Case-sensitive on purpose: permission strings are opaque tokens.
        Permission::VOCABULARY
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownPermission {
                value: s.to_string(),
            })
    }
}

// ============================================================================
// PermissionSet
// ============================================================================

/// The flat set of permissions granted to one identity.
///
/// This is the snapshot embedded into an access credential at issuance
/// time; it is never re-read from storage during a request. All evaluation
/// predicates short-circuit on the [`Permission::All`] wildcard first.
///
/// Serializes as a sorted list so identical sets produce identical tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    /// Adds a permission to the set.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// Number of permissions in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set grants nothing at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the granted permissions in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        let mut perms: Vec<Permission> = self.0.iter().copied().collect();
        perms.sort();
        perms.into_iter()
    }

    /// Returns `true` iff the set contains the super-admin wildcard.
    ///
    /// This is the first check of every other predicate; membership of the
    /// wildcard — not a role name — is the sole trigger of the override.
    pub fn is_super_admin(&self) -> bool {
        self.0.contains(&Permission::All)
    }

    /// Returns `true` if `permission` is granted.
    ///
    /// A wildcard set satisfies every permission, including ones never
    /// granted to any real role. An empty set satisfies none.
    pub fn has(&self, permission: Permission) -> bool {
        self.is_super_admin() || self.0.contains(&permission)
    }

    /// Returns `true` if at least one of `permissions` is granted (OR).
    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        self.is_super_admin() || permissions.iter().any(|p| self.0.contains(p))
    }

    /// Returns `true` if every one of `permissions` is granted (AND).
    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        self.is_super_admin() || permissions.iter().all(|p| self.0.contains(p))
    }

    /// The subset of `permissions` that is NOT granted, in request order.
    ///
    /// Empty for a super-admin. Duplicates in the request are reported once.
    pub fn missing(&self, permissions: &[Permission]) -> Vec<Permission> {
        if self.is_super_admin() {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        permissions
            .iter()
            .filter(|p| !self.0.contains(*p) && seen.insert(**p))
            .copied()
            .collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let perms: Vec<Permission> = self.iter().collect();
        perms.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let perms = Vec::<Permission>::deserialize(deserializer)?;
        Ok(perms.into_iter().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_wire_roundtrip() {
        for p in Permission::VOCABULARY {
            let parsed: Permission = p.as_str().parse().unwrap();
            assert_eq!(parsed, p);
        }
    }

    #[test]
    fn test_permission_serde_matches_as_str() {
        let json = serde_json::to_string(&Permission::ViewCourses).unwrap();
        assert_eq!(json, "\"view_courses\"");
        let back: Permission = serde_json::from_str("\"delete_user\"").unwrap();
        assert_eq!(back, Permission::DeleteUser);
    }

    #[test]
    fn test_permission_from_str_is_case_sensitive() {
        assert!("View_Courses".parse::<Permission>().is_err());
        assert!("ALL".parse::<Permission>().is_err());
    }

    #[test]
    fn test_permission_from_str_rejects_client_side_wildcard() {
        // "__all__" is the presentation-layer spelling, not ours.
        let err = "__all__".parse::<Permission>().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownPermission {
                value: "__all__".to_string()
            }
        );
    }

    #[test]
    fn test_empty_set_grants_nothing() {
        let set = PermissionSet::new();
        for p in Permission::VOCABULARY {
            assert!(!set.has(p));
        }
        assert!(!set.has_any(&[Permission::ViewCourses, Permission::All]));
        assert!(!set.is_super_admin());
    }

    #[test]
    fn test_wildcard_grants_everything() {
        let set = PermissionSet::from_iter([Permission::All]);
        assert!(set.is_super_admin());
        for p in Permission::VOCABULARY {
            assert!(set.has(p), "wildcard must grant {p}");
        }
        assert!(set.has_all(&Permission::VOCABULARY));
        assert!(set.missing(&Permission::VOCABULARY).is_empty());
    }

    #[test]
    fn test_has_is_plain_membership_without_wildcard() {
        let set = PermissionSet::from_iter([Permission::ViewCourses, Permission::EditCourse]);
        assert!(set.has(Permission::ViewCourses));
        assert!(!set.has(Permission::DeleteCourse));
        assert!(!set.is_super_admin());
    }

    #[test]
    fn test_has_any_is_logical_or() {
        let set = PermissionSet::from_iter([Permission::ViewReports]);
        assert!(set.has_any(&[Permission::DeleteUser, Permission::ViewReports]));
        assert!(!set.has_any(&[Permission::DeleteUser, Permission::CreateUser]));
        assert!(!set.has_any(&[]));
    }

    #[test]
    fn test_has_all_is_logical_and() {
        let set = PermissionSet::from_iter([Permission::ViewCourses, Permission::EditCourse]);
        assert!(set.has_all(&[Permission::ViewCourses, Permission::EditCourse]));
        assert!(!set.has_all(&[
            Permission::ViewCourses,
            Permission::EditCourse,
            Permission::DeleteCourse,
        ]));
    }

    #[test]
    fn test_missing_is_exactly_the_unheld_subset() {
        let set = PermissionSet::from_iter([Permission::ViewCourses]);
        let missing = set.missing(&[
            Permission::ViewCourses,
            Permission::EditCourse,
            Permission::DeleteCourse,
        ]);
        assert_eq!(missing, vec![Permission::EditCourse, Permission::DeleteCourse]);
    }

    #[test]
    fn test_missing_preserves_request_order_and_dedupes() {
        let set = PermissionSet::new();
        let missing = set.missing(&[
            Permission::DeleteCourse,
            Permission::EditCourse,
            Permission::DeleteCourse,
        ]);
        assert_eq!(missing, vec![Permission::DeleteCourse, Permission::EditCourse]);
    }

    #[test]
    fn test_set_serializes_sorted() {
        let set = PermissionSet::from_iter([Permission::ViewUsers, Permission::CreateCourse]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"create_course\",\"view_users\"]");
    }

    #[test]
    fn test_set_roundtrip_serialization() {
        let set = PermissionSet::from_iter([Permission::All, Permission::ViewCourses]);
        let json = serde_json::to_string(&set).unwrap();
        let back: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }

    #[test]
    fn test_set_rejects_unknown_permission_on_deserialize() {
        let result = serde_json::from_str::<PermissionSet>("[\"view_courses\",\"__all__\"]");
        assert!(result.is_err());
    }
}
