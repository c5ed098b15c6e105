//! Route-level permission policies.

use lectern_core::{Permission, PermissionSet};

use crate::error::AuthzError;

/// What a route demands of an identity's permission snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionPolicy {
    /// The single named permission must be held.
    One(Permission),
    /// At least one of the named permissions must be held (logical OR).
    Any(Vec<Permission>),
    /// Every named permission must be held (logical AND).
    All(Vec<Permission>),
}

impl PermissionPolicy {
    /// Decide whether `permissions` satisfies this policy.
    ///
    /// The super-admin wildcard satisfies every policy; the check is set
    /// membership, never a role name. On failure the error enumerates the
    /// exact missing subset: the single permission for [`One`], the whole
    /// requested list for [`Any`] (none of them were found), and
    /// requested-minus-held for [`All`].
    ///
    /// [`One`]: PermissionPolicy::One
    /// [`Any`]: PermissionPolicy::Any
    /// [`All`]: PermissionPolicy::All
    pub fn evaluate(&self, permissions: &PermissionSet) -> Result<(), AuthzError> {
        match self {
            PermissionPolicy::One(required) => {
                if permissions.has(*required) {
                    Ok(())
                } else {
                    Err(AuthzError::Forbidden {
                        missing: vec![*required],
                    })
                }
            }
            PermissionPolicy::Any(required) => {
                if permissions.has_any(required) {
                    Ok(())
                } else {
                    Err(AuthzError::Forbidden {
                        missing: required.clone(),
                    })
                }
            }
            PermissionPolicy::All(required) => {
                let missing = permissions.missing(required);
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(AuthzError::Forbidden { missing })
                }
            }
        }
    }
}
