//! Permission evaluation for Lectern.
//!
//! Decides whether an identity's permission snapshot satisfies a route
//! policy, with the universal super-admin override. Stateless: everything
//! here is a pure function of (identity, policy).
//!
//! Provides:
//! - [`PermissionPolicy`] — a single permission, any-of, or all-of
//! - [`PolicyLayer`] / [`PolicyService`] — Tower middleware gating a route
//!   on a policy ([`require_permission`], [`require_any_permission`],
//!   [`require_all_permissions`] are the route-level constructors)
//! - [`AuthzError`] — `Unauthenticated` / `Forbidden` with the exact
//!   missing-permission list, and its response-boundary mapping
//!
//! The pure boolean twins (`has` / `has_any` / `has_all` / `missing`) live
//! on [`lectern_core::PermissionSet`] for use inside handler bodies.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod middleware;
pub mod policy;

pub use error::AuthzError;
pub use middleware::{
    require_all_permissions, require_any_permission, require_permission, PolicyLayer,
    PolicyService,
};
pub use policy::PermissionPolicy;
