//! Credential lifecycle and request identity for Lectern.
//!
//! Provides:
//! - [`AuthConfig`] — explicit configuration (secret, lifetimes, wildcard
//!   literal), injected into the service rather than read ambiently
//! - [`TokenService`] — mints and verifies the access/refresh credential
//!   pair (HS256, single shared secret)
//! - [`AccessClaims`] / [`RefreshClaims`] — the two credential payloads
//! - [`IdentityLayer`] / [`IdentityService`] — Tower middleware attaching
//!   the verified [`lectern_core::Identity`] to request extensions, with a
//!   required and a non-failing optional variant
//! - [`AuthError`] — authentication failure taxonomy and its single
//!   response-boundary mapping

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod claims;
pub mod config;
pub mod error;
pub mod middleware;
pub mod tokens;

pub use claims::{AccessClaims, RefreshClaims, REFRESH_TOKEN_TYPE};
pub use config::AuthConfig;
pub use error::AuthError;
pub use middleware::{IdentityLayer, IdentityService};
pub use tokens::TokenService;
