//! # lectern-api
//!
//! HTTP surface for the Lectern auth core:
//! - [`directory`]: the narrow persistence seam ([`UserDirectory`]) and an
//!   in-memory implementation
//! - [`password`]: Argon2 PHC-string hashing and verification
//! - [`handlers`]: login, token refresh, and the identity echo
//! - [`routes`]: router wiring the identity and policy middleware
//! - [`error`]: API error composition and its boundary mapping
//!
//! Persistence, file storage, and notification delivery stay external;
//! this crate only consumes [`lectern_core::UserRecord`] and
//! [`lectern_core::RoleRecord`] through the directory trait.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod directory;
pub mod error;
pub mod handlers;
pub mod password;
pub mod routes;

pub use directory::{MemoryDirectory, UserDirectory};
pub use error::{ApiError, Result};
pub use handlers::AppState;
pub use routes::router;
