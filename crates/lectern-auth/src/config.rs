//! Configuration for the credential lifecycle.
//!
//! An explicit struct handed to [`TokenService::new`](crate::TokenService::new)
//! — never an ambient global — so tests can inject short-lived secrets.
//! Read from the environment once at process start; nothing here is
//! re-read per request.

use std::time::Duration;

use lectern_core::Permission;

use crate::error::AuthError;

/// Environment variable holding the signing secret.
pub const SECRET_ENV: &str = "LECTERN_AUTH_SECRET";
/// Environment variable overriding the access-credential lifetime (seconds).
pub const ACCESS_TTL_ENV: &str = "LECTERN_ACCESS_TTL_SECS";
/// Environment variable overriding the refresh-credential lifetime (seconds).
pub const REFRESH_TTL_ENV: &str = "LECTERN_REFRESH_TTL_SECS";
/// Environment variable overriding the super-admin wildcard literal.
pub const SUPER_ADMIN_LITERAL_ENV: &str = "LECTERN_SUPER_ADMIN_LITERAL";

/// Placeholder secret used when [`SECRET_ENV`] is unset. A deployment
/// risk, not a logic concern: [`AuthConfig::validate`] warns loudly.
pub const INSECURE_DEFAULT_SECRET: &str = "lectern-insecure-dev-secret";

/// Default access-credential lifetime: 7 days.
pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
/// Default refresh-credential lifetime: 30 days.
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Configuration for credential issuance and verification.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Shared HMAC signing secret.
    pub secret: String,
    /// Lifetime of access credentials.
    pub access_ttl: Duration,
    /// Lifetime of refresh credentials.
    pub refresh_ttl: Duration,
    /// The wire literal of the super-admin wildcard.
    ///
    /// The canonical value is `"all"`. The presentation layer historically
    /// spelled it `"__all__"`; [`AuthConfig::validate`] rejects any
    /// literal outside the permission vocabulary so that a mismatched
    /// seeding fails at startup instead of silently never matching.
    pub super_admin_literal: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: INSECURE_DEFAULT_SECRET.to_string(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
            super_admin_literal: Permission::All.as_str().to_string(),
        }
    }
}

impl AuthConfig {
    /// Build a config from the process environment, falling back to the
    /// defaults above for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var(SECRET_ENV).unwrap_or(defaults.secret),
            access_ttl: ttl_from_env(ACCESS_TTL_ENV, defaults.access_ttl),
            refresh_ttl: ttl_from_env(REFRESH_TTL_ENV, defaults.refresh_ttl),
            super_admin_literal: std::env::var(SUPER_ADMIN_LITERAL_ENV)
                .unwrap_or(defaults.super_admin_literal),
        }
    }

    /// Validate the configuration. Call once at startup.
    ///
    /// Rejects an empty secret, zero lifetimes, and a super-admin literal
    /// that does not denote the wildcard permission. Warns (but does not
    /// fail) when the insecure placeholder secret is in use.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::Config {
                message: "signing secret must not be empty".to_string(),
            });
        }
        if self.secret == INSECURE_DEFAULT_SECRET {
            log::warn!("{SECRET_ENV} is unset; using the insecure placeholder secret");
        }
        if self.access_ttl.is_zero() || self.refresh_ttl.is_zero() {
            return Err(AuthError::Config {
                message: "credential lifetimes must be non-zero".to_string(),
            });
        }
        match self.super_admin_literal.parse::<Permission>() {
            Ok(Permission::All) => Ok(()),
            Ok(other) => Err(AuthError::Config {
                message: format!(
                    "super-admin literal '{other}' names an ordinary permission, not the wildcard"
                ),
            }),
            Err(_) => Err(AuthError::Config {
                message: format!(
                    "super-admin literal '{}' is not in the permission vocabulary (expected '{}')",
                    self.super_admin_literal,
                    Permission::All
                ),
            }),
        }
    }
}

fn ttl_from_env(var: &str, default: Duration) -> Duration {
    match std::env::var(var) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                log::warn!("{var}='{raw}' is not a number of seconds; using the default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = AuthConfig::default();
        assert_eq!(config.access_ttl, Duration::from_secs(7 * 24 * 60 * 60));
        assert_eq!(config.refresh_ttl, Duration::from_secs(30 * 24 * 60 * 60));
        assert_eq!(config.super_admin_literal, "all");
    }

    #[test]
    fn test_default_config_validates() {
        assert!(AuthConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = AuthConfig {
            secret: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AuthError::Config { .. })
        ));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = AuthConfig {
            access_ttl: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_side_wildcard_spelling_rejected() {
        let config = AuthConfig {
            super_admin_literal: "__all__".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        let AuthError::Config { message } = err else {
            panic!("expected Config error");
        };
        assert!(message.contains("__all__"));
        assert!(message.contains("'all'"));
    }

    #[test]
    fn test_ordinary_permission_as_wildcard_rejected() {
        let config = AuthConfig {
            super_admin_literal: "view_courses".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        let AuthError::Config { message } = err else {
            panic!("expected Config error");
        };
        assert!(message.contains("ordinary permission"));
    }
}
