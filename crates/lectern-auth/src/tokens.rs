//! Credential minting and verification.
//!
//! One [`TokenService`] per process, built from an [`AuthConfig`]. Tokens
//! are stateless HS256 JWTs over a single shared secret; nothing is
//! persisted, cached, or retried. Verification is a synchronous signature
//! check plus expiry comparison — it performs no I/O.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;

use lectern_core::{PermissionSet, RoleId, UserId};

use crate::claims::{AccessClaims, RefreshClaims, REFRESH_TOKEN_TYPE};
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Lenient probe for the refresh path: decodes any of our payloads far
/// enough to inspect the discriminator tag.
#[derive(Debug, Deserialize)]
struct RefreshProbe {
    sub: UserId,
    #[serde(default)]
    token_type: Option<String>,
}

/// Mints and verifies the access/refresh credential pair.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Build a token service from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] when the configuration is invalid
    /// (empty secret, zero lifetime, bad wildcard literal).
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;
        let mut validation = Validation::new(Algorithm::HS256);
        // Zero leeway: a credential expired by one second is expired.
        validation.leeway = 0;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        })
    }

    /// Mint a signed access credential.
    ///
    /// Embeds `iat = now` and `exp = now + access lifetime` alongside the
    /// caller-supplied identity and permission snapshot. No side effects
    /// beyond signing.
    pub fn issue_access_credential(
        &self,
        user_id: UserId,
        role_id: RoleId,
        permissions: PermissionSet,
    ) -> Result<String, AuthError> {
        let now = now_epoch_seconds();
        let claims = AccessClaims {
            sub: user_id,
            role: role_id,
            perms: permissions,
            iat: now,
            exp: now + self.access_ttl.as_secs() as i64,
        };
        encode(&claims, &self.encoding_key)
    }

    /// Mint a signed refresh credential.
    ///
    /// The payload carries the user id and the refresh tag only.
    pub fn issue_refresh_credential(&self, user_id: UserId) -> Result<String, AuthError> {
        let now = now_epoch_seconds();
        let claims = RefreshClaims {
            sub: user_id,
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            iat: now,
            exp: now + self.refresh_ttl.as_secs() as i64,
        };
        encode(&claims, &self.encoding_key)
    }

    /// Verify an access credential and return its decoded claims.
    ///
    /// Signature and expiry are checked atomically by the decode call;
    /// there is no partially-valid outcome.
    ///
    /// # Errors
    ///
    /// [`AuthError::ExpiredSession`] when the signature is valid but the
    /// expiry has passed; [`AuthError::InvalidCredential`] for everything
    /// else, including a refresh credential presented here (its payload
    /// lacks the role and permission fields).
    pub fn verify_access_credential(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        Ok(data.claims)
    }

    /// Verify a refresh credential and return the user id it was minted for.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredential`] on a bad signature or structure,
    /// [`AuthError::ExpiredSession`] on expiry, and
    /// [`AuthError::WrongCredentialType`] when the payload verifies but the
    /// refresh tag is missing or wrong — the sole defense against an
    /// access credential (which has no tag) being replayed here for
    /// unlimited refreshes.
    pub fn verify_refresh_credential(&self, token: &str) -> Result<UserId, AuthError> {
        let data = jsonwebtoken::decode::<RefreshProbe>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        match data.claims.token_type.as_deref() {
            Some(REFRESH_TOKEN_TYPE) => Ok(data.claims.sub),
            _ => Err(AuthError::WrongCredentialType),
        }
    }
}

fn encode<T: serde::Serialize>(claims: &T, key: &EncodingKey) -> Result<String, AuthError> {
    jsonwebtoken::encode(&Header::default(), claims, key)
        .map_err(|e| AuthError::Signing(e.to_string()))
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredSession,
        _ => {
            log::debug!("credential verification failed: {err}");
            AuthError::InvalidCredential
        }
    }
}

fn now_epoch_seconds() -> i64 {
    // Clamp instead of panicking if the clock sits before the epoch.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs() as i64
}
