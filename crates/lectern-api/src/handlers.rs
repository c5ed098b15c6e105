//! Request handlers for the auth surface.
//!
//! The login handler is the one place passwords are seen; everything after
//! it runs on credentials alone. Handlers return `Result<_, ApiError>` and
//! never write error responses themselves — the boundary mapping in
//! [`crate::error`] does that once.

use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use lectern_auth::{AuthError, TokenService};
use lectern_core::Identity;

use crate::directory::UserDirectory;
use crate::error::ApiError;
use crate::password::verify_password;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Credential mint/verify service.
    pub tokens: Arc<TokenService>,
    /// The persistence collaborator.
    pub directory: Arc<dyn UserDirectory>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password, verified against the stored PHC hash.
    pub password: String,
}

/// Body of a successful login: the freshly minted credential pair.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always `true` here; failures go through the error boundary.
    pub success: bool,
    /// Bearer credential for protected requests.
    pub access_token: String,
    /// Long-lived credential for `POST /auth/refresh`.
    pub refresh_token: String,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// The refresh credential issued at login.
    pub refresh_token: String,
}

/// Body of a successful refresh: a new access credential only.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Always `true` here.
    pub success: bool,
    /// The new access credential, carrying a freshly resolved
    /// permission snapshot.
    pub access_token: String,
}

/// Authenticate email/password and mint the credential pair.
///
/// Unknown email, wrong password, and a deactivated account all produce
/// the same response. The role's permission list is resolved here, once,
/// into the snapshot embedded in the access credential.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .directory
        .user_by_email(&req.email)
        .await
        .ok_or(ApiError::InvalidLogin)?;

    if !verify_password(&user.password_hash, &req.password) {
        return Err(ApiError::InvalidLogin);
    }
    if !user.active {
        log::warn!("login attempt for deactivated account {}", user.id);
        return Err(ApiError::InvalidLogin);
    }

    let role = state
        .directory
        .role_by_id(user.role_id)
        .await
        .ok_or_else(|| ApiError::Internal(format!("user {} references missing role", user.id)))?;

    let access_token =
        state
            .tokens
            .issue_access_credential(user.id, role.id, role.permissions.clone())?;
    let refresh_token = state.tokens.issue_refresh_credential(user.id)?;

    log::info!("login user={} role={}", user.id, role.name);
    Ok(Json(LoginResponse {
        success: true,
        access_token,
        refresh_token,
    }))
}

/// Mint a new access credential from a refresh credential.
///
/// No password involved. The user and role records are re-read, so a role
/// edit or a deactivation made since login takes effect here.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let user_id = state.tokens.verify_refresh_credential(&req.refresh_token)?;

    let user = state
        .directory
        .user_by_id(user_id)
        .await
        .ok_or(ApiError::Auth(AuthError::InvalidCredential))?;
    if !user.active {
        log::warn!("refresh attempt for deactivated account {}", user.id);
        return Err(ApiError::Auth(AuthError::InvalidCredential));
    }

    let role = state
        .directory
        .role_by_id(user.role_id)
        .await
        .ok_or_else(|| ApiError::Internal(format!("user {} references missing role", user.id)))?;

    let access_token =
        state
            .tokens
            .issue_access_credential(user.id, role.id, role.permissions.clone())?;

    Ok(Json(RefreshResponse {
        success: true,
        access_token,
    }))
}

/// Echo the verified identity attached by the middleware.
pub async fn me(Extension(identity): Extension<Identity>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "identity": identity,
    }))
}
