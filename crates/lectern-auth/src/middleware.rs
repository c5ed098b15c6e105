//! Tower middleware bridging the `Authorization` header to a verified
//! [`Identity`] in request extensions.
//!
//! Two variants share one service:
//!
//! - [`IdentityLayer::required`] — rejects at the boundary on any
//!   extraction or verification failure; the inner service never runs
//!   without a verified identity.
//! - [`IdentityLayer::optional`] — swallows failures and always runs the
//!   inner service; the extensions simply carry no identity. For routes
//!   that personalize a response but stay reachable anonymously.
//!
//! Per request the flow is: no token → extract → verify → attached or
//! rejected. Verification is synchronous (no I/O), so the only await is
//! the inner service call.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};

use lectern_core::Identity;

use crate::error::AuthError;
use crate::tokens::TokenService;

/// Tower `Layer` that wraps services with identity extraction.
#[derive(Clone)]
pub struct IdentityLayer {
    tokens: Arc<TokenService>,
    required: bool,
}

impl IdentityLayer {
    /// Layer that rejects requests without a verifiable access credential.
    pub fn required(tokens: Arc<TokenService>) -> Self {
        Self {
            tokens,
            required: true,
        }
    }

    /// Layer that attaches an identity when it can, and passes the request
    /// through untouched when it cannot.
    pub fn optional(tokens: Arc<TokenService>) -> Self {
        Self {
            tokens,
            required: false,
        }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityService {
            inner,
            tokens: self.tokens.clone(),
            required: self.required,
        }
    }
}

/// Tower `Service` that verifies the bearer credential before forwarding.
///
/// On success, inserts [`Identity`] into request extensions where it is
/// available to downstream handlers and to the route-level permission
/// middleware.
#[derive(Clone)]
pub struct IdentityService<S> {
    inner: S,
    tokens: Arc<TokenService>,
    required: bool,
}

impl<S> Service<Request<Body>> for IdentityService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let tokens = self.tokens.clone();
        let required = self.required;

        Box::pin(async move {
            let verified = extract_bearer_token(&req)
                .ok_or(AuthError::MissingCredential)
                .and_then(|token| tokens.verify_access_credential(token));

            match verified {
                Ok(claims) => {
                    req.extensions_mut().insert(Identity::from(claims));
                }
                Err(err) if required => {
                    log::warn!("authentication failed: {err:?}");
                    return Ok(err.into_response());
                }
                Err(err) => {
                    // Optional route: anonymous is a supported outcome.
                    log::debug!("proceeding without identity: {err:?}");
                }
            }

            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}

/// Extract the bearer token from the Authorization header.
fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
