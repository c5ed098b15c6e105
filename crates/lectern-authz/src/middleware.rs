//! Tower middleware gating a route on a [`PermissionPolicy`].
//!
//! Sits behind the identity middleware in the chain: it reads the verified
//! [`Identity`] from request extensions and never touches the
//! `Authorization` header itself. A request with no attached identity is
//! rejected as unauthenticated — no policy, however permissive, runs a
//! handler for an anonymous caller.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};

use lectern_core::{Identity, Permission};

use crate::error::AuthzError;
use crate::policy::PermissionPolicy;

/// Gate a route on a single permission.
pub fn require_permission(permission: Permission) -> PolicyLayer {
    PolicyLayer::new(PermissionPolicy::One(permission))
}

/// Gate a route on holding at least one of `permissions`.
pub fn require_any_permission(permissions: impl Into<Vec<Permission>>) -> PolicyLayer {
    PolicyLayer::new(PermissionPolicy::Any(permissions.into()))
}

/// Gate a route on holding every one of `permissions`.
pub fn require_all_permissions(permissions: impl Into<Vec<Permission>>) -> PolicyLayer {
    PolicyLayer::new(PermissionPolicy::All(permissions.into()))
}

/// Tower `Layer` that wraps services with a permission-policy check.
#[derive(Clone)]
pub struct PolicyLayer {
    policy: PermissionPolicy,
}

impl PolicyLayer {
    /// Create a layer enforcing `policy`.
    pub fn new(policy: PermissionPolicy) -> Self {
        Self { policy }
    }
}

impl<S> Layer<S> for PolicyLayer {
    type Service = PolicyService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PolicyService {
            inner,
            policy: self.policy.clone(),
        }
    }
}

/// Tower `Service` that evaluates the policy before forwarding requests.
#[derive(Clone)]
pub struct PolicyService<S> {
    inner: S,
    policy: PermissionPolicy,
}

impl<S> Service<Request<Body>> for PolicyService<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let policy = self.policy.clone();

        Box::pin(async move {
            let decision = match req.extensions().get::<Identity>() {
                None => Err(AuthzError::Unauthenticated),
                Some(identity) => policy.evaluate(&identity.permissions),
            };

            if let Err(err) = decision {
                log::warn!("authorization failed: {err}");
                return Ok(err.into_response());
            }

            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}
