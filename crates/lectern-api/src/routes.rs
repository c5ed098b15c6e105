//! Router wiring.
//!
//! Every protected request flows identity middleware → route policy →
//! handler. Policies are attached per route; the identity layer wraps the
//! whole protected group once. The catalog route uses the optional
//! variant: reachable anonymously, richer for a logged-in caller.

use axum::extract::Path;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use serde_json::{json, Value};

use lectern_auth::IdentityLayer;
use lectern_authz::{require_all_permissions, require_any_permission, require_permission};
use lectern_core::{Identity, Permission};

use crate::handlers::{login, me, refresh, AppState};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let tokens = state.tokens.clone();

    let public = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh));

    let courses = Router::new()
        .route("/courses", get(list_courses))
        .route_layer(require_permission(Permission::ViewCourses));

    let course_edit = Router::new()
        .route("/courses/{id}", put(update_course))
        .route_layer(require_all_permissions(vec![
            Permission::ViewCourses,
            Permission::EditCourse,
        ]));

    let reports = Router::new()
        .route("/reports", get(view_reports))
        .route_layer(require_any_permission(vec![
            Permission::ViewReports,
            Permission::GenerateReports,
        ]));

    let admin = Router::new()
        .route("/users/{id}", delete(remove_user))
        .route_layer(require_permission(Permission::DeleteUser));

    let protected = Router::new()
        .route("/auth/me", get(me))
        .merge(courses)
        .merge(course_edit)
        .merge(reports)
        .merge(admin)
        .route_layer(IdentityLayer::required(tokens.clone()));

    let optional = Router::new()
        .route("/catalog", get(catalog))
        .route_layer(IdentityLayer::optional(tokens));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(optional)
        .with_state(state)
}

async fn list_courses() -> Json<Value> {
    Json(json!({
        "success": true,
        "courses": [],
    }))
}

async fn update_course(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "success": true,
        "course_id": id,
    }))
}

async fn view_reports() -> Json<Value> {
    Json(json!({
        "success": true,
        "reports": [],
    }))
}

async fn remove_user(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "success": true,
        "removed": id,
    }))
}

/// Public catalog whose shape adapts to a logged-in caller.
///
/// The pure predicates are used here for conditional response shaping —
/// gating stays with the route policies.
async fn catalog(identity: Option<Extension<Identity>>) -> Json<Value> {
    match identity {
        Some(Extension(identity)) => Json(json!({
            "success": true,
            "courses": [],
            "personalized": true,
            "can_edit": identity.permissions.has(Permission::EditCourse),
        })),
        None => Json(json!({
            "success": true,
            "courses": [],
            "personalized": false,
        })),
    }
}
