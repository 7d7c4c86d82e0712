//! Role-based access control middleware.
//!
//! Role checks happen against the database rather than token claims, so
//! demoting or deactivating an account takes effect immediately.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::user::UserRole;
use persistence::repositories::UserRepository;
use serde_json::json;

use crate::app::AppState;
use crate::middleware::user_auth::UserAuth;

/// The caller's role, resolved from the database, stored in request
/// extensions for handlers that branch on it.
#[derive(Debug, Clone, Copy)]
pub struct CurrentRole(pub UserRole);

/// Middleware that requires an instructor or admin account.
///
/// Must run after `require_user_auth` so the user ID is available.
pub async fn require_staff(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    check_role(state, req, next, |role| role.can_publish_slots()).await
}

/// Middleware that requires an admin account.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    check_role(state, req, next, |role| role.can_manage_clubs()).await
}

async fn check_role(
    state: AppState,
    mut req: Request<Body>,
    next: Next,
    allowed: fn(UserRole) -> bool,
) -> Response {
    let auth = match req.extensions().get::<UserAuth>() {
        Some(auth) => auth.clone(),
        None => {
            return error_response(StatusCode::UNAUTHORIZED, "unauthorized", "Not authenticated");
        }
    };

    let repo = UserRepository::new(state.pool.clone());
    match repo.find_active_role(auth.user_id).await {
        Ok(Some(db_role)) => {
            let role: UserRole = db_role.into();
            if allowed(role) {
                req.extensions_mut().insert(CurrentRole(role));
                next.run(req).await
            } else {
                error_response(
                    StatusCode::FORBIDDEN,
                    "forbidden",
                    "Insufficient permissions",
                )
            }
        }
        Ok(None) => error_response(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Account not found or disabled",
        ),
        Err(e) => {
            tracing::error!("Role lookup failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred",
            )
        }
    }
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message
        })),
    )
        .into_response()
}
