use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_staff,
    require_user_auth, security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    admin, admin_clubs, auth, bookings, classes, clubs, health, instructors, versioning,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting is enabled when rate_limit_per_minute > 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/clubs", get(clubs::list_clubs))
        .route("/api/v1/clubs/:club_id", get(clubs::get_club))
        .route("/api/v1/instructors", get(instructors::list_instructors))
        .route(
            "/api/v1/instructors/:instructor_id",
            get(instructors::get_instructor),
        )
        .route("/api/v1/classes", get(classes::list_classes))
        .route("/api/v1/classes/:slot_id", get(classes::get_class));

    // Legacy unversioned paths redirect to v1; no auth needed to redirect
    let legacy_routes = Router::new()
        .route("/api/clubs", get(versioning::redirect_clubs))
        .route("/api/classes", get(versioning::redirect_classes))
        .route("/api/classes/book", post(versioning::redirect_classes_book))
        .route(
            "/api/classes/cancel",
            post(versioning::redirect_classes_cancel),
        );

    // Player routes (require JWT authentication)
    // Middleware order: auth runs first, then rate limiting (keyed by user)
    let player_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/classes/book", post(bookings::book_class))
        .route("/api/v1/classes/cancel", post(bookings::cancel_booking))
        .route("/api/v1/bookings", get(bookings::list_bookings))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Staff routes (instructors and admins)
    let staff_routes = Router::new()
        .route("/api/v1/classes", post(classes::create_class))
        .route("/api/v1/classes/:slot_id", delete(classes::cancel_class))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Admin routes
    let admin_routes = Router::new()
        .route("/api/v1/admin/stats", get(admin::get_admin_stats))
        .route("/api/v1/admin/users", get(admin::list_users))
        .route(
            "/api/v1/admin/users/:user_id/credits",
            patch(admin::adjust_credits),
        )
        .route(
            "/api/v1/admin/users/:user_id/role",
            patch(admin::update_role),
        )
        .route(
            "/api/v1/admin/bookings/:booking_id/confirm",
            post(admin::confirm_booking),
        )
        .route("/api/v1/admin/clubs", post(admin_clubs::create_club))
        .route(
            "/api/v1/admin/clubs/:club_id",
            put(admin_clubs::update_club).delete(admin_clubs::delete_club),
        )
        .route(
            "/api/v1/admin/clubs/:club_id/courts",
            post(admin_clubs::create_court),
        )
        .route(
            "/api/v1/admin/courts/:court_id",
            put(admin_clubs::update_court).delete(admin_clubs::delete_court),
        )
        .route(
            "/api/v1/admin/instructors",
            post(admin_clubs::create_instructor),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(legacy_routes)
        .merge(player_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
