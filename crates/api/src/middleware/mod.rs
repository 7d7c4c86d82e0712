//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod rbac;
pub mod security_headers;
pub mod trace_id;
pub mod user_auth;

pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use rate_limit::{rate_limit_middleware, RateLimiterState};
pub use rbac::{require_admin, require_staff, CurrentRole};
pub use security_headers::security_headers_middleware;
pub use trace_id::trace_id;
pub use user_auth::require_user_auth;
