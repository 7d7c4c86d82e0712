//! Permanent redirects from unversioned legacy paths to /api/v1.

use axum::response::Redirect;

/// GET /api/clubs -> /api/v1/clubs
pub async fn redirect_clubs() -> Redirect {
    Redirect::permanent("/api/v1/clubs")
}

/// GET /api/classes -> /api/v1/classes
pub async fn redirect_classes() -> Redirect {
    Redirect::permanent("/api/v1/classes")
}

/// POST /api/classes/book -> /api/v1/classes/book
pub async fn redirect_classes_book() -> Redirect {
    Redirect::permanent("/api/v1/classes/book")
}

/// POST /api/classes/cancel -> /api/v1/classes/cancel
pub async fn redirect_classes_cancel() -> Redirect {
    Redirect::permanent("/api/v1/classes/cancel")
}
