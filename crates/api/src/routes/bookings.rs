//! Booking routes: book, cancel, and list the caller's bookings.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use domain::models::booking::{
    BookClassRequest, BookingResponse, BookingSummary, CancelBookingRequest,
    CancelBookingResponse, ListBookingsQuery, ListBookingsResponse,
};
use persistence::repositories::{BookingRepository, UserRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::booking::{BookingError, BookingService};

pub(crate) fn map_booking_error(e: BookingError) -> ApiError {
    match e {
        BookingError::SlotNotFound => ApiError::NotFound("Time slot not found".to_string()),
        BookingError::BookingNotFound => ApiError::NotFound("Booking not found".to_string()),
        BookingError::SlotCancelled
        | BookingError::SlotAlreadyStarted
        | BookingError::GroupTooLarge(_)
        | BookingError::InsufficientCredits { .. } => ApiError::Validation(e.to_string()),
        BookingError::SlotFull { .. }
        | BookingError::DuplicateBooking
        | BookingError::AlreadyCancelled
        | BookingError::NotPending => ApiError::Conflict(e.to_string()),
        BookingError::NotYourBooking => ApiError::Forbidden(e.to_string()),
        BookingError::DatabaseError(db_err) => ApiError::from(db_err),
    }
}

fn booking_service(state: &AppState) -> BookingService {
    BookingService::new(
        state.pool.clone(),
        state.config.limits.max_group_size,
        state.config.limits.cancellation_cutoff_hours,
    )
}

/// Book a class.
///
/// POST /api/v1/classes/book
///
/// Requires JWT authentication.
pub async fn book_class(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<BookClassRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    request.validate()?;

    let outcome = booking_service(&state)
        .book(
            user_auth.user_id,
            request.time_slot_id,
            request.group_size,
            request.pay_with_credits,
        )
        .await
        .map_err(map_booking_error)?;

    let booking: domain::models::Booking = outcome.booking.into();

    info!(
        booking_id = %booking.id,
        time_slot_id = %request.time_slot_id,
        user_id = %user_auth.user_id,
        group_size = request.group_size,
        credits_charged = booking.credits_charged,
        "Booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            id: booking.id,
            time_slot_id: booking.time_slot_id,
            status: booking.status,
            group_size: booking.group_size,
            credits_charged: booking.credits_charged,
            remaining_places: outcome.remaining_places,
            created_at: booking.created_at,
        }),
    ))
}

/// Cancel a booking.
///
/// POST /api/v1/classes/cancel
///
/// Requires JWT authentication. Owners only; refunds follow the
/// cancellation cutoff policy.
pub async fn cancel_booking(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CancelBookingRequest>,
) -> Result<Json<CancelBookingResponse>, ApiError> {
    // Admins may cancel anyone's booking
    let is_admin = UserRepository::new(state.pool.clone())
        .find_active_role(user_auth.user_id)
        .await?
        .map(|role| domain::models::UserRole::from(role).can_manage_clubs())
        .unwrap_or(false);

    let outcome = booking_service(&state)
        .cancel(request.booking_id, user_auth.user_id, is_admin)
        .await
        .map_err(map_booking_error)?;

    info!(
        booking_id = %request.booking_id,
        user_id = %user_auth.user_id,
        credits_refunded = outcome.credits_refunded,
        "Booking cancelled"
    );

    Ok(Json(CancelBookingResponse {
        id: outcome.booking_id,
        time_slot_id: outcome.time_slot_id,
        status: domain::models::BookingStatus::Cancelled,
        credits_refunded: outcome.credits_refunded,
        cancelled_at: outcome.cancelled_at,
    }))
}

/// List the caller's bookings.
///
/// GET /api/v1/bookings
///
/// Requires JWT authentication.
pub async fn list_bookings(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, ApiError> {
    let repo = BookingRepository::new(state.pool.clone());

    let bookings = repo.list_for_user(user_auth.user_id, query.scope).await?;

    let data: Vec<BookingSummary> = bookings
        .into_iter()
        .map(|b| BookingSummary {
            id: b.id,
            time_slot_id: b.time_slot_id,
            club_name: b.club_name,
            court_number: b.court_number,
            category: b.category.into(),
            starts_at: b.starts_at,
            ends_at: b.ends_at,
            group_size: b.group_size,
            status: b.status.into(),
            credits_charged: b.credits_charged,
            created_at: b.created_at,
        })
        .collect();

    let count = data.len();

    Ok(Json(ListBookingsResponse { data, count }))
}
