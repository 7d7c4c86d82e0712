//! Admin routes: stats, user management and booking confirmation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::booking::BookingResponse;
use domain::models::user::{
    AdjustCreditsRequest, AdjustCreditsResponse, ListUsersQuery, ListUsersResponse, Pagination,
    UpdateRoleRequest, UserSummary,
};
use domain::services::booking_policy::remaining_capacity;
use persistence::entities::UserRoleDb;
use persistence::repositories::{TimeSlotRepository, UserRepository};
use serde::Serialize;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::routes::bookings::map_booking_error;
use crate::services::booking::BookingService;

/// Aggregate platform counters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminStatsResponse {
    pub total_users: i64,
    pub total_clubs: i64,
    pub total_courts: i64,
    pub upcoming_slots: i64,
    pub confirmed_bookings: i64,
    pub credits_charged: i64,
}

/// Get platform statistics.
///
/// GET /api/v1/admin/stats
pub async fn get_admin_stats(
    State(state): State<AppState>,
) -> Result<Json<AdminStatsResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let stats = repo.admin_stats().await?;

    Ok(Json(AdminStatsResponse {
        total_users: stats.total_users,
        total_clubs: stats.total_clubs,
        total_courts: stats.total_courts,
        upcoming_slots: stats.upcoming_slots,
        confirmed_bookings: stats.confirmed_bookings,
        credits_charged: stats.credits_charged,
    }))
}

/// List users with optional role/email filters.
///
/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(20)
        .clamp(1, state.config.limits.max_page_size);

    let role_filter = match query.role.as_deref() {
        Some(raw) => Some(UserRoleDb::from(
            domain::models::UserRole::from_str(raw).map_err(ApiError::Validation)?,
        )),
        None => None,
    };

    let (users, total) = repo
        .list_users(page, per_page, role_filter, query.email.as_deref())
        .await?;

    let data: Vec<UserSummary> = users
        .into_iter()
        .map(|u| UserSummary {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            role: u.role.into(),
            credits: u.credits,
            level: u.level,
            is_active: u.is_active,
            created_at: u.created_at,
        })
        .collect();

    let total_pages = (total + per_page - 1) / per_page;

    Ok(Json(ListUsersResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Adjust a user's credit balance by a signed delta.
///
/// PATCH /api/v1/admin/users/:user_id/credits
pub async fn adjust_credits(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(user_id): Path<Uuid>,
    Json(request): Json<AdjustCreditsRequest>,
) -> Result<Json<AdjustCreditsResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    // Distinguish "no such user" from "would go negative"
    let target = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let updated = repo.adjust_credits(user_id, request.delta).await?.ok_or_else(|| {
        ApiError::Conflict(format!(
            "Adjustment would make the balance negative (current: {})",
            target.credits
        ))
    })?;

    info!(
        target_user_id = %user_id,
        admin_id = %user_auth.user_id,
        delta = request.delta,
        new_balance = updated.credits,
        reason = ?request.reason,
        "Credits adjusted"
    );

    Ok(Json(AdjustCreditsResponse {
        user_id: updated.id,
        credits: updated.credits,
    }))
}

/// Change a user's role.
///
/// PATCH /api/v1/admin/users/:user_id/role
pub async fn update_role(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let updated = repo
        .update_role(user_id, request.role.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!(
        target_user_id = %user_id,
        admin_id = %user_auth.user_id,
        role = %request.role,
        "Role updated"
    );

    Ok(Json(UserSummary {
        id: updated.id,
        email: updated.email,
        display_name: updated.display_name,
        role: updated.role.into(),
        credits: updated.credits,
        level: updated.level,
        is_active: updated.is_active,
        created_at: updated.created_at,
    }))
}

/// Confirm a pending booking (paid on site).
///
/// POST /api/v1/admin/bookings/:booking_id/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let service = BookingService::new(
        state.pool.clone(),
        state.config.limits.max_group_size,
        state.config.limits.cancellation_cutoff_hours,
    );

    let booking = service
        .confirm(booking_id)
        .await
        .map_err(map_booking_error)?;

    info!(
        booking_id = %booking_id,
        staff_id = %user_auth.user_id,
        "Booking confirmed"
    );

    let slot_repo = TimeSlotRepository::new(state.pool.clone());
    let remaining = match slot_repo.find_by_id_with_details(booking.time_slot_id).await? {
        Some(slot) => remaining_capacity(slot.capacity, slot.booked),
        None => 0,
    };

    Ok(Json(BookingResponse {
        id: booking.id,
        time_slot_id: booking.time_slot_id,
        status: booking.status.into(),
        group_size: booking.group_size,
        credits_charged: booking.credits_charged,
        remaining_places: remaining,
        created_at: booking.created_at,
    }))
}
