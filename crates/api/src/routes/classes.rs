//! Class (time slot) routes: public listing plus staff scheduling.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use domain::models::time_slot::{
    ClassDetail, ClassSummary, CreateClassRequest, ListClassesQuery, ListClassesResponse,
};
use domain::services::booking_policy::remaining_capacity;
use persistence::repositories::{ClassFilter, TimeSlotRepository};
use serde::Serialize;
use shared::pagination::{decode_cursor, encode_cursor};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::CurrentRole;
use crate::services::classes::{ClassError, ClassService};

fn map_class_error(e: ClassError) -> ApiError {
    match e {
        ClassError::ClubNotFound => ApiError::NotFound("Club not found".to_string()),
        ClassError::CourtNotFound => ApiError::NotFound("Court not found".to_string()),
        ClassError::InstructorNotFound => ApiError::NotFound("Instructor not found".to_string()),
        ClassError::SlotNotFound => ApiError::NotFound("Time slot not found".to_string()),
        ClassError::CourtWrongClub | ClassError::InstructorWrongClub => {
            ApiError::Validation(e.to_string())
        }
        ClassError::InstructorRequired
        | ClassError::InvalidWindow(_)
        | ClassError::InvalidLevelRange
        | ClassError::TooFarAhead(_) => ApiError::Validation(e.to_string()),
        ClassError::NotYourSchedule => ApiError::Forbidden(e.to_string()),
        ClassError::CourtBusy | ClassError::InstructorBusy | ClassError::AlreadyCancelled => {
            ApiError::Conflict(e.to_string())
        }
        ClassError::DatabaseError(db_err) => ApiError::from(db_err),
    }
}

/// List upcoming classes with filters and cursor pagination.
///
/// GET /api/v1/classes
pub async fn list_classes(
    State(state): State<AppState>,
    Query(query): Query<ListClassesQuery>,
) -> Result<Json<ListClassesResponse>, ApiError> {
    let repo = TimeSlotRepository::new(state.pool.clone());

    let category = match query.category.as_deref() {
        Some(raw) => Some(
            domain::models::time_slot::SlotCategory::from_str(raw)
                .map_err(ApiError::Validation)?
                .into(),
        ),
        None => None,
    };

    let cursor = match query.cursor.as_deref() {
        Some(raw) => {
            Some(decode_cursor(raw).map_err(|e| ApiError::Validation(e.to_string()))?)
        }
        None => None,
    };

    let limit = query
        .limit
        .unwrap_or(20)
        .clamp(1, state.config.limits.max_page_size);

    let filter = ClassFilter {
        club_id: query.club_id,
        category,
        level: query.level,
        date: query.date,
    };

    // Fetch one extra row to detect whether another page exists
    let mut slots = repo.list_upcoming(&filter, cursor, limit + 1).await?;

    let next_cursor = if slots.len() as i64 > limit {
        slots.truncate(limit as usize);
        slots.last().map(|s| encode_cursor(s.starts_at, s.id))
    } else {
        None
    };

    let data: Vec<ClassSummary> = slots
        .into_iter()
        .map(|s| ClassSummary {
            id: s.id,
            club_id: s.club_id,
            club_name: s.club_name,
            court_number: s.court_number,
            instructor_name: s.instructor_name,
            starts_at: s.starts_at,
            ends_at: s.ends_at,
            capacity: s.capacity,
            booked: s.booked,
            remaining: remaining_capacity(s.capacity, s.booked),
            price_credits: s.price_credits,
            level_min: s.level_min,
            level_max: s.level_max,
            category: s.category.into(),
        })
        .collect();

    Ok(Json(ListClassesResponse { data, next_cursor }))
}

/// Get slot details.
///
/// GET /api/v1/classes/:slot_id
pub async fn get_class(
    State(state): State<AppState>,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<ClassDetail>, ApiError> {
    let repo = TimeSlotRepository::new(state.pool.clone());

    let slot = repo
        .find_by_id_with_details(slot_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Time slot not found".to_string()))?;

    Ok(Json(ClassDetail {
        id: slot.id,
        club_id: slot.club_id,
        club_name: slot.club_name,
        court_id: slot.court_id,
        court_number: slot.court_number,
        instructor_id: slot.instructor_id,
        instructor_name: slot.instructor_name,
        starts_at: slot.starts_at,
        ends_at: slot.ends_at,
        capacity: slot.capacity,
        booked: slot.booked,
        remaining: remaining_capacity(slot.capacity, slot.booked),
        price_credits: slot.price_credits,
        level_min: slot.level_min,
        level_max: slot.level_max,
        category: slot.category.into(),
        is_cancelled: slot.is_cancelled,
        created_at: slot.created_at,
    }))
}

/// Publish a new time slot.
///
/// POST /api/v1/classes
///
/// Requires an instructor or admin account.
pub async fn create_class(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Extension(CurrentRole(role)): Extension<CurrentRole>,
    Json(request): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassDetail>), ApiError> {
    request.validate()?;

    let service = ClassService::new(state.pool.clone(), state.config.limits.booking_window_days);

    let slot = service
        .create_slot(user_auth.user_id, role, &request)
        .await
        .map_err(map_class_error)?;

    info!(
        slot_id = %slot.id,
        club_id = %slot.club_id,
        user_id = %user_auth.user_id,
        "Time slot published"
    );

    // Re-read with joined display fields
    let repo = TimeSlotRepository::new(state.pool.clone());
    let details = repo
        .find_by_id_with_details(slot.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created slot".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ClassDetail {
            id: details.id,
            club_id: details.club_id,
            club_name: details.club_name,
            court_id: details.court_id,
            court_number: details.court_number,
            instructor_id: details.instructor_id,
            instructor_name: details.instructor_name,
            starts_at: details.starts_at,
            ends_at: details.ends_at,
            capacity: details.capacity,
            booked: details.booked,
            remaining: remaining_capacity(details.capacity, details.booked),
            price_credits: details.price_credits,
            level_min: details.level_min,
            level_max: details.level_max,
            category: details.category.into(),
            is_cancelled: details.is_cancelled,
            created_at: details.created_at,
        }),
    ))
}

/// Response after cancelling a slot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CancelClassResponse {
    pub slot_id: Uuid,
    pub bookings_cancelled: u64,
    pub credits_refunded: i64,
}

/// Cancel a time slot and refund all active bookings.
///
/// DELETE /api/v1/classes/:slot_id
///
/// Requires an instructor (own slots only) or admin account.
pub async fn cancel_class(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Extension(CurrentRole(role)): Extension<CurrentRole>,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<CancelClassResponse>, ApiError> {
    let service = ClassService::new(state.pool.clone(), state.config.limits.booking_window_days);

    let cancellation = service
        .cancel_slot(slot_id, user_auth.user_id, role)
        .await
        .map_err(map_class_error)?;

    info!(
        slot_id = %slot_id,
        user_id = %user_auth.user_id,
        bookings_cancelled = cancellation.bookings_cancelled,
        credits_refunded = cancellation.credits_refunded,
        "Time slot cancelled"
    );

    Ok(Json(CancelClassResponse {
        slot_id: cancellation.slot_id,
        bookings_cancelled: cancellation.bookings_cancelled,
        credits_refunded: cancellation.credits_refunded,
    }))
}
