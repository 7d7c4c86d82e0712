//! Public instructor listing routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::instructor::{
    InstructorDetail, InstructorSummary, ListInstructorsQuery, ListInstructorsResponse,
};
use persistence::repositories::InstructorRepository;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// List active instructors, optionally filtered by club.
///
/// GET /api/v1/instructors
pub async fn list_instructors(
    State(state): State<AppState>,
    Query(query): Query<ListInstructorsQuery>,
) -> Result<Json<ListInstructorsResponse>, ApiError> {
    let repo = InstructorRepository::new(state.pool.clone());

    let instructors = repo.list_active(query.club_id).await?;

    let summaries: Vec<InstructorSummary> = instructors
        .into_iter()
        .map(|i| InstructorSummary {
            id: i.id,
            display_name: i.display_name,
            club_id: i.club_id,
            club_name: i.club_name,
            specialties: i.specialties,
            hourly_rate_credits: i.hourly_rate_credits,
        })
        .collect();

    let count = summaries.len();

    Ok(Json(ListInstructorsResponse {
        data: summaries,
        count,
    }))
}

/// Get instructor details.
///
/// GET /api/v1/instructors/:instructor_id
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<Uuid>,
) -> Result<Json<InstructorDetail>, ApiError> {
    let repo = InstructorRepository::new(state.pool.clone());

    let instructor = repo
        .find_by_id_with_user(instructor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Instructor not found".to_string()))?;

    Ok(Json(InstructorDetail {
        id: instructor.id,
        display_name: instructor.display_name,
        level: instructor.level,
        club_id: instructor.club_id,
        club_name: instructor.club_name,
        specialties: instructor.specialties,
        hourly_rate_credits: instructor.hourly_rate_credits,
        bio: instructor.bio,
        created_at: instructor.created_at,
    }))
}
