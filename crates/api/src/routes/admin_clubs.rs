//! Admin routes for club, court and instructor management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::club::{generate_slug, CreateClubRequest, UpdateClubRequest};
use domain::models::court::{CourtResponse, CreateCourtRequest, UpdateCourtRequest};
use domain::models::instructor::CreateInstructorRequest;
use domain::models::{Club, Instructor};
use persistence::repositories::{ClubRepository, CourtRepository, InstructorRepository, UserRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create a new club.
///
/// POST /api/v1/admin/clubs
pub async fn create_club(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<Club>), ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());
    if user_repo.find_by_id(request.admin_user_id).await?.is_none() {
        return Err(ApiError::NotFound("Admin user not found".to_string()));
    }

    let repo = ClubRepository::new(state.pool.clone());

    let base_slug = generate_slug(&request.name);
    let slug = repo.generate_unique_slug(&base_slug).await?;

    let club = repo
        .create_club(
            &request.name,
            &slug,
            &request.address,
            &request.city,
            request.phone.as_deref(),
            request.email.as_deref(),
            request.admin_user_id,
        )
        .await?;

    info!(
        club_id = %club.id,
        club_name = %club.name,
        admin_id = %user_auth.user_id,
        "Club created"
    );

    Ok((StatusCode::CREATED, Json(club.into())))
}

/// Update a club.
///
/// PUT /api/v1/admin/clubs/:club_id
pub async fn update_club(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(club_id): Path<Uuid>,
    Json(request): Json<UpdateClubRequest>,
) -> Result<Json<Club>, ApiError> {
    request.validate()?;

    let repo = ClubRepository::new(state.pool.clone());

    // A renamed club gets a fresh unique slug
    let new_slug = if let Some(ref new_name) = request.name {
        let base_slug = generate_slug(new_name);
        Some(repo.generate_unique_slug(&base_slug).await?)
    } else {
        None
    };

    let club = repo
        .update_club(
            club_id,
            request.name.as_deref(),
            new_slug.as_deref(),
            request.address.as_deref(),
            request.city.as_deref(),
            request.phone.as_deref(),
            request.email.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    info!(club_id = %club_id, admin_id = %user_auth.user_id, "Club updated");

    Ok(Json(club.into()))
}

/// Soft-delete a club.
///
/// DELETE /api/v1/admin/clubs/:club_id
pub async fn delete_club(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(club_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ClubRepository::new(state.pool.clone());

    if !repo.deactivate(club_id).await? {
        return Err(ApiError::NotFound("Club not found".to_string()));
    }

    info!(club_id = %club_id, admin_id = %user_auth.user_id, "Club deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// Add a court to a club.
///
/// POST /api/v1/admin/clubs/:club_id/courts
pub async fn create_court(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(club_id): Path<Uuid>,
    Json(request): Json<CreateCourtRequest>,
) -> Result<(StatusCode, Json<CourtResponse>), ApiError> {
    request.validate()?;

    let club_repo = ClubRepository::new(state.pool.clone());
    if club_repo.find_by_id(club_id).await?.is_none() {
        return Err(ApiError::NotFound("Club not found".to_string()));
    }

    let repo = CourtRepository::new(state.pool.clone());

    // Duplicate court numbers surface as a unique violation (409)
    let court = repo
        .create_court(club_id, request.number, request.surface.as_deref(), request.indoor)
        .await?;

    info!(
        court_id = %court.id,
        club_id = %club_id,
        number = court.number,
        admin_id = %user_auth.user_id,
        "Court created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CourtResponse {
            id: court.id,
            number: court.number,
            surface: court.surface,
            indoor: court.indoor,
        }),
    ))
}

/// Update a court.
///
/// PUT /api/v1/admin/courts/:court_id
pub async fn update_court(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(court_id): Path<Uuid>,
    Json(request): Json<UpdateCourtRequest>,
) -> Result<Json<CourtResponse>, ApiError> {
    request.validate()?;

    let repo = CourtRepository::new(state.pool.clone());

    let court = repo
        .update_court(court_id, request.surface.as_deref(), request.indoor)
        .await?
        .ok_or_else(|| ApiError::NotFound("Court not found".to_string()))?;

    info!(court_id = %court_id, admin_id = %user_auth.user_id, "Court updated");

    Ok(Json(CourtResponse {
        id: court.id,
        number: court.number,
        surface: court.surface,
        indoor: court.indoor,
    }))
}

/// Soft-delete a court.
///
/// DELETE /api/v1/admin/courts/:court_id
pub async fn delete_court(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(court_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CourtRepository::new(state.pool.clone());

    if !repo.deactivate(court_id).await? {
        return Err(ApiError::NotFound("Court not found".to_string()));
    }

    info!(court_id = %court_id, admin_id = %user_auth.user_id, "Court deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// Promote a user to instructor at a club.
///
/// POST /api/v1/admin/instructors
pub async fn create_instructor(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateInstructorRequest>,
) -> Result<(StatusCode, Json<Instructor>), ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());
    if user_repo.find_by_id(request.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let club_repo = ClubRepository::new(state.pool.clone());
    if club_repo.find_by_id(request.club_id).await?.is_none() {
        return Err(ApiError::NotFound("Club not found".to_string()));
    }

    let repo = InstructorRepository::new(state.pool.clone());

    // An existing profile surfaces as a unique violation (409)
    let instructor = repo
        .create_instructor(
            request.user_id,
            request.club_id,
            &request.specialties,
            request.hourly_rate_credits,
            request.bio.as_deref(),
        )
        .await?;

    info!(
        instructor_id = %instructor.id,
        user_id = %request.user_id,
        club_id = %request.club_id,
        admin_id = %user_auth.user_id,
        "Instructor created"
    );

    Ok((StatusCode::CREATED, Json(instructor.into())))
}
