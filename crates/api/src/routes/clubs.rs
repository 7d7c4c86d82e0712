//! Public club listing routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::club::{ClubDetail, ClubSummary, ListClubsQuery, ListClubsResponse};
use persistence::repositories::{ClubRepository, CourtRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// List active clubs.
///
/// GET /api/v1/clubs
pub async fn list_clubs(
    State(state): State<AppState>,
    Query(query): Query<ListClubsQuery>,
) -> Result<Json<ListClubsResponse>, ApiError> {
    let repo = ClubRepository::new(state.pool.clone());

    let clubs = repo.list_active(query.city.as_deref()).await?;

    let summaries: Vec<ClubSummary> = clubs
        .into_iter()
        .map(|c| ClubSummary {
            id: c.id,
            name: c.name,
            slug: c.slug,
            city: c.city,
            court_count: c.court_count,
        })
        .collect();

    let count = summaries.len();

    info!(club_count = count, city = ?query.city, "Listed clubs");

    Ok(Json(ListClubsResponse {
        data: summaries,
        count,
    }))
}

/// Get club details with its active courts.
///
/// GET /api/v1/clubs/:club_id
pub async fn get_club(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
) -> Result<Json<ClubDetail>, ApiError> {
    let club_repo = ClubRepository::new(state.pool.clone());
    let court_repo = CourtRepository::new(state.pool.clone());

    let club = club_repo
        .find_by_id(club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    let courts = court_repo.list_by_club(club_id).await?;

    Ok(Json(ClubDetail {
        id: club.id,
        name: club.name,
        slug: club.slug,
        address: club.address,
        city: club.city,
        phone: club.phone,
        email: club.email,
        is_active: club.is_active,
        courts: courts
            .into_iter()
            .map(|c| domain::models::Court::from(c).into())
            .collect(),
        created_at: club.created_at,
        updated_at: club.updated_at,
    }))
}
