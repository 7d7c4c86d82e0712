//! Court domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a single court at a club.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Court {
    pub id: Uuid,
    pub club_id: Uuid,
    pub number: i32,
    pub surface: Option<String>,
    pub indoor: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for adding a court to a club.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCourtRequest {
    #[validate(range(min = 1, max = 99, message = "Court number must be between 1 and 99"))]
    pub number: i32,

    #[validate(length(max = 50, message = "Surface must be at most 50 characters"))]
    pub surface: Option<String>,

    #[serde(default)]
    pub indoor: bool,
}

/// Request payload for updating a court.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateCourtRequest {
    #[validate(length(max = 50, message = "Surface must be at most 50 characters"))]
    pub surface: Option<String>,

    pub indoor: Option<bool>,
}

/// Court info in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CourtResponse {
    pub id: Uuid,
    pub number: i32,
    pub surface: Option<String>,
    pub indoor: bool,
}

impl From<Court> for CourtResponse {
    fn from(court: Court) -> Self {
        Self {
            id: court.id,
            number: court.number,
            surface: court.surface,
            indoor: court.indoor,
        }
    }
}
