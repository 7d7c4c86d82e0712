//! Time slot domain models.
//!
//! A time slot is a bookable interval on a club's calendar: a coached
//! class, an open match, or a plain court rental.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Category of a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    Class,
    OpenMatch,
    CourtRental,
}

impl SlotCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotCategory::Class => "class",
            SlotCategory::OpenMatch => "open_match",
            SlotCategory::CourtRental => "court_rental",
        }
    }

    /// Returns true if this category requires an instructor.
    pub fn requires_instructor(&self) -> bool {
        matches!(self, SlotCategory::Class)
    }
}

impl FromStr for SlotCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" => Ok(SlotCategory::Class),
            "open_match" => Ok(SlotCategory::OpenMatch),
            "court_rental" => Ok(SlotCategory::CourtRental),
            _ => Err(format!("Invalid slot category: {}", s)),
        }
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a bookable time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TimeSlot {
    pub id: Uuid,
    pub club_id: Uuid,
    pub court_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: i32,
    pub price_credits: i32,
    pub level_min: f64,
    pub level_max: f64,
    pub category: SlotCategory,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for publishing a time slot.
///
/// Cross-field rules (window ordering, level range, court/instructor
/// consistency) are checked by the service on top of this validation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateClassRequest {
    pub club_id: Uuid,
    pub court_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    #[validate(custom(function = "shared::validation::validate_capacity"))]
    pub capacity: i32,

    #[validate(custom(function = "shared::validation::validate_price_credits"))]
    pub price_credits: i32,

    #[validate(custom(function = "shared::validation::validate_level"))]
    pub level_min: f64,

    #[validate(custom(function = "shared::validation::validate_level"))]
    pub level_max: f64,

    pub category: SlotCategory,
}

/// Query parameters for listing classes.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListClassesQuery {
    pub club_id: Option<Uuid>,
    pub category: Option<String>,
    /// Only slots whose level range contains this rating.
    pub level: Option<f64>,
    /// Only slots starting on this date (UTC).
    pub date: Option<NaiveDate>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// One slot in the class listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassSummary {
    pub id: Uuid,
    pub club_id: Uuid,
    pub club_name: String,
    pub court_number: Option<i32>,
    pub instructor_name: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: i32,
    pub booked: i64,
    pub remaining: i32,
    pub price_credits: i32,
    pub level_min: f64,
    pub level_max: f64,
    pub category: SlotCategory,
}

/// Response for listing classes with cursor pagination.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListClassesResponse {
    pub data: Vec<ClassSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Full slot detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassDetail {
    pub id: Uuid,
    pub club_id: Uuid,
    pub club_name: String,
    pub court_id: Option<Uuid>,
    pub court_number: Option<i32>,
    pub instructor_id: Option<Uuid>,
    pub instructor_name: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: i32,
    pub booked: i64,
    pub remaining: i32,
    pub price_credits: i32,
    pub level_min: f64,
    pub level_max: f64,
    pub category: SlotCategory,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
}
