//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Player,
    Instructor,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Player => "player",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }

    /// Returns true if this role can manage clubs, courts and users.
    pub fn can_manage_clubs(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Returns true if this role can publish and cancel time slots.
    pub fn can_publish_slots(&self) -> bool {
        matches!(self, UserRole::Instructor | UserRole::Admin)
    }

    /// Returns true if this role can confirm pending bookings.
    pub fn can_confirm_bookings(&self) -> bool {
        matches!(self, UserRole::Instructor | UserRole::Admin)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player" => Ok(UserRole::Player),
            "instructor" => Ok(UserRole::Instructor),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub credits: i32,
    pub level: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller's own profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub credits: i32,
    pub level: f64,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for the admin user listing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub role: Option<String>,
    pub email: Option<String>,
}

/// One row in the admin user listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub credits: i32,
    pub level: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Pagination info for list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Response for the admin user listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListUsersResponse {
    pub data: Vec<UserSummary>,
    pub pagination: Pagination,
}

/// Request to adjust a user's credit balance by a signed delta.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AdjustCreditsRequest {
    #[validate(range(min = -10000, max = 10000, message = "Delta must be between -10000 and 10000"))]
    pub delta: i32,

    #[validate(length(max = 200, message = "Reason must be at most 200 characters"))]
    pub reason: Option<String>,
}

/// Response after adjusting credits.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdjustCreditsResponse {
    pub user_id: Uuid,
    pub credits: i32,
}

/// Request to change a user's role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}
