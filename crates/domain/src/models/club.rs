//! Club domain models.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::court::CourtResponse;

lazy_static! {
    /// Loose international phone format: optional +, 6-20 digits/spaces/dashes.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").unwrap();
}

/// Validates a club phone number.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Invalid phone number".into());
        Err(err)
    }
}

/// Represents a padel club.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub admin_user_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a club.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateClubRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: String,

    #[validate(length(min = 1, max = 100, message = "City must be 1-100 characters"))]
    pub city: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// The user who administers the club.
    pub admin_user_id: Uuid,
}

/// Request payload for updating a club.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateClubRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 100, message = "City must be 1-100 characters"))]
    pub city: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Query parameters for listing clubs.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListClubsQuery {
    pub city: Option<String>,
}

/// One club in the public listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClubSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub court_count: i64,
}

/// Response for listing clubs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListClubsResponse {
    pub data: Vec<ClubSummary>,
    pub count: usize,
}

/// Club detail with its active courts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClubDetail {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub courts: Vec<CourtResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Helper function to generate a URL-safe slug from a club name.
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                ' ' // Will be filtered out
            }
        })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Padel Indoor Madrid"), "padel-indoor-madrid");
        assert_eq!(generate_slug("Club Pádel 360!"), "club-pádel-360");
        assert_eq!(generate_slug("Court   Central"), "court-central");
        assert_eq!(generate_slug("la-nucia"), "la-nucia");
        assert_eq!(generate_slug("  Spaces  Everywhere  "), "spaces-everywhere");
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+34 912 345 678").is_ok());
        assert!(validate_phone("912345678").is_ok());
        assert!(validate_phone("+34-912-345-678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("not a phone").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_create_club_request_validation() {
        let valid = CreateClubRequest {
            name: "Padel Indoor Madrid".to_string(),
            address: "Calle del Deporte 1".to_string(),
            city: "Madrid".to_string(),
            phone: Some("+34 912 345 678".to_string()),
            email: Some("info@padelmadrid.es".to_string()),
            admin_user_id: Uuid::new_v4(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateClubRequest {
            name: "".to_string(),
            address: "Calle del Deporte 1".to_string(),
            city: "Madrid".to_string(),
            phone: None,
            email: None,
            admin_user_id: Uuid::new_v4(),
        };
        assert!(empty_name.validate().is_err());

        let bad_email = CreateClubRequest {
            name: "Club".to_string(),
            address: "Calle 1".to_string(),
            city: "Madrid".to_string(),
            phone: None,
            email: Some("not-an-email".to_string()),
            admin_user_id: Uuid::new_v4(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_update_club_request_all_optional() {
        let empty = UpdateClubRequest {
            name: None,
            address: None,
            city: None,
            phone: None,
            email: None,
        };
        assert!(empty.validate().is_ok());
    }
}
