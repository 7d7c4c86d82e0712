//! Instructor domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents an instructor profile linked to a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Instructor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub club_id: Uuid,
    pub specialties: Vec<String>,
    pub hourly_rate_credits: i32,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for promoting a user to instructor.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInstructorRequest {
    pub user_id: Uuid,
    pub club_id: Uuid,

    #[validate(length(max = 10, message = "At most 10 specialties"))]
    #[serde(default)]
    pub specialties: Vec<String>,

    #[validate(range(min = 0, max = 1000, message = "Hourly rate must be 0-1000 credits"))]
    pub hourly_rate_credits: i32,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
}

/// Query parameters for listing instructors.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListInstructorsQuery {
    pub club_id: Option<Uuid>,
}

/// One instructor in the public listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InstructorSummary {
    pub id: Uuid,
    pub display_name: String,
    pub club_id: Uuid,
    pub club_name: String,
    pub specialties: Vec<String>,
    pub hourly_rate_credits: i32,
}

/// Response for listing instructors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInstructorsResponse {
    pub data: Vec<InstructorSummary>,
    pub count: usize,
}

/// Instructor detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InstructorDetail {
    pub id: Uuid,
    pub display_name: String,
    pub level: f64,
    pub club_id: Uuid,
    pub club_name: String,
    pub specialties: Vec<String>,
    pub hourly_rate_credits: i32,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_instructor_request_validation() {
        let valid = CreateInstructorRequest {
            user_id: Uuid::new_v4(),
            club_id: Uuid::new_v4(),
            specialties: vec!["defense".to_string(), "smash".to_string()],
            hourly_rate_credits: 120,
            bio: Some("Former WPT player".to_string()),
        };
        assert!(valid.validate().is_ok());

        let negative_rate = CreateInstructorRequest {
            user_id: Uuid::new_v4(),
            club_id: Uuid::new_v4(),
            specialties: vec![],
            hourly_rate_credits: -10,
            bio: None,
        };
        assert!(negative_rate.validate().is_err());

        let too_many_specialties = CreateInstructorRequest {
            user_id: Uuid::new_v4(),
            club_id: Uuid::new_v4(),
            specialties: (0..11).map(|i| format!("s{}", i)).collect(),
            hourly_rate_credits: 100,
            bio: None,
        };
        assert!(too_many_specialties.validate().is_err());
    }
}
