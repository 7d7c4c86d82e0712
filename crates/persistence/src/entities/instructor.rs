//! Instructor entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the instructors table.
#[derive(Debug, Clone, FromRow)]
pub struct InstructorEntity {
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

impl From<InstructorEntity> for domain::models::Instructor {
    fn from(entity: InstructorEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            club_id: entity.club_id,
            specialties: entity.specialties,
            hourly_rate_credits: entity.hourly_rate_credits,
            bio: entity.bio,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Instructor row joined with user and club display info.
#[derive(Debug, Clone, FromRow)]
pub struct InstructorWithUserEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub club_id: Uuid,
    pub specialties: Vec<String>,
    pub hourly_rate_credits: i32,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    // User fields
    pub display_name: String,
    pub level: f64,
    // Club fields
    pub club_name: String,
}
