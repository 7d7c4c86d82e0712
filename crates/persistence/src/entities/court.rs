//! Court entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the courts table.
#[derive(Debug, Clone, FromRow)]
pub struct CourtEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub number: i32,
    pub surface: Option<String>,
    pub indoor: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourtEntity> for domain::models::Court {
    fn from(entity: CourtEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            number: entity.number,
            surface: entity.surface,
            indoor: entity.indoor,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
