//! Club entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the clubs table.
#[derive(Debug, Clone, FromRow)]
pub struct ClubEntity {
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

impl From<ClubEntity> for domain::models::Club {
    fn from(entity: ClubEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            address: entity.address,
            city: entity.city,
            phone: entity.phone,
            email: entity.email,
            admin_user_id: entity.admin_user_id,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Club row extended with its active court count.
#[derive(Debug, Clone, FromRow)]
pub struct ClubWithCourtCountEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub court_count: i64,
}
