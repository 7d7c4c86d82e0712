//! Time slot entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::time_slot::SlotCategory;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum that maps to the PostgreSQL `slot_category` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "slot_category", rename_all = "snake_case")]
pub enum SlotCategoryDb {
    Class,
    OpenMatch,
    CourtRental,
}

impl From<SlotCategoryDb> for SlotCategory {
    fn from(db_category: SlotCategoryDb) -> Self {
        match db_category {
            SlotCategoryDb::Class => SlotCategory::Class,
            SlotCategoryDb::OpenMatch => SlotCategory::OpenMatch,
            SlotCategoryDb::CourtRental => SlotCategory::CourtRental,
        }
    }
}

impl From<SlotCategory> for SlotCategoryDb {
    fn from(category: SlotCategory) -> Self {
        match category {
            SlotCategory::Class => SlotCategoryDb::Class,
            SlotCategory::OpenMatch => SlotCategoryDb::OpenMatch,
            SlotCategory::CourtRental => SlotCategoryDb::CourtRental,
        }
    }
}

/// Database row mapping for the time_slots table.
#[derive(Debug, Clone, FromRow)]
pub struct TimeSlotEntity {
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
    pub category: SlotCategoryDb,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TimeSlotEntity> for domain::models::TimeSlot {
    fn from(entity: TimeSlotEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            court_id: entity.court_id,
            instructor_id: entity.instructor_id,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            capacity: entity.capacity,
            price_credits: entity.price_credits,
            level_min: entity.level_min,
            level_max: entity.level_max,
            category: entity.category.into(),
            is_cancelled: entity.is_cancelled,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Time slot row extended with club/court/instructor display info and the
/// sum of active group sizes.
#[derive(Debug, Clone, FromRow)]
pub struct TimeSlotWithDetailsEntity {
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
    pub category: SlotCategoryDb,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
    // Joined fields
    pub club_name: String,
    pub court_number: Option<i32>,
    pub instructor_name: Option<String>,
    // Sum of group_size over non-cancelled bookings
    pub booked: i64,
}
