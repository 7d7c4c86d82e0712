//! Booking entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::booking::BookingStatus;
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::time_slot::SlotCategoryDb;

/// Database enum that maps to the PostgreSQL `booking_status` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatusDb {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<BookingStatusDb> for BookingStatus {
    fn from(db_status: BookingStatusDb) -> Self {
        match db_status {
            BookingStatusDb::Pending => BookingStatus::Pending,
            BookingStatusDb::Confirmed => BookingStatus::Confirmed,
            BookingStatusDb::Cancelled => BookingStatus::Cancelled,
        }
    }
}

impl From<BookingStatus> for BookingStatusDb {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => BookingStatusDb::Pending,
            BookingStatus::Confirmed => BookingStatusDb::Confirmed,
            BookingStatus::Cancelled => BookingStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the bookings table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub time_slot_id: Uuid,
    pub group_size: i32,
    pub status: BookingStatusDb,
    pub credits_charged: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<BookingEntity> for domain::models::Booking {
    fn from(entity: BookingEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            time_slot_id: entity.time_slot_id,
            group_size: entity.group_size,
            status: entity.status.into(),
            credits_charged: entity.credits_charged,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            cancelled_at: entity.cancelled_at,
        }
    }
}

/// Booking row joined with slot and club display info.
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithSlotEntity {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub group_size: i32,
    pub status: BookingStatusDb,
    pub credits_charged: i32,
    pub created_at: DateTime<Utc>,
    // Slot fields
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub category: SlotCategoryDb,
    // Joined display fields
    pub club_name: String,
    pub court_number: Option<i32>,
}
