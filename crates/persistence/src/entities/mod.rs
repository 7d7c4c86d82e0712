//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod booking;
pub mod club;
pub mod court;
pub mod instructor;
pub mod time_slot;
pub mod user;

pub use booking::{BookingEntity, BookingStatusDb, BookingWithSlotEntity};
pub use club::{ClubEntity, ClubWithCourtCountEntity};
pub use court::CourtEntity;
pub use instructor::{InstructorEntity, InstructorWithUserEntity};
pub use time_slot::{SlotCategoryDb, TimeSlotEntity, TimeSlotWithDetailsEntity};
pub use user::{AdminStatsEntity, UserEntity, UserRoleDb};
