//! Domain models for the padel club backend.

pub mod booking;
pub mod club;
pub mod court;
pub mod instructor;
pub mod time_slot;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use club::Club;
pub use court::Court;
pub use instructor::Instructor;
pub use time_slot::{SlotCategory, TimeSlot};
pub use user::{User, UserRole};
