//! Repository implementations for database operations.

pub mod booking;
pub mod club;
pub mod court;
pub mod instructor;
pub mod time_slot;
pub mod user;

pub use booking::BookingRepository;
pub use club::ClubRepository;
pub use court::CourtRepository;
pub use instructor::InstructorRepository;
pub use time_slot::{ClassFilter, TimeSlotRepository};
pub use user::UserRepository;
