//! Domain layer for the padel club backend.
//!
//! This crate contains:
//! - Domain models (User, Club, Court, Instructor, TimeSlot, Booking)
//! - Request/response DTOs with validation
//! - Pure business-rule services (booking policy, scheduling)

pub mod models;
pub mod services;
