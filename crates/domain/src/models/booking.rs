//! Booking domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::time_slot::SlotCategory;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if this booking still occupies capacity.
    pub fn counts_against_capacity(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a player's reservation against a time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub time_slot_id: Uuid,
    pub group_size: i32,
    pub status: BookingStatus,
    pub credits_charged: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Request payload for booking a class.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct BookClassRequest {
    pub time_slot_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_group_size"))]
    pub group_size: i32,

    /// When false, the booking is recorded as pending and paid at the club.
    #[serde(default = "default_pay_with_credits")]
    pub pay_with_credits: bool,
}

fn default_pay_with_credits() -> bool {
    true
}

/// Request payload for cancelling a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CancelBookingRequest {
    pub booking_id: Uuid,
}

/// Response after creating or confirming a booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BookingResponse {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub status: BookingStatus,
    pub group_size: i32,
    pub credits_charged: i32,
    /// Places left on the slot after this booking.
    pub remaining_places: i32,
    pub created_at: DateTime<Utc>,
}

/// Response after cancelling a booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CancelBookingResponse {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub status: BookingStatus,
    pub credits_refunded: i32,
    pub cancelled_at: DateTime<Utc>,
}

/// Scope filter for the booking listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingScope {
    #[default]
    Upcoming,
    Past,
    All,
}

/// Query parameters for listing the caller's bookings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListBookingsQuery {
    #[serde(default)]
    pub scope: BookingScope,
}

/// One booking with slot context in the listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BookingSummary {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub club_name: String,
    pub court_number: Option<i32>,
    pub category: SlotCategory,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub group_size: i32,
    pub status: BookingStatus,
    pub credits_charged: i32,
    pub created_at: DateTime<Utc>,
}

/// Response for listing bookings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListBookingsResponse {
    pub data: Vec<BookingSummary>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_as_str() {
        assert_eq!(BookingStatus::Pending.as_str(), "pending");
        assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(BookingStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_booking_status_from_str() {
        assert_eq!(
            BookingStatus::from_str("pending").unwrap(),
            BookingStatus::Pending
        );
        assert_eq!(
            BookingStatus::from_str("CONFIRMED").unwrap(),
            BookingStatus::Confirmed
        );
        assert!(BookingStatus::from_str("expired").is_err());
    }

    #[test]
    fn test_booking_status_capacity() {
        assert!(BookingStatus::Pending.counts_against_capacity());
        assert!(BookingStatus::Confirmed.counts_against_capacity());
        assert!(!BookingStatus::Cancelled.counts_against_capacity());
    }

    #[test]
    fn test_book_class_request_validation() {
        let valid = BookClassRequest {
            time_slot_id: Uuid::new_v4(),
            group_size: 2,
            pay_with_credits: true,
        };
        assert!(valid.validate().is_ok());

        let zero_group = BookClassRequest {
            time_slot_id: Uuid::new_v4(),
            group_size: 0,
            pay_with_credits: true,
        };
        assert!(zero_group.validate().is_err());
    }

    #[test]
    fn test_book_class_request_default_payment() {
        let json = serde_json::json!({
            "time_slot_id": Uuid::new_v4(),
            "group_size": 1
        });
        let request: BookClassRequest = serde_json::from_value(json).unwrap();
        assert!(request.pay_with_credits);
    }

    #[test]
    fn test_booking_scope_default() {
        let query: ListBookingsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.scope, BookingScope::Upcoming);

        let query: ListBookingsQuery = serde_json::from_str("{\"scope\":\"past\"}").unwrap();
        assert_eq!(query.scope, BookingScope::Past);
    }
}
