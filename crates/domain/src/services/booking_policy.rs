//! Booking cost, capacity and refund rules.
//!
//! Pure functions so the rules can be tested without a database. The
//! transactional services apply them inside locked transactions.

use chrono::{DateTime, Duration, Utc};

/// Total cost of a booking: the slot price is per person.
pub fn booking_cost(price_credits: i32, group_size: i32) -> i32 {
    price_credits.saturating_mul(group_size)
}

/// Places left on a slot given the sum of active (non-cancelled) group sizes.
pub fn remaining_capacity(capacity: i32, booked: i64) -> i32 {
    let booked = i32::try_from(booked).unwrap_or(i32::MAX);
    (capacity - booked).max(0)
}

/// Returns true if a group of the given size still fits on the slot.
pub fn fits(capacity: i32, booked: i64, group_size: i32) -> bool {
    group_size <= remaining_capacity(capacity, booked)
}

/// Credits to refund for a player-initiated cancellation.
///
/// Full refund when the cancellation happens at least `cutoff_hours`
/// before the slot starts; nothing after that. Club-initiated slot
/// cancellations bypass this and always refund in full.
pub fn refund_amount(
    credits_charged: i32,
    starts_at: DateTime<Utc>,
    cancelled_at: DateTime<Utc>,
    cutoff_hours: i64,
) -> i32 {
    if cancelled_at + Duration::hours(cutoff_hours) <= starts_at {
        credits_charged
    } else {
        0
    }
}
