//! Schedule overlap rules for courts and instructors.

use chrono::{DateTime, Utc};

/// Returns true if two half-open intervals `[a_start, a_end)` and
/// `[b_start, b_end)` overlap.
///
/// Half-open semantics let a slot start exactly when the previous one
/// ends, which is how back-to-back classes are scheduled.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}
