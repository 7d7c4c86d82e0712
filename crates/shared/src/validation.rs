//! Common validation utilities for booking-domain values.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Lowest padel rating a player or slot can carry.
pub const LEVEL_MIN: f64 = 1.0;
/// Highest padel rating a player or slot can carry.
pub const LEVEL_MAX: f64 = 7.0;

/// Hard ceiling on slot capacity regardless of configuration.
pub const CAPACITY_CEILING: i32 = 16;

/// Validates that a padel level is within the 1.0-7.0 rating scale.
pub fn validate_level(level: f64) -> Result<(), ValidationError> {
    if (LEVEL_MIN..=LEVEL_MAX).contains(&level) {
        Ok(())
    } else {
        let mut err = ValidationError::new("level_range");
        err.message = Some("Level must be between 1.0 and 7.0".into());
        Err(err)
    }
}

/// Validates that a slot capacity is positive and below the ceiling.
pub fn validate_capacity(capacity: i32) -> Result<(), ValidationError> {
    if (1..=CAPACITY_CEILING).contains(&capacity) {
        Ok(())
    } else {
        let mut err = ValidationError::new("capacity_range");
        err.message = Some("Capacity must be between 1 and 16".into());
        Err(err)
    }
}

/// Validates that a group size is positive.
///
/// The configured per-club maximum is checked at the service layer; this
/// only rejects values that are never valid.
pub fn validate_group_size(group_size: i32) -> Result<(), ValidationError> {
    if group_size >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("group_size_range");
        err.message = Some("Group size must be at least 1".into());
        Err(err)
    }
}

/// Validates that a price in credits is non-negative.
pub fn validate_price_credits(price: i32) -> Result<(), ValidationError> {
    if price >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be non-negative".into());
        Err(err)
    }
}

/// Validates that a slot time window is well-formed and in the future.
pub fn validate_time_window(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if ends_at <= starts_at {
        let mut err = ValidationError::new("window_order");
        err.message = Some("End time must be after start time".into());
        return Err(err);
    }

    if starts_at <= Utc::now() {
        let mut err = ValidationError::new("window_past");
        err.message = Some("Start time must be in the future".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_level() {
        assert!(validate_level(1.0).is_ok());
        assert!(validate_level(4.5).is_ok());
        assert!(validate_level(7.0).is_ok());
        assert!(validate_level(0.9).is_err());
        assert!(validate_level(7.1).is_err());
    }

    #[test]
    fn test_validate_level_error_message() {
        let err = validate_level(0.0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Level must be between 1.0 and 7.0"
        );
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(1).is_ok());
        assert!(validate_capacity(8).is_ok());
        assert!(validate_capacity(16).is_ok());
        assert!(validate_capacity(0).is_err());
        assert!(validate_capacity(17).is_err());
        assert!(validate_capacity(-1).is_err());
    }

    #[test]
    fn test_validate_group_size() {
        assert!(validate_group_size(1).is_ok());
        assert!(validate_group_size(4).is_ok());
        assert!(validate_group_size(0).is_err());
        assert!(validate_group_size(-2).is_err());
    }

    #[test]
    fn test_validate_price_credits() {
        assert!(validate_price_credits(0).is_ok());
        assert!(validate_price_credits(250).is_ok());
        assert!(validate_price_credits(-1).is_err());
    }

    #[test]
    fn test_validate_time_window_ok() {
        let starts = Utc::now() + Duration::hours(2);
        let ends = starts + Duration::minutes(90);
        assert!(validate_time_window(starts, ends).is_ok());
    }

    #[test]
    fn test_validate_time_window_reversed() {
        let starts = Utc::now() + Duration::hours(2);
        let ends = starts - Duration::minutes(30);
        let err = validate_time_window(starts, ends).unwrap_err();
        assert_eq!(err.code, "window_order");
    }

    #[test]
    fn test_validate_time_window_zero_length() {
        let starts = Utc::now() + Duration::hours(2);
        let err = validate_time_window(starts, starts).unwrap_err();
        assert_eq!(err.code, "window_order");
    }

    #[test]
    fn test_validate_time_window_in_past() {
        let starts = Utc::now() - Duration::hours(2);
        let ends = starts + Duration::minutes(90);
        let err = validate_time_window(starts, ends).unwrap_err();
        assert_eq!(err.code, "window_past");
    }
}
