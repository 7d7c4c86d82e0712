//! Transactional booking operations.
//!
//! Every operation that moves credits or consumes capacity runs in a
//! single transaction that locks the time slot row first, so capacity
//! checks, duplicate checks and credit movements are race-free. The
//! partial unique index on `(user_id, time_slot_id, group_size)`
//! backstops the duplicate check under concurrent requests.

use chrono::{DateTime, Utc};
use domain::services::booking_policy::{booking_cost, fits, refund_amount, remaining_capacity};
use persistence::entities::{BookingEntity, BookingStatusDb, TimeSlotEntity};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::middleware::metrics::{
    record_booking_cancelled, record_booking_created, record_credits_charged,
};

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Time slot not found")]
    SlotNotFound,

    #[error("Time slot has been cancelled")]
    SlotCancelled,

    #[error("Time slot has already started")]
    SlotAlreadyStarted,

    #[error("Group size exceeds the maximum of {0}")]
    GroupTooLarge(i32),

    #[error("Only {remaining} places left on this slot")]
    SlotFull { remaining: i32 },

    #[error("You already have this booking")]
    DuplicateBooking,

    #[error("Insufficient credits: need {required}, have {available}")]
    InsufficientCredits { required: i32, available: i32 },

    #[error("Booking not found")]
    BookingNotFound,

    #[error("Booking belongs to another user")]
    NotYourBooking,

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("Booking is not pending")]
    NotPending,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub booking: BookingEntity,
    pub remaining_places: i32,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    pub booking_id: Uuid,
    pub time_slot_id: Uuid,
    pub credits_refunded: i32,
    pub cancelled_at: DateTime<Utc>,
}

/// Transactional booking service.
pub struct BookingService {
    pool: PgPool,
    max_group_size: i32,
    cancellation_cutoff_hours: i64,
}

impl BookingService {
    /// Creates a new BookingService.
    pub fn new(pool: PgPool, max_group_size: i32, cancellation_cutoff_hours: i64) -> Self {
        Self {
            pool,
            max_group_size,
            cancellation_cutoff_hours,
        }
    }

    /// Book a slot for a user.
    ///
    /// When `pay_with_credits` is set, the cost is charged immediately and
    /// the booking is confirmed; otherwise a pending booking is recorded
    /// (to be paid at the club and confirmed by staff). Pending bookings
    /// count against capacity.
    pub async fn book(
        &self,
        user_id: Uuid,
        time_slot_id: Uuid,
        group_size: i32,
        pay_with_credits: bool,
    ) -> Result<BookingOutcome, BookingError> {
        if group_size > self.max_group_size {
            return Err(BookingError::GroupTooLarge(self.max_group_size));
        }

        let mut tx = self.pool.begin().await?;

        // Lock the slot row; concurrent bookings on the same slot serialize here
        let slot: Option<TimeSlotEntity> = sqlx::query_as(
            r#"
            SELECT id, club_id, court_id, instructor_id, starts_at, ends_at,
                   capacity, price_credits, level_min, level_max, category,
                   is_cancelled, created_at, updated_at
            FROM time_slots
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(time_slot_id)
        .fetch_optional(&mut *tx)
        .await?;

        let slot: domain::models::TimeSlot = slot.ok_or(BookingError::SlotNotFound)?.into();

        if slot.is_cancelled {
            return Err(BookingError::SlotCancelled);
        }
        if slot.starts_at <= Utc::now() {
            return Err(BookingError::SlotAlreadyStarted);
        }

        let (duplicate,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE user_id = $1 AND time_slot_id = $2 AND group_size = $3
                  AND status <> 'cancelled'
            )
            "#,
        )
        .bind(user_id)
        .bind(time_slot_id)
        .bind(group_size)
        .fetch_one(&mut *tx)
        .await?;

        if duplicate {
            return Err(BookingError::DuplicateBooking);
        }

        let (booked,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(group_size), 0)
            FROM bookings
            WHERE time_slot_id = $1 AND status <> 'cancelled'
            "#,
        )
        .bind(time_slot_id)
        .fetch_one(&mut *tx)
        .await?;

        if !fits(slot.capacity, booked, group_size) {
            return Err(BookingError::SlotFull {
                remaining: remaining_capacity(slot.capacity, booked),
            });
        }

        let (status, credits_charged) = if pay_with_credits {
            let cost = booking_cost(slot.price_credits, group_size);

            let charged: Option<(i32,)> = sqlx::query_as(
                r#"
                UPDATE users
                SET credits = credits - $2, updated_at = now()
                WHERE id = $1 AND credits >= $2
                RETURNING credits
                "#,
            )
            .bind(user_id)
            .bind(cost)
            .fetch_optional(&mut *tx)
            .await?;

            if charged.is_none() {
                let (available,): (i32,) =
                    sqlx::query_as("SELECT credits FROM users WHERE id = $1")
                        .bind(user_id)
                        .fetch_one(&mut *tx)
                        .await?;
                return Err(BookingError::InsufficientCredits {
                    required: cost,
                    available,
                });
            }

            (BookingStatusDb::Confirmed, cost)
        } else {
            (BookingStatusDb::Pending, 0)
        };

        let insert_result: Result<BookingEntity, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO bookings (user_id, time_slot_id, group_size, status, credits_charged)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, time_slot_id, group_size, status, credits_charged,
                      created_at, updated_at, cancelled_at
            "#,
        )
        .bind(user_id)
        .bind(time_slot_id)
        .bind(group_size)
        .bind(status)
        .bind(credits_charged)
        .fetch_one(&mut *tx)
        .await;

        // The partial unique index catches a duplicate racing past the check
        let booking = match insert_result {
            Ok(booking) => booking,
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                return Err(BookingError::DuplicateBooking);
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;

        record_booking_created();
        record_credits_charged(credits_charged);

        Ok(BookingOutcome {
            booking,
            remaining_places: remaining_capacity(slot.capacity, booked + group_size as i64),
        })
    }

    /// Cancel a booking.
    ///
    /// Owners may cancel their own bookings before the slot starts;
    /// admins may cancel any. Credits are refunded in full when the
    /// cancellation is at least the configured cutoff before start.
    pub async fn cancel(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        actor_is_admin: bool,
    ) -> Result<CancelOutcome, BookingError> {
        let mut tx = self.pool.begin().await?;

        let booking: Option<BookingEntity> = sqlx::query_as(
            r#"
            SELECT id, user_id, time_slot_id, group_size, status, credits_charged,
                   created_at, updated_at, cancelled_at
            FROM bookings
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;

        let booking = booking.ok_or(BookingError::BookingNotFound)?;

        if booking.user_id != actor_id && !actor_is_admin {
            return Err(BookingError::NotYourBooking);
        }
        if booking.status == BookingStatusDb::Cancelled {
            return Err(BookingError::AlreadyCancelled);
        }

        // Lock the slot too so the freed capacity is visible to concurrent
        // bookings in a consistent order
        let (starts_at,): (DateTime<Utc>,) = sqlx::query_as(
            "SELECT starts_at FROM time_slots WHERE id = $1 FOR UPDATE",
        )
        .bind(booking.time_slot_id)
        .fetch_one(&mut *tx)
        .await?;

        let now = Utc::now();
        if starts_at <= now {
            return Err(BookingError::SlotAlreadyStarted);
        }

        let refund = refund_amount(
            booking.credits_charged,
            starts_at,
            now,
            self.cancellation_cutoff_hours,
        );

        if refund > 0 {
            sqlx::query("UPDATE users SET credits = credits + $2, updated_at = now() WHERE id = $1")
                .bind(booking.user_id)
                .bind(refund)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'cancelled', cancelled_at = $2, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        record_booking_cancelled();

        Ok(CancelOutcome {
            booking_id,
            time_slot_id: booking.time_slot_id,
            credits_refunded: refund,
            cancelled_at: now,
        })
    }

    /// Confirm a pending booking (paid on site).
    pub async fn confirm(&self, booking_id: Uuid) -> Result<BookingEntity, BookingError> {
        let mut tx = self.pool.begin().await?;

        let booking: Option<BookingEntity> = sqlx::query_as(
            r#"
            SELECT id, user_id, time_slot_id, group_size, status, credits_charged,
                   created_at, updated_at, cancelled_at
            FROM bookings
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;

        let booking = booking.ok_or(BookingError::BookingNotFound)?;

        if booking.status != BookingStatusDb::Pending {
            return Err(BookingError::NotPending);
        }

        let confirmed: BookingEntity = sqlx::query_as(
            r#"
            UPDATE bookings
            SET status = 'confirmed', updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, time_slot_id, group_size, status, credits_charged,
                      created_at, updated_at, cancelled_at
            "#,
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(confirmed)
    }
}
