//! Transactional time slot scheduling operations.
//!
//! Slot creation checks the court and instructor calendars inside the
//! insert transaction; slot cancellation refunds every active booking
//! atomically.

use chrono::{Duration, Utc};
use domain::models::time_slot::CreateClassRequest;
use domain::models::user::UserRole;
use persistence::entities::{SlotCategoryDb, TimeSlotEntity};
use persistence::repositories::InstructorRepository;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when scheduling or cancelling slots.
#[derive(Debug, Error)]
pub enum ClassError {
    #[error("Club not found")]
    ClubNotFound,

    #[error("Court not found")]
    CourtNotFound,

    #[error("Court belongs to a different club")]
    CourtWrongClub,

    #[error("Instructor not found")]
    InstructorNotFound,

    #[error("Instructor belongs to a different club")]
    InstructorWrongClub,

    #[error("This category requires an instructor")]
    InstructorRequired,

    #[error("Instructors can only schedule their own slots at their own club")]
    NotYourSchedule,

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("level_min must not exceed level_max")]
    InvalidLevelRange,

    #[error("Slots can be published at most {0} days ahead")]
    TooFarAhead(i64),

    #[error("The court is already booked in that window")]
    CourtBusy,

    #[error("The instructor already teaches in that window")]
    InstructorBusy,

    #[error("Time slot not found")]
    SlotNotFound,

    #[error("Time slot is already cancelled")]
    AlreadyCancelled,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result of cancelling a slot.
#[derive(Debug, Clone)]
pub struct SlotCancellation {
    pub slot_id: Uuid,
    pub bookings_cancelled: u64,
    pub credits_refunded: i64,
}

/// Transactional class scheduling service.
pub struct ClassService {
    pool: PgPool,
    booking_window_days: i64,
}

impl ClassService {
    /// Creates a new ClassService.
    pub fn new(pool: PgPool, booking_window_days: i64) -> Self {
        Self {
            pool,
            booking_window_days,
        }
    }

    /// Publish a new time slot.
    ///
    /// Admins may schedule anything; instructors only their own slots at
    /// their own club.
    pub async fn create_slot(
        &self,
        actor_id: Uuid,
        actor_role: UserRole,
        request: &CreateClassRequest,
    ) -> Result<TimeSlotEntity, ClassError> {
        let now = Utc::now();

        shared::validation::validate_time_window(request.starts_at, request.ends_at).map_err(
            |e| {
                ClassError::InvalidWindow(
                    e.message
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "invalid window".to_string()),
                )
            },
        )?;
        if request.starts_at > now + Duration::days(self.booking_window_days) {
            return Err(ClassError::TooFarAhead(self.booking_window_days));
        }
        if request.level_min > request.level_max {
            return Err(ClassError::InvalidLevelRange);
        }
        if request.category.requires_instructor() && request.instructor_id.is_none() {
            return Err(ClassError::InstructorRequired);
        }

        if actor_role == UserRole::Instructor {
            self.check_own_schedule(actor_id, request).await?;
        }

        let mut tx = self.pool.begin().await?;

        let (club_exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM clubs WHERE id = $1 AND is_active = true)",
        )
        .bind(request.club_id)
        .fetch_one(&mut *tx)
        .await?;

        if !club_exists {
            return Err(ClassError::ClubNotFound);
        }

        if let Some(court_id) = request.court_id {
            let court: Option<(Uuid,)> = sqlx::query_as(
                "SELECT club_id FROM courts WHERE id = $1 AND is_active = true",
            )
            .bind(court_id)
            .fetch_optional(&mut *tx)
            .await?;

            match court {
                None => return Err(ClassError::CourtNotFound),
                Some((club_id,)) if club_id != request.club_id => {
                    return Err(ClassError::CourtWrongClub)
                }
                Some(_) => {}
            }

            let (court_busy,): (bool,) = sqlx::query_as(
                r#"
                SELECT EXISTS (
                    SELECT 1 FROM time_slots
                    WHERE court_id = $1 AND is_cancelled = false
                      AND starts_at < $3 AND ends_at > $2
                )
                "#,
            )
            .bind(court_id)
            .bind(request.starts_at)
            .bind(request.ends_at)
            .fetch_one(&mut *tx)
            .await?;

            if court_busy {
                return Err(ClassError::CourtBusy);
            }
        }

        if let Some(instructor_id) = request.instructor_id {
            let instructor: Option<(Uuid,)> = sqlx::query_as(
                "SELECT club_id FROM instructors WHERE id = $1 AND is_active = true",
            )
            .bind(instructor_id)
            .fetch_optional(&mut *tx)
            .await?;

            match instructor {
                None => return Err(ClassError::InstructorNotFound),
                Some((club_id,)) if club_id != request.club_id => {
                    return Err(ClassError::InstructorWrongClub)
                }
                Some(_) => {}
            }

            let (instructor_busy,): (bool,) = sqlx::query_as(
                r#"
                SELECT EXISTS (
                    SELECT 1 FROM time_slots
                    WHERE instructor_id = $1 AND is_cancelled = false
                      AND starts_at < $3 AND ends_at > $2
                )
                "#,
            )
            .bind(instructor_id)
            .bind(request.starts_at)
            .bind(request.ends_at)
            .fetch_one(&mut *tx)
            .await?;

            if instructor_busy {
                return Err(ClassError::InstructorBusy);
            }
        }

        let category: SlotCategoryDb = request.category.into();

        let slot: TimeSlotEntity = sqlx::query_as(
            r#"
            INSERT INTO time_slots
                (club_id, court_id, instructor_id, starts_at, ends_at,
                 capacity, price_credits, level_min, level_max, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, club_id, court_id, instructor_id, starts_at, ends_at,
                      capacity, price_credits, level_min, level_max, category,
                      is_cancelled, created_at, updated_at
            "#,
        )
        .bind(request.club_id)
        .bind(request.court_id)
        .bind(request.instructor_id)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.capacity)
        .bind(request.price_credits)
        .bind(request.level_min)
        .bind(request.level_max)
        .bind(category)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(slot)
    }

    /// Cancel a slot and refund every active booking in full.
    ///
    /// Instructors may only cancel their own slots; admins any.
    pub async fn cancel_slot(
        &self,
        slot_id: Uuid,
        actor_id: Uuid,
        actor_role: UserRole,
    ) -> Result<SlotCancellation, ClassError> {
        let mut tx = self.pool.begin().await?;

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
        .bind(slot_id)
        .fetch_optional(&mut *tx)
        .await?;

        let slot = slot.ok_or(ClassError::SlotNotFound)?;

        if slot.is_cancelled {
            return Err(ClassError::AlreadyCancelled);
        }

        if actor_role == UserRole::Instructor {
            let own: Option<(Uuid,)> = sqlx::query_as(
                "SELECT id FROM instructors WHERE user_id = $1 AND is_active = true",
            )
            .bind(actor_id)
            .fetch_optional(&mut *tx)
            .await?;

            match own {
                Some((instructor_id,)) if slot.instructor_id == Some(instructor_id) => {}
                _ => return Err(ClassError::NotYourSchedule),
            }
        }

        // Club-initiated cancellation refunds everyone in full
        let (credits_refunded,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(credits_charged), 0)
            FROM bookings
            WHERE time_slot_id = $1 AND status <> 'cancelled'
            "#,
        )
        .bind(slot_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users u
            SET credits = u.credits + r.total, updated_at = now()
            FROM (
                SELECT user_id, SUM(credits_charged) AS total
                FROM bookings
                WHERE time_slot_id = $1 AND status <> 'cancelled'
                GROUP BY user_id
            ) r
            WHERE u.id = r.user_id
            "#,
        )
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        let cancelled = sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'cancelled', cancelled_at = now(), updated_at = now()
            WHERE time_slot_id = $1 AND status <> 'cancelled'
            "#,
        )
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE time_slots SET is_cancelled = true, updated_at = now() WHERE id = $1")
            .bind(slot_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(SlotCancellation {
            slot_id,
            bookings_cancelled: cancelled.rows_affected(),
            credits_refunded,
        })
    }

    /// Reject instructor requests that schedule someone else or another club.
    async fn check_own_schedule(
        &self,
        actor_id: Uuid,
        request: &CreateClassRequest,
    ) -> Result<(), ClassError> {
        let repo = InstructorRepository::new(self.pool.clone());
        let own = repo
            .find_by_user_id(actor_id)
            .await?
            .ok_or(ClassError::NotYourSchedule)?;

        if request.club_id != own.club_id {
            return Err(ClassError::NotYourSchedule);
        }
        if request.instructor_id.is_some() && request.instructor_id != Some(own.id) {
            return Err(ClassError::NotYourSchedule);
        }

        Ok(())
    }
}

// windows_overlap is the reference semantics for the SQL overlap predicate;
// keep them in sync.
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domain::services::scheduling::windows_overlap;

    #[test]
    fn test_sql_predicate_matches_domain_overlap() {
        let base = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
        let cases = [
            (0i64, 90i64, 90i64, 180i64, false), // back to back
            (0, 90, 60, 150, true),              // partial
            (0, 180, 60, 120, true),             // containment
            (0, 90, 120, 180, false),            // disjoint
        ];

        for (a_start, a_end, b_start, b_end, expected) in cases {
            let result = windows_overlap(
                base + Duration::minutes(a_start),
                base + Duration::minutes(a_end),
                base + Duration::minutes(b_start),
                base + Duration::minutes(b_end),
            );
            // SQL: starts_at < $end AND ends_at > $start
            let sql_equivalent = (base + Duration::minutes(a_start))
                < (base + Duration::minutes(b_end))
                && (base + Duration::minutes(a_end)) > (base + Duration::minutes(b_start));
            assert_eq!(result, expected);
            assert_eq!(sql_equivalent, expected);
        }
    }
}
