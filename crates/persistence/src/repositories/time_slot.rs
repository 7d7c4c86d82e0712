//! Time slot repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{SlotCategoryDb, TimeSlotWithDetailsEntity};
use crate::metrics::QueryTimer;

/// Filters for the public class listing.
#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    pub club_id: Option<Uuid>,
    pub category: Option<SlotCategoryDb>,
    /// Only slots whose level range contains this rating.
    pub level: Option<f64>,
    /// Only slots starting on this UTC date.
    pub date: Option<NaiveDate>,
}

const SLOT_DETAILS_SELECT: &str = r#"
    SELECT t.id, t.club_id, t.court_id, t.instructor_id, t.starts_at, t.ends_at,
           t.capacity, t.price_credits, t.level_min, t.level_max, t.category,
           t.is_cancelled, t.created_at,
           cl.name AS club_name,
           co.number AS court_number,
           u.display_name AS instructor_name,
           COALESCE((SELECT SUM(b.group_size) FROM bookings b
                      WHERE b.time_slot_id = t.id AND b.status <> 'cancelled'), 0) AS booked
    FROM time_slots t
    JOIN clubs cl ON cl.id = t.club_id
    LEFT JOIN courts co ON co.id = t.court_id
    LEFT JOIN instructors i ON i.id = t.instructor_id
    LEFT JOIN users u ON u.id = i.user_id
"#;

/// Repository for time-slot-related database operations.
#[derive(Clone)]
pub struct TimeSlotRepository {
    pool: PgPool,
}

impl TimeSlotRepository {
    /// Creates a new TimeSlotRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a slot by ID with club/court/instructor info and booked count.
    pub async fn find_by_id_with_details(
        &self,
        id: Uuid,
    ) -> Result<Option<TimeSlotWithDetailsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_slot_with_details");
        let query = format!("{} WHERE t.id = $1", SLOT_DETAILS_SELECT);
        let result = sqlx::query_as::<_, TimeSlotWithDetailsEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List upcoming non-cancelled slots matching the filter, ordered by
    /// `(starts_at, id)` with keyset pagination.
    ///
    /// `cursor` is the `(starts_at, id)` of the last row of the previous
    /// page; rows at or before it are skipped.
    pub async fn list_upcoming(
        &self,
        filter: &ClassFilter,
        cursor: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<TimeSlotWithDetailsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_upcoming_slots");
        let query = format!(
            r#"{}
            WHERE t.is_cancelled = false
              AND t.starts_at > now()
              AND ($1::uuid IS NULL OR t.club_id = $1)
              AND ($2::slot_category IS NULL OR t.category = $2)
              AND ($3::float8 IS NULL OR ($3 >= t.level_min AND $3 <= t.level_max))
              AND ($4::date IS NULL OR (t.starts_at AT TIME ZONE 'UTC')::date = $4)
              AND ($5::timestamptz IS NULL OR (t.starts_at, t.id) > ($5, $6))
            ORDER BY t.starts_at, t.id
            LIMIT $7
            "#,
            SLOT_DETAILS_SELECT
        );

        let (cursor_ts, cursor_id) = match cursor {
            Some((ts, id)) => (Some(ts), Some(id)),
            None => (None, None),
        };

        let result = sqlx::query_as::<_, TimeSlotWithDetailsEntity>(&query)
            .bind(filter.club_id)
            .bind(filter.category)
            .bind(filter.level)
            .bind(filter.date)
            .bind(cursor_ts)
            .bind(cursor_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}
