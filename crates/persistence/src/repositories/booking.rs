//! Booking repository for database operations.

use domain::models::booking::BookingScope;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::BookingWithSlotEntity;
use crate::metrics::QueryTimer;

/// Repository for booking-related database operations.
///
/// Writes that move credits live in the transactional booking service;
/// this repository covers the read paths.
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a user's bookings with slot context.
    ///
    /// `Upcoming` keeps active bookings on future slots; `Past` returns
    /// everything else (started slots and cancelled bookings).
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        scope: BookingScope,
    ) -> Result<Vec<BookingWithSlotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_user_bookings");

        let scope_clause = match scope {
            BookingScope::Upcoming => "AND t.starts_at > now() AND b.status <> 'cancelled'",
            BookingScope::Past => "AND (t.starts_at <= now() OR b.status = 'cancelled')",
            BookingScope::All => "",
        };

        let query = format!(
            r#"
            SELECT b.id, b.time_slot_id, b.group_size, b.status, b.credits_charged,
                   b.created_at,
                   t.starts_at, t.ends_at, t.category,
                   cl.name AS club_name,
                   co.number AS court_number
            FROM bookings b
            JOIN time_slots t ON t.id = b.time_slot_id
            JOIN clubs cl ON cl.id = t.club_id
            LEFT JOIN courts co ON co.id = t.court_id
            WHERE b.user_id = $1
            {}
            ORDER BY t.starts_at DESC
            "#,
            scope_clause
        );

        let result = sqlx::query_as::<_, BookingWithSlotEntity>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}
