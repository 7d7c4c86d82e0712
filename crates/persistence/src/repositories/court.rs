//! Court repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CourtEntity;
use crate::metrics::QueryTimer;

/// Repository for court-related database operations.
#[derive(Clone)]
pub struct CourtRepository {
    pool: PgPool,
}

impl CourtRepository {
    /// Creates a new CourtRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a court to a club.
    ///
    /// The `(club_id, number)` unique constraint surfaces as a 23505
    /// database error for duplicate numbers.
    pub async fn create_court(
        &self,
        club_id: Uuid,
        number: i32,
        surface: Option<&str>,
        indoor: bool,
    ) -> Result<CourtEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_court");
        let result = sqlx::query_as::<_, CourtEntity>(
            r#"
            INSERT INTO courts (club_id, number, surface, indoor)
            VALUES ($1, $2, $3, $4)
            RETURNING id, club_id, number, surface, indoor, is_active, created_at, updated_at
            "#,
        )
        .bind(club_id)
        .bind(number)
        .bind(surface)
        .bind(indoor)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a club's active courts ordered by number.
    pub async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<CourtEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_courts_by_club");
        let result = sqlx::query_as::<_, CourtEntity>(
            r#"
            SELECT id, club_id, number, surface, indoor, is_active, created_at, updated_at
            FROM courts
            WHERE club_id = $1 AND is_active = true
            ORDER BY number
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a court's surface/indoor flags.
    pub async fn update_court(
        &self,
        court_id: Uuid,
        surface: Option<&str>,
        indoor: Option<bool>,
    ) -> Result<Option<CourtEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_court");
        let result = sqlx::query_as::<_, CourtEntity>(
            r#"
            UPDATE courts
            SET
                surface = COALESCE($2, surface),
                indoor = COALESCE($3, indoor),
                updated_at = now()
            WHERE id = $1 AND is_active = true
            RETURNING id, club_id, number, surface, indoor, is_active, created_at, updated_at
            "#,
        )
        .bind(court_id)
        .bind(surface)
        .bind(indoor)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft-delete a court. Returns false if no active court matched.
    pub async fn deactivate(&self, court_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_court");
        let result = sqlx::query(
            "UPDATE courts SET is_active = false, updated_at = now() WHERE id = $1 AND is_active = true",
        )
        .bind(court_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
