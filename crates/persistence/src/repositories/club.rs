//! Club repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ClubEntity, ClubWithCourtCountEntity};
use crate::metrics::QueryTimer;

/// Repository for club-related database operations.
#[derive(Clone)]
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    /// Creates a new ClubRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new club.
    pub async fn create_club(
        &self,
        name: &str,
        slug: &str,
        address: &str,
        city: &str,
        phone: Option<&str>,
        email: Option<&str>,
        admin_user_id: Uuid,
    ) -> Result<ClubEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_club");
        let result = sqlx::query_as::<_, ClubEntity>(
            r#"
            INSERT INTO clubs (name, slug, address, city, phone, email, admin_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, slug, address, city, phone, email, admin_user_id,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(address)
        .bind(city)
        .bind(phone)
        .bind(email)
        .bind(admin_user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an active club by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ClubEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_club_by_id");
        let result = sqlx::query_as::<_, ClubEntity>(
            r#"
            SELECT id, name, slug, address, city, phone, email, admin_user_id,
                   is_active, created_at, updated_at
            FROM clubs
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a club by slug, including inactive ones (slugs stay reserved).
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<ClubEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_club_by_slug");
        let result = sqlx::query_as::<_, ClubEntity>(
            r#"
            SELECT id, name, slug, address, city, phone, email, admin_user_id,
                   is_active, created_at, updated_at
            FROM clubs
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Generate a slug that is unique among existing clubs by appending a
    /// numeric suffix when needed.
    pub async fn generate_unique_slug(&self, base_slug: &str) -> Result<String, sqlx::Error> {
        if self.find_by_slug(base_slug).await?.is_none() {
            return Ok(base_slug.to_string());
        }

        for n in 2..100 {
            let candidate = format!("{}-{}", base_slug, n);
            if self.find_by_slug(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        // Fall back to a random suffix after too many collisions
        Ok(format!("{}-{}", base_slug, &Uuid::new_v4().to_string()[..8]))
    }

    /// List active clubs with their active court counts.
    pub async fn list_active(
        &self,
        city: Option<&str>,
    ) -> Result<Vec<ClubWithCourtCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_clubs");
        let result = sqlx::query_as::<_, ClubWithCourtCountEntity>(
            r#"
            SELECT c.id, c.name, c.slug, c.city,
                   (SELECT COUNT(*) FROM courts
                     WHERE club_id = c.id AND is_active = true) AS court_count
            FROM clubs c
            WHERE c.is_active = true
              AND ($1::text IS NULL OR lower(c.city) = lower($1))
            ORDER BY c.name
            "#,
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a club. Unset fields keep their current values.
    pub async fn update_club(
        &self,
        club_id: Uuid,
        name: Option<&str>,
        slug: Option<&str>,
        address: Option<&str>,
        city: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<ClubEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_club");
        let result = sqlx::query_as::<_, ClubEntity>(
            r#"
            UPDATE clubs
            SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                address = COALESCE($4, address),
                city = COALESCE($5, city),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email),
                updated_at = now()
            WHERE id = $1 AND is_active = true
            RETURNING id, name, slug, address, city, phone, email, admin_user_id,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(club_id)
        .bind(name)
        .bind(slug)
        .bind(address)
        .bind(city)
        .bind(phone)
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft-delete a club. Returns false if no active club matched.
    pub async fn deactivate(&self, club_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_club");
        let result = sqlx::query(
            "UPDATE clubs SET is_active = false, updated_at = now() WHERE id = $1 AND is_active = true",
        )
        .bind(club_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
