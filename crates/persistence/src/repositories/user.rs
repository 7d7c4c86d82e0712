//! User repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AdminStatsEntity, UserEntity, UserRoleDb};
use crate::metrics::QueryTimer;

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, password_hash, display_name, role, credits, level,
                   is_active, last_login_at, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch just the role of a user, if the account exists and is active.
    pub async fn find_active_role(&self, id: Uuid) -> Result<Option<UserRoleDb>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_role");
        let result: Option<(UserRoleDb,)> =
            sqlx::query_as("SELECT role FROM users WHERE id = $1 AND is_active = true")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        timer.record();
        Ok(result.map(|(role,)| role))
    }

    /// List users for the admin view with optional role/email filters.
    pub async fn list_users(
        &self,
        page: i64,
        per_page: i64,
        role_filter: Option<UserRoleDb>,
        email_filter: Option<&str>,
    ) -> Result<(Vec<UserEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_users");
        let offset = (page - 1) * per_page;
        let email_pattern = email_filter.map(|e| format!("%{}%", e.to_lowercase()));

        let rows = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, password_hash, display_name, role, credits, level,
                   is_active, last_login_at, created_at, updated_at
            FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::text IS NULL OR email LIKE $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(role_filter)
        .bind(email_pattern.as_deref())
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::text IS NULL OR email LIKE $2)
            "#,
        )
        .bind(role_filter)
        .bind(email_pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((rows, total))
    }

    /// Adjust a user's credit balance by a signed delta.
    ///
    /// Returns `Ok(None)` when the adjustment would take the balance
    /// negative (the CHECK constraint is never hit).
    pub async fn adjust_credits(
        &self,
        user_id: Uuid,
        delta: i32,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("adjust_credits");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET credits = credits + $2, updated_at = now()
            WHERE id = $1 AND credits + $2 >= 0
            RETURNING id, email, password_hash, display_name, role, credits, level,
                      is_active, last_login_at, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Change a user's role.
    pub async fn update_role(
        &self,
        user_id: Uuid,
        role: UserRoleDb,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_role");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET role = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, email, password_hash, display_name, role, credits, level,
                      is_active, last_login_at, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Collect aggregate counters for the admin stats endpoint.
    pub async fn admin_stats(&self) -> Result<AdminStatsEntity, sqlx::Error> {
        let timer = QueryTimer::new("admin_stats");
        let result = sqlx::query_as::<_, AdminStatsEntity>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE is_active) AS total_users,
                (SELECT COUNT(*) FROM clubs WHERE is_active) AS total_clubs,
                (SELECT COUNT(*) FROM courts WHERE is_active) AS total_courts,
                (SELECT COUNT(*) FROM time_slots
                  WHERE NOT is_cancelled AND starts_at > now()) AS upcoming_slots,
                (SELECT COUNT(*) FROM bookings WHERE status = 'confirmed') AS confirmed_bookings,
                (SELECT COALESCE(SUM(credits_charged), 0) FROM bookings
                  WHERE status <> 'cancelled') AS credits_charged
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
