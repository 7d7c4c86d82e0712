//! Instructor repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InstructorEntity, InstructorWithUserEntity, UserRoleDb};
use crate::metrics::QueryTimer;

/// Repository for instructor-related database operations.
#[derive(Clone)]
pub struct InstructorRepository {
    pool: PgPool,
}

impl InstructorRepository {
    /// Creates a new InstructorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an instructor profile and promote the user's role, atomically.
    ///
    /// The `user_id` unique constraint surfaces as a 23505 database error
    /// when the user already has a profile.
    pub async fn create_instructor(
        &self,
        user_id: Uuid,
        club_id: Uuid,
        specialties: &[String],
        hourly_rate_credits: i32,
        bio: Option<&str>,
    ) -> Result<InstructorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_instructor");

        let mut tx = self.pool.begin().await?;

        let instructor = sqlx::query_as::<_, InstructorEntity>(
            r#"
            INSERT INTO instructors (user_id, club_id, specialties, hourly_rate_credits, bio)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, club_id, specialties, hourly_rate_credits, bio,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .bind(specialties)
        .bind(hourly_rate_credits)
        .bind(bio)
        .fetch_one(&mut *tx)
        .await?;

        // Admins keep their role; players are promoted
        sqlx::query(
            "UPDATE users SET role = $2, updated_at = now() WHERE id = $1 AND role = 'player'",
        )
        .bind(user_id)
        .bind(UserRoleDb::Instructor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(instructor)
    }

    /// Find an active instructor profile by its ID, with user and club info.
    pub async fn find_by_id_with_user(
        &self,
        id: Uuid,
    ) -> Result<Option<InstructorWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_instructor_by_id");
        let result = sqlx::query_as::<_, InstructorWithUserEntity>(
            r#"
            SELECT i.id, i.user_id, i.club_id, i.specialties, i.hourly_rate_credits,
                   i.bio, i.created_at,
                   u.display_name, u.level,
                   c.name AS club_name
            FROM instructors i
            JOIN users u ON u.id = i.user_id
            JOIN clubs c ON c.id = i.club_id
            WHERE i.id = $1 AND i.is_active = true
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an active instructor profile by the backing user account.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<InstructorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_instructor_by_user_id");
        let result = sqlx::query_as::<_, InstructorEntity>(
            r#"
            SELECT id, user_id, club_id, specialties, hourly_rate_credits, bio,
                   is_active, created_at, updated_at
            FROM instructors
            WHERE user_id = $1 AND is_active = true
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active instructors, optionally restricted to one club.
    pub async fn list_active(
        &self,
        club_id: Option<Uuid>,
    ) -> Result<Vec<InstructorWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_instructors");
        let result = sqlx::query_as::<_, InstructorWithUserEntity>(
            r#"
            SELECT i.id, i.user_id, i.club_id, i.specialties, i.hourly_rate_credits,
                   i.bio, i.created_at,
                   u.display_name, u.level,
                   c.name AS club_name
            FROM instructors i
            JOIN users u ON u.id = i.user_id
            JOIN clubs c ON c.id = i.club_id
            WHERE i.is_active = true
              AND u.is_active = true
              AND ($1::uuid IS NULL OR i.club_id = $1)
            ORDER BY u.display_name
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
