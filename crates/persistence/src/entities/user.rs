//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::user::UserRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum that maps to the PostgreSQL `user_role` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRoleDb {
    Player,
    Instructor,
    Admin,
}

impl From<UserRoleDb> for UserRole {
    fn from(db_role: UserRoleDb) -> Self {
        match db_role {
            UserRoleDb::Player => UserRole::Player,
            UserRoleDb::Instructor => UserRole::Instructor,
            UserRoleDb::Admin => UserRole::Admin,
        }
    }
}

impl From<UserRole> for UserRoleDb {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Player => UserRoleDb::Player,
            UserRole::Instructor => UserRoleDb::Instructor,
            UserRole::Admin => UserRoleDb::Admin,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: String,
    pub role: UserRoleDb,
    pub credits: i32,
    pub level: f64,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            display_name: entity.display_name,
            role: entity.role.into(),
            credits: entity.credits,
            level: entity.level,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Aggregate counters for the admin stats endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct AdminStatsEntity {
    pub total_users: i64,
    pub total_clubs: i64,
    pub total_courts: i64,
    pub upcoming_slots: i64,
    pub confirmed_bookings: i64,
    pub credits_charged: i64,
}
