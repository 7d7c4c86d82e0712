//! Authentication service for user registration, login, and token management.

use chrono::Utc;
use shared::crypto::sha256_hex;
use shared::jwt::{normalize_pem_key, JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtAuthConfig;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Password does not meet requirements")]
    WeakPassword(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User is disabled")]
    UserDisabled,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires_in: i64,
}

/// Token pair with the JTIs used for session tracking.
#[derive(Debug, Clone)]
struct TokenPair {
    access_token: String,
    access_token_jti: String,
    refresh_token: String,
    refresh_token_jti: String,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Database row for the credential check.
#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    email: String,
    password_hash: Option<String>,
    display_name: String,
    is_active: bool,
}

/// Database row for the session lookup.
#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    expires_at: chrono::DateTime<Utc>,
}

/// Authentication service.
pub struct AuthService {
    pool: PgPool,
    jwt_config: JwtConfig,
    access_token_expiry: i64,
}

impl AuthService {
    /// Creates a new AuthService with the given database pool and JWT configuration.
    pub fn new(pool: PgPool, jwt_config: &JwtAuthConfig) -> Result<Self, AuthError> {
        let private_key = normalize_pem_key(&jwt_config.private_key);
        let public_key = normalize_pem_key(&jwt_config.public_key);

        let jwt = JwtConfig::with_leeway(
            &private_key,
            &public_key,
            jwt_config.access_token_expiry_secs,
            jwt_config.refresh_token_expiry_secs,
            jwt_config.leeway_secs,
        )
        .map_err(|e| AuthError::Internal(format!("Failed to initialize JWT: {}", e)))?;

        Ok(Self {
            pool,
            jwt_config: jwt,
            access_token_expiry: jwt_config.access_token_expiry_secs,
        })
    }

    /// Register a new user with email and password.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        level: Option<f64>,
    ) -> Result<AuthResult, AuthError> {
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let user_id = Uuid::new_v4();
        let now = Utc::now();

        let insert_result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, display_name, level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, 2.5), $6, $6)
            "#,
        )
        .bind(user_id)
        .bind(email.to_lowercase())
        .bind(&password_hash)
        .bind(display_name)
        .bind(level)
        .bind(now)
        .execute(&self.pool)
        .await;

        // Unique violation under concurrent registration of the same email
        if let Err(sqlx::Error::Database(db_err)) = &insert_result {
            if db_err.code().as_deref() == Some("23505") {
                return Err(AuthError::EmailAlreadyExists);
            }
        }
        insert_result?;

        let tokens = self.generate_tokens(user_id)?;
        self.create_session(user_id, &tokens).await?;

        Ok(AuthResult {
            user_id,
            email: email.to_lowercase(),
            display_name: display_name.to_string(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_token_expires_in: self.access_token_expiry,
        })
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user: Option<CredentialsRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, display_name, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        let user = match user {
            Some(u) => u,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        let password_hash = user.password_hash.ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        sqlx::query("UPDATE users SET last_login_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        let tokens = self.generate_tokens(user.id)?;
        self.create_session(user.id, &tokens).await?;

        Ok(AuthResult {
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_token_expires_in: self.access_token_expiry,
        })
    }

    /// Exchange a refresh token for a new token pair (rotation).
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AuthError> {
        let claims = self
            .jwt_config
            .validate_refresh_token(refresh_token)
            .map_err(|e| match e {
                JwtError::TokenExpired | JwtError::InvalidToken => AuthError::InvalidRefreshToken,
                _ => AuthError::TokenError(e),
            })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        // Sessions store the hashed JTI, not the token itself
        let jti_hash = sha256_hex(&claims.jti);

        let session: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, expires_at
            FROM user_sessions
            WHERE refresh_token_hash = $1 AND user_id = $2
            "#,
        )
        .bind(&jti_hash)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let session = session.ok_or(AuthError::SessionNotFound)?;

        if session.expires_at < Utc::now() {
            sqlx::query("DELETE FROM user_sessions WHERE id = $1")
                .bind(session.id)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::InvalidRefreshToken);
        }

        let user_active: Option<(bool,)> =
            sqlx::query_as("SELECT is_active FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        let (is_active,) = user_active.ok_or(AuthError::UserNotFound)?;
        if !is_active {
            return Err(AuthError::UserDisabled);
        }

        let new_tokens = self.generate_tokens(user_id)?;

        let now = Utc::now();
        let new_expires_at =
            now + chrono::Duration::seconds(self.jwt_config.refresh_token_expiry_secs);

        sqlx::query(
            r#"
            UPDATE user_sessions
            SET token_hash = $1, refresh_token_hash = $2, expires_at = $3, last_used_at = $4
            WHERE id = $5
            "#,
        )
        .bind(sha256_hex(&new_tokens.access_token_jti))
        .bind(sha256_hex(&new_tokens.refresh_token_jti))
        .bind(new_expires_at)
        .bind(now)
        .bind(session.id)
        .execute(&self.pool)
        .await?;

        Ok(RefreshResult {
            access_token: new_tokens.access_token,
            refresh_token: new_tokens.refresh_token,
            expires_in: self.access_token_expiry,
        })
    }

    fn generate_tokens(&self, user_id: Uuid) -> Result<TokenPair, AuthError> {
        let (access_token, access_jti) = self.jwt_config.generate_access_token(user_id)?;
        let (refresh_token, refresh_jti) = self.jwt_config.generate_refresh_token(user_id)?;

        Ok(TokenPair {
            access_token,
            access_token_jti: access_jti,
            refresh_token,
            refresh_token_jti: refresh_jti,
        })
    }

    async fn create_session(&self, user_id: Uuid, tokens: &TokenPair) -> Result<(), AuthError> {
        let session_id = Uuid::new_v4();
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(self.jwt_config.refresh_token_expiry_secs);

        sqlx::query(
            r#"
            INSERT INTO user_sessions (id, user_id, token_hash, refresh_token_hash, expires_at, created_at, last_used_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .bind(sha256_hex(&tokens.access_token_jti))
        .bind(sha256_hex(&tokens.refresh_token_jti))
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Validate password meets security requirements.
///
/// Requirements:
/// - Minimum 8 characters
/// - At least 1 uppercase letter
/// - At least 1 lowercase letter
/// - At least 1 digit
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < 8 {
        return Err(AuthError::WeakPassword(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one digit".to_string(),
        ));
    }

    Ok(())
}
