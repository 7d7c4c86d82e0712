//! Authentication routes for user registration, login, and token management.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::user::UserProfile;
use persistence::repositories::UserRepository;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::{AuthError, AuthService};

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// User's password (min 8 chars, 1 upper, 1 lower, 1 digit)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// User's display name
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,

    /// Optional self-assessed padel level (1.0-7.0)
    #[validate(custom(function = "shared::validation::validate_level"))]
    pub level: Option<f64>,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// User information in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Token information in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Response body for successful registration or login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

fn map_auth_error(e: AuthError) -> ApiError {
    match e {
        AuthError::EmailAlreadyExists => ApiError::Conflict("Email already registered".to_string()),
        AuthError::WeakPassword(msg) => ApiError::Validation(msg),
        AuthError::InvalidCredentials => {
            ApiError::Unauthorized("Invalid email or password".to_string())
        }
        AuthError::UserDisabled => ApiError::Forbidden("Account is disabled".to_string()),
        AuthError::UserNotFound => ApiError::Unauthorized("Invalid credentials".to_string()),
        AuthError::InvalidRefreshToken | AuthError::SessionNotFound => {
            ApiError::Unauthorized("Invalid or expired refresh token".to_string())
        }
        AuthError::DatabaseError(db_err) => ApiError::from(db_err),
        AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
        AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
        AuthError::Internal(msg) => ApiError::Internal(msg),
    }
}

/// Register a new user with email and password.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .register(
            &request.email,
            &request.password,
            &request.display_name,
            request.level,
        )
        .await
        .map_err(map_auth_error)?;

    info!(user_id = %result.user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse {
                id: result.user_id.to_string(),
                email: result.email,
                display_name: result.display_name,
            },
            tokens: TokensResponse {
                access_token: result.access_token,
                refresh_token: result.refresh_token,
                token_type: "Bearer".to_string(),
                expires_in: result.access_token_expires_in,
            },
        }),
    ))
}

/// Login with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .login(&request.email, &request.password)
        .await
        .map_err(map_auth_error)?;

    info!(user_id = %result.user_id, "User logged in");

    Ok(Json(AuthResponse {
        user: UserResponse {
            id: result.user_id.to_string(),
            email: result.email,
            display_name: result.display_name,
        },
        tokens: TokensResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: result.access_token_expires_in,
        },
    }))
}

/// Exchange a refresh token for a new token pair.
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokensResponse>, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)
        .map_err(|e| ApiError::Internal(format!("Failed to initialize auth service: {}", e)))?;

    let result = auth_service
        .refresh(&request.refresh_token)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(TokensResponse {
        access_token: result.access_token,
        refresh_token: result.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: result.expires_in,
    }))
}

/// Get the current user's profile.
///
/// GET /api/v1/auth/me
///
/// Requires JWT authentication.
pub async fn me(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<UserProfile>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let user: domain::models::User = repo
        .find_by_id(user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    Ok(Json(UserProfile {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
        credits: user.credits,
        level: user.level,
        created_at: user.created_at,
    }))
}
