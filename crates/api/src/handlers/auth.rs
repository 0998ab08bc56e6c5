//! Handlers for account and session endpoints (register, login, refresh,
//! logout, password reset and change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pulse_core::error::CoreError;
use pulse_core::member::{validate_email, validate_name};
use pulse_core::types::DbId;
use pulse_db::models::password_reset::CreatePasswordReset;
use pulse_db::models::session::NewSession;
use pulse_db::models::user::{CreateUser, User, UserResponse};
use pulse_db::repositories::{MemberRepo, PasswordResetRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_token};
use crate::auth::password::{hash_password, verify_password, PasswordPolicy};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Returned for every bad reset attempt so callers cannot probe which part failed.
const INVALID_RESET_TOKEN: &str = "Invalid or expired password reset token";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Request body for `POST /update-password`.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Successful authentication payload returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Payload of `forgot-password` when token exposure is enabled.
#[derive(Debug, Serialize)]
pub struct ResetTokenResponse {
    pub reset_token: String,
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/register
///
/// Create an account and its linked member, then sign the user in.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let name = validate_name(&input.name)?;
    let email = validate_email(&input.email)?;
    password_policy(&state).check(&input.password, &input.password_confirmation)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)?;

    let (user, member) = UserRepo::create_with_member(
        &state.pool,
        &CreateUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, member_id = member.id, "User registered");

    let response = create_auth_response(&state, &user, Some(member.id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User registered successfully",
            response,
        )),
    ))
}

/// POST /api/v1/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let email = input.email.trim().to_lowercase();
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let member_id = linked_member_id(&state, user.id).await?;
    let response = create_auth_response(&state, &user, member_id).await?;
    Ok(Json(ApiResponse::with_message("Login successful", response)))
}

/// POST /api/v1/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    // The presented token is spent whether or not the rest succeeds.
    let user_id = SessionRepo::consume(&state.pool, &hash_token(&input.refresh_token))
        .await?
        .ok_or_else(invalid)?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let member_id = linked_member_id(&state, user.id).await?;
    let response = create_auth_response(&state, &user, member_id).await?;
    Ok(Json(ApiResponse::data(response)))
}

/// POST /api/v1/logout
///
/// Revoke all refresh sessions of the authenticated user.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(Json(ApiResponse::message("Logged out successfully")))
}

/// POST /api/v1/forgot-password
///
/// Always answers success. When the account exists a reset token is issued.
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(input): AppJson<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<ResetTokenResponse>>> {
    const MESSAGE: &str = "If that email is registered, a password reset link has been issued";

    let email = validate_email(&input.email)?;
    let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? else {
        return Ok(Json(ApiResponse {
            status: "success",
            message: Some(MESSAGE.into()),
            data: None,
        }));
    };

    let (plaintext, token_hash) = generate_opaque_token();
    let expiry_mins = state.config.auth.reset_token_expiry_mins;
    PasswordResetRepo::create(
        &state.pool,
        &CreatePasswordReset {
            user_id: user.id,
            token_hash,
            expires_at: Utc::now() + chrono::Duration::minutes(expiry_mins),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "Password reset token issued");

    let data = state
        .config
        .auth
        .expose_reset_token
        .then(|| ResetTokenResponse {
            reset_token: plaintext,
            expires_in: expiry_mins * 60,
        });

    Ok(Json(ApiResponse {
        status: "success",
        message: Some(MESSAGE.into()),
        data,
    }))
}

/// POST /api/v1/reset-password
///
/// Consume a reset token, set the new password and revoke every session.
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    password_policy(&state).check(&input.password, &input.password_confirmation)?;

    let invalid = || AppError::Core(CoreError::Validation(INVALID_RESET_TOKEN.into()));

    let email = input.email.trim().to_lowercase();
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let reset = PasswordResetRepo::find_active(&state.pool, user.id, &hash_token(&input.token))
        .await?
        .ok_or_else(invalid)?;
    let password_hash = hash_password(&input.password)?;
    if !PasswordResetRepo::redeem(&state.pool, &reset, &password_hash).await? {
        return Err(invalid());
    }
    tracing::info!(user_id = user.id, "Password reset completed");

    Ok(Json(ApiResponse::message("Password has been reset")))
}

/// POST /api/v1/update-password
///
/// Change the password of the authenticated user after verifying the current one.
pub async fn update_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<UpdatePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let current_ok = verify_password(&input.current_password, &user.password_hash)?;
    if !current_ok {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    password_policy(&state).check(&input.password, &input.password_confirmation)?;

    let password_hash = hash_password(&input.password)?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    tracing::info!(user_id = user.id, "Password updated");

    Ok(Json(ApiResponse::message("Password updated successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn password_policy(state: &AppState) -> PasswordPolicy {
    PasswordPolicy {
        min_length: state.config.auth.min_password_length,
    }
}

async fn linked_member_id(state: &AppState, user_id: DbId) -> AppResult<Option<DbId>> {
    Ok(MemberRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .map(|m| m.id))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    member_id: Option<DbId>,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.name, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_opaque_token();
    SessionRepo::issue(
        &state.pool,
        &NewSession {
            user_id: user.id,
            token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        token_type: "Bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserResponse::new(user, member_id),
    })
}
