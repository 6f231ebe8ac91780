//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use sofra_core::error::CoreError;
use sofra_core::lead::validate_email;
use sofra_core::roles::{validate_role, ROLE_ADMIN};
use sofra_core::types::DbId;
use sofra_db::models::profile::{CreateProfile, ProfileResponse};
use sofra_db::repositories::ProfileRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub profile: ProfileInfo,
}

/// Public profile info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

/// POST /api/v1/auth/register
///
/// Create an account. `admin` cannot be self-assigned; back-office accounts
/// are provisioned directly in the database.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateProfile>,
) -> AppResult<impl IntoResponse> {
    validate_email(&input.email).map_err(AppError::Core)?;
    validate_role(&input.role).map_err(AppError::Core)?;
    if input.role == ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin accounts cannot be self-registered".into(),
        )));
    }
    if input.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("full_name must not be empty".into()));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A duplicate email surfaces as a 409 via the uq_profiles_email constraint.
    let profile = ProfileRepo::create(
        &state.pool,
        &input.email,
        &password_hash,
        input.full_name.trim(),
        input.phone.as_deref(),
        &input.role,
    )
    .await?;

    let access_token = generate_access_token(profile.id, &profile.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(profile_id = profile.id, role = %profile.role, "Profile registered");

    let response = AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        profile: ProfileInfo {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role,
        },
    };
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let profile = ProfileRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let access_token = generate_access_token(profile.id, &profile.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(profile_id = profile.id, "Login succeeded");

    Ok(Json(DataResponse::new(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        profile: ProfileInfo {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role,
        },
    })))
}

/// GET /api/v1/auth/me
///
/// The authenticated caller's own profile.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.profile_id,
        }))?;
    Ok(Json(DataResponse::new(profile.into())))
}
