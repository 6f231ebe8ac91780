//! In-app notification feed and email preference handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sofra_core::email::EmailCategory;
use sofra_db::models::notification::UpdatePreference;
use sofra_db::repositories::{NotificationPreferenceRepo, NotificationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the notification feed.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/notifications
///
/// The caller's in-app notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<impl IntoResponse> {
    let notifications =
        NotificationRepo::list_for_profile(&state.pool, auth.profile_id, query.limit).await?;
    Ok(Json(DataResponse::new(notifications)))
}

/// POST /api/v1/notifications/read
///
/// Mark all of the caller's notifications read.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::mark_all_read(&state.pool, auth.profile_id).await?;
    Ok(Json(DataResponse::new(
        serde_json::json!({ "marked_read": updated }),
    )))
}

/// GET /api/v1/notifications/unread
///
/// The caller's unread notification count.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::unread_count(&state.pool, auth.profile_id).await?;
    Ok(Json(DataResponse::new(
        serde_json::json!({ "unread": count }),
    )))
}

/// GET /api/v1/notification-preferences
///
/// The caller's stored email preferences. Categories with no row are
/// enabled by default and simply absent here.
pub async fn list_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let prefs =
        NotificationPreferenceRepo::list_for_profile(&state.pool, auth.profile_id).await?;
    Ok(Json(DataResponse::new(prefs)))
}

/// PUT /api/v1/notification-preferences
///
/// Set one category preference.
pub async fn update_preference(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdatePreference>,
) -> AppResult<impl IntoResponse> {
    let category = EmailCategory::parse(&input.category).map_err(AppError::Core)?;
    let pref = NotificationPreferenceRepo::upsert(
        &state.pool,
        auth.profile_id,
        category.as_str(),
        input.is_enabled,
    )
    .await?;
    Ok(Json(DataResponse::new(pref)))
}
