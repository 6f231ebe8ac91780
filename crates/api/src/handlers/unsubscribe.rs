//! Signed-token unsubscribe handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sofra_core::email::UnsubscribeScope;
use sofra_core::error::CoreError;
use sofra_core::unsubscribe::verify_token;
use sofra_db::repositories::{NotificationPreferenceRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /unsubscribe`.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeQuery {
    pub token: String,
}

/// GET /api/v1/unsubscribe?token=
///
/// Verify the HMAC-signed token and disable the encoded email category for
/// the encoded profile. The `all` scope disables every category. Any byte
/// of tampering or an expired token is rejected with 400 `INVALID_TOKEN`.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Query(query): Query<UnsubscribeQuery>,
) -> AppResult<impl IntoResponse> {
    let token = verify_token(
        &query.token,
        chrono::Utc::now().timestamp(),
        state.config.unsubscribe_secret.as_bytes(),
    )?;

    // The profile must still exist; tokens can outlive accounts.
    ProfileRepo::find_by_id(&state.pool, token.profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: token.profile_id,
        }))?;

    match token.scope {
        UnsubscribeScope::Category(category) => {
            NotificationPreferenceRepo::upsert(
                &state.pool,
                token.profile_id,
                category.as_str(),
                false,
            )
            .await?;
        }
        UnsubscribeScope::All => {
            NotificationPreferenceRepo::disable_all(&state.pool, token.profile_id).await?;
        }
    }

    tracing::info!(
        profile_id = token.profile_id,
        scope = token.scope.as_str(),
        "Unsubscribe applied"
    );

    Ok(Json(DataResponse::new(serde_json::json!({
        "unsubscribed": token.scope.as_str(),
    }))))
}
