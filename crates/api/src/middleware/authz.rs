//! Capability-based authorization extractors.
//!
//! Each extractor wraps [`AuthUser`] and performs its capability check once,
//! against the policy table in `sofra_core::capabilities`, before the
//! handler body runs. Handlers never compare role strings themselves.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sofra_core::capabilities::Capability;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the back-office capability set. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin is guaranteed to hold ManageUsers here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Capability::ManageUsers)?;
        Ok(RequireAdmin(user))
    }
}

/// Requires the quote-sending capability (vendor owners).
pub struct RequireVendorOwner(pub AuthUser);

impl FromRequestParts<AppState> for RequireVendorOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Capability::SendQuote)?;
        Ok(RequireVendorOwner(user))
    }
}
