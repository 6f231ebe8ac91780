//! Back-office handlers: stats, users, leads, vendor moderation, review
//! moderation, and the audit trail.
//!
//! Every mutation is recorded in `activity_logs`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use sofra_core::capabilities::Capability;
use sofra_core::error::CoreError;
use sofra_core::roles::validate_role;
use sofra_core::types::DbId;
use sofra_core::vendor::VendorStatus;
use sofra_db::models::lead::UpdateLead;
use sofra_db::models::profile::{RoleCount, UpdateProfile};
use sofra_db::models::review::ReviewModerationCounts;
use sofra_db::repositories::{
    ActivityLogRepo, LeadRepo, ProfileRepo, QuoteRepo, ReviewRepo, VendorRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::authz::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for back-office listings.
const DEFAULT_LIMIT: i64 = 50;

/* --------------------------------------------------------------------------
Stats
-------------------------------------------------------------------------- */

/// Aggregate counts for the back-office dashboard.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub roles: Vec<RoleCount>,
    pub reviews: ReviewModerationCounts,
    pub lead_count: i64,
    pub quote_count: i64,
}

/// GET /api/v1/admin/stats
pub async fn stats(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ViewAdminStats)?;

    let roles = ProfileRepo::count_by_role(&state.pool).await?;
    let reviews = ReviewRepo::moderation_counts(&state.pool).await?;
    let lead_count = LeadRepo::count(&state.pool).await?;
    let quote_count = QuoteRepo::count(&state.pool).await?;

    Ok(Json(DataResponse::new(AdminStats {
        roles,
        reviews,
        lead_count,
        quote_count,
    })))
}

/* --------------------------------------------------------------------------
Users
-------------------------------------------------------------------------- */

/// Paging query for back-office listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let users = ProfileRepo::list(
        &state.pool,
        page.limit.unwrap_or(DEFAULT_LIMIT),
        page.offset.unwrap_or(0),
    )
    .await?;
    Ok(Json(DataResponse::new(users)))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    if let Some(role) = &input.role {
        validate_role(role).map_err(AppError::Core)?;
    }
    let profile = ProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;

    if let Err(e) =
        ActivityLogRepo::record(&state.pool, admin.profile_id, "user.update", "profiles", id)
            .await
    {
        tracing::error!(error = %e, "Failed to record activity log");
    }

    Ok(Json(DataResponse::new(
        sofra_db::models::profile::ProfileResponse::from(profile),
    )))
}

/* --------------------------------------------------------------------------
Leads
-------------------------------------------------------------------------- */

/// GET /api/v1/admin/leads
pub async fn list_leads(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let leads = LeadRepo::list(
        &state.pool,
        page.limit.unwrap_or(DEFAULT_LIMIT),
        page.offset.unwrap_or(0),
    )
    .await?;
    Ok(Json(DataResponse::new(leads)))
}

/// PUT /api/v1/admin/leads/{id}
pub async fn update_lead(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLead>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    if let Err(e) =
        ActivityLogRepo::record(&state.pool, admin.profile_id, "lead.update", "leads", id).await
    {
        tracing::error!(error = %e, "Failed to record activity log");
    }

    Ok(Json(DataResponse::new(lead)))
}

/// DELETE /api/v1/admin/leads/{id}
pub async fn delete_lead(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LeadRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Lead", id }));
    }

    if let Err(e) =
        ActivityLogRepo::record(&state.pool, admin.profile_id, "lead.delete", "leads", id).await
    {
        tracing::error!(error = %e, "Failed to record activity log");
    }

    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Vendors
-------------------------------------------------------------------------- */

/// GET /api/v1/admin/vendors
pub async fn list_vendors(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let vendors = VendorRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(vendors)))
}

/// Request body for a vendor status change.
#[derive(Debug, Deserialize)]
pub struct VendorStatusChange {
    pub status: String,
}

/// PUT /api/v1/admin/vendors/{id}/status
///
/// Moderate a vendor through the status table (approve / suspend /
/// re-approve). The transition is validated, then applied with an
/// optimistic guard.
pub async fn update_vendor_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VendorStatusChange>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageVendors)?;

    let target = VendorStatus::parse(&input.status).map_err(AppError::Core)?;

    let vendor = VendorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id,
        }))?;
    let current = VendorStatus::parse(&vendor.status).map_err(AppError::Core)?;
    current.ensure_transition(target).map_err(AppError::Core)?;

    let vendor = VendorRepo::update_status_guarded(
        &state.pool,
        id,
        current.as_str(),
        target.as_str(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Vendor status changed concurrently; reload and retry".into(),
        ))
    })?;

    tracing::info!(vendor_id = vendor.id, status = %vendor.status, "Vendor status changed");

    let action = format!("vendor.{}", target.as_str());
    if let Err(e) =
        ActivityLogRepo::record(&state.pool, admin.profile_id, &action, "vendors", id).await
    {
        tracing::error!(error = %e, "Failed to record activity log");
    }

    Ok(Json(DataResponse::new(vendor)))
}

/* --------------------------------------------------------------------------
Review moderation
-------------------------------------------------------------------------- */

/// Query parameters for the moderation queue.
#[derive(Debug, Deserialize)]
pub struct ModerationQuery {
    /// `pending` restricts the listing to unapproved reviews.
    pub status: Option<String>,
}

/// GET /api/v1/admin/reviews?status=
pub async fn list_reviews(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ModerationQuery>,
) -> AppResult<impl IntoResponse> {
    let pending_only = query.status.as_deref() == Some("pending");
    let reviews = ReviewRepo::list_admin(&state.pool, pending_only).await?;
    Ok(Json(DataResponse::new(reviews)))
}

/// Request body for a moderation decision.
#[derive(Debug, Deserialize)]
pub struct ModerationDecision {
    pub approve: bool,
}

/// PUT /api/v1/admin/reviews/{id}/moderate
pub async fn moderate_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ModerationDecision>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ModerateContent)?;

    let review = ReviewRepo::set_approved(&state.pool, id, input.approve)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    let action = if input.approve {
        "review.approve"
    } else {
        "review.reject"
    };
    if let Err(e) =
        ActivityLogRepo::record(&state.pool, admin.profile_id, action, "reviews", id).await
    {
        tracing::error!(error = %e, "Failed to record activity log");
    }

    tracing::info!(review_id = id, approve = input.approve, "Review moderated");

    Ok(Json(DataResponse::new(review)))
}

/// DELETE /api/v1/admin/reviews/{id}
pub async fn delete_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ModerateContent)?;

    if !ReviewRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }));
    }

    if let Err(e) =
        ActivityLogRepo::record(&state.pool, admin.profile_id, "review.delete", "reviews", id)
            .await
    {
        tracing::error!(error = %e, "Failed to record activity log");
    }

    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Audit trail
-------------------------------------------------------------------------- */

/// GET /api/v1/admin/activity
pub async fn list_activity(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let entries =
        ActivityLogRepo::list(&state.pool, page.limit.unwrap_or(DEFAULT_LIMIT)).await?;
    Ok(Json(DataResponse::new(entries)))
}
