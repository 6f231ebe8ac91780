//! Vendor listing and registration handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sofra_core::error::CoreError;
use sofra_core::vendor::{compute_badges, validate_slug};
use sofra_db::models::vendor::{CreateVendor, VendorFilter, VendorPublic};
use sofra_db::repositories::VendorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::authz::RequireVendorOwner;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/vendors
///
/// Public listing of approved vendors with optional filters.
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(filter): Query<VendorFilter>,
) -> AppResult<impl IntoResponse> {
    let vendors = VendorRepo::list_public(&state.pool, &filter).await?;
    Ok(Json(DataResponse::new(vendors)))
}

/// GET /api/v1/vendors/{slug}
///
/// Public profile of an approved vendor, with rating stats and badges.
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let vendor = VendorRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No approved vendor with slug '{slug}'")))?;

    let stats = VendorRepo::stats(&state.pool, vendor.id).await?;
    let badges = compute_badges(
        stats.avg_rating.unwrap_or(0.0),
        stats.review_count,
        stats.won_lead_count,
    );

    Ok(Json(DataResponse::new(VendorPublic {
        vendor,
        avg_rating: stats.avg_rating,
        review_count: stats.review_count,
        badges,
    })))
}

/// POST /api/v1/vendors
///
/// Register a vendor business for the authenticated owner. One business
/// per owner; the new listing starts in `pending` until approved.
pub async fn create_vendor(
    RequireVendorOwner(auth): RequireVendorOwner,
    State(state): State<AppState>,
    Json(input): Json<CreateVendor>,
) -> AppResult<impl IntoResponse> {
    if input.business_name.trim().is_empty() {
        return Err(AppError::BadRequest("business_name must not be empty".into()));
    }
    validate_slug(&input.slug).map_err(AppError::Core)?;

    // Duplicate slug or second business both surface as 409 via uq_ constraints.
    let vendor = VendorRepo::create(&state.pool, auth.profile_id, &input).await?;

    tracing::info!(
        vendor_id = vendor.id,
        owner_profile_id = auth.profile_id,
        "Vendor registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(vendor))))
}

/// GET /api/v1/vendors/me
///
/// The authenticated owner's own vendor, regardless of status.
pub async fn my_vendor(
    RequireVendorOwner(auth): RequireVendorOwner,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let vendor = VendorRepo::find_by_owner(&state.pool, auth.profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id: auth.profile_id,
        }))?;
    Ok(Json(DataResponse::new(vendor)))
}
