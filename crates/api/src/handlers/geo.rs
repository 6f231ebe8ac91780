//! Geographic lookup handlers (public reads, admin CRUD).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sofra_core::capabilities::Capability;
use sofra_core::error::CoreError;
use sofra_core::types::DbId;
use sofra_db::models::geo::{UpsertCity, UpsertDistrict};
use sofra_db::repositories::GeoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::authz::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the district listing.
#[derive(Debug, Deserialize)]
pub struct DistrictQuery {
    pub city_id: Option<DbId>,
}

/// GET /api/v1/cities
pub async fn list_cities(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cities = GeoRepo::list_cities(&state.pool).await?;
    Ok(Json(DataResponse::new(cities)))
}

/// GET /api/v1/districts?city_id=
pub async fn list_districts(
    State(state): State<AppState>,
    Query(query): Query<DistrictQuery>,
) -> AppResult<impl IntoResponse> {
    let districts = GeoRepo::list_districts(&state.pool, query.city_id).await?;
    Ok(Json(DataResponse::new(districts)))
}

/// POST /api/v1/admin/cities
pub async fn create_city(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertCity>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageGeo)?;

    let city = GeoRepo::create_city(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(city))))
}

/// PUT /api/v1/admin/cities/{id}
pub async fn update_city(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpsertCity>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageGeo)?;

    let city = GeoRepo::update_city(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "City", id }))?;
    Ok(Json(DataResponse::new(city)))
}

/// DELETE /api/v1/admin/cities/{id}
pub async fn delete_city(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageGeo)?;

    if !GeoRepo::delete_city(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "City", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/districts
pub async fn create_district(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertDistrict>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageGeo)?;

    let district = GeoRepo::create_district(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(district))))
}

/// PUT /api/v1/admin/districts/{id}
pub async fn update_district(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpsertDistrict>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageGeo)?;

    let district = GeoRepo::update_district(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "District",
            id,
        }))?;
    Ok(Json(DataResponse::new(district)))
}

/// DELETE /api/v1/admin/districts/{id}
pub async fn delete_district(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageGeo)?;

    if !GeoRepo::delete_district(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "District",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
