//! Blog content handlers (public reads, admin CRUD).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sofra_core::capabilities::Capability;
use sofra_core::error::CoreError;
use sofra_core::types::DbId;
use sofra_core::vendor::validate_slug;
use sofra_db::models::blog_post::{CreateBlogPost, UpdateBlogPost};
use sofra_db::repositories::BlogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::authz::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/blog
pub async fn list_posts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = BlogRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse::new(posts)))
}

/// GET /api/v1/blog/{slug}
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post with slug '{slug}'")))?;
    Ok(Json(DataResponse::new(post)))
}

/// GET /api/v1/admin/blog
pub async fn list_all_posts(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageBlog)?;

    let posts = BlogRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(posts)))
}

/// POST /api/v1/admin/blog
pub async fn create_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageBlog)?;

    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    validate_slug(&input.slug).map_err(AppError::Core)?;

    let post = BlogRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(post))))
}

/// PUT /api/v1/admin/blog/{id}
pub async fn update_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageBlog)?;

    if let Some(slug) = &input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }
    let post = BlogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;
    Ok(Json(DataResponse::new(post)))
}

/// DELETE /api/v1/admin/blog/{id}
pub async fn delete_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    admin.require(Capability::ManageBlog)?;

    if !BlogRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
