//! Review handlers: creation, listing, votes, and vendor replies.
//!
//! Reviews are created unapproved; the moderation gate lives in the admin
//! handlers. Votes and replies are only accepted on approved reviews.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sofra_core::capabilities::Capability;
use sofra_core::email::EmailCategory;
use sofra_core::error::CoreError;
use sofra_core::review::{validate_comment, validate_rating, validate_reply};
use sofra_core::types::DbId;
use sofra_core::vendor::VendorStatus;
use sofra_db::models::review::{CastVote, CreateReview, Review, ReviewFilter, VendorReply};
use sofra_db::repositories::{ProfileRepo, ReviewRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::Recipient;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a review that is approved and not deleted, or fail with the
/// appropriate error.
async fn find_approved_review(pool: &sqlx::PgPool, id: DbId) -> AppResult<Review> {
    let review = ReviewRepo::find_by_id(pool, id)
        .await?
        .filter(|r| !r.is_deleted)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;
    if !review.is_approved {
        return Err(AppError::Core(CoreError::Conflict(
            "Review is awaiting moderation".into(),
        )));
    }
    Ok(review)
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /api/v1/reviews?vendor_id=&rating=&sort=&limit=&offset=
///
/// Public listing of approved reviews for a vendor.
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(filter): Query<ReviewFilter>,
) -> AppResult<impl IntoResponse> {
    if let Some(rating) = filter.rating {
        validate_rating(rating).map_err(AppError::Core)?;
    }
    let reviews = ReviewRepo::list_public(&state.pool, &filter).await?;
    Ok(Json(DataResponse::new(reviews)))
}

/// POST /api/v1/reviews
///
/// Create a pending review. One non-deleted review per (vendor, customer);
/// a duplicate is rejected with a conflict before any write.
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::SubmitReview)?;
    validate_rating(input.rating).map_err(AppError::Core)?;
    validate_comment(&input.comment).map_err(AppError::Core)?;

    let vendor = VendorRepo::find_by_id(&state.pool, input.vendor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id: input.vendor_id,
        }))?;
    let status = VendorStatus::parse(&vendor.status).map_err(AppError::Core)?;
    if !status.is_public() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id: input.vendor_id,
        }));
    }

    if ReviewRepo::exists_non_deleted(&state.pool, input.vendor_id, auth.profile_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already reviewed this vendor".into(),
        )));
    }

    // A concurrent duplicate still lands on uq_reviews_vendor_customer -> 409.
    let review = ReviewRepo::create(&state.pool, auth.profile_id, &input).await?;

    tracing::info!(
        review_id = review.id,
        vendor_id = review.vendor_id,
        rating = review.rating,
        "Review submitted for moderation"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(review))))
}

/// POST /api/v1/reviews/{id}/vote
///
/// Upsert a helpfulness vote; the latest submission wins. Approved
/// reviews only.
pub async fn cast_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CastVote>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::VoteOnReview)?;
    find_approved_review(&state.pool, id).await?;

    let vote = ReviewRepo::upsert_vote(&state.pool, id, auth.profile_id, input.is_helpful).await?;
    Ok(Json(DataResponse::new(vote)))
}

/// DELETE /api/v1/reviews/{id}/vote
///
/// Withdraw the caller's vote.
pub async fn delete_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::VoteOnReview)?;
    find_approved_review(&state.pool, id).await?;

    ReviewRepo::delete_vote(&state.pool, id, auth.profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reviews/{id}/reply
///
/// Vendor reply to an approved review of their own business. Notifies the
/// review author.
pub async fn reply(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VendorReply>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::ReplyToReview)?;
    validate_reply(&input.reply).map_err(AppError::Core)?;

    let review = find_approved_review(&state.pool, id).await?;

    let vendor = VendorRepo::find_by_owner(&state.pool, auth.profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id: auth.profile_id,
        }))?;
    if review.vendor_id != vendor.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Reviews of other businesses cannot be replied to".into(),
        )));
    }

    let review = ReviewRepo::set_reply(&state.pool, id, &input.reply)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    tracing::info!(review_id = review.id, vendor_id = vendor.id, "Review reply posted");

    // Best-effort author notification.
    if let Ok(Some(author)) =
        ProfileRepo::find_by_id(&state.pool, review.customer_profile_id).await
    {
        let detail = format!("{} replied to your review", vendor.business_name);
        state
            .mailer
            .dispatch(
                &state.pool,
                Recipient {
                    profile_id: Some(author.id),
                    email: &author.email,
                    name: &author.full_name,
                },
                EmailCategory::ReviewReply,
                &detail,
            )
            .await;
    }

    Ok(Json(DataResponse::new(review)))
}

/// DELETE /api/v1/reviews/{id}/reply
///
/// Remove the vendor's own reply.
pub async fn delete_reply(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::ReplyToReview)?;

    let review = find_approved_review(&state.pool, id).await?;

    let vendor = VendorRepo::find_by_owner(&state.pool, auth.profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id: auth.profile_id,
        }))?;
    if review.vendor_id != vendor.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Reviews of other businesses cannot be replied to".into(),
        )));
    }

    ReviewRepo::clear_reply(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
