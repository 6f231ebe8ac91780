//! Route definitions for reviews, votes, and replies.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Review routes, nested under `/reviews`.
///
/// ```text
/// GET    /                 list_reviews (public)
/// POST   /                 create_review (customer)
/// POST   /{id}/vote        cast_vote
/// DELETE /{id}/vote        delete_vote
/// POST   /{id}/reply       reply (vendor owner)
/// DELETE /{id}/reply       delete_reply (vendor owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route(
            "/{id}/vote",
            post(reviews::cast_vote).delete(reviews::delete_vote),
        )
        .route(
            "/{id}/reply",
            post(reviews::reply).delete(reviews::delete_reply),
        )
}
