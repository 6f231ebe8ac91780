//! Review entity model, votes, and DTOs.

use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `reviews` table.
///
/// Reviews are created unapproved and pass a moderation gate before they
/// are publicly visible or accept votes and replies.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub vendor_id: DbId,
    pub customer_profile_id: DbId,
    pub rating: i32,
    pub comment: String,
    pub is_approved: bool,
    pub is_deleted: bool,
    pub vendor_reply: Option<String>,
    pub vendor_reply_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A public review with vote tallies.
#[derive(Debug, FromRow, Serialize)]
pub struct ReviewWithVotes {
    pub id: DbId,
    pub vendor_id: DbId,
    pub rating: i32,
    pub comment: String,
    pub vendor_reply: Option<String>,
    pub vendor_reply_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub helpful_count: i64,
    pub not_helpful_count: i64,
}

/// DTO for creating a review.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub vendor_id: DbId,
    pub rating: i32,
    pub comment: String,
}

/// Query parameters for the public review listing.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewFilter {
    pub vendor_id: DbId,
    /// Exact star rating filter.
    pub rating: Option<i32>,
    /// `newest` (default), `oldest`, `rating_high`, `rating_low`.
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A row from the `review_votes` table; upserted on (review_id, profile_id).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewVote {
    pub id: DbId,
    pub review_id: DbId,
    pub profile_id: DbId,
    pub is_helpful: bool,
    pub created_at: Timestamp,
}

/// DTO for casting a vote.
#[derive(Debug, Deserialize)]
pub struct CastVote {
    pub is_helpful: bool,
}

/// DTO for a vendor reply.
#[derive(Debug, Deserialize)]
pub struct VendorReply {
    pub reply: String,
}

/// Moderation outcome counts for the back-office stats page.
#[derive(Debug, FromRow, Serialize)]
pub struct ReviewModerationCounts {
    pub pending: i64,
    pub approved: i64,
}
