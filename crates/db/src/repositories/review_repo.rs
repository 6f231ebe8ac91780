//! Repository for the `reviews` and `review_votes` tables.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{
    CreateReview, Review, ReviewFilter, ReviewModerationCounts, ReviewVote, ReviewWithVotes,
};

/// Column list for `reviews` queries.
const COLUMNS: &str = "id, vendor_id, customer_profile_id, rating, comment, is_approved, \
    is_deleted, vendor_reply, vendor_reply_at, created_at, updated_at";

/// Column list for `review_votes` queries.
const VOTE_COLUMNS: &str = "id, review_id, profile_id, is_helpful, created_at";

/// Default page size for the public listing.
const DEFAULT_LIMIT: i64 = 20;

/// Provides operations for reviews and votes.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Whether the customer already holds a non-deleted review for the vendor.
    pub async fn exists_non_deleted(
        pool: &PgPool,
        vendor_id: DbId,
        customer_profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM reviews \
                WHERE vendor_id = $1 AND customer_profile_id = $2 AND NOT is_deleted)",
        )
        .bind(vendor_id)
        .bind(customer_profile_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a review in the unapproved state.
    pub async fn create(
        pool: &PgPool,
        customer_profile_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (vendor_id, customer_profile_id, rating, comment) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.vendor_id)
            .bind(customer_profile_id)
            .bind(input.rating)
            .bind(input.comment.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a review by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: approved, non-deleted reviews with vote tallies.
    ///
    /// The sort key is resolved from a closed set in Rust; user input never
    /// reaches the ORDER BY clause directly.
    pub async fn list_public(
        pool: &PgPool,
        filter: &ReviewFilter,
    ) -> Result<Vec<ReviewWithVotes>, sqlx::Error> {
        let order_by = match filter.sort.as_deref() {
            Some("oldest") => "r.created_at ASC",
            Some("rating_high") => "r.rating DESC, r.created_at DESC",
            Some("rating_low") => "r.rating ASC, r.created_at DESC",
            _ => "r.created_at DESC",
        };
        let query = format!(
            "SELECT r.id, r.vendor_id, r.rating, r.comment, r.vendor_reply, \
                    r.vendor_reply_at, r.created_at, \
                    COUNT(*) FILTER (WHERE v.is_helpful) AS helpful_count, \
                    COUNT(*) FILTER (WHERE NOT v.is_helpful) AS not_helpful_count \
             FROM reviews r \
             LEFT JOIN review_votes v ON v.review_id = r.id \
             WHERE r.vendor_id = $1 AND r.is_approved AND NOT r.is_deleted \
               AND ($2::int IS NULL OR r.rating = $2) \
             GROUP BY r.id \
             ORDER BY {order_by} \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ReviewWithVotes>(&query)
            .bind(filter.vendor_id)
            .bind(filter.rating)
            .bind(filter.limit.unwrap_or(DEFAULT_LIMIT))
            .bind(filter.offset.unwrap_or(0))
            .fetch_all(pool)
            .await
    }

    /// Back-office listing, optionally restricted to the moderation queue.
    pub async fn list_admin(
        pool: &PgPool,
        pending_only: bool,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE NOT is_deleted AND (NOT $1 OR NOT is_approved) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(pending_only)
            .fetch_all(pool)
            .await
    }

    /// Flip the moderation gate.
    pub async fn set_approved(
        pool: &PgPool,
        id: DbId,
        approved: bool,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET is_approved = $2, updated_at = NOW() \
             WHERE id = $1 AND NOT is_deleted \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(approved)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a review (explicit back-office action).
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reviews SET is_deleted = true, updated_at = NOW() \
             WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store the vendor's reply.
    pub async fn set_reply(
        pool: &PgPool,
        id: DbId,
        reply: &str,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET vendor_reply = $2, vendor_reply_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(reply.trim())
            .fetch_optional(pool)
            .await
    }

    /// Remove the vendor's reply.
    pub async fn clear_reply(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET vendor_reply = NULL, vendor_reply_at = NULL, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a helpfulness vote; the latest submission wins.
    pub async fn upsert_vote(
        pool: &PgPool,
        review_id: DbId,
        profile_id: DbId,
        is_helpful: bool,
    ) -> Result<ReviewVote, sqlx::Error> {
        let query = format!(
            "INSERT INTO review_votes (review_id, profile_id, is_helpful) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (review_id, profile_id) DO UPDATE SET \
                is_helpful = EXCLUDED.is_helpful \
             RETURNING {VOTE_COLUMNS}"
        );
        sqlx::query_as::<_, ReviewVote>(&query)
            .bind(review_id)
            .bind(profile_id)
            .bind(is_helpful)
            .fetch_one(pool)
            .await
    }

    /// Withdraw a vote.
    pub async fn delete_vote(
        pool: &PgPool,
        review_id: DbId,
        profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM review_votes WHERE review_id = $1 AND profile_id = $2")
                .bind(review_id)
                .bind(profile_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Pending/approved counts for the back-office stats page.
    pub async fn moderation_counts(pool: &PgPool) -> Result<ReviewModerationCounts, sqlx::Error> {
        sqlx::query_as::<_, ReviewModerationCounts>(
            "SELECT \
                COUNT(*) FILTER (WHERE NOT is_approved) AS pending, \
                COUNT(*) FILTER (WHERE is_approved) AS approved \
             FROM reviews WHERE NOT is_deleted",
        )
        .fetch_one(pool)
        .await
    }
}
