//! Repository for the `messages` table and conversation aggregates.
//!
//! Thread aggregation (last-message preview, unread counts, inbox ordering)
//! is computed here in SQL; handlers only authorize participation and shape
//! the response.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{ConversationSummary, Message};

/// Column list for `messages` queries.
const COLUMNS: &str = "id, vendor_lead_id, sender_profile_id, sender_type, content, \
    is_read, created_at";

/// Default page size for a thread fetch.
const DEFAULT_LIMIT: i64 = 50;

/// Provides operations for conversation messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message to a thread.
    pub async fn create(
        pool: &PgPool,
        vendor_lead_id: DbId,
        sender_profile_id: DbId,
        sender_type: &str,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (vendor_lead_id, sender_profile_id, sender_type, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(vendor_lead_id)
            .bind(sender_profile_id)
            .bind(sender_type)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List a thread's messages, oldest first.
    pub async fn list_thread(
        pool: &PgPool,
        vendor_lead_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE vendor_lead_id = $1 \
             ORDER BY created_at, id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(vendor_lead_id)
            .bind(limit.unwrap_or(DEFAULT_LIMIT))
            .bind(offset.unwrap_or(0))
            .fetch_all(pool)
            .await
    }

    /// Mark the counterpart's messages in a thread as read.
    ///
    /// Only messages NOT sent by `reader_profile_id` flip; a caller can
    /// never mark their own outbound messages. Returns the flipped count.
    pub async fn mark_read(
        pool: &PgPool,
        vendor_lead_id: DbId,
        reader_profile_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true \
             WHERE vendor_lead_id = $1 AND sender_profile_id <> $2 AND NOT is_read",
        )
        .bind(vendor_lead_id)
        .bind(reader_profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Total unread messages addressed to a profile across all its threads.
    pub async fn unread_count(pool: &PgPool, profile_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages m \
             JOIN vendor_leads vl ON vl.id = m.vendor_lead_id \
             JOIN leads l ON l.id = vl.lead_id \
             JOIN vendors v ON v.id = vl.vendor_id \
             WHERE NOT m.is_read \
               AND m.sender_profile_id <> $1 \
               AND (l.customer_profile_id = $1 OR v.owner_profile_id = $1)",
        )
        .bind(profile_id)
        .fetch_one(pool)
        .await
    }

    /// The caller's inbox: every thread they participate in, with the
    /// last-message preview and unread count, most recent activity first.
    pub async fn conversations(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        sqlx::query_as::<_, ConversationSummary>(
            "SELECT vl.id AS vendor_lead_id, vl.lead_id, vl.vendor_id, \
                    v.business_name, l.customer_name, \
                    lm.content AS last_message, lm.created_at AS last_message_at, \
                    COALESCE(uc.unread_count, 0) AS unread_count \
             FROM vendor_leads vl \
             JOIN leads l ON l.id = vl.lead_id \
             JOIN vendors v ON v.id = vl.vendor_id \
             LEFT JOIN LATERAL ( \
                 SELECT content, created_at FROM messages \
                 WHERE vendor_lead_id = vl.id \
                 ORDER BY created_at DESC, id DESC LIMIT 1 \
             ) lm ON true \
             LEFT JOIN LATERAL ( \
                 SELECT COUNT(*) AS unread_count FROM messages \
                 WHERE vendor_lead_id = vl.id \
                   AND NOT is_read AND sender_profile_id <> $1 \
             ) uc ON true \
             WHERE l.customer_profile_id = $1 OR v.owner_profile_id = $1 \
             ORDER BY lm.created_at DESC NULLS LAST, vl.id DESC",
        )
        .bind(profile_id)
        .fetch_all(pool)
        .await
    }
}
