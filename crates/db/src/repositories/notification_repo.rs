//! Repository for the `notifications` table (in-app).

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, profile_id, kind, body, is_read, created_at";

/// Default page size for the notification feed.
const DEFAULT_LIMIT: i64 = 50;

/// Provides operations for in-app notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification for a profile.
    pub async fn create(
        pool: &PgPool,
        profile_id: DbId,
        kind: &str,
        body: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (profile_id, kind, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(profile_id)
            .bind(kind)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// List a profile's notifications, newest first.
    pub async fn list_for_profile(
        pool: &PgPool,
        profile_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE profile_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(profile_id)
            .bind(limit.unwrap_or(DEFAULT_LIMIT))
            .fetch_all(pool)
            .await
    }

    /// Mark all of a profile's notifications read. Returns the flipped count.
    pub async fn mark_all_read(pool: &PgPool, profile_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true WHERE profile_id = $1 AND NOT is_read",
        )
        .bind(profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count a profile's unread notifications.
    pub async fn unread_count(pool: &PgPool, profile_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE profile_id = $1 AND NOT is_read",
        )
        .bind(profile_id)
        .fetch_one(pool)
        .await
    }
}
