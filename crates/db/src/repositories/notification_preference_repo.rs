//! Repository for the `notification_preferences` table.
//!
//! Preferences are opt-out: a missing row for a category means the category
//! is enabled for that profile.

use sofra_core::email::ALL_CATEGORIES;
use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::NotificationPreference;

/// Column list for `notification_preferences` queries.
const COLUMNS: &str = "id, profile_id, category, is_enabled, created_at, updated_at";

/// Provides operations for notification preferences.
pub struct NotificationPreferenceRepo;

impl NotificationPreferenceRepo {
    /// List all stored preferences for a profile.
    pub async fn list_for_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_preferences \
             WHERE profile_id = $1 \
             ORDER BY category"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(profile_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a category is enabled for a profile. Missing row = enabled.
    pub async fn is_enabled(
        pool: &PgPool,
        profile_id: DbId,
        category: &str,
    ) -> Result<bool, sqlx::Error> {
        let enabled: Option<bool> = sqlx::query_scalar(
            "SELECT is_enabled FROM notification_preferences \
             WHERE profile_id = $1 AND category = $2",
        )
        .bind(profile_id)
        .bind(category)
        .fetch_optional(pool)
        .await?;
        Ok(enabled.unwrap_or(true))
    }

    /// Insert or update a category preference in a single round-trip.
    pub async fn upsert(
        pool: &PgPool,
        profile_id: DbId,
        category: &str,
        is_enabled: bool,
    ) -> Result<NotificationPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_preferences (profile_id, category, is_enabled) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (profile_id, category) DO UPDATE SET \
                is_enabled = EXCLUDED.is_enabled, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(profile_id)
            .bind(category)
            .bind(is_enabled)
            .fetch_one(pool)
            .await
    }

    /// Disable every category for a profile (the `all` unsubscribe scope).
    ///
    /// Runs in a transaction so the profile never observes a half-applied
    /// unsubscribe.
    pub async fn disable_all(pool: &PgPool, profile_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for category in ALL_CATEGORIES {
            sqlx::query(
                "INSERT INTO notification_preferences (profile_id, category, is_enabled) \
                 VALUES ($1, $2, false) \
                 ON CONFLICT (profile_id, category) DO UPDATE SET \
                    is_enabled = false, \
                    updated_at = NOW()",
            )
            .bind(profile_id)
            .bind(category.as_str())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
