//! In-app notification and email preference models.

use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `notifications` table (in-app).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub profile_id: DbId,
    /// Notification kind, mirroring the email category vocabulary.
    pub kind: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A row from the `notification_preferences` table.
///
/// Absence of a row for a category means the category is enabled.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationPreference {
    pub id: DbId,
    pub profile_id: DbId,
    pub category: String,
    pub is_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a single category preference.
#[derive(Debug, Deserialize)]
pub struct UpdatePreference {
    pub category: String,
    pub is_enabled: bool,
}
