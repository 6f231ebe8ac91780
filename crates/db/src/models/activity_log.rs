//! Back-office audit trail.

use serde::Serialize;
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub actor_profile_id: DbId,
    /// Action verb, e.g. `vendor.approve`, `review.reject`, `lead.delete`.
    pub action: String,
    /// Entity table name the action touched.
    pub entity: String,
    pub entity_id: DbId,
    pub created_at: Timestamp,
}
