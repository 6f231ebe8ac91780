//! Email dispatch outcome log.
//!
//! One row per attempted send. No message bodies or recipient addresses
//! are stored -- the profile id is the only identifying field.

use serde::Serialize;
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Dispatch outcomes stored in `email_logs.outcome`.
pub const OUTCOME_SENT: &str = "sent";
pub const OUTCOME_FAILED: &str = "failed";
pub const OUTCOME_SKIPPED_PREF: &str = "skipped_pref";
pub const OUTCOME_SKIPPED_RATE: &str = "skipped_rate";

/// A row from the `email_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmailLog {
    pub id: DbId,
    /// NULL for sends to unauthenticated lead submitters.
    pub profile_id: Option<DbId>,
    pub category: String,
    /// `sent`, `failed`, `skipped_pref`, or `skipped_rate`.
    pub outcome: String,
    /// Transport error text for `failed` rows.
    pub error: Option<String>,
    pub created_at: Timestamp,
}
