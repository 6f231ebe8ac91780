//! Conversation message model and DTOs.

use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Sender side of a message: stored alongside the profile id so a thread
/// renders correctly even if a profile later changes role.
pub const SENDER_CUSTOMER: &str = "customer";
pub const SENDER_VENDOR: &str = "vendor";

/// A row from the `messages` table, ordered by creation time within a
/// vendor-lead thread.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub vendor_lead_id: DbId,
    pub sender_profile_id: DbId,
    /// `customer` or `vendor`.
    pub sender_type: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for sending a message.
#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub vendor_lead_id: DbId,
    pub content: String,
}

/// One conversation in the caller's inbox: thread identity plus the
/// last-message preview and unread count, all computed in SQL.
#[derive(Debug, FromRow, Serialize)]
pub struct ConversationSummary {
    pub vendor_lead_id: DbId,
    pub lead_id: DbId,
    pub vendor_id: DbId,
    pub business_name: String,
    pub customer_name: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<Timestamp>,
    /// Unread messages sent by the counterpart.
    pub unread_count: i64,
}
