//! Lead entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Money, Timestamp};
use sqlx::FromRow;

/// A row from the `leads` table.
///
/// Immutable after creation except through back-office edits.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    /// Set when the submitting customer was authenticated.
    pub customer_profile_id: Option<DbId>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub event_date: NaiveDate,
    pub guest_count: i32,
    pub budget_min: Option<Money>,
    pub budget_max: Option<Money>,
    pub service_style: String,
    pub dietary_notes: Option<String>,
    pub needs_delivery: bool,
    pub created_at: Timestamp,
}

/// DTO for the public lead intake form.
#[derive(Debug, Deserialize)]
pub struct CreateLead {
    /// The vendor this request targets.
    pub vendor_id: DbId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub event_date: NaiveDate,
    pub guest_count: i32,
    pub budget_min: Option<Money>,
    pub budget_max: Option<Money>,
    pub service_style: String,
    pub dietary_notes: Option<String>,
    #[serde(default)]
    pub needs_delivery: bool,
}

/// DTO for back-office edits to a lead. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateLead {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
    pub budget_min: Option<Money>,
    pub budget_max: Option<Money>,
    pub dietary_notes: Option<String>,
}
