//! Vendor-lead join entity: the per-vendor instance of a lead.

use serde::Serialize;
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `vendor_leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VendorLead {
    pub id: DbId,
    pub lead_id: DbId,
    pub vendor_id: DbId,
    /// Workflow status: `sent`, `seen`, `contacted`, `quoted`, `won`, `lost`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A vendor lead joined with the participant ids needed for authorization.
///
/// `customer_profile_id` is the lead submitter (when authenticated) and
/// `owner_profile_id` is the vendor owner; conversation and quote access
/// checks are decided entirely from this row.
#[derive(Debug, Clone, FromRow)]
pub struct VendorLeadContext {
    pub id: DbId,
    pub lead_id: DbId,
    pub vendor_id: DbId,
    pub status: String,
    pub customer_profile_id: Option<DbId>,
    pub owner_profile_id: DbId,
    pub guest_count: i32,
    pub customer_email: String,
    pub customer_name: String,
    pub business_name: String,
}
