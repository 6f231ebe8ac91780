//! Repository for the `vendor_leads` table.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::vendor_lead::{VendorLead, VendorLeadContext};

/// Column list for `vendor_leads` queries.
const COLUMNS: &str = "id, lead_id, vendor_id, status, created_at, updated_at";

/// Provides operations for vendor leads.
pub struct VendorLeadRepo;

impl VendorLeadRepo {
    /// Find a vendor lead by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VendorLead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendor_leads WHERE id = $1");
        sqlx::query_as::<_, VendorLead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a vendor lead joined with the participant and contact fields
    /// needed for authorization and notification.
    pub async fn find_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VendorLeadContext>, sqlx::Error> {
        sqlx::query_as::<_, VendorLeadContext>(
            "SELECT vl.id, vl.lead_id, vl.vendor_id, vl.status, \
                    l.customer_profile_id, v.owner_profile_id, \
                    l.guest_count, l.customer_email, l.customer_name, v.business_name \
             FROM vendor_leads vl \
             JOIN leads l ON l.id = vl.lead_id \
             JOIN vendors v ON v.id = vl.vendor_id \
             WHERE vl.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Transition a vendor lead's status, guarded by the expected current
    /// status. Returns `None` on a concurrent move (stale expectation).
    pub async fn update_status_guarded(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        to: &str,
    ) -> Result<Option<VendorLead>, sqlx::Error> {
        let query = format!(
            "UPDATE vendor_leads SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VendorLead>(&query)
            .bind(id)
            .bind(expected)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// List a vendor's leads, newest first.
    pub async fn list_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<VendorLead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendor_leads \
             WHERE vendor_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, VendorLead>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }
}
