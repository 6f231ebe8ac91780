//! Repository for the `leads` table.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead, UpdateLead};
use crate::models::vendor_lead::VendorLead;

/// Column list for `leads` queries.
const COLUMNS: &str = "id, customer_profile_id, customer_name, customer_email, customer_phone, \
    event_date, guest_count, budget_min, budget_max, service_style, dietary_notes, \
    needs_delivery, created_at";

/// Column list for `vendor_leads` queries.
const VENDOR_LEAD_COLUMNS: &str = "id, lead_id, vendor_id, status, created_at, updated_at";

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a lead and its initial vendor-lead join row atomically.
    ///
    /// Both inserts run in one transaction so a failure between them cannot
    /// leave an orphaned lead behind. The vendor lead starts in `sent`.
    pub async fn create_with_vendor_lead(
        pool: &PgPool,
        input: &CreateLead,
        customer_profile_id: Option<DbId>,
    ) -> Result<(Lead, VendorLead), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lead_query = format!(
            "INSERT INTO leads \
                (customer_profile_id, customer_name, customer_email, customer_phone, \
                 event_date, guest_count, budget_min, budget_max, service_style, \
                 dietary_notes, needs_delivery) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&lead_query)
            .bind(customer_profile_id)
            .bind(input.customer_name.trim())
            .bind(&input.customer_email)
            .bind(input.customer_phone.as_deref())
            .bind(input.event_date)
            .bind(input.guest_count)
            .bind(input.budget_min)
            .bind(input.budget_max)
            .bind(&input.service_style)
            .bind(input.dietary_notes.as_deref())
            .bind(input.needs_delivery)
            .fetch_one(&mut *tx)
            .await?;

        let vendor_lead_query = format!(
            "INSERT INTO vendor_leads (lead_id, vendor_id, status) \
             VALUES ($1, $2, 'sent') \
             RETURNING {VENDOR_LEAD_COLUMNS}"
        );
        let vendor_lead = sqlx::query_as::<_, VendorLead>(&vendor_lead_query)
            .bind(lead.id)
            .bind(input.vendor_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((lead, vendor_lead))
    }

    /// Find a lead by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads for the back office, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a back-office edit. Only `Some` fields are overwritten.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET \
                customer_name = COALESCE($2, customer_name), \
                customer_phone = COALESCE($3, customer_phone), \
                event_date = COALESCE($4, event_date), \
                guest_count = COALESCE($5, guest_count), \
                budget_min = COALESCE($6, budget_min), \
                budget_max = COALESCE($7, budget_max), \
                dietary_notes = COALESCE($8, dietary_notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(input.customer_name.as_deref())
            .bind(input.customer_phone.as_deref())
            .bind(input.event_date)
            .bind(input.guest_count)
            .bind(input.budget_min)
            .bind(input.budget_max)
            .bind(input.dietary_notes.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a lead (explicit back-office action; cascades to vendor leads).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total lead count for the back-office stats page.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await
    }
}
