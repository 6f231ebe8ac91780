//! Repository for the `quotes` and `quote_events` tables.
//!
//! Every status mutation is guarded by the expected current status
//! (`UPDATE ... WHERE status = $expected`) and appends a history event in
//! the same transaction, so concurrent actors cannot both win a transition
//! and the history never diverges from the row.

use sofra_core::types::{DbId, Money, Timestamp};
use sqlx::PgPool;

use crate::models::quote::{Quote, QuoteEvent};

/// Column list for `quotes` queries.
const COLUMNS: &str = "id, vendor_lead_id, total_price, price_per_person, valid_until, \
    status, note, created_at, updated_at";

/// Column list for `quote_events` queries.
const EVENT_COLUMNS: &str = "id, quote_id, actor_profile_id, action, total_price, note, created_at";

/// Provides operations for quotes and their history.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Whether an active (non-terminal) quote already exists for the lead.
    pub async fn active_exists(pool: &PgPool, vendor_lead_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM quotes \
                WHERE vendor_lead_id = $1 AND status NOT IN ('accepted', 'rejected'))",
        )
        .bind(vendor_lead_id)
        .fetch_one(pool)
        .await
    }

    /// Create a quote in `sent` status.
    ///
    /// Runs in a transaction: insert the quote, append its `created` event,
    /// and move the vendor lead to `quoted` (guarded by the status the
    /// caller validated against the transition table).
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        vendor_lead_id: DbId,
        total_price: Money,
        price_per_person: Money,
        valid_until: Timestamp,
        note: Option<&str>,
        actor_profile_id: DbId,
        expected_lead_status: &str,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let moved = sqlx::query(
            "UPDATE vendor_leads SET status = 'quoted', updated_at = NOW() \
             WHERE id = $1 AND status = $2",
        )
        .bind(vendor_lead_id)
        .bind(expected_lead_status)
        .execute(&mut *tx)
        .await?;
        if moved.rows_affected() == 0 {
            // Lost the race against another status change; surface as stale.
            tx.rollback().await?;
            return Ok(None);
        }

        let quote_query = format!(
            "INSERT INTO quotes \
                (vendor_lead_id, total_price, price_per_person, valid_until, status, note) \
             VALUES ($1, $2, $3, $4, 'sent', $5) \
             RETURNING {COLUMNS}"
        );
        let quote = sqlx::query_as::<_, Quote>(&quote_query)
            .bind(vendor_lead_id)
            .bind(total_price)
            .bind(price_per_person)
            .bind(valid_until)
            .bind(note)
            .fetch_one(&mut *tx)
            .await?;

        Self::append_event(
            &mut tx,
            quote.id,
            actor_profile_id,
            "created",
            Some(total_price),
            note,
        )
        .await?;

        tx.commit().await?;
        Ok(Some(quote))
    }

    /// Find a quote by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Transition a quote's status with an optimistic guard and append the
    /// matching history event. Returns `None` when the guard fails.
    ///
    /// `lead_transition` optionally moves the owning vendor lead in the same
    /// transaction (accept -> won, reject -> lost); if its guard fails the
    /// whole transition rolls back, so the quote and vendor lead never
    /// disagree.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_status_guarded(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        to: &str,
        actor_profile_id: DbId,
        action: &str,
        lead_transition: Option<(&str, &str)>,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quotes SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        let quote = sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(expected)
            .bind(to)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(quote) = quote else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some((lead_expected, lead_to)) = lead_transition {
            let moved = sqlx::query(
                "UPDATE vendor_leads SET status = $3, updated_at = NOW() \
                 WHERE id = $1 AND status = $2",
            )
            .bind(quote.vendor_lead_id)
            .bind(lead_expected)
            .bind(lead_to)
            .execute(&mut *tx)
            .await?;
            if moved.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(None);
            }
        }

        Self::append_event(&mut tx, quote.id, actor_profile_id, action, None, None).await?;

        tx.commit().await?;
        Ok(Some(quote))
    }

    /// Record a customer counter-offer: quote moves to `countered` (guarded)
    /// and the proposed price lands in the history.
    pub async fn counter_offer(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        proposed_price: Money,
        note: Option<&str>,
        actor_profile_id: DbId,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quotes SET status = 'countered', updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        let quote = sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(expected)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(quote) = quote else {
            tx.rollback().await?;
            return Ok(None);
        };

        Self::append_event(
            &mut tx,
            quote.id,
            actor_profile_id,
            "counter_offer",
            Some(proposed_price),
            note,
        )
        .await?;

        tx.commit().await?;
        Ok(Some(quote))
    }

    /// Vendor revision of a countered quote: new price and validity, back
    /// to `sent`. Guarded on `countered`.
    pub async fn revise(
        pool: &PgPool,
        id: DbId,
        total_price: Money,
        price_per_person: Money,
        valid_until: Timestamp,
        note: Option<&str>,
        actor_profile_id: DbId,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quotes SET \
                total_price = $2, price_per_person = $3, valid_until = $4, \
                note = COALESCE($5, note), status = 'sent', updated_at = NOW() \
             WHERE id = $1 AND status = 'countered' \
             RETURNING {COLUMNS}"
        );
        let quote = sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(total_price)
            .bind(price_per_person)
            .bind(valid_until)
            .bind(note)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(quote) = quote else {
            tx.rollback().await?;
            return Ok(None);
        };

        Self::append_event(
            &mut tx,
            quote.id,
            actor_profile_id,
            "revised",
            Some(total_price),
            note,
        )
        .await?;

        tx.commit().await?;
        Ok(Some(quote))
    }

    /// List quotes on a vendor's leads, newest first.
    pub async fn list_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT q.{} FROM quotes q \
             JOIN vendor_leads vl ON vl.id = q.vendor_lead_id \
             WHERE vl.vendor_id = $1 \
             ORDER BY q.created_at DESC",
            COLUMNS.replace(", ", ", q.")
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// List quotes addressed to a customer, newest first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_profile_id: DbId,
    ) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT q.{} FROM quotes q \
             JOIN vendor_leads vl ON vl.id = q.vendor_lead_id \
             JOIN leads l ON l.id = vl.lead_id \
             WHERE l.customer_profile_id = $1 \
             ORDER BY q.created_at DESC",
            COLUMNS.replace(", ", ", q.")
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(customer_profile_id)
            .fetch_all(pool)
            .await
    }

    /// The append-only event history for a quote, oldest first.
    pub async fn history(pool: &PgPool, quote_id: DbId) -> Result<Vec<QuoteEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM quote_events \
             WHERE quote_id = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, QuoteEvent>(&query)
            .bind(quote_id)
            .fetch_all(pool)
            .await
    }

    /// Total quote count for the back-office stats page.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(pool)
            .await
    }

    /// Append a history event within an open transaction.
    async fn append_event(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        quote_id: DbId,
        actor_profile_id: DbId,
        action: &str,
        total_price: Option<Money>,
        note: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO quote_events (quote_id, actor_profile_id, action, total_price, note) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(quote_id)
        .bind(actor_profile_id)
        .bind(action)
        .bind(total_price)
        .bind(note)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
