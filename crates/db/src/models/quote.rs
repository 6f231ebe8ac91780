//! Quote entity model, history events, and DTOs.

use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Money, Timestamp};
use sqlx::FromRow;

/// A row from the `quotes` table.
///
/// At most one active (non-terminal) quote exists per vendor lead.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub vendor_lead_id: DbId,
    pub total_price: Money,
    /// Derived: `total_price / guest_count` at creation or revision time.
    pub price_per_person: Money,
    pub valid_until: Timestamp,
    /// Lifecycle status: `sent`, `viewed`, `accepted`, `rejected`, `countered`.
    pub status: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the append-only `quote_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteEvent {
    pub id: DbId,
    pub quote_id: DbId,
    pub actor_profile_id: DbId,
    /// Event kind: `created`, `viewed`, `accepted`, `rejected`,
    /// `counter_offer`, `revised`.
    pub action: String,
    /// Price snapshot for events that carry one.
    pub total_price: Option<Money>,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for a vendor creating a quote.
#[derive(Debug, Deserialize)]
pub struct CreateQuote {
    pub vendor_lead_id: DbId,
    pub total_price: Money,
    pub valid_until: Timestamp,
    pub note: Option<String>,
}

/// DTO for a customer-driven status change (`viewed`, `accepted`, `rejected`).
#[derive(Debug, Deserialize)]
pub struct QuoteStatusChange {
    pub status: String,
}

/// DTO for a customer counter-offer.
#[derive(Debug, Deserialize)]
pub struct CounterOffer {
    pub proposed_price: Money,
    pub note: Option<String>,
}

/// DTO for a vendor revising a countered quote.
#[derive(Debug, Deserialize)]
pub struct ReviseQuote {
    pub total_price: Money,
    pub valid_until: Timestamp,
    pub note: Option<String>,
}
