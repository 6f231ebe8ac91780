//! Vendor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Money, Timestamp};
use sofra_core::vendor::Badge;
use sqlx::FromRow;

/// A row from the `vendors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vendor {
    pub id: DbId,
    pub owner_profile_id: DbId,
    pub business_name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Moderation status: `pending`, `approved`, or `suspended`.
    pub status: String,
    pub city_id: Option<DbId>,
    pub district_id: Option<DbId>,
    pub min_guests: Option<i32>,
    pub max_guests: Option<i32>,
    pub min_price_per_person: Option<Money>,
    pub max_price_per_person: Option<Money>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public vendor listing entry: the vendor row plus derived display data.
#[derive(Debug, Serialize)]
pub struct VendorPublic {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub avg_rating: Option<f64>,
    pub review_count: i64,
    pub badges: Vec<Badge>,
}

/// DTO for registering a vendor business.
#[derive(Debug, Deserialize)]
pub struct CreateVendor {
    pub business_name: String,
    pub slug: String,
    pub description: Option<String>,
    pub city_id: Option<DbId>,
    pub district_id: Option<DbId>,
    pub min_guests: Option<i32>,
    pub max_guests: Option<i32>,
    pub min_price_per_person: Option<Money>,
    pub max_price_per_person: Option<Money>,
}

/// Filters for the public vendor listing.
#[derive(Debug, Default, Deserialize)]
pub struct VendorFilter {
    pub city_id: Option<DbId>,
    pub district_id: Option<DbId>,
    /// Only vendors whose capacity range covers this guest count.
    pub guest_count: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Aggregated stats used for badge derivation.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct VendorStats {
    pub avg_rating: Option<f64>,
    pub review_count: i64,
    pub won_lead_count: i64,
}
