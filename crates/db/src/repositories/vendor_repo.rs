//! Repository for the `vendors` table.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::vendor::{CreateVendor, Vendor, VendorFilter, VendorStats};

/// Column list for `vendors` queries.
const COLUMNS: &str = "id, owner_profile_id, business_name, slug, description, status, \
    city_id, district_id, min_guests, max_guests, min_price_per_person, \
    max_price_per_person, created_at, updated_at";

/// Default page size for the public listing.
const DEFAULT_LIMIT: i64 = 20;

/// Provides CRUD operations for vendors.
pub struct VendorRepo;

impl VendorRepo {
    /// Insert a new vendor in `pending` status.
    pub async fn create(
        pool: &PgPool,
        owner_profile_id: DbId,
        input: &CreateVendor,
    ) -> Result<Vendor, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendors \
                (owner_profile_id, business_name, slug, description, status, city_id, \
                 district_id, min_guests, max_guests, min_price_per_person, max_price_per_person) \
             VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(owner_profile_id)
            .bind(&input.business_name)
            .bind(&input.slug)
            .bind(input.description.as_deref())
            .bind(input.city_id)
            .bind(input.district_id)
            .bind(input.min_guests)
            .bind(input.max_guests)
            .bind(input.min_price_per_person)
            .bind(input.max_price_per_person)
            .fetch_one(pool)
            .await
    }

    /// Find a vendor by id (any status).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = $1");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an approved vendor by its public slug.
    pub async fn find_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE slug = $1 AND status = 'approved'");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find the vendor owned by a profile.
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_profile_id: DbId,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE owner_profile_id = $1");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(owner_profile_id)
            .fetch_optional(pool)
            .await
    }

    /// List approved vendors with optional geography and capacity filters.
    ///
    /// NULL filter binds are pass-through; the capacity check treats an
    /// unset vendor bound as unbounded.
    pub async fn list_public(
        pool: &PgPool,
        filter: &VendorFilter,
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendors \
             WHERE status = 'approved' \
               AND ($1::bigint IS NULL OR city_id = $1) \
               AND ($2::bigint IS NULL OR district_id = $2) \
               AND ($3::int IS NULL OR \
                    ((min_guests IS NULL OR min_guests <= $3) \
                     AND (max_guests IS NULL OR max_guests >= $3))) \
             ORDER BY business_name \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(filter.city_id)
            .bind(filter.district_id)
            .bind(filter.guest_count)
            .bind(filter.limit.unwrap_or(DEFAULT_LIMIT))
            .bind(filter.offset.unwrap_or(0))
            .fetch_all(pool)
            .await
    }

    /// List all vendors for the back office, pending first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendors \
             ORDER BY (status = 'pending') DESC, created_at DESC"
        );
        sqlx::query_as::<_, Vendor>(&query).fetch_all(pool).await
    }

    /// Transition a vendor's status, guarded by the expected current status.
    ///
    /// Returns `None` when the row was concurrently moved away from
    /// `expected` (or does not exist); the caller maps that to a conflict.
    pub async fn update_status_guarded(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        to: &str,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!(
            "UPDATE vendors SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .bind(expected)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Slugs of all approved vendors, for sitemap generation.
    pub async fn list_approved_slugs(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT slug FROM vendors WHERE status = 'approved' ORDER BY slug")
            .fetch_all(pool)
            .await
    }

    /// Aggregate stats used for badge derivation on public pages.
    pub async fn stats(pool: &PgPool, vendor_id: DbId) -> Result<VendorStats, sqlx::Error> {
        sqlx::query_as::<_, VendorStats>(
            "SELECT \
                (SELECT AVG(rating)::float8 FROM reviews \
                  WHERE vendor_id = $1 AND is_approved AND NOT is_deleted) AS avg_rating, \
                (SELECT COUNT(*) FROM reviews \
                  WHERE vendor_id = $1 AND is_approved AND NOT is_deleted) AS review_count, \
                (SELECT COUNT(*) FROM vendor_leads \
                  WHERE vendor_id = $1 AND status = 'won') AS won_lead_count",
        )
        .bind(vendor_id)
        .fetch_one(pool)
        .await
    }
}
