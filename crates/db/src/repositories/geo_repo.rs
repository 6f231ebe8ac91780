//! Repository for the `cities` and `districts` lookup tables.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::geo::{City, District, UpsertCity, UpsertDistrict};

/// Column list for `cities` queries.
const CITY_COLUMNS: &str = "id, name, slug";

/// Column list for `districts` queries.
const DISTRICT_COLUMNS: &str = "id, city_id, name, slug";

/// Provides CRUD operations for the geographic lookup tables.
pub struct GeoRepo;

impl GeoRepo {
    /// List all cities alphabetically.
    pub async fn list_cities(pool: &PgPool) -> Result<Vec<City>, sqlx::Error> {
        let query = format!("SELECT {CITY_COLUMNS} FROM cities ORDER BY name");
        sqlx::query_as::<_, City>(&query).fetch_all(pool).await
    }

    /// Insert a city.
    pub async fn create_city(pool: &PgPool, input: &UpsertCity) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (name, slug) VALUES ($1, $2) RETURNING {CITY_COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// Rename a city.
    pub async fn update_city(
        pool: &PgPool,
        id: DbId,
        input: &UpsertCity,
    ) -> Result<Option<City>, sqlx::Error> {
        let query = format!(
            "UPDATE cities SET name = $2, slug = $3 WHERE id = $1 RETURNING {CITY_COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_optional(pool)
            .await
    }

    /// Delete a city (fails on FK references; surfaced as a database error).
    pub async fn delete_city(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List districts, optionally scoped to one city.
    pub async fn list_districts(
        pool: &PgPool,
        city_id: Option<DbId>,
    ) -> Result<Vec<District>, sqlx::Error> {
        let query = format!(
            "SELECT {DISTRICT_COLUMNS} FROM districts \
             WHERE ($1::bigint IS NULL OR city_id = $1) \
             ORDER BY name"
        );
        sqlx::query_as::<_, District>(&query)
            .bind(city_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a district.
    pub async fn create_district(
        pool: &PgPool,
        input: &UpsertDistrict,
    ) -> Result<District, sqlx::Error> {
        let query = format!(
            "INSERT INTO districts (city_id, name, slug) \
             VALUES ($1, $2, $3) \
             RETURNING {DISTRICT_COLUMNS}"
        );
        sqlx::query_as::<_, District>(&query)
            .bind(input.city_id)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// Rename or move a district.
    pub async fn update_district(
        pool: &PgPool,
        id: DbId,
        input: &UpsertDistrict,
    ) -> Result<Option<District>, sqlx::Error> {
        let query = format!(
            "UPDATE districts SET city_id = $2, name = $3, slug = $4 \
             WHERE id = $1 \
             RETURNING {DISTRICT_COLUMNS}"
        );
        sqlx::query_as::<_, District>(&query)
            .bind(id)
            .bind(input.city_id)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_optional(pool)
            .await
    }

    /// Delete a district.
    pub async fn delete_district(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM districts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
