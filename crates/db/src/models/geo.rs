//! Geographic lookup tables: cities and their districts.

use serde::{Deserialize, Serialize};
use sofra_core::types::DbId;
use sqlx::FromRow;

/// A row from the `cities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// A row from the `districts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct District {
    pub id: DbId,
    pub city_id: DbId,
    pub name: String,
    pub slug: String,
}

/// DTO for creating or renaming a city.
#[derive(Debug, Deserialize)]
pub struct UpsertCity {
    pub name: String,
    pub slug: String,
}

/// DTO for creating or renaming a district.
#[derive(Debug, Deserialize)]
pub struct UpsertDistrict {
    pub city_id: DbId,
    pub name: String,
    pub slug: String,
}
