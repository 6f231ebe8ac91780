//! Profile (user account) model and DTOs.

use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full profile row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// Role name: `customer`, `vendor_owner`, or `admin`.
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        ProfileResponse {
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            phone: p.phone,
            role: p.role,
            is_active: p.is_active,
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a profile (registration).
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// Requested role; `admin` cannot be self-assigned.
    pub role: String,
}

/// DTO for admin edits to a profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Per-role account counts for the back-office stats page.
#[derive(Debug, FromRow, Serialize)]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}
