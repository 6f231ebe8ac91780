//! Repository for the `profiles` table.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, ProfileResponse, RoleCount, UpdateProfile};

/// Column list for `profiles` queries.
const COLUMNS: &str =
    "id, email, password_hash, full_name, phone, role, is_active, created_at, updated_at";

/// Column list for external-facing queries (no password hash).
const SAFE_COLUMNS: &str = "id, email, full_name, phone, role, is_active, created_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        full_name: &str,
        phone: Option<&str>,
        role: &str,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (email, password_hash, full_name, phone, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .bind(password_hash)
            .bind(full_name)
            .bind(phone)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (login lookup).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List profiles for the back office, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {SAFE_COLUMNS} FROM profiles \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ProfileResponse>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a back-office edit. Only `Some` fields are overwritten.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET \
                full_name = COALESCE($2, full_name), \
                phone = COALESCE($3, phone), \
                role = COALESCE($4, role), \
                is_active = COALESCE($5, is_active), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(input.full_name.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.role.as_deref())
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Count accounts per role for the back-office stats page.
    pub async fn count_by_role(pool: &PgPool) -> Result<Vec<RoleCount>, sqlx::Error> {
        sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS count FROM profiles GROUP BY role ORDER BY role",
        )
        .fetch_all(pool)
        .await
    }
}
