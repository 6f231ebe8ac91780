//! Repository for the `email_logs` table.

use sofra_core::types::DbId;
use sqlx::PgPool;

/// Records email dispatch outcomes.
pub struct EmailLogRepo;

impl EmailLogRepo {
    /// Record one dispatch outcome. Bodies and addresses are never stored.
    pub async fn record(
        pool: &PgPool,
        profile_id: Option<DbId>,
        category: &str,
        outcome: &str,
        error: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO email_logs (profile_id, category, outcome, error) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(profile_id)
        .bind(category)
        .bind(outcome)
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }
}
