//! Repository for the `activity_logs` back-office audit trail.

use sofra_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity_log::ActivityLog;

/// Column list for `activity_logs` queries.
const COLUMNS: &str = "id, actor_profile_id, action, entity, entity_id, created_at";

/// Records and lists back-office actions.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Record one action.
    pub async fn record(
        pool: &PgPool,
        actor_profile_id: DbId,
        action: &str,
        entity: &str,
        entity_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO activity_logs (actor_profile_id, action, entity, entity_id) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(actor_profile_id)
        .bind(action)
        .bind(entity)
        .bind(entity_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Recent actions, newest first.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
