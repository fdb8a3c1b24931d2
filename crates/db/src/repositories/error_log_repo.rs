//! Repository for the `error_logs` table (append-only).

use sqlx::PgPool;

use crate::models::error_log::{CreateErrorLog, ErrorLog};

const COLUMNS: &str = "id, component, step, message, context, created_at, updated_at";

/// Maximum page size for error log listing.
const MAX_LIMIT: i64 = 100;

/// Provides query operations for the error log.
pub struct ErrorLogRepo;

impl ErrorLogRepo {
    pub async fn insert(pool: &PgPool, input: &CreateErrorLog) -> Result<ErrorLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO error_logs (component, step, message, context) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ErrorLog>(&query)
            .bind(&input.component)
            .bind(&input.step)
            .bind(&input.message)
            .bind(&input.context)
            .fetch_one(pool)
            .await
    }

    /// Most recent entries first, capped at 100.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ErrorLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM error_logs \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, ErrorLog>(&query)
            .bind(limit.clamp(1, MAX_LIMIT))
            .fetch_all(pool)
            .await
    }
}
