use agendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `error_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ErrorLog {
    pub id: DbId,
    pub component: String,
    pub step: String,
    pub message: String,
    pub context: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an operational error.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateErrorLog {
    pub component: String,
    pub step: String,
    pub message: String,
    pub context: serde_json::Value,
}
