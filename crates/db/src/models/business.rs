use agendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `businesses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Business {
    pub id: DbId,
    /// Identity-provider user id of the owner (the bearer token's `sub`).
    pub owner_user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a business.
#[derive(Debug, Deserialize)]
pub struct CreateBusiness {
    pub owner_user_id: DbId,
    pub name: String,
}
