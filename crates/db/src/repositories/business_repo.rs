//! Repository for the `businesses` table.

use agendly_core::types::DbId;
use sqlx::PgPool;

use crate::models::business::{Business, CreateBusiness};

const COLUMNS: &str = "id, owner_user_id, name, created_at, updated_at";

/// Provides query operations for businesses.
pub struct BusinessRepo;

impl BusinessRepo {
    pub async fn create(pool: &PgPool, input: &CreateBusiness) -> Result<Business, sqlx::Error> {
        let query = format!(
            "INSERT INTO businesses (owner_user_id, name) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Business>(&query)
            .bind(input.owner_user_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Resolve the business owned by an authenticated user, if any.
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_user_id: DbId,
    ) -> Result<Option<Business>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM businesses WHERE owner_user_id = $1");
        sqlx::query_as::<_, Business>(&query)
            .bind(owner_user_id)
            .fetch_optional(pool)
            .await
    }
}
