//! Repository for the `subscriptions` table (read-mostly).

use agendly_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::{CreateSubscription, Subscription};

/// Column list for `subscriptions` queries.
const COLUMNS: &str = "\
    id, business_id, plan, status, current_period_end, trial_end, \
    created_at, updated_at";

/// Provides query operations for subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a subscription row. Production rows come from the billing
    /// integration; this exists for seeding and tests.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (business_id, plan, status, current_period_end, trial_end) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.business_id)
            .bind(&input.plan)
            .bind(input.status.as_str())
            .bind(input.current_period_end)
            .bind(input.trial_end)
            .fetch_one(pool)
            .await
    }

    /// The authoritative subscription for a business: the most recently
    /// updated row, or `None` when the business has never subscribed.
    pub async fn find_current_for_business(
        pool: &PgPool,
        business_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions \
             WHERE business_id = $1 \
             ORDER BY updated_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(business_id)
            .fetch_optional(pool)
            .await
    }
}
