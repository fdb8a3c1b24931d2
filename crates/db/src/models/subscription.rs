//! Subscription rows, as written by the billing integration.

use agendly_core::error::CoreError;
use agendly_core::subscription::{PlanTier, SubscriptionSnapshot, SubscriptionStatus};
use agendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub business_id: DbId,
    pub plan: String,
    pub status: String,
    pub current_period_end: Option<Timestamp>,
    pub trial_end: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Convert the row into the shape the access rules consume.
    ///
    /// Fails only if the stored status is not one the rules know about.
    pub fn snapshot(&self) -> Result<SubscriptionSnapshot, CoreError> {
        Ok(SubscriptionSnapshot {
            plan: self.plan.clone(),
            status: self.status.parse()?,
            current_period_end: self.current_period_end,
            trial_end: self.trial_end,
        })
    }
}

/// DTO for inserting a subscription row.
#[derive(Debug, Deserialize)]
pub struct CreateSubscription {
    pub business_id: DbId,
    pub plan: PlanTier,
    pub status: SubscriptionStatus,
    pub current_period_end: Option<Timestamp>,
    pub trial_end: Option<Timestamp>,
}
