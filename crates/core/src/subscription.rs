//! Subscription plan tiers and billing statuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Plan tier name. The set of tiers is deployment-defined, so this is an
/// open string rather than an enum.
pub type PlanTier = String;

/// Well-known tier names. [`PLAN_FREE`] is the `subscriptions.plan` column
/// default.
pub const PLAN_FREE: &str = "free";
pub const PLAN_TRIAL: &str = "trial";
pub const PLAN_BASIC: &str = "basic";
pub const PLAN_PRO: &str = "pro";

/// Billing status as reported by the billing integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 5] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Trialing,
        SubscriptionStatus::PastDue,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::Expired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown subscription status '{s}'")))
    }
}

/// The fields of a subscription row the access rules look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionSnapshot {
    pub plan: PlanTier,
    pub status: SubscriptionStatus,
    pub current_period_end: Option<Timestamp>,
    pub trial_end: Option<Timestamp>,
}

impl SubscriptionSnapshot {
    /// The instant the current entitlement runs out.
    ///
    /// Trials prefer `trial_end` and fall back to the period end.
    pub fn entitlement_end(&self) -> Option<Timestamp> {
        match self.status {
            SubscriptionStatus::Trialing => self.trial_end.or(self.current_period_end),
            _ => self.current_period_end,
        }
    }
}
