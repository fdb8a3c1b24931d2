//! Subscription access rules.
//!
//! [`evaluate`] is a pure function of a subscription snapshot, an instant and
//! an [`AccessPolicy`]. It never fails: every business outcome, including
//! denial, is expressed as an [`AccessVerdict`].

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::subscription::{PlanTier, SubscriptionSnapshot, SubscriptionStatus};
use crate::types::Timestamp;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Upper bound accepted for [`AccessPolicy::past_due_grace_days`] at load time.
pub const MAX_PAST_DUE_GRACE_DAYS: u32 = 3650;

pub const MSG_NO_BUSINESS: &str =
    "No business is registered for this account. Create a business to choose a plan.";
pub const MSG_NO_SUBSCRIPTION: &str =
    "This business has no subscription. Choose a plan to unlock all features.";

/// Tunables for the rule table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Days after the period end during which a `past_due` subscription keeps
    /// access.
    pub past_due_grace_days: u32,
}

/// Feature-access decision for one business.
///
/// Denial is data: handlers return this with a success status whatever the
/// value of `has_access`, and clients branch on `has_access`. Callers that
/// cache a verdict must not keep it longer than one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessVerdict {
    pub has_access: bool,
    pub plan: Option<PlanTier>,
    pub status: Option<SubscriptionStatus>,
    pub days_remaining: i64,
    pub message: Option<String>,
}

impl AccessVerdict {
    /// The caller has no business yet.
    pub fn no_business() -> Self {
        Self::denied_without_subscription(MSG_NO_BUSINESS)
    }

    /// The business exists but no subscription row was found.
    pub fn no_subscription() -> Self {
        Self::denied_without_subscription(MSG_NO_SUBSCRIPTION)
    }

    fn denied_without_subscription(message: &str) -> Self {
        Self {
            has_access: false,
            plan: None,
            status: None,
            days_remaining: 0,
            message: Some(message.to_string()),
        }
    }
}

/// Whole days from `now` until `end`, rounding partial days up.
///
/// Returns 0 when there is no end or it has already passed.
pub fn days_remaining(end: Option<Timestamp>, now: Timestamp) -> i64 {
    let Some(end) = end else {
        return 0;
    };
    let millis = (end - now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }
}

fn plural_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Apply the rule table to a subscription.
pub fn evaluate(
    subscription: &SubscriptionSnapshot,
    now: Timestamp,
    policy: &AccessPolicy,
) -> AccessVerdict {
    let end = subscription.entitlement_end();
    let days = days_remaining(end, now);

    let (has_access, message) = match subscription.status {
        SubscriptionStatus::Active => match end {
            Some(end) if end < now => (
                false,
                Some("Your subscription period has ended. Renew to restore access.".to_string()),
            ),
            _ => (true, None),
        },
        SubscriptionStatus::Trialing => match end {
            Some(end) if end >= now => (
                true,
                Some(format!("Your free trial ends in {}.", plural_days(days))),
            ),
            Some(_) => (
                false,
                Some("Your free trial has ended. Choose a plan to continue.".to_string()),
            ),
            None => (
                false,
                Some("Your trial has no end date on record. Contact support.".to_string()),
            ),
        },
        SubscriptionStatus::PastDue => {
            let grace = Duration::days(i64::from(policy.past_due_grace_days));
            match end.map(|end| end.checked_add_signed(grace)) {
                Some(Some(grace_end)) if now <= grace_end => (
                    true,
                    Some(format!(
                        "Payment is past due. Access continues for {} while payment is retried.",
                        plural_days(days_remaining(Some(grace_end), now))
                    )),
                ),
                // Window reaches past the representable range; it never closes.
                Some(None) => (
                    true,
                    Some("Payment is past due. Access continues while payment is retried.".to_string()),
                ),
                _ => (
                    false,
                    Some(
                        "Payment is past due and the grace period has ended. \
                         Update your payment method to restore access."
                            .to_string(),
                    ),
                ),
            }
        }
        SubscriptionStatus::Cancelled => (
            false,
            Some("Your subscription was cancelled. Subscribe again to restore access.".to_string()),
        ),
        SubscriptionStatus::Expired => (
            false,
            Some("Your subscription has expired. Renew to restore access.".to_string()),
        ),
    };

    AccessVerdict {
        has_access,
        plan: Some(subscription.plan.clone()),
        status: Some(subscription.status),
        days_remaining: days,
        message,
    }
}
