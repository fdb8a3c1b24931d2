//! Handler for the subscription access verdict.
//!
//! Every business outcome, including "no business" and "no subscription",
//! is a 200 carrying an [`AccessVerdict`]. Only infrastructure faults
//! (credentials, store errors, unreadable rows) become error responses.

use agendly_core::access::{self, AccessVerdict};
use agendly_core::error::CoreError;
use agendly_core::telemetry::ErrorReport;
use agendly_core::types::DbId;
use agendly_db::repositories::{BusinessRepo, SubscriptionRepo};
use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Component tag used in logs and error reports.
const COMPONENT: &str = "access_evaluator";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Log a step-tagged fault, hand it to the error reporter, and convert it.
async fn infra_fault(
    state: &AppState,
    step: &'static str,
    error: impl Into<AppError> + std::fmt::Display,
    context: serde_json::Value,
) -> AppError {
    tracing::error!(step, error = %error, context = %context, "Access evaluation failed");
    state
        .reporter
        .report(ErrorReport::new(COMPONENT, step, error.to_string()).with_context(context))
        .await;
    error.into()
}

/// Resolve the caller's business and subscription, then apply the rules.
async fn evaluate_for_user(state: &AppState, user_id: DbId) -> AppResult<AccessVerdict> {
    let business = match BusinessRepo::find_by_owner(&state.pool, user_id).await {
        Ok(business) => business,
        Err(e) => {
            let context = json!({ "user_id": user_id });
            return Err(infra_fault(state, "resolve_business", e, context).await);
        }
    };
    let Some(business) = business else {
        return Ok(AccessVerdict::no_business());
    };

    let subscription =
        match SubscriptionRepo::find_current_for_business(&state.pool, business.id).await {
            Ok(subscription) => subscription,
            Err(e) => {
                let context = json!({ "business_id": business.id });
                return Err(infra_fault(state, "load_subscription", e, context).await);
            }
        };
    let Some(subscription) = subscription else {
        return Ok(AccessVerdict::no_subscription());
    };

    let snapshot = match subscription.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            let fault = CoreError::Internal(format!(
                "Subscription {} is unreadable: {e}",
                subscription.id
            ));
            return Err(infra_fault(
                state,
                "evaluate_rules",
                fault,
                json!({ "business_id": business.id, "subscription_id": subscription.id }),
            )
            .await);
        }
    };

    Ok(access::evaluate(
        &snapshot,
        state.clock.now_utc(),
        &state.config.lifecycle.access,
    ))
}

// ---------------------------------------------------------------------------
// Evaluate
// ---------------------------------------------------------------------------

/// GET|POST /api/v1/subscription/access
///
/// Returns the caller's access verdict. Denial is a 200; clients must branch
/// on `has_access`, not on the status code.
pub async fn get_access(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<AccessVerdict>> {
    let verdict = evaluate_for_user(&state, auth.user_id).await?;

    tracing::debug!(
        user_id = auth.user_id,
        has_access = verdict.has_access,
        status = ?verdict.status,
        days_remaining = verdict.days_remaining,
        "Access evaluated",
    );

    Ok(Json(verdict))
}
