//! Handler for the completion sweep trigger.
//!
//! Called by an external scheduler on a fixed interval. The sweep is
//! idempotent, so overlapping or repeated calls are harmless.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

/// Success body of `POST /api/v1/appointments/complete-overdue`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SweepResponse {
    pub success: bool,
    pub message: String,
    /// Reference time of the sweep, RFC 3339 in the business timezone.
    pub timestamp: String,
}

/// POST /api/v1/appointments/complete-overdue
///
/// Runs one sweep. Returns 200 with a summary, or 500 with the failure
/// cause when the store update fails.
pub async fn complete_overdue(State(state): State<AppState>) -> AppResult<Json<SweepResponse>> {
    let report = state.sweeper.run().await?;

    Ok(Json(SweepResponse {
        success: true,
        message: report.message(),
        timestamp: report.timestamp(),
    }))
}
