//! Route definitions for the `/appointments` resource.
//!
//! The sweep trigger is meant for the external scheduler and carries no
//! request body.

use axum::routing::post;
use axum::Router;

use crate::handlers::completion;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// POST  /complete-overdue   -> complete_overdue
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/complete-overdue", post(completion::complete_overdue))
}
