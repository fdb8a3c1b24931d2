//! Route definitions for the `/subscription` resource.
//!
//! Requires a bearer token.

use axum::routing::get;
use axum::Router;

use crate::handlers::access;
use crate::state::AppState;

/// Routes mounted at `/subscription`.
///
/// ```text
/// GET   /access   -> get_access
/// POST  /access   -> get_access
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/access", get(access::get_access).post(access::get_access))
}
