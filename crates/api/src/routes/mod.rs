pub mod appointments;
pub mod health;
pub mod subscription;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /appointments   -> appointments::router()
/// /subscription   -> subscription::router()
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/appointments", appointments::router())
        .nest("/subscription", subscription::router())
}
