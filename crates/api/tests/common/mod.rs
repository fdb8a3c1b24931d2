#![allow(dead_code)]

use std::sync::Arc;

use agendly_api::auth::jwt::{generate_access_token, JwtConfig};
use agendly_api::config::ServerConfig;
use agendly_api::router::build_app_router;
use agendly_api::state::AppState;
use agendly_core::access::AccessPolicy;
use agendly_core::clock::BusinessClock;
use agendly_core::config::LifecycleConfig;
use agendly_core::types::{DbId, Timestamp};
use agendly_db::error_sink::DbErrorReporter;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// 2025-01-15T12:00:00 in America/Sao_Paulo.
pub fn fixed_now() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 15, 15, 0, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused-in-tests".to_string(),
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        lifecycle: LifecycleConfig::default(),
        sweep_interval_secs: 0,
    }
}

/// Full application router with the production middleware stack and a
/// clock frozen at [`fixed_now`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, AccessPolicy::default())
}

pub fn build_test_app_with(pool: PgPool, policy: AccessPolicy) -> Router {
    let mut config = test_config();
    config.lifecycle.access = policy;
    let clock = BusinessClock::fixed(fixed_now(), config.lifecycle.timezone);
    let reporter = Arc::new(DbErrorReporter::new(pool.clone()));
    build_app_router(AppState::new(pool, config, clock, reporter))
}

/// A valid bearer token for `user_id`.
pub fn bearer(user_id: DbId) -> String {
    let token = generate_access_token(user_id, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
