//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_bytes, body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight on both endpoints allows any origin and auth headers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_is_permissive(pool: PgPool) {
    for uri in [
        "/api/v1/appointments/complete-overdue",
        "/api/v1/subscription/access",
    ] {
        let app = common::build_test_app(pool.clone());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .header("Origin", "https://salon.example.com")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "authorization, x-client-info")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");

        let headers = response.headers();
        assert_eq!(
            headers
                .get("access-control-allow-origin")
                .expect("Missing Access-Control-Allow-Origin header"),
            "*"
        );
        let allow_headers = headers
            .get("access-control-allow-headers")
            .expect("Missing Access-Control-Allow-Headers header")
            .to_str()
            .unwrap();
        assert!(allow_headers.contains("authorization"), "{allow_headers}");
        assert!(allow_headers.contains("x-client-info"), "{allow_headers}");
        assert!(allow_headers.contains("apikey"), "{allow_headers}");

        assert!(body_bytes(response).await.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Test: bare OPTIONS without CORS headers is a 200 no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn bare_options_returns_empty_ok(pool: PgPool) {
    for uri in [
        "/api/v1/appointments/complete-overdue",
        "/api/v1/subscription/access",
    ] {
        let app = common::build_test_app(pool.clone());
        let response = common::send(app, Method::OPTIONS, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(body_bytes(response).await.is_empty());
    }
}
