mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["checkedAt"].is_string());
    assert!(json["checks"]["database"]["latencyMs"].is_u64());
}

#[sqlx::test]
async fn test_health_endpoint_degraded_when_pool_closed(pool: PgPool) {
    let server = common::make_server(pool.clone());
    pool.close().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert!(json["checks"]["database"]["message"].is_string());
}

#[sqlx::test]
async fn test_health_rejects_other_methods(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.post("/health").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Method not allowed");
}
