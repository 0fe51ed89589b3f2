mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_create_type_success(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .post("/types")
        .authorization_bearer(common::token("alice"))
        .json(&json!({ "name": "SUV" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["name"], "SUV");
    assert_eq!(json["isActive"], true);
    assert!(json["_id"].is_i64());
}

#[sqlx::test]
async fn test_create_type_rejects_unknown_field(pool: PgPool) {
    let server = common::make_server(pool);

    server
        .post("/types")
        .authorization_bearer(common::token("alice"))
        .json(&json!({ "name": "SUV", "seats": 7 }))
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_create_type_duplicate_conflict(pool: PgPool) {
    let server = common::make_server(pool.clone());
    common::create_test_type(&pool, "Sedan").await;

    server
        .post("/types")
        .authorization_bearer(common::token("alice"))
        .json(&json!({ "name": "Sedan" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_list_types_is_public(pool: PgPool) {
    let server = common::make_server(pool.clone());
    common::create_test_type(&pool, "Sedan").await;
    common::create_test_type(&pool, "Hatchback").await;

    let response = server
        .get("/types")
        .add_query_param("sort", r#"{"name": "asc"}"#)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"][0]["name"], "Hatchback");
    assert_eq!(json["data"][1]["name"], "Sedan");
}

#[sqlx::test]
async fn test_count_types_requires_token(pool: PgPool) {
    let server = common::make_server(pool.clone());
    common::create_test_type(&pool, "Sedan").await;
    common::create_test_type(&pool, "Van").await;

    server
        .get("/types/count")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/types/count")
        .authorization_bearer(common::token("alice"))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 2);
}

#[sqlx::test]
async fn test_get_type_is_public(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_type(&pool, "Pickup").await;

    let response = server.get(&format!("/types/{id}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Pickup");
}

#[sqlx::test]
async fn test_get_missing_type_not_found(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/types/424242").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Could not find type."
    );
}

#[sqlx::test]
async fn test_patch_type_deactivates(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_type(&pool, "Coupe").await;

    let response = server
        .patch(&format!("/types/{id}"))
        .authorization_bearer(common::token("bob"))
        .json(&json!({ "isActive": "false" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["isActive"], false);

    let inactive = server
        .get("/types")
        .add_query_param("isActive", false)
        .await
        .json::<Value>();
    assert_eq!(inactive["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_type_delete_not_allowed(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_type(&pool, "Convertible").await;

    server
        .delete(&format!("/types/{id}"))
        .authorization_bearer(common::token("bob"))
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
