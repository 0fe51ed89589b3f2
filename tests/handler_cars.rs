mod common;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use serde_json::{Value, json};
use sqlx::PgPool;

async fn seed_refs(pool: &PgPool) -> (i64, i64) {
    let car_type = common::create_test_type(pool, "Sedan").await;
    let brand = common::create_test_brand(pool, "Toyota").await;
    (car_type, brand)
}

#[sqlx::test]
async fn test_create_car_mints_codes_and_owner(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let (car_type, brand) = seed_refs(&pool).await;

    let response = server
        .post("/cars")
        .authorization_bearer(common::token("owner-1"))
        .json(&json!({
            "type": car_type,
            "brand": brand,
            "name": "Corolla",
            "year": 2020,
            "rentPerDayPrice": 49.5,
            "features": ["AC", "Bluetooth"]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();

    let car_id = json["carId"].as_str().unwrap();
    assert_eq!(car_id.len(), 8);
    assert!(car_id.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(json["slug"].as_str().unwrap().len(), 10);
    assert_eq!(json["owner"], "owner-1");
    assert_eq!(json["type"], car_type);
    assert_eq!(json["priceCurrency"], "TK");
    assert_eq!(json["features"], json!(["AC", "Bluetooth"]));
    assert_eq!(json["images"], json!([]));
}

#[sqlx::test]
async fn test_create_car_accepts_numeric_strings(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let (car_type, brand) = seed_refs(&pool).await;

    let response = server
        .post("/cars")
        .authorization_bearer(common::token("owner-1"))
        .json(&json!({
            "type": car_type.to_string(),
            "brand": brand.to_string(),
            "name": "Yaris",
            "numberOfSeats": "5"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["numberOfSeats"], 5);
}

#[sqlx::test]
async fn test_create_car_multipart_repeated_features(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let (car_type, brand) = seed_refs(&pool).await;

    let form = MultipartForm::new()
        .add_text("type", car_type.to_string())
        .add_text("brand", brand.to_string())
        .add_text("name", "Jazz")
        .add_text("features", "AC")
        .add_text("features", "GPS");

    let response = server
        .post("/cars")
        .authorization_bearer(common::token("owner-1"))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["features"], json!(["AC", "GPS"]));
}

#[sqlx::test]
async fn test_create_car_rejects_non_finite_price(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let (car_type, brand) = seed_refs(&pool).await;

    for price in ["NaN", "inf"] {
        server
            .post("/cars")
            .authorization_bearer(common::token("owner-1"))
            .json(&json!({ "type": car_type, "brand": brand, "name": "Fit", "rentPerDayPrice": price }))
            .await
            .assert_status_bad_request();
    }
    assert_eq!(common::count_rows(&pool, "cars").await, 0);
}

#[sqlx::test]
async fn test_create_car_unknown_brand_is_bad_request(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let car_type = common::create_test_type(&pool, "Sedan").await;

    let response = server
        .post("/cars")
        .authorization_bearer(common::token("owner-1"))
        .json(&json!({ "type": car_type, "brand": 987654, "name": "Ghost" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(common::count_rows(&pool, "cars").await, 0);
}

#[sqlx::test]
async fn test_create_car_name_too_long(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let (car_type, brand) = seed_refs(&pool).await;

    server
        .post("/cars")
        .authorization_bearer(common::token("owner-1"))
        .json(&json!({ "type": car_type, "brand": brand, "name": "x".repeat(31) }))
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_create_car_requires_token(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let (car_type, brand) = seed_refs(&pool).await;

    server
        .post("/cars")
        .json(&json!({ "type": car_type, "brand": brand, "name": "Corolla" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_list_cars_by_owner_with_pagination(pool: PgPool) {
    let server = common::make_server(pool.clone());
    for i in 0..7 {
        common::create_test_car(&pool, "owner-1", &format!("Car {i}")).await;
    }
    common::create_test_car(&pool, "owner-2", "Other").await;

    let response = server
        .get("/cars")
        .add_query_param("owner", "owner-1")
        .add_query_param("limit", 5)
        .add_query_param("pagination", true)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
    assert_eq!(json["pagination"]["total"], 7);
    assert_eq!(json["pagination"]["limit"], 5);
    assert_eq!(json["pagination"]["skip"], 0);
}

#[sqlx::test]
async fn test_list_cars_rejects_non_numeric_integer_filter(pool: PgPool) {
    let server = common::make_server(pool);

    server
        .get("/cars")
        .add_query_param("year", "recent")
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_count_cars_requires_token(pool: PgPool) {
    let server = common::make_server(pool.clone());
    common::create_test_car(&pool, "owner-1", "Civic").await;

    server
        .get("/cars/count")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/cars/count")
        .authorization_bearer(common::token("anyone"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 1);
}

#[sqlx::test]
async fn test_get_car_is_public(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_car(&pool, "owner-1", "Accord").await;

    let response = server.get(&format!("/cars/{id}")).await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["_id"], id);
    assert_eq!(json["name"], "Accord");
    assert!(json.get("isDeleted").is_none());
}

#[sqlx::test]
async fn test_soft_deleted_car_is_hidden(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_car(&pool, "owner-1", "Gone").await;
    common::soft_delete(&pool, "cars", id).await;

    server
        .get(&format!("/cars/{id}"))
        .await
        .assert_status_not_found();

    let json = server.get("/cars").await.json::<Value>();
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test]
async fn test_put_car_updates_fields(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_car(&pool, "owner-1", "Prius").await;

    let response = server
        .put(&format!("/cars/{id}"))
        .authorization_bearer(common::token("owner-1"))
        .json(&json!({ "color": "red", "mileage": 12000, "priceCurrency": "USD" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["name"], "Prius");
    assert_eq!(json["color"], "red");
    assert_eq!(json["mileage"], 12000);
    assert_eq!(json["priceCurrency"], "USD");
}

#[sqlx::test]
async fn test_patch_car_cannot_soft_delete(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_car(&pool, "owner-1", "Leaf").await;

    server
        .patch(&format!("/cars/{id}"))
        .authorization_bearer(common::token("owner-1"))
        .json(&json!({ "isDeleted": true }))
        .await
        .assert_status_bad_request();

    server
        .get(&format!("/cars/{id}"))
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_patch_car_cannot_change_codes(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let id = common::create_test_car(&pool, "owner-1", "Note").await;

    server
        .patch(&format!("/cars/{id}"))
        .authorization_bearer(common::token("owner-1"))
        .json(&json!({ "carId": "00000000" }))
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_car_collection_delete_not_allowed(pool: PgPool) {
    let server = common::make_server(pool);

    server
        .delete("/cars")
        .authorization_bearer(common::token("owner-1"))
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
