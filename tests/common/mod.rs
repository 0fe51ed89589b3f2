#![allow(dead_code)]

use axum_test::TestServer;
use car_rental::api::routes::api_router;
use car_rental::application::services::AuthService;
use car_rental::state::AppState;
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

pub const SECRET: &str = "test-jwt-secret";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), AuthService::new(SECRET))
}

pub fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(api_router(create_test_state(pool))).unwrap()
}

pub fn token(user: &str) -> String {
    AuthService::new(SECRET)
        .issue(user, Duration::hours(1))
        .unwrap()
}

pub async fn create_test_brand(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO brands (name, c_by) VALUES ($1, 'seed') RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_type(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO car_types (name, c_by) VALUES ($1, 'seed') RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_car(pool: &PgPool, owner: &str, name: &str) -> i64 {
    let car_type = create_test_type(pool, &format!("type-{name}")).await;
    let brand = create_test_brand(pool, &format!("brand-{name}")).await;
    let suffix = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
        .fetch_one(pool)
        .await
        .unwrap();

    sqlx::query_scalar(
        "INSERT INTO cars (car_id, slug, owner, car_type, brand, name, c_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $3) RETURNING id",
    )
    .bind(format!("{:08}", suffix + 1))
    .bind(format!("slug{:06}", suffix + 1))
    .bind(owner)
    .bind(car_type)
    .bind(brand)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn car_type_of(pool: &PgPool, car: i64) -> i64 {
    sqlx::query_scalar("SELECT car_type FROM cars WHERE id = $1")
        .bind(car)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn soft_delete(pool: &PgPool, table: &str, id: i64) {
    sqlx::query(&format!(
        "UPDATE {table} SET is_deleted = TRUE WHERE id = $1"
    ))
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
