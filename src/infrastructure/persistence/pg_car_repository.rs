//! PostgreSQL implementation of the car repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{Car, CarInsert, CarPatch, Cars, Currency, Media, Stamp};
use crate::domain::query::SearchQuery;
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::sql::{
    AUDIT_COLUMNS, AuditRow, corrupt_row, count_matching, select_matching,
};

const TABLE: &str = "cars";

#[derive(sqlx::FromRow)]
struct CarRow {
    id: i64,
    car_id: String,
    owner: String,
    car_type: i64,
    brand: i64,
    name: String,
    slug: String,
    make: Option<String>,
    model: Option<String>,
    year: Option<i32>,
    color: Option<String>,
    mileage: Option<i64>,
    transmission: Option<String>,
    fuel_type: Option<String>,
    number_of_seats: Option<i32>,
    rent_per_day_price: Option<f64>,
    price_currency: String,
    features: Vec<String>,
    additional_rules: Option<String>,
    thumbnail: Option<Json<Media>>,
    images: Json<Vec<Media>>,
    videos: Json<Vec<Media>>,
    ratings: Option<f64>,
    #[sqlx(flatten)]
    audit: AuditRow,
}

impl TryFrom<CarRow> for Car {
    type Error = AppError;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        let price_currency = row
            .price_currency
            .parse::<Currency>()
            .map_err(|e| corrupt_row(TABLE, row.id, e))?;

        Ok(Car {
            id: row.id,
            car_id: row.car_id,
            owner: row.owner,
            car_type: row.car_type,
            brand: row.brand,
            name: row.name,
            slug: row.slug,
            make: row.make,
            model: row.model,
            year: row.year,
            color: row.color,
            mileage: row.mileage,
            transmission: row.transmission,
            fuel_type: row.fuel_type,
            number_of_seats: row.number_of_seats,
            rent_per_day_price: row.rent_per_day_price,
            price_currency,
            features: row.features,
            additional_rules: row.additional_rules,
            thumbnail: row.thumbnail.map(|Json(media)| media),
            images: row.images.0,
            videos: row.videos.0,
            ratings: row.ratings,
            audit: row.audit.into(),
        })
    }
}

fn columns() -> String {
    format!(
        "id, car_id, owner, car_type, brand, name, slug, make, model, year, color, mileage, \
         transmission, fuel_type, number_of_seats, rent_per_day_price, price_currency, features, \
         additional_rules, thumbnail, images, videos, ratings, {AUDIT_COLUMNS}"
    )
}

/// PostgreSQL repository for cars.
///
/// `car_id` and `slug` carry unique constraints (`cars_car_id_key`,
/// `cars_slug_key`); collisions surface as [`AppError::Conflict`].
pub struct PgCarRepository {
    pool: Arc<PgPool>,
}

impl PgCarRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository<Cars> for PgCarRepository {
    async fn create(&self, record: CarInsert, stamp: &Stamp) -> Result<Car, AppError> {
        let sql = format!(
            "INSERT INTO cars (car_id, slug, owner, car_type, brand, name, make, model, year, \
                color, mileage, transmission, fuel_type, number_of_seats, rent_per_day_price, \
                price_currency, features, additional_rules, thumbnail, images, videos, \
                c_by, c_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                $17, $18, $19, $20, $21, $22, $23) \
             RETURNING {}",
            columns()
        );

        let car = record.car;
        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(record.car_id)
            .bind(record.slug)
            .bind(record.owner)
            .bind(car.car_type)
            .bind(car.brand)
            .bind(car.name)
            .bind(car.make)
            .bind(car.model)
            .bind(car.year)
            .bind(car.color)
            .bind(car.mileage)
            .bind(car.transmission)
            .bind(car.fuel_type)
            .bind(car.number_of_seats)
            .bind(car.rent_per_day_price)
            .bind(car.price_currency.unwrap_or_default().as_str())
            .bind(car.features)
            .bind(car.additional_rules)
            .bind(car.thumbnail.map(Json))
            .bind(Json(car.images))
            .bind(Json(car.videos))
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        let sql = format!(
            "SELECT {} FROM cars WHERE id = $1 AND is_deleted = FALSE",
            columns()
        );

        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Car::try_from).transpose()
    }

    async fn update(&self, id: i64, patch: CarPatch, stamp: &Stamp) -> Result<Option<Car>, AppError> {
        let sql = format!(
            "UPDATE cars SET \
                car_type           = COALESCE($2, car_type), \
                brand              = COALESCE($3, brand), \
                name               = COALESCE($4, name), \
                make               = COALESCE($5, make), \
                model              = COALESCE($6, model), \
                year               = COALESCE($7, year), \
                color              = COALESCE($8, color), \
                mileage            = COALESCE($9, mileage), \
                transmission       = COALESCE($10, transmission), \
                fuel_type          = COALESCE($11, fuel_type), \
                number_of_seats    = COALESCE($12, number_of_seats), \
                rent_per_day_price = COALESCE($13, rent_per_day_price), \
                price_currency     = COALESCE($14, price_currency), \
                features           = COALESCE($15, features), \
                additional_rules   = COALESCE($16, additional_rules), \
                thumbnail          = COALESCE($17, thumbnail), \
                images             = COALESCE($18, images), \
                videos             = COALESCE($19, videos), \
                u_by               = $20, \
                u_time             = $21 \
             WHERE id = $1 AND is_deleted = FALSE \
             RETURNING {}",
            columns()
        );

        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(id)
            .bind(patch.car_type)
            .bind(patch.brand)
            .bind(patch.name)
            .bind(patch.make)
            .bind(patch.model)
            .bind(patch.year)
            .bind(patch.color)
            .bind(patch.mileage)
            .bind(patch.transmission)
            .bind(patch.fuel_type)
            .bind(patch.number_of_seats)
            .bind(patch.rent_per_day_price)
            .bind(patch.price_currency.map(Currency::as_str))
            .bind(patch.features)
            .bind(patch.additional_rules)
            .bind(patch.thumbnail.map(Json))
            .bind(patch.images.map(Json))
            .bind(patch.videos.map(Json))
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Car::try_from).transpose()
    }

    async fn find_all(&self, query: &SearchQuery) -> Result<Vec<Car>, AppError> {
        let mut builder = select_matching(&columns(), TABLE, query);
        let rows = builder
            .build_query_as::<CarRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Car::try_from).collect()
    }

    async fn count(&self, query: &SearchQuery) -> Result<i64, AppError> {
        let mut builder = count_matching(TABLE, query);
        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }
}
