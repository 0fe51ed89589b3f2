//! PostgreSQL implementation of the rent repository.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    PaymentStatus, Rent, RentInsert, RentPatch, RentStatus, Rents, Stamp,
};
use crate::domain::query::SearchQuery;
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::sql::{
    AUDIT_COLUMNS, AuditRow, corrupt_row, count_matching, select_matching,
};

const TABLE: &str = "rents";

#[derive(sqlx::FromRow)]
struct RentRow {
    id: i64,
    rent_id: String,
    car_type: i64,
    car: i64,
    owner: String,
    customer: String,
    rent_from_date: Option<i64>,
    rent_to_date: Option<i64>,
    pickup: Option<String>,
    dropoff: Option<String>,
    destination: Option<String>,
    price: Option<f64>,
    price_breakdown: Option<Value>,
    status: String,
    payment_status: String,
    notes_for_owner: Option<String>,
    #[sqlx(flatten)]
    audit: AuditRow,
}

impl TryFrom<RentRow> for Rent {
    type Error = AppError;

    fn try_from(row: RentRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<RentStatus>()
            .map_err(|e| corrupt_row(TABLE, row.id, e))?;
        let payment_status = row
            .payment_status
            .parse::<PaymentStatus>()
            .map_err(|e| corrupt_row(TABLE, row.id, e))?;

        Ok(Rent {
            id: row.id,
            rent_id: row.rent_id,
            car_type: row.car_type,
            car: row.car,
            owner: row.owner,
            customer: row.customer,
            rent_from_date: row.rent_from_date,
            rent_to_date: row.rent_to_date,
            pickup: row.pickup,
            dropoff: row.dropoff,
            destination: row.destination,
            price: row.price,
            price_breakdown: row.price_breakdown,
            status,
            payment_status,
            notes_for_owner: row.notes_for_owner,
            audit: row.audit.into(),
        })
    }
}

fn columns() -> String {
    format!(
        "id, rent_id, car_type, car, owner, customer, rent_from_date, rent_to_date, pickup, \
         dropoff, destination, price, price_breakdown, status, payment_status, notes_for_owner, \
         {AUDIT_COLUMNS}"
    )
}

/// PostgreSQL repository for rents.
///
/// `rent_id` is unique (`rents_rent_id_key`); `car` and `car_type` must
/// reference existing rows.
pub struct PgRentRepository {
    pool: Arc<PgPool>,
}

impl PgRentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository<Rents> for PgRentRepository {
    async fn create(&self, record: RentInsert, stamp: &Stamp) -> Result<Rent, AppError> {
        let sql = format!(
            "INSERT INTO rents (rent_id, customer, car_type, car, owner, rent_from_date, \
                rent_to_date, pickup, dropoff, destination, price, price_breakdown, status, \
                payment_status, notes_for_owner, c_by, c_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {}",
            columns()
        );

        let rent = record.rent;
        let row = sqlx::query_as::<_, RentRow>(&sql)
            .bind(record.rent_id)
            .bind(record.customer)
            .bind(rent.car_type)
            .bind(rent.car)
            .bind(rent.owner)
            .bind(rent.rent_from_date)
            .bind(rent.rent_to_date)
            .bind(rent.pickup)
            .bind(rent.dropoff)
            .bind(rent.destination)
            .bind(rent.price)
            .bind(rent.price_breakdown)
            .bind(rent.status.unwrap_or_default().as_str())
            .bind(rent.payment_status.unwrap_or_default().as_str())
            .bind(rent.notes_for_owner)
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Rent>, AppError> {
        let sql = format!(
            "SELECT {} FROM rents WHERE id = $1 AND is_deleted = FALSE",
            columns()
        );

        let row = sqlx::query_as::<_, RentRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Rent::try_from).transpose()
    }

    async fn update(
        &self,
        id: i64,
        patch: RentPatch,
        stamp: &Stamp,
    ) -> Result<Option<Rent>, AppError> {
        let sql = format!(
            "UPDATE rents SET \
                rent_from_date  = COALESCE($2, rent_from_date), \
                rent_to_date    = COALESCE($3, rent_to_date), \
                pickup          = COALESCE($4, pickup), \
                dropoff         = COALESCE($5, dropoff), \
                destination     = COALESCE($6, destination), \
                price           = COALESCE($7, price), \
                price_breakdown = COALESCE($8, price_breakdown), \
                status          = COALESCE($9, status), \
                payment_status  = COALESCE($10, payment_status), \
                notes_for_owner = COALESCE($11, notes_for_owner), \
                is_active       = COALESCE($12, is_active), \
                is_deleted      = COALESCE($13, is_deleted), \
                u_by            = $14, \
                u_time          = $15 \
             WHERE id = $1 AND is_deleted = FALSE \
             RETURNING {}",
            columns()
        );

        let row = sqlx::query_as::<_, RentRow>(&sql)
            .bind(id)
            .bind(patch.rent_from_date)
            .bind(patch.rent_to_date)
            .bind(patch.pickup)
            .bind(patch.dropoff)
            .bind(patch.destination)
            .bind(patch.price)
            .bind(patch.price_breakdown)
            .bind(patch.status.map(RentStatus::as_str))
            .bind(patch.payment_status.map(PaymentStatus::as_str))
            .bind(patch.notes_for_owner)
            .bind(patch.is_active)
            .bind(patch.is_deleted)
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Rent::try_from).transpose()
    }

    async fn find_all(&self, query: &SearchQuery) -> Result<Vec<Rent>, AppError> {
        let mut builder = select_matching(&columns(), TABLE, query);
        let rows = builder
            .build_query_as::<RentRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Rent::try_from).collect()
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
