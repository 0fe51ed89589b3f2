//! PostgreSQL implementation of the car type repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{CarType, CarTypePatch, CarTypes, Media, NewCarType, Stamp};
use crate::domain::query::SearchQuery;
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::sql::{
    AUDIT_COLUMNS, AuditRow, count_matching, select_matching,
};

const TABLE: &str = "car_types";

#[derive(sqlx::FromRow)]
struct CarTypeRow {
    id: i64,
    name: String,
    image: Option<Json<Media>>,
    #[sqlx(flatten)]
    audit: AuditRow,
}

impl From<CarTypeRow> for CarType {
    fn from(row: CarTypeRow) -> Self {
        CarType {
            id: row.id,
            name: row.name,
            image: row.image.map(|Json(media)| media),
            audit: row.audit.into(),
        }
    }
}

fn columns() -> String {
    format!("id, name, image, {AUDIT_COLUMNS}")
}

/// PostgreSQL repository for car types.
pub struct PgCarTypeRepository {
    pool: Arc<PgPool>,
}

impl PgCarTypeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository<CarTypes> for PgCarTypeRepository {
    async fn create(&self, record: NewCarType, stamp: &Stamp) -> Result<CarType, AppError> {
        let sql = format!(
            "INSERT INTO car_types (name, image, c_by, c_time) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            columns()
        );

        let row = sqlx::query_as::<_, CarTypeRow>(&sql)
            .bind(record.name)
            .bind(record.image.map(Json))
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CarType>, AppError> {
        let sql = format!(
            "SELECT {} FROM car_types WHERE id = $1 AND is_deleted = FALSE",
            columns()
        );

        let row = sqlx::query_as::<_, CarTypeRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: i64,
        patch: CarTypePatch,
        stamp: &Stamp,
    ) -> Result<Option<CarType>, AppError> {
        let sql = format!(
            "UPDATE car_types SET \
                name       = COALESCE($2, name), \
                image      = COALESCE($3, image), \
                is_active  = COALESCE($4, is_active), \
                is_deleted = COALESCE($5, is_deleted), \
                u_by       = $6, \
                u_time     = $7 \
             WHERE id = $1 AND is_deleted = FALSE \
             RETURNING {}",
            columns()
        );

        let row = sqlx::query_as::<_, CarTypeRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.image.map(Json))
            .bind(patch.is_active)
            .bind(patch.is_deleted)
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self, query: &SearchQuery) -> Result<Vec<CarType>, AppError> {
        let mut builder = select_matching(&columns(), TABLE, query);
        let rows = builder
            .build_query_as::<CarTypeRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
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
