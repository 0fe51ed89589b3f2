//! PostgreSQL implementation of the brand repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{Brand, BrandPatch, Brands, Media, NewBrand, Stamp};
use crate::domain::query::SearchQuery;
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::sql::{
    AUDIT_COLUMNS, AuditRow, count_matching, select_matching,
};

const TABLE: &str = "brands";

#[derive(sqlx::FromRow)]
struct BrandRow {
    id: i64,
    name: String,
    description: Option<String>,
    image: Option<Json<Media>>,
    #[sqlx(flatten)]
    audit: AuditRow,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand {
            id: row.id,
            name: row.name,
            description: row.description,
            image: row.image.map(|Json(media)| media),
            audit: row.audit.into(),
        }
    }
}

fn columns() -> String {
    format!("id, name, description, image, {AUDIT_COLUMNS}")
}

/// PostgreSQL repository for brands.
///
/// Soft delete: `is_deleted = TRUE` rows are invisible to every method.
pub struct PgBrandRepository {
    pool: Arc<PgPool>,
}

impl PgBrandRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository<Brands> for PgBrandRepository {
    async fn create(&self, record: NewBrand, stamp: &Stamp) -> Result<Brand, AppError> {
        let sql = format!(
            "INSERT INTO brands (name, description, image, c_by, c_time) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            columns()
        );

        let row = sqlx::query_as::<_, BrandRow>(&sql)
            .bind(record.name)
            .bind(record.description)
            .bind(record.image.map(Json))
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Brand>, AppError> {
        let sql = format!(
            "SELECT {} FROM brands WHERE id = $1 AND is_deleted = FALSE",
            columns()
        );

        let row = sqlx::query_as::<_, BrandRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: i64,
        patch: BrandPatch,
        stamp: &Stamp,
    ) -> Result<Option<Brand>, AppError> {
        let sql = format!(
            "UPDATE brands SET \
                name        = COALESCE($2, name), \
                description = COALESCE($3, description), \
                image       = COALESCE($4, image), \
                is_active   = COALESCE($5, is_active), \
                is_deleted  = COALESCE($6, is_deleted), \
                u_by        = $7, \
                u_time      = $8 \
             WHERE id = $1 AND is_deleted = FALSE \
             RETURNING {}",
            columns()
        );

        let row = sqlx::query_as::<_, BrandRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.image.map(Json))
            .bind(patch.is_active)
            .bind(patch.is_deleted)
            .bind(&stamp.user)
            .bind(stamp.at)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self, query: &SearchQuery) -> Result<Vec<Brand>, AppError> {
        let mut builder = select_matching(&columns(), TABLE, query);
        let rows = builder
            .build_query_as::<BrandRow>()
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
