//! SQL rendering of [`SearchQuery`] and row mapping shared by the repositories.

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{Postgres, QueryBuilder};

use crate::domain::entities::Audit;
use crate::domain::query::{Condition, Filter, Scalar, SearchQuery, SortKey};
use crate::error::AppError;

pub(crate) const AUDIT_COLUMNS: &str = "is_active, is_deleted, c_by, u_by, c_time, u_time";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AuditRow {
    pub is_active: bool,
    pub is_deleted: bool,
    pub c_by: Option<String>,
    pub u_by: Option<String>,
    pub c_time: DateTime<Utc>,
    pub u_time: Option<DateTime<Utc>>,
}

impl From<AuditRow> for Audit {
    fn from(row: AuditRow) -> Self {
        Audit {
            is_active: row.is_active,
            is_deleted: row.is_deleted,
            c_by: row.c_by,
            u_by: row.u_by,
            c_time: row.c_time,
            u_time: row.u_time,
        }
    }
}

/// `SELECT {columns} FROM {table}` restricted to live rows matching the
/// query, ordered and windowed.
pub(crate) fn select_matching(
    columns: &str,
    table: &str,
    query: &SearchQuery,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {columns} FROM {table}"));
    push_filters(&mut builder, &query.filters);
    push_order(&mut builder, &query.sort);

    if let Some((limit, skip)) = query.window() {
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(skip);
    }

    builder
}

/// `SELECT COUNT(*)` over live rows matching the query's filters.
pub(crate) fn count_matching(table: &str, query: &SearchQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
    push_filters(&mut builder, &query.filters);
    builder
}

fn push_filters(builder: &mut QueryBuilder<'static, Postgres>, filters: &[Filter]) {
    builder.push(" WHERE is_deleted = FALSE");

    for filter in filters {
        builder.push(" AND ");
        builder.push(filter.column);
        match &filter.condition {
            Condition::Contains(value) => {
                builder.push(" ILIKE ");
                builder.push_bind(format!("%{}%", escape_like(value)));
            }
            Condition::Equals(Scalar::Text(value)) => {
                builder.push(" = ");
                builder.push_bind(value.clone());
            }
            Condition::Equals(Scalar::Integer(value)) => {
                builder.push(" = ");
                builder.push_bind(*value);
            }
            Condition::Equals(Scalar::Boolean(value)) => {
                builder.push(" = ");
                builder.push_bind(*value);
            }
        }
    }
}

/// Requested keys first, then `id ASC` so pages are stable.
fn push_order(builder: &mut QueryBuilder<'static, Postgres>, sort: &[SortKey]) {
    let mut keys: Vec<String> = sort
        .iter()
        .map(|key| format!("{} {}", key.column, key.direction.as_sql()))
        .collect();
    if !sort.iter().any(|key| key.column == "id") {
        keys.push("id ASC".to_string());
    }

    builder.push(" ORDER BY ");
    builder.push(keys.join(", "));
}

/// Escapes `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Maps a stored enumeration that failed to parse.
pub(crate) fn corrupt_row(table: &str, id: i64, error: impl std::fmt::Display) -> AppError {
    tracing::error!(table, id, %error, "Stored row failed to decode");
    AppError::internal("Stored record is invalid", json!({ "table": table, "id": id }))
}
