//! Search query construction shared by every resource listing.
//!
//! Raw query-string parameters are turned into a [`SearchQuery`]: typed
//! filters drawn from the resource's filterable fields, an optional sort
//! order parsed from a JSON object, and the effective `limit`/`skip`
//! window. The storage layer renders it into SQL and always adds the
//! `is_deleted = FALSE` predicate on top of these filters.
//!
//! # Recognized parameters
//!
//! | Parameter      | Meaning                                                   |
//! |----------------|-----------------------------------------------------------|
//! | `limit`        | page size, default [`DEFAULT_LIMIT`], `0` means default   |
//! | `skip`         | rows to skip, default `0`                                 |
//! | `sort`         | JSON object, e.g. `{"name": 1, "cTime": "desc"}`          |
//! | `pagination`   | include the `{total, limit, skip}` block in the result    |
//! | `getAllRecord` | ignore `limit`/`skip` entirely                            |
//!
//! Every other parameter must name a filterable field of the resource.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::AppError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_SKIP: i64 = 0;

const RESERVED: &[&str] = &["limit", "skip", "sort", "pagination", "getAllRecord"];

/// How a filter parameter is matched against its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Case-insensitive substring match.
    Text,
    /// Exact string match.
    Keyword,
    Integer,
    Boolean,
}

/// A query parameter that filters one column.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FilterField {
    pub const fn text(param: &'static str, column: &'static str) -> Self {
        Self { param, column, kind: FieldKind::Text }
    }
    pub const fn keyword(param: &'static str, column: &'static str) -> Self {
        Self { param, column, kind: FieldKind::Keyword }
    }
    pub const fn integer(param: &'static str, column: &'static str) -> Self {
        Self { param, column, kind: FieldKind::Integer }
    }
    pub const fn boolean(param: &'static str, column: &'static str) -> Self {
        Self { param, column, kind: FieldKind::Boolean }
    }
}

/// A field name accepted in the `sort` object, mapped to its column.
#[derive(Debug, Clone, Copy)]
pub struct SortField {
    pub param: &'static str,
    pub column: &'static str,
}

impl SortField {
    pub const fn new(param: &'static str, column: &'static str) -> Self {
        Self { param, column }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Contains(String),
    Equals(Scalar),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub condition: Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(1) => Some(Direction::Asc),
                Some(-1) => Some(Direction::Desc),
                _ => None,
            },
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "asc" | "ascending" => Some(Direction::Asc),
                "desc" | "descending" => Some(Direction::Desc),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: &'static str,
    pub direction: Direction,
}

/// Structured filter/sort/window descriptor for a listing or count.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub filters: Vec<Filter>,
    pub sort: Vec<SortKey>,
    pub limit: i64,
    pub skip: i64,
    /// `getAllRecord`: the window is ignored.
    pub all_records: bool,
    /// `pagination`: the caller wants the `{total, limit, skip}` block.
    pub paginate: bool,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: Vec::new(),
            limit: DEFAULT_LIMIT,
            skip: DEFAULT_SKIP,
            all_records: false,
            paginate: false,
        }
    }
}

impl SearchQuery {
    /// Builds a query from raw parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unknown parameters, values that do
    /// not match their field kind, negative or non-numeric `limit`/`skip`,
    /// and malformed `sort` JSON.
    pub fn parse(
        params: &HashMap<String, String>,
        fields: &[FilterField],
        sorts: &[SortField],
    ) -> Result<Self, AppError> {
        let mut unknown: Vec<&str> = params
            .keys()
            .map(String::as_str)
            .filter(|key| !RESERVED.contains(key) && !fields.iter().any(|f| f.param == *key))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(AppError::bad_request(
                "Unknown query parameter",
                json!({ "parameters": unknown }),
            ));
        }

        let mut filters = Vec::new();
        for field in fields {
            if let Some(raw) = params.get(field.param) {
                filters.push(Filter {
                    column: field.column,
                    condition: parse_condition(field, raw)?,
                });
            }
        }

        let sort = match params.get("sort").map(|s| s.trim()) {
            Some(raw) if !raw.is_empty() => parse_sort(raw, sorts)?,
            _ => Vec::new(),
        };

        let limit = match parse_count(params, "limit")? {
            Some(0) | None => DEFAULT_LIMIT,
            Some(n) => n,
        };
        let skip = parse_count(params, "skip")?.unwrap_or(DEFAULT_SKIP);

        Ok(Self {
            filters,
            sort,
            limit,
            skip,
            all_records: parse_flag(params, "getAllRecord")?,
            paginate: parse_flag(params, "pagination")?,
        })
    }

    /// `(limit, skip)` to apply, or `None` when every record is requested.
    pub fn window(&self) -> Option<(i64, i64)> {
        (!self.all_records).then_some((self.limit, self.skip))
    }

    pub fn page_info(&self, total: i64) -> PageInfo {
        PageInfo {
            total,
            limit: self.limit,
            skip: self.skip,
        }
    }
}

/// A listing result: the matching records plus the optional pagination block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: i64,
    pub limit: i64,
    pub skip: i64,
}

fn parse_condition(field: &FilterField, raw: &str) -> Result<Condition, AppError> {
    let invalid = |expected: &str| {
        AppError::bad_request(
            format!("Invalid value for '{}'", field.param),
            json!({ "parameter": field.param, "value": raw, "expected": expected }),
        )
    };

    let value = raw.trim();
    Ok(match field.kind {
        FieldKind::Text => Condition::Contains(value.to_string()),
        FieldKind::Keyword => Condition::Equals(Scalar::Text(value.to_string())),
        FieldKind::Integer => Condition::Equals(Scalar::Integer(
            value.parse().map_err(|_| invalid("integer"))?,
        )),
        FieldKind::Boolean => {
            Condition::Equals(Scalar::Boolean(parse_bool(value).ok_or_else(|| invalid("boolean"))?))
        }
    })
}

fn parse_sort(raw: &str, sorts: &[SortField]) -> Result<Vec<SortKey>, AppError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        AppError::bad_request(
            "Invalid sort parameter",
            json!({ "sort": raw, "reason": e.to_string() }),
        )
    })?;

    let Value::Object(map) = value else {
        return Err(AppError::bad_request(
            "Sort must be a JSON object",
            json!({ "sort": raw }),
        ));
    };

    map.iter()
        .map(|(name, direction)| {
            let column = sorts
                .iter()
                .find(|s| s.param == name.as_str())
                .map(|s| s.column)
                .ok_or_else(|| {
                    AppError::bad_request(
                        "Unknown sort field",
                        json!({ "field": name, "allowed": sorts.iter().map(|s| s.param).collect::<Vec<_>>() }),
                    )
                })?;
            let direction = Direction::from_json(direction).ok_or_else(|| {
                AppError::bad_request(
                    "Invalid sort direction",
                    json!({ "field": name, "direction": direction, "allowed": [1, -1, "asc", "desc"] }),
                )
            })?;
            Ok(SortKey { column, direction })
        })
        .collect()
}

fn parse_count(params: &HashMap<String, String>, name: &str) -> Result<Option<i64>, AppError> {
    match params.get(name).map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 0 => Ok(Some(n)),
            _ => Err(AppError::bad_request(
                format!("'{name}' must be a non-negative integer"),
                json!({ "parameter": name, "value": raw }),
            )),
        },
    }
}

fn parse_flag(params: &HashMap<String, String>, name: &str) -> Result<bool, AppError> {
    match params.get(name).map(|s| s.trim()) {
        None | Some("") => Ok(false),
        Some(raw) => parse_bool(raw).ok_or_else(|| {
            AppError::bad_request(
                format!("'{name}' must be a boolean"),
                json!({ "parameter": name, "value": raw }),
            )
        }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FilterField] = &[
        FilterField::text("name", "name"),
        FilterField::keyword("status", "status"),
        FilterField::integer("year", "year"),
        FilterField::boolean("isActive", "is_active"),
    ];

    const SORTS: &[SortField] = &[
        SortField::new("_id", "id"),
        SortField::new("name", "name"),
        SortField::new("cTime", "c_time"),
    ];

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parse(pairs: &[(&str, &str)]) -> Result<SearchQuery, AppError> {
        SearchQuery::parse(&params(pairs), FIELDS, SORTS)
    }

    #[test]
    fn test_defaults() {
        let query = parse(&[]).unwrap();
        assert_eq!(query, SearchQuery::default());
        assert_eq!(query.window(), Some((10, 0)));
    }

    #[test]
    fn test_limit_and_skip() {
        let query = parse(&[("limit", "5"), ("skip", "20")]).unwrap();
        assert_eq!(query.window(), Some((5, 20)));
    }

    #[test]
    fn test_zero_or_empty_limit_falls_back_to_default() {
        assert_eq!(parse(&[("limit", "0")]).unwrap().limit, DEFAULT_LIMIT);
        assert_eq!(parse(&[("limit", "")]).unwrap().limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_invalid_limit_is_bad_request() {
        assert!(matches!(parse(&[("limit", "abc")]), Err(AppError::Validation { .. })));
        assert!(matches!(parse(&[("skip", "-1")]), Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_get_all_record_drops_window() {
        let query = parse(&[("getAllRecord", "true"), ("limit", "5"), ("skip", "3")]).unwrap();
        assert!(query.all_records);
        assert_eq!(query.window(), None);
    }

    #[test]
    fn test_pagination_flag() {
        let query = parse(&[("pagination", "1"), ("limit", "5")]).unwrap();
        assert!(query.paginate);
        assert_eq!(
            query.page_info(42),
            PageInfo { total: 42, limit: 5, skip: 0 }
        );
        assert!(parse(&[("pagination", "maybe")]).is_err());
    }

    #[test]
    fn test_filters_follow_field_kinds() {
        let query = parse(&[
            ("name", " suv "),
            ("status", "cancelled"),
            ("year", "2020"),
            ("isActive", "false"),
        ])
        .unwrap();

        assert_eq!(
            query.filters,
            vec![
                Filter { column: "name", condition: Condition::Contains("suv".into()) },
                Filter {
                    column: "status",
                    condition: Condition::Equals(Scalar::Text("cancelled".into())),
                },
                Filter { column: "year", condition: Condition::Equals(Scalar::Integer(2020)) },
                Filter {
                    column: "is_active",
                    condition: Condition::Equals(Scalar::Boolean(false)),
                },
            ]
        );
    }

    #[test]
    fn test_mistyped_filter_is_bad_request() {
        let err = parse(&[("year", "twenty")]).unwrap_err();
        assert!(err.to_string().contains("year"));
        assert!(parse(&[("isActive", "yes")]).is_err());
    }

    #[test]
    fn test_unknown_parameter_is_rejected() {
        assert!(matches!(parse(&[("colour", "red")]), Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_is_deleted_cannot_be_filtered() {
        assert!(parse(&[("isDeleted", "true")]).is_err());
    }

    #[test]
    fn test_sort_keeps_key_order() {
        let query = parse(&[("sort", r#"{"name": -1, "cTime": "asc"}"#)]).unwrap();
        assert_eq!(
            query.sort,
            vec![
                SortKey { column: "name", direction: Direction::Desc },
                SortKey { column: "c_time", direction: Direction::Asc },
            ]
        );
    }

    #[test]
    fn test_sort_accepts_long_direction_names() {
        let query = parse(&[("sort", r#"{"_id": "Descending"}"#)]).unwrap();
        assert_eq!(query.sort[0], SortKey { column: "id", direction: Direction::Desc });
    }

    #[test]
    fn test_malformed_sort_is_bad_request() {
        for raw in [r#"{"name": 1"#, "[1, 2]", r#"{"password": 1}"#, r#"{"name": 2}"#] {
            let result = parse(&[("sort", raw)]);
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "sort {raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_sort_is_ignored() {
        assert!(parse(&[("sort", "")]).unwrap().sort.is_empty());
    }

    #[test]
    fn test_page_map_keeps_pagination() {
        let page = Page {
            data: vec![1, 2, 3],
            pagination: Some(PageInfo { total: 3, limit: 10, skip: 0 }),
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.data, vec![2, 4, 6]);
        assert_eq!(mapped.pagination.unwrap().total, 3);
    }

    #[test]
    fn test_page_without_pagination_omits_block() {
        let page: Page<i32> = Page { data: vec![], pagination: None };
        assert_eq!(serde_json::to_value(page).unwrap(), json!({ "data": [] }));
    }
}
