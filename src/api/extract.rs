//! Request body extraction for resource create/update endpoints.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::Validate;

use crate::domain::resource::Uploads;
use crate::error::AppError;

/// A validated request body plus the names of any file parts it carried.
///
/// Accepts `application/json` or `multipart/form-data`. In a multipart body,
/// text parts become fields (values starting with `{` or `[` are parsed as
/// JSON) and file parts are recorded in [`Uploads`] without being read.
/// A text part name that repeats becomes a list field.
/// String values are trimmed before deserialization and validation.
///
/// # Errors
///
/// Rejects with [`AppError::Validation`] if the body is malformed, has
/// unknown or mistyped fields, or fails validation.
#[derive(Debug)]
pub struct ResourceBody<T> {
    pub data: T,
    pub uploads: Uploads,
}

impl<S, T> FromRequest<S> for ResourceBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        let (mut value, uploads) = if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::bad_request("Invalid multipart body", json!({ "reason": e.body_text() }))
            })?;
            read_multipart(multipart).await?
        } else {
            let Json(value) = Json::<Value>::from_request(req, state).await.map_err(|e| {
                AppError::bad_request("Invalid JSON body", json!({ "reason": e.body_text() }))
            })?;
            (value, Uploads::none())
        };

        trim_strings(&mut value);

        let data: T = serde_json::from_value(value).map_err(|e| {
            AppError::bad_request("Invalid request body", json!({ "reason": e.to_string() }))
        })?;
        data.validate()?;

        Ok(Self { data, uploads })
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<(Value, Uploads), AppError> {
    let malformed = |e: axum::extract::multipart::MultipartError| {
        AppError::bad_request("Invalid multipart body", json!({ "reason": e.body_text() }))
    };

    let mut fields = Map::new();
    let mut uploads = Uploads::none();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_some() {
            uploads.push(name);
            continue;
        }

        let text = field.text().await.map_err(malformed)?;
        insert_part(&mut fields, name, text_value(text));
    }

    Ok((Value::Object(fields), uploads))
}

/// Repeated part names collect into a list, so `features=AC&features=GPS`
/// reads as `["AC", "GPS"]`.
fn insert_part(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        None => {
            fields.insert(name, value);
        }
        Some(Value::Array(items)) => match value {
            Value::Array(more) => items.extend(more),
            single => items.push(single),
        },
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Multipart text parts that look like JSON documents are parsed as such.
fn text_value(text: String) -> Value {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return value;
        }
    }
    Value::String(text)
}

fn trim_strings(value: &mut Value) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(trim_strings),
        Value::Object(map) => map.values_mut().for_each(trim_strings),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_strings_recurses() {
        let mut value = json!({
            "name": "  Toyota ",
            "features": [" AC", "GPS  "],
            "image": { "url": " https://cdn.example.com/a.png " },
            "year": 2020
        });

        trim_strings(&mut value);

        assert_eq!(
            value,
            json!({
                "name": "Toyota",
                "features": ["AC", "GPS"],
                "image": { "url": "https://cdn.example.com/a.png" },
                "year": 2020
            })
        );
    }

    #[test]
    fn test_text_value_parses_json_documents() {
        assert_eq!(text_value("[\"AC\"]".into()), json!(["AC"]));
        assert_eq!(
            text_value("{\"url\":\"https://x.io\"}".into()),
            json!({ "url": "https://x.io" })
        );
    }

    #[test]
    fn test_text_value_keeps_plain_text() {
        assert_eq!(text_value("2020".into()), json!("2020"));
        assert_eq!(text_value("[not json".into()), json!("[not json"));
    }

    #[test]
    fn test_repeated_parts_collect_into_list() {
        let mut fields = Map::new();
        insert_part(&mut fields, "features".into(), text_value("AC".into()));
        insert_part(&mut fields, "features".into(), text_value("GPS".into()));
        insert_part(&mut fields, "features".into(), text_value("[\"USB\", \"ABS\"]".into()));
        insert_part(&mut fields, "name".into(), text_value("Civic".into()));

        assert_eq!(
            Value::Object(fields),
            json!({ "features": ["AC", "GPS", "USB", "ABS"], "name": "Civic" })
        );
    }
}
