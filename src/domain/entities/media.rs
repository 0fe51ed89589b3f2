//! Media reference embedded in brands, types and cars.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A pointer to an externally hosted image or video.
///
/// Stored as a JSON document; the service never receives file bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl Media {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            mime_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_uses_camel_case() {
        let media: Media = serde_json::from_value(json!({
            "url": "https://cdn.example.com/a.png",
            "mimeType": "image/png"
        }))
        .unwrap();

        assert_eq!(media.mime_type.as_deref(), Some("image/png"));
        assert!(media.name.is_none());
    }

    #[test]
    fn test_media_requires_valid_url() {
        assert!(Media::new("https://cdn.example.com/a.png").validate().is_ok());
        assert!(Media::new("not a url").validate().is_err());
    }
}
