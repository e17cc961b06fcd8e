//! QR payload feature extraction
//!
//! The optical decode happens upstream; this module receives the decoded
//! payload bytes, classifies them, and for URL payloads reuses the URL
//! feature schema.

use serde::Serialize;

use crate::config::DetectionConfig;
use crate::error::{DetectError, DetectResult};
use crate::features::url::UrlFeatures;

/// Payload length past which obfuscation becomes likely.
pub const OVERSIZED_PAYLOAD_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QrContentType {
    Url,
    Text,
    VCard,
    Other,
}

impl QrContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrContentType::Url => "url",
            QrContentType::Text => "text",
            QrContentType::VCard => "vcard",
            QrContentType::Other => "other",
        }
    }
}

/// QR feature schema. `url` is populated exactly when the payload is a
/// URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QrFeatures {
    pub content_type: QrContentType,
    pub text: String,
    pub payload_len: usize,
    pub non_ascii: bool,
    pub data_uri: bool,
    pub url: Option<UrlFeatures>,
}

impl QrFeatures {
    /// Fails with `UnsupportedFormat` when the payload bytes do not
    /// decode as UTF-8. Everything else is classified, never rejected.
    pub fn extract(payload: &[u8], config: &DetectionConfig) -> DetectResult<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| DetectError::UnsupportedFormat("QR payload is not valid UTF-8".into()))?
            .trim()
            .to_string();
        let lower = text.to_lowercase();

        let content_type = if lower.starts_with("http://") || lower.starts_with("https://") {
            QrContentType::Url
        } else if lower.starts_with("begin:vcard") {
            QrContentType::VCard
        } else if lower.starts_with("wifi:")
            || lower.starts_with("mecard:")
            || lower.starts_with("mailto:")
            || lower.starts_with("tel:")
            || lower.starts_with("data:")
        {
            QrContentType::Other
        } else {
            QrContentType::Text
        };

        let url = match content_type {
            QrContentType::Url => Some(UrlFeatures::extract(&text, config)),
            _ => None,
        };

        Ok(Self {
            payload_len: text.len(),
            non_ascii: text.chars().any(|c| !c.is_ascii()),
            data_uri: lower.starts_with("data:"),
            content_type,
            text,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DetectionConfig {
        DetectionConfig::default()
    }

    #[test]
    fn test_url_payload_delegates_to_url_features() {
        let f = QrFeatures::extract(b"https://example.com/login", &config()).unwrap();
        assert_eq!(f.content_type, QrContentType::Url);
        let url = f.url.expect("url features");
        assert_eq!(url.host, "example.com");
    }

    #[test]
    fn test_vcard_and_text_classification() {
        let f = QrFeatures::extract(b"BEGIN:VCARD\nVERSION:3.0\nEND:VCARD", &config()).unwrap();
        assert_eq!(f.content_type, QrContentType::VCard);
        assert!(f.url.is_none());

        let f = QrFeatures::extract(b"table 14 menu", &config()).unwrap();
        assert_eq!(f.content_type, QrContentType::Text);
    }

    #[test]
    fn test_data_uri_flagged() {
        let f = QrFeatures::extract(b"data:text/html;base64,PGh0bWw+", &config()).unwrap();
        assert_eq!(f.content_type, QrContentType::Other);
        assert!(f.data_uri);
    }

    #[test]
    fn test_invalid_utf8_is_unsupported_format() {
        let err = QrFeatures::extract(&[0xff, 0xfe, 0x00, 0x41], &config()).unwrap_err();
        assert!(matches!(err, DetectError::UnsupportedFormat(_)));
    }
}
