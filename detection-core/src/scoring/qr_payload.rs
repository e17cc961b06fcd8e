//! QR payload scorer
//!
//! Scores properties of the decoded payload itself. URL payloads get the
//! URL scorers on top of this one; non-URL payloads are judged here
//! alone.

use super::rules;
use super::SignalScore;
use crate::features::qr::{QrContentType, QrFeatures, OVERSIZED_PAYLOAD_LEN};

pub const NAME: &str = "qr-payload";

pub fn score(f: &QrFeatures) -> SignalScore {
    let mut tags = Vec::new();

    let data_uri_risk = if f.data_uri {
        tags.push("data-uri".to_string());
        1.0
    } else {
        0.0
    };

    let non_ascii_risk = if f.non_ascii {
        tags.push("non-ascii-payload".to_string());
        1.0
    } else {
        0.0
    };

    let oversized_risk = if f.payload_len > OVERSIZED_PAYLOAD_LEN {
        tags.push("oversized-payload".to_string());
        1.0
    } else {
        0.0
    };

    if f.content_type == QrContentType::VCard {
        tags.push("vcard-payload".to_string());
    }

    let value = rules::QR_DATA_URI_WEIGHT * data_uri_risk
        + rules::QR_NON_ASCII_WEIGHT * non_ascii_risk
        + rules::QR_OVERSIZED_WEIGHT * oversized_risk;

    SignalScore::new(NAME, value, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;

    fn features(payload: &[u8]) -> QrFeatures {
        QrFeatures::extract(payload, &DetectionConfig::default()).unwrap()
    }

    #[test]
    fn test_plain_text_payload_scores_zero() {
        let s = score(&features(b"table 7"));
        assert_eq!(s.value, 0.0);
        assert!(s.tags.is_empty());
    }

    #[test]
    fn test_data_uri_payload_scores_high() {
        let s = score(&features(b"data:text/html;base64,PGh0bWw+"));
        assert!(s.value >= 0.5);
        assert!(s.tags.contains(&"data-uri".to_string()));
    }

    #[test]
    fn test_oversized_non_ascii_payload_accumulates() {
        let mut payload = "\u{0430}".repeat(300).into_bytes();
        payload.extend(vec![b'a'; 300]);
        let s = score(&features(&payload));
        assert!(s.tags.contains(&"non-ascii-payload".to_string()));
        assert!(s.tags.contains(&"oversized-payload".to_string()));
        assert!((s.value - 0.3).abs() < 1e-9);
    }
}
