//! Feature extraction
//!
//! Pure functions turning raw input into a structured, bounded feature
//! vector. Extraction is total: malformed sub-fields fall back to schema
//! defaults instead of failing the request. The only extraction failures
//! are `InvalidInput` (empty or oversized payload) and, for QR payloads,
//! `UnsupportedFormat` (undecodable bytes).
//!
//! Every feature struct has all of its fields populated by construction,
//! so a vector is never partially missing.

pub mod domain;
pub mod email;
pub mod qr;
pub mod url;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DetectionConfig;
use crate::error::{DetectError, DetectResult};
use crate::intel::brands::BrandSet;

// ============================================================================
// MODALITY
// ============================================================================

/// The four input kinds handled by the detection core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Url,
    Email,
    Qr,
    Domain,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Url => "url",
            Modality::Email => "email",
            Modality::Qr => "qr",
            Modality::Domain => "domain",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// REQUEST
// ============================================================================

/// One analysis request. Immutable, created per call.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub modality: Modality,
    pub raw: Vec<u8>,
}

impl AnalysisRequest {
    pub fn text(modality: Modality, raw: &str) -> Self {
        Self {
            modality,
            raw: raw.as_bytes().to_vec(),
        }
    }

    pub fn bytes(modality: Modality, raw: &[u8]) -> Self {
        Self {
            modality,
            raw: raw.to_vec(),
        }
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Modality-tagged feature vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureVector {
    Url(url::UrlFeatures),
    Email(email::EmailFeatures),
    Qr(qr::QrFeatures),
    Domain(domain::DomainFeatures),
}

/// Reject empty and oversized payloads before any extraction runs.
pub fn validate_raw(raw: &[u8], max_bytes: usize) -> DetectResult<()> {
    if raw.is_empty() || raw.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(DetectError::InvalidInput("empty payload".into()));
    }
    if raw.len() > max_bytes {
        return Err(DetectError::InvalidInput(format!(
            "payload exceeds {} bytes",
            max_bytes
        )));
    }
    Ok(())
}

fn require_utf8(raw: &[u8]) -> DetectResult<&str> {
    std::str::from_utf8(raw)
        .map_err(|_| DetectError::InvalidInput("payload is not valid UTF-8".into()))
}

/// Extract the feature vector for a request against a brand-set snapshot.
pub fn extract(
    request: &AnalysisRequest,
    config: &DetectionConfig,
    brands: &BrandSet,
) -> DetectResult<FeatureVector> {
    validate_raw(&request.raw, config.max_input_bytes)?;

    match request.modality {
        Modality::Url => {
            let raw = require_utf8(&request.raw)?;
            Ok(FeatureVector::Url(url::UrlFeatures::extract(raw, config)))
        }
        Modality::Email => {
            let raw = require_utf8(&request.raw)?;
            Ok(FeatureVector::Email(email::EmailFeatures::extract(raw, config)))
        }
        Modality::Qr => Ok(FeatureVector::Qr(qr::QrFeatures::extract(
            &request.raw,
            config,
        )?)),
        Modality::Domain => {
            let raw = require_utf8(&request.raw)?;
            Ok(FeatureVector::Domain(domain::DomainFeatures::extract(
                raw, brands,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(
            validate_raw(b"", 1024),
            Err(DetectError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_raw(b"   \n\t ", 1024),
            Err(DetectError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let big = vec![b'a'; 2048];
        assert!(matches!(
            validate_raw(&big, 1024),
            Err(DetectError::InvalidInput(_))
        ));
        assert!(validate_raw(&big, 4096).is_ok());
    }

    #[test]
    fn test_extract_dispatches_by_modality() {
        let config = DetectionConfig::default();
        let brands = BrandSet::builtin();

        let req = AnalysisRequest::text(Modality::Url, "https://example.com/login");
        assert!(matches!(
            extract(&req, &config, &brands),
            Ok(FeatureVector::Url(_))
        ));

        let req = AnalysisRequest::text(Modality::Domain, "example.com");
        assert!(matches!(
            extract(&req, &config, &brands),
            Ok(FeatureVector::Domain(_))
        ));
    }
}
