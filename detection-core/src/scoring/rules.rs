//! Scoring weights and decision thresholds
//!
//! Weights are named constants, grouped per scorer and summing to 1
//! within each scorer so every signal lands naturally in [0, 1].
//! They are sensible defaults, not calibrated ground truth; tighten them
//! against labeled traffic before trusting the output in production.

use serde::{Deserialize, Serialize};

use crate::features::Modality;

// ============================================================================
// URL LEXICAL SCORER
// ============================================================================

pub const URL_LENGTH_WEIGHT: f64 = 0.20;
pub const URL_DIGIT_RATIO_WEIGHT: f64 = 0.20;
pub const URL_KEYWORD_WEIGHT: f64 = 0.35;
pub const URL_IP_LITERAL_WEIGHT: f64 = 0.25;

/// Length at which the length component saturates.
pub const URL_LENGTH_SCALE: f64 = 120.0;

/// Length past which the `long-url` tag fires.
pub const URL_LONG_TAG_LEN: usize = 75;

/// Digit ratio at which the digit component saturates.
pub const URL_DIGIT_RATIO_SCALE: f64 = 0.3;

/// Keyword hits at which the keyword component saturates.
pub const URL_KEYWORD_SCALE: f64 = 3.0;

// ============================================================================
// TRANSPORT SCORER (HTTPS / DOMAIN AGE)
// ============================================================================

pub const TRANSPORT_HTTPS_WEIGHT: f64 = 0.5;
pub const TRANSPORT_AGE_WEIGHT: f64 = 0.5;

/// Age at which the registration-age signal fully decays. The decay is
/// logarithmic, not a hard cutoff.
pub const MATURE_DOMAIN_AGE_DAYS: f64 = 2000.0;

/// Age risk above which the `young-domain` tag fires.
pub const YOUNG_DOMAIN_TAG_RISK: f64 = 0.5;

// ============================================================================
// EMAIL CONTENT SCORER
// ============================================================================

pub const EMAIL_URGENCY_WEIGHT: f64 = 0.40;
pub const EMAIL_LINKS_WEIGHT: f64 = 0.30;
pub const EMAIL_SENDER_WEIGHT: f64 = 0.30;

/// Distinct urgency markers at which the urgency component saturates.
pub const EMAIL_URGENCY_SCALE: f64 = 3.0;

/// Embedded links at which the link component saturates.
pub const EMAIL_LINKS_SCALE: f64 = 5.0;

/// Link count at which the `many-links` tag fires.
pub const EMAIL_MANY_LINKS_TAG: usize = 3;

// ============================================================================
// QR PAYLOAD SCORER
// ============================================================================

pub const QR_DATA_URI_WEIGHT: f64 = 0.7;
pub const QR_NON_ASCII_WEIGHT: f64 = 0.2;
pub const QR_OVERSIZED_WEIGHT: f64 = 0.1;

// ============================================================================
// DOMAIN SCORERS
// ============================================================================

/// Normalized distance at or below which a domain counts as a lookalike.
pub const LOOKALIKE_DISTANCE_MAX: f64 = 0.25;

pub const TLD_RISK_SUSPICIOUS: f64 = 0.9;
pub const TLD_RISK_BASELINE: f64 = 0.05;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Per-modality signal weights. Weights for each modality sum to 1; the
/// aggregator renormalizes over the scorers actually present (a QR
/// payload that is not a URL carries no URL scorers).
pub fn signal_weight(modality: Modality, signal: &str) -> f64 {
    match (modality, signal) {
        (Modality::Url, "url-lexical") => 0.60,
        (Modality::Url, "url-transport") => 0.40,
        (Modality::Email, "email-content") => 1.0,
        (Modality::Qr, "qr-payload") => 0.20,
        (Modality::Qr, "url-lexical") => 0.50,
        (Modality::Qr, "url-transport") => 0.30,
        (Modality::Domain, "domain-similarity") => 0.75,
        (Modality::Domain, "tld-risk") => 0.25,
        _ => 0.0,
    }
}

/// Aggregate score at or above the threshold classifies as malicious.
pub const DECISION_THRESHOLD: f64 = 0.6;

/// Per-modality decision thresholds, configurable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionThresholds {
    pub url: f64,
    pub email: f64,
    pub qr: f64,
    pub domain: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            url: DECISION_THRESHOLD,
            email: DECISION_THRESHOLD,
            qr: DECISION_THRESHOLD,
            domain: DECISION_THRESHOLD,
        }
    }
}

impl DecisionThresholds {
    pub fn for_modality(&self, modality: Modality) -> f64 {
        match modality {
            Modality::Url => self.url,
            Modality::Email => self.email,
            Modality::Qr => self.qr,
            Modality::Domain => self.domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scorer_weights_sum_to_one() {
        let url = URL_LENGTH_WEIGHT
            + URL_DIGIT_RATIO_WEIGHT
            + URL_KEYWORD_WEIGHT
            + URL_IP_LITERAL_WEIGHT;
        assert!((url - 1.0).abs() < 1e-9);

        let email = EMAIL_URGENCY_WEIGHT + EMAIL_LINKS_WEIGHT + EMAIL_SENDER_WEIGHT;
        assert!((email - 1.0).abs() < 1e-9);

        let qr = QR_DATA_URI_WEIGHT + QR_NON_ASCII_WEIGHT + QR_OVERSIZED_WEIGHT;
        assert!((qr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregation_weights_sum_to_one_per_modality() {
        for (modality, signals) in [
            (Modality::Url, vec!["url-lexical", "url-transport"]),
            (Modality::Email, vec!["email-content"]),
            (Modality::Qr, vec!["qr-payload", "url-lexical", "url-transport"]),
            (Modality::Domain, vec!["domain-similarity", "tld-risk"]),
        ] {
            let sum: f64 = signals.iter().map(|s| signal_weight(modality, *s)).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{modality} weights sum to {sum}");
        }
    }
}
