//! Verdict aggregation
//!
//! Combines a modality's signal scores into one verdict through a
//! weighted average, applies the decision threshold, and attaches the
//! recommendation for the outcome. Derived once, never mutated after
//! construction.

use serde::{Deserialize, Serialize};

use crate::features::Modality;
use crate::scoring::rules::{self, DecisionThresholds};
use crate::scoring::SignalScore;

/// Marks a verdict computed with one or more features defaulted because
/// an external lookup was unavailable.
pub const PARTIAL_DATA_TAG: &str = "partial-data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_malicious: bool,
    /// Aggregate score scaled to [0, 100].
    pub confidence: u8,
    /// De-duplicated union of scorer tags, in scorer evaluation order.
    pub tags: Vec<String>,
    pub recommendation: String,
}

pub fn aggregate(
    modality: Modality,
    scores: &[SignalScore],
    thresholds: &DecisionThresholds,
) -> Verdict {
    let mut weight_sum = 0.0;
    let mut weighted = 0.0;
    for s in scores {
        let w = rules::signal_weight(modality, s.name);
        weight_sum += w;
        weighted += w * s.value;
    }
    // Renormalize over the scorers actually present so an absent signal
    // (e.g. no URL scorers for a text QR payload) does not dilute the rest.
    let aggregate = if weight_sum > 0.0 {
        (weighted / weight_sum).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let threshold = thresholds.for_modality(modality);
    // A tie at the threshold resolves malicious. Fail toward caution.
    let is_malicious = aggregate >= threshold;
    let confidence = (aggregate * 100.0).round() as u8;

    let mut tags: Vec<String> = Vec::new();
    for s in scores {
        for tag in &s.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }

    Verdict {
        is_malicious,
        confidence,
        tags,
        recommendation: recommendation(modality, is_malicious).to_string(),
    }
}

/// Fixed recommendation table keyed by modality and outcome.
fn recommendation(modality: Modality, is_malicious: bool) -> &'static str {
    match (modality, is_malicious) {
        (Modality::Url, true) => {
            "Do not open this link. It shows strong signs of a phishing page."
        }
        (Modality::Url, false) => {
            "No strong phishing signals found. Stay cautious with login forms."
        }
        (Modality::Email, true) => {
            "Treat this message as phishing. Do not click its links or reply; report it."
        }
        (Modality::Email, false) => {
            "No strong phishing signals found. Verify the sender before acting on requests."
        }
        (Modality::Qr, true) => {
            "Do not follow this QR code. Its payload looks malicious."
        }
        (Modality::Qr, false) => {
            "Payload looks benign. Check the destination before entering credentials."
        }
        (Modality::Domain, true) => {
            "This domain appears to impersonate a known brand. Avoid it and report it."
        }
        (Modality::Domain, false) => {
            "No impersonation detected against the known brand set."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::SignalScore;

    fn thresholds() -> DecisionThresholds {
        DecisionThresholds::default()
    }

    #[test]
    fn test_tie_at_threshold_is_malicious() {
        let scores = vec![SignalScore::new("email-content", 0.6, vec![])];
        let v = aggregate(Modality::Email, &scores, &thresholds());
        assert!(v.is_malicious);
        assert_eq!(v.confidence, 60);
    }

    #[test]
    fn test_just_below_threshold_is_benign() {
        let scores = vec![SignalScore::new("email-content", 0.59, vec![])];
        let v = aggregate(Modality::Email, &scores, &thresholds());
        assert!(!v.is_malicious);
        assert_eq!(v.confidence, 59);
    }

    #[test]
    fn test_weighted_average_with_renormalization() {
        // Only the payload scorer present: its weight renormalizes to 1.
        let scores = vec![SignalScore::new("qr-payload", 0.8, vec![])];
        let v = aggregate(Modality::Qr, &scores, &thresholds());
        assert_eq!(v.confidence, 80);
        assert!(v.is_malicious);
    }

    #[test]
    fn test_tags_deduplicated_in_evaluation_order() {
        let scores = vec![
            SignalScore::new(
                "url-lexical",
                0.2,
                vec!["suspicious-keywords".into(), "no-https".into()],
            ),
            SignalScore::new(
                "url-transport",
                0.3,
                vec!["no-https".into(), "young-domain".into()],
            ),
        ];
        let v = aggregate(Modality::Url, &scores, &thresholds());
        assert_eq!(v.tags, vec!["suspicious-keywords", "no-https", "young-domain"]);
    }

    #[test]
    fn test_recommendation_follows_modality_and_outcome() {
        let malicious = vec![SignalScore::new("email-content", 0.9, vec![])];
        let benign = vec![SignalScore::new("email-content", 0.1, vec![])];
        let m = aggregate(Modality::Email, &malicious, &thresholds());
        let b = aggregate(Modality::Email, &benign, &thresholds());
        assert_ne!(m.recommendation, b.recommendation);
    }

    #[test]
    fn test_unknown_signal_names_carry_no_weight() {
        let scores = vec![
            SignalScore::new("email-content", 0.2, vec![]),
            SignalScore::new("mystery", 1.0, vec![]),
        ];
        let v = aggregate(Modality::Email, &scores, &thresholds());
        assert_eq!(v.confidence, 20);
    }
}
