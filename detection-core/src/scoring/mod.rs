//! Signal scorers
//!
//! One scorer per heuristic, each a pure function from a feature vector
//! to a calibrated score in [0, 1] plus evidence tags. Scorers never touch
//! the network or a clock; everything they need is already in the vector.

pub mod domain_similarity;
pub mod email_content;
pub mod qr_payload;
pub mod rules;
pub mod tld_risk;
pub mod transport;
pub mod url_lexical;

use serde::Serialize;

use crate::features::FeatureVector;

/// One scorer's output. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalScore {
    pub name: &'static str,
    pub value: f64,
    pub tags: Vec<String>,
}

impl SignalScore {
    /// The value is clamped on construction so a scorer bug can never
    /// push a signal outside [0, 1].
    pub fn new(name: &'static str, value: f64, tags: Vec<String>) -> Self {
        Self {
            name,
            value: value.clamp(0.0, 1.0),
            tags,
        }
    }
}

/// Run every scorer that applies to the vector, in a fixed evaluation
/// order. Verdict tag ordering depends on this order being stable.
pub fn score_all(features: &FeatureVector) -> Vec<SignalScore> {
    match features {
        FeatureVector::Url(f) => vec![url_lexical::score(f), transport::score(f)],
        FeatureVector::Email(f) => vec![email_content::score(f)],
        FeatureVector::Qr(f) => {
            let mut scores = vec![qr_payload::score(f)];
            if let Some(url) = &f.url {
                scores.push(url_lexical::score(url));
                scores.push(transport::score(url));
            }
            scores
        }
        FeatureVector::Domain(f) => vec![domain_similarity::score(f), tld_risk::score(f)],
    }
}
