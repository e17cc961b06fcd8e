//! Email content scorer
//!
//! Urgency density, embedded links and sender mismatch, each tagged when
//! it fires.

use super::rules;
use super::SignalScore;
use crate::features::email::EmailFeatures;

pub const NAME: &str = "email-content";

pub fn score(f: &EmailFeatures) -> SignalScore {
    let mut tags = Vec::new();

    let urgency_risk = (f.urgent_keyword_count as f64 / rules::EMAIL_URGENCY_SCALE).min(1.0);
    if f.urgent_language {
        tags.push("urgent-language".to_string());
    }

    let link_risk = (f.link_count as f64 / rules::EMAIL_LINKS_SCALE).min(1.0);
    if f.link_count >= rules::EMAIL_MANY_LINKS_TAG {
        tags.push("many-links".to_string());
    }

    let sender_risk = if f.sender_mismatch {
        tags.push("sender-mismatch".to_string());
        1.0
    } else {
        0.0
    };

    let value = rules::EMAIL_URGENCY_WEIGHT * urgency_risk
        + rules::EMAIL_LINKS_WEIGHT * link_risk
        + rules::EMAIL_SENDER_WEIGHT * sender_risk;

    SignalScore::new(NAME, value, tags)
}
