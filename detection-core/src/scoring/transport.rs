//! Transport scorer: HTTPS and domain age
//!
//! Registration age decays logarithmically instead of through a hard
//! cutoff. When the age is unknown the age component drops out entirely
//! and the score renormalizes over the HTTPS signal alone, so the verdict
//! reflects only the signals actually observed.

use super::rules;
use super::SignalScore;
use crate::features::url::UrlFeatures;

pub const NAME: &str = "url-transport";

pub fn score(f: &UrlFeatures) -> SignalScore {
    let mut tags = Vec::new();

    let https_risk = if f.https {
        0.0
    } else {
        tags.push("no-https".to_string());
        1.0
    };

    let value = match f.domain_age_days {
        Some(age) => {
            let risk = age_risk(age);
            if risk > rules::YOUNG_DOMAIN_TAG_RISK {
                tags.push("young-domain".to_string());
            }
            rules::TRANSPORT_HTTPS_WEIGHT * https_risk + rules::TRANSPORT_AGE_WEIGHT * risk
        }
        None => {
            tags.push("unknown-domain-age".to_string());
            https_risk
        }
    };

    SignalScore::new(NAME, value, tags)
}

/// Smooth decay from 1.0 at age zero toward 0.0 at
/// `MATURE_DOMAIN_AGE_DAYS` and beyond.
fn age_risk(age_days: i64) -> f64 {
    let age = age_days.max(0) as f64;
    let decayed = 1.0 - (1.0 + age).ln() / (1.0 + rules::MATURE_DOMAIN_AGE_DAYS).ln();
    decayed.clamp(0.0, 1.0)
}
