//! Domain similarity scorer
//!
//! Maps brand-set distance to a monotonically decreasing risk curve.
//! Distance zero to a canonical domain is the brand itself and scores
//! zero; distance zero reached only through homoglyph folding is the
//! classic typosquat and scores maximal.

use super::rules;
use super::SignalScore;
use crate::features::domain::DomainFeatures;

pub const NAME: &str = "domain-similarity";

pub fn score(f: &DomainFeatures) -> SignalScore {
    if f.exact_match {
        return SignalScore::new(NAME, 0.0, vec!["known-brand".to_string()]);
    }

    let mut tags = Vec::new();

    if f.homoglyph_match {
        tags.push("homoglyph-typosquat".to_string());
        if let Some(brand) = &f.nearest_brand {
            tags.push(format!("resembles-{}", slug(brand)));
        }
        return SignalScore::new(NAME, 1.0, tags);
    }

    if f.nearest_brand.is_none() {
        // Empty brand set: nothing to compare against.
        return SignalScore::new(NAME, 0.0, tags);
    }

    let closeness = (1.0 - f.min_distance).clamp(0.0, 1.0);
    let value = closeness * closeness;

    if f.min_distance <= rules::LOOKALIKE_DISTANCE_MAX {
        tags.push("lookalike-domain".to_string());
        if let Some(brand) = &f.nearest_brand {
            tags.push(format!("resembles-{}", slug(brand)));
        }
    }

    SignalScore::new(NAME, value, tags)
}

fn slug(brand: &str) -> String {
    brand
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intel::brands::BrandSet;

    fn features(domain: &str) -> DomainFeatures {
        DomainFeatures::extract(domain, &BrandSet::builtin())
    }

    #[test]
    fn test_canonical_domain_is_zero_risk() {
        let s = score(&features("paypal.com"));
        assert_eq!(s.value, 0.0);
        assert_eq!(s.tags, vec!["known-brand"]);
    }

    #[test]
    fn test_homoglyph_squat_is_maximal_risk() {
        let s = score(&features("go0gle.com"));
        assert_eq!(s.value, 1.0);
        assert!(s.tags.contains(&"homoglyph-typosquat".to_string()));
        assert!(s.tags.contains(&"resembles-google".to_string()));
    }

    #[test]
    fn test_one_edit_squat_is_high_risk() {
        let s = score(&features("goggle.com"));
        assert!(s.value > 0.7, "got {}", s.value);
        assert!(s.tags.contains(&"lookalike-domain".to_string()));
    }

    #[test]
    fn test_unrelated_domain_is_low_risk() {
        let s = score(&features("quiet-meadow-pottery.com"));
        assert!(s.value < 0.4, "got {}", s.value);
        assert!(!s.tags.contains(&"lookalike-domain".to_string()));
    }

    #[test]
    fn test_risk_decreases_with_distance() {
        let one_edit = score(&features("goggle.com"));
        let two_edits = score(&features("gogglle.com"));
        assert!(one_edit.value >= two_edits.value);
    }
}
