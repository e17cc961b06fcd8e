//! TLD risk scorer
//!
//! Coarse risk class of the candidate's top-level domain.

use super::rules;
use super::SignalScore;
use crate::features::domain::DomainFeatures;

pub const NAME: &str = "tld-risk";

pub fn score(f: &DomainFeatures) -> SignalScore {
    if f.suspicious_tld {
        SignalScore::new(
            NAME,
            rules::TLD_RISK_SUSPICIOUS,
            vec!["suspicious-tld".to_string()],
        )
    } else {
        SignalScore::new(NAME, rules::TLD_RISK_BASELINE, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intel::brands::BrandSet;

    #[test]
    fn test_tld_classes() {
        let brands = BrandSet::builtin();

        let s = score(&DomainFeatures::extract("login-update.xyz", &brands));
        assert_eq!(s.value, rules::TLD_RISK_SUSPICIOUS);
        assert_eq!(s.tags, vec!["suspicious-tld"]);

        let s = score(&DomainFeatures::extract("example.com", &brands));
        assert_eq!(s.value, rules::TLD_RISK_BASELINE);
        assert!(s.tags.is_empty());
    }
}
