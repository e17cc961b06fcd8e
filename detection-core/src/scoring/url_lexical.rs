//! URL lexical scorer
//!
//! Weighted sum over length, digit ratio, suspicious keywords and
//! IP-literal host. Shortener, punycode and embedded-@ evidence rides
//! along as tags without weight of its own.

use super::rules;
use super::SignalScore;
use crate::features::url::UrlFeatures;

pub const NAME: &str = "url-lexical";

pub fn score(f: &UrlFeatures) -> SignalScore {
    let mut tags = Vec::new();

    let length_risk = (f.length as f64 / rules::URL_LENGTH_SCALE).min(1.0);
    if f.length > rules::URL_LONG_TAG_LEN {
        tags.push("long-url".to_string());
    }

    let digit_risk = (f.digit_ratio / rules::URL_DIGIT_RATIO_SCALE).min(1.0);
    if digit_risk >= 1.0 {
        tags.push("digit-heavy".to_string());
    }

    let keyword_risk = (f.suspicious_keyword_count as f64 / rules::URL_KEYWORD_SCALE).min(1.0);
    if f.suspicious_keyword_count > 0 {
        tags.push("suspicious-keywords".to_string());
    }

    let ip_risk = if f.ip_literal_host {
        tags.push("ip-literal-host".to_string());
        1.0
    } else {
        0.0
    };

    if f.url_shortener {
        tags.push("url-shortener".to_string());
    }
    if f.punycode_host {
        tags.push("punycode-host".to_string());
    }
    if f.embedded_at {
        tags.push("embedded-at".to_string());
    }
    if f.suspicious_tld {
        tags.push("suspicious-tld".to_string());
    }

    let value = rules::URL_LENGTH_WEIGHT * length_risk
        + rules::URL_DIGIT_RATIO_WEIGHT * digit_risk
        + rules::URL_KEYWORD_WEIGHT * keyword_risk
        + rules::URL_IP_LITERAL_WEIGHT * ip_risk;

    SignalScore::new(NAME, value, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;

    fn features(url: &str) -> UrlFeatures {
        UrlFeatures::extract(url, &DetectionConfig::default())
    }

    #[test]
    fn test_clean_short_url_scores_low() {
        let s = score(&features("https://example.com"));
        assert!(s.value < 0.1, "got {}", s.value);
        assert!(s.tags.is_empty());
    }

    #[test]
    fn test_ip_host_with_keywords_scores_high() {
        let s = score(&features("http://203.0.113.9/secure-login-verify-account"));
        assert!(s.value > 0.5, "got {}", s.value);
        assert!(s.tags.contains(&"ip-literal-host".to_string()));
        assert!(s.tags.contains(&"suspicious-keywords".to_string()));
    }

    #[test]
    fn test_score_is_deterministic() {
        let f = features("http://login-verify.example.xyz/account?id=123456789");
        assert_eq!(score(&f), score(&f));
    }
}
