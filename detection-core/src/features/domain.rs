//! Domain feature extraction
//!
//! Measures how close a candidate domain sits to the known brand set.
//! Distance is Damerau-Levenshtein over homoglyph-folded strings, so both
//! transpositions (`googel`) and confusable substitutions (`go0gle`) land
//! near their target.

use serde::Serialize;

use crate::features::url::SUSPICIOUS_TLDS;
use crate::intel::brands::BrandSet;

/// Domain feature schema. Every field is populated on every extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainFeatures {
    /// Lowercased candidate with scheme and `www.` stripped.
    pub domain: String,
    pub tld: String,
    pub length: usize,
    /// Minimum normalized distance to any brand domain, 1.0 when the
    /// brand set is empty.
    pub min_distance: f64,
    pub nearest_brand: Option<String>,
    pub nearest_domain: Option<String>,
    /// Candidate is itself a canonical brand domain.
    pub exact_match: bool,
    /// Candidate folds to a canonical domain it does not literally equal.
    pub homoglyph_match: bool,
    pub suspicious_tld: bool,
}

impl DomainFeatures {
    pub fn extract(raw: &str, brands: &BrandSet) -> Self {
        let domain = normalize(raw);
        let tld = domain.rsplit('.').next().unwrap_or("").to_string();
        let folded = fold_homoglyphs(&domain);

        let mut min_distance = 1.0f64;
        let mut nearest_brand = None;
        let mut nearest_domain = None;
        let mut exact_match = false;
        let mut homoglyph_match = false;

        for entry in brands.iter() {
            if domain == entry.domain {
                exact_match = true;
                min_distance = 0.0;
                nearest_brand = Some(entry.brand.clone());
                nearest_domain = Some(entry.domain.clone());
                break;
            }

            let brand_folded = fold_homoglyphs(&entry.domain);
            let dist = normalized_distance(&folded, &brand_folded);
            if dist < min_distance {
                min_distance = dist;
                nearest_brand = Some(entry.brand.clone());
                nearest_domain = Some(entry.domain.clone());
                homoglyph_match = folded == brand_folded;
            }
        }

        Self {
            length: domain.len(),
            suspicious_tld: SUSPICIOUS_TLDS.contains(&tld.as_str()),
            tld,
            min_distance,
            nearest_brand,
            nearest_domain,
            exact_match,
            homoglyph_match,
            domain,
        }
    }
}

fn normalize(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let lower = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let lower = lower.split(['/', '?', '#', ':']).next().unwrap_or("");
    lower.strip_prefix("www.").unwrap_or(lower).to_string()
}

/// Distance scaled into [0, 1] by the longer operand.
pub(crate) fn normalized_distance(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    damerau_levenshtein(a, b) as f64 / max_len as f64
}

/// Damerau-Levenshtein with adjacent transpositions.
pub(crate) fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 0..=m {
        dp[i][0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                dp[i][j] = dp[i][j].min(dp[i - 2][j - 2] + cost);
            }
        }
    }
    dp[m][n]
}

/// Collapse visually confusable characters onto their ASCII targets.
pub(crate) fn fold_homoglyphs(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '0' | 'О' | 'о' => 'o',
            '1' | 'l' | 'І' | 'і' => 'i',
            '3' => 'e',
            '4' => 'a',
            '5' => 's',
            '8' => 'b',
            'а' => 'a',
            'е' => 'e',
            'р' => 'p',
            'с' => 'c',
            'у' => 'y',
            'х' => 'x',
            'ɡ' => 'g',
            'ɑ' => 'a',
            'ν' => 'v',
            'ω' => 'w',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damerau_counts_transposition_as_one() {
        assert_eq!(damerau_levenshtein("google", "googel"), 1);
        assert_eq!(damerau_levenshtein("google", "google"), 0);
        assert_eq!(damerau_levenshtein("abc", "cba"), 2);
    }

    #[test]
    fn test_canonical_domain_is_exact_match() {
        let brands = BrandSet::builtin();
        let f = DomainFeatures::extract("google.com", &brands);
        assert!(f.exact_match);
        assert_eq!(f.min_distance, 0.0);
        assert!(!f.homoglyph_match);
    }

    #[test]
    fn test_homoglyph_collision() {
        let brands = BrandSet::builtin();
        let f = DomainFeatures::extract("go0gle.com", &brands);
        assert!(!f.exact_match);
        assert!(f.homoglyph_match);
        assert_eq!(f.nearest_domain.as_deref(), Some("google.com"));
        assert_eq!(f.min_distance, 0.0);
    }

    #[test]
    fn test_unrelated_domain_is_far() {
        let brands = BrandSet::builtin();
        let f = DomainFeatures::extract("quiet-meadow-pottery.com", &brands);
        assert!(!f.exact_match);
        assert!(!f.homoglyph_match);
        assert!(f.min_distance > 0.3);
    }

    #[test]
    fn test_normalization_strips_scheme_and_www() {
        let brands = BrandSet::builtin();
        let f = DomainFeatures::extract("https://www.Google.com/", &brands);
        assert_eq!(f.domain, "google.com");
        assert!(f.exact_match);
    }
}
