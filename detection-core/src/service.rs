//! Detection service façade
//!
//! Stateless request/response surface: one operation per modality. Owns
//! input validation, the external-lookup deadline, and the
//! degrade-gracefully policy. A request that validates always gets a
//! verdict; a slow or dead intel provider only costs the age feature and
//! earns the verdict a `partial-data` tag.

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::cache::VerdictCache;
use crate::config::DetectionConfig;
use crate::error::DetectResult;
use crate::features::domain::DomainFeatures;
use crate::features::email::EmailFeatures;
use crate::features::qr::{QrContentType, QrFeatures};
use crate::features::url::UrlFeatures;
use crate::features::{self, FeatureVector, Modality};
use crate::intel::brands::{BrandSet, BrandStore};
use crate::intel::DomainIntel;
use crate::scoring::{self, rules};
use crate::verdict::{self, Verdict, PARTIAL_DATA_TAG};

/// URL analysis: the verdict plus the extracted feature vector, which the
/// caller renders alongside it.
#[derive(Debug, Clone)]
pub struct UrlAnalysis {
    pub verdict: Verdict,
    pub features: UrlFeatures,
}

#[derive(Debug, Clone)]
pub struct QrAnalysis {
    pub verdict: Verdict,
    pub content_type: QrContentType,
    pub extracted_content: String,
}

#[derive(Debug, Clone)]
pub struct DomainAnalysis {
    pub verdict: Verdict,
    /// Canonical domain of the impersonated brand, when one matched.
    pub legitimate_domain: Option<String>,
}

enum LookupOutcome {
    Answer(Option<i64>),
    Degraded,
}

pub struct DetectionService {
    config: DetectionConfig,
    brands: Arc<BrandStore>,
    intel: Arc<dyn DomainIntel>,
    cache: VerdictCache,
}

impl DetectionService {
    pub fn new(config: DetectionConfig, brands: BrandSet, intel: Arc<dyn DomainIntel>) -> Self {
        let cache = VerdictCache::new(config.cache_capacity);
        Self {
            config,
            brands: Arc::new(BrandStore::new(brands)),
            intel,
            cache,
        }
    }

    /// Shared brand-set handle, for atomic reloads by the host process.
    pub fn brand_store(&self) -> &Arc<BrandStore> {
        &self.brands
    }

    /// Drop expired verdicts. Driven periodically by the host process.
    pub fn sweep_cache(&self) -> usize {
        self.cache.sweep()
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    pub async fn analyze_url(&self, raw: &str) -> DetectResult<UrlAnalysis> {
        features::validate_raw(raw.as_bytes(), self.config.max_input_bytes)?;
        let key = VerdictCache::key(Modality::Url, raw);
        let mut url = UrlFeatures::extract(raw, &self.config);

        if let Some(cached) = self.cache.get(&key) {
            debug!(modality = %Modality::Url, "verdict cache hit");
            return Ok(UrlAnalysis {
                verdict: cached,
                features: url,
            });
        }

        let mut partial = false;
        if wants_age_lookup(&url) {
            match self.lookup_domain_age(&url.host).await {
                LookupOutcome::Answer(age) => url.domain_age_days = age,
                LookupOutcome::Degraded => partial = true,
            }
        }

        let scores = scoring::score_all(&FeatureVector::Url(url.clone()));
        let mut verdict = verdict::aggregate(Modality::Url, &scores, &self.config.thresholds);
        if partial {
            verdict.tags.push(PARTIAL_DATA_TAG.to_string());
        }

        self.cache.put(key, verdict.clone(), self.config.cache_ttl);
        Ok(UrlAnalysis {
            verdict,
            features: url,
        })
    }

    pub async fn analyze_email(&self, raw: &str) -> DetectResult<Verdict> {
        features::validate_raw(raw.as_bytes(), self.config.max_input_bytes)?;
        let key = VerdictCache::key(Modality::Email, raw);

        if let Some(cached) = self.cache.get(&key) {
            debug!(modality = %Modality::Email, "verdict cache hit");
            return Ok(cached);
        }

        let email = EmailFeatures::extract(raw, &self.config);
        let scores = scoring::score_all(&FeatureVector::Email(email));
        let verdict = verdict::aggregate(Modality::Email, &scores, &self.config.thresholds);

        self.cache.put(key, verdict.clone(), self.config.cache_ttl);
        Ok(verdict)
    }

    pub async fn scan_qr(&self, payload: &[u8]) -> DetectResult<QrAnalysis> {
        features::validate_raw(payload, self.config.max_input_bytes)?;
        let mut qr = QrFeatures::extract(payload, &self.config)?;
        // Keyed on the decoded payload, which is what actually got judged.
        let key = VerdictCache::key(Modality::Qr, &qr.text);

        if let Some(cached) = self.cache.get(&key) {
            debug!(modality = %Modality::Qr, "verdict cache hit");
            return Ok(QrAnalysis {
                verdict: cached,
                content_type: qr.content_type,
                extracted_content: qr.text,
            });
        }

        let mut partial = false;
        if let Some(url) = &mut qr.url {
            if wants_age_lookup(url) {
                match self.lookup_domain_age(&url.host).await {
                    LookupOutcome::Answer(age) => url.domain_age_days = age,
                    LookupOutcome::Degraded => partial = true,
                }
            }
        }

        let content_type = qr.content_type;
        let extracted_content = qr.text.clone();
        let scores = scoring::score_all(&FeatureVector::Qr(qr));
        let mut verdict = verdict::aggregate(Modality::Qr, &scores, &self.config.thresholds);
        if partial {
            verdict.tags.push(PARTIAL_DATA_TAG.to_string());
        }

        self.cache.put(key, verdict.clone(), self.config.cache_ttl);
        Ok(QrAnalysis {
            verdict,
            content_type,
            extracted_content,
        })
    }

    pub async fn check_domain(&self, raw: &str) -> DetectResult<DomainAnalysis> {
        features::validate_raw(raw.as_bytes(), self.config.max_input_bytes)?;
        let key = VerdictCache::key(Modality::Domain, raw);
        let snapshot = self.brands.snapshot();
        let domain = DomainFeatures::extract(raw, &snapshot);
        let legitimate_domain = impersonated_domain(&domain);

        if let Some(cached) = self.cache.get(&key) {
            debug!(modality = %Modality::Domain, "verdict cache hit");
            return Ok(DomainAnalysis {
                verdict: cached,
                legitimate_domain,
            });
        }

        let scores = scoring::score_all(&FeatureVector::Domain(domain));
        let verdict = verdict::aggregate(Modality::Domain, &scores, &self.config.thresholds);

        self.cache.put(key, verdict.clone(), self.config.cache_ttl);
        Ok(DomainAnalysis {
            verdict,
            legitimate_domain,
        })
    }

    // ========================================================================
    // EXTERNAL LOOKUP
    // ========================================================================

    async fn lookup_domain_age(&self, host: &str) -> LookupOutcome {
        let intel = Arc::clone(&self.intel);
        let domain = host.to_string();
        // Detached from the request: an already-dispatched lookup survives
        // caller cancellation and still warms the provider cache for the
        // next request.
        let handle = tokio::spawn(async move { intel.domain_age_days(&domain).await });

        match timeout(self.config.lookup_deadline, handle).await {
            Ok(Ok(Ok(age))) => LookupOutcome::Answer(age),
            Ok(Ok(Err(err))) => {
                warn!(provider = self.intel.name(), %err, "domain intel lookup failed");
                LookupOutcome::Degraded
            }
            Ok(Err(err)) => {
                error!(%err, "domain intel task failed");
                LookupOutcome::Degraded
            }
            Err(_) => {
                warn!(
                    provider = self.intel.name(),
                    deadline_ms = self.config.lookup_deadline.as_millis() as u64,
                    "domain intel lookup exceeded deadline"
                );
                LookupOutcome::Degraded
            }
        }
    }
}

/// Age lookups only make sense for named hosts.
fn wants_age_lookup(url: &UrlFeatures) -> bool {
    !url.host.is_empty() && !url.ip_literal_host && url.host.contains('.')
}

fn impersonated_domain(f: &DomainFeatures) -> Option<String> {
    if f.exact_match {
        return None;
    }
    if f.homoglyph_match || f.min_distance <= rules::LOOKALIKE_DISTANCE_MAX {
        f.nearest_domain.clone()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::intel::{IntelError, StaticIntel};

    /// Provider that never answers within any sane deadline.
    struct StalledIntel;

    #[async_trait]
    impl DomainIntel for StalledIntel {
        async fn domain_age_days(&self, _domain: &str) -> Result<Option<i64>, IntelError> {
            tokio::time::sleep(Duration::from_secs(300)).await;
            Ok(Some(1))
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    /// Provider that is down.
    struct DeadIntel;

    #[async_trait]
    impl DomainIntel for DeadIntel {
        async fn domain_age_days(&self, _domain: &str) -> Result<Option<i64>, IntelError> {
            Err(IntelError::Unavailable("connection refused".into()))
        }

        fn name(&self) -> &'static str {
            "dead"
        }
    }

    fn no_cache_config() -> DetectionConfig {
        DetectionConfig {
            cache_ttl: Duration::ZERO,
            lookup_deadline: Duration::from_millis(50),
            ..DetectionConfig::default()
        }
    }

    fn service_with(intel: Arc<dyn DomainIntel>) -> DetectionService {
        DetectionService::new(no_cache_config(), BrandSet::builtin(), intel)
    }

    #[tokio::test]
    async fn test_empty_input_is_invalid() {
        let svc = service_with(Arc::new(StaticIntel::new()));
        assert!(svc.analyze_url("").await.is_err());
        assert!(svc.analyze_email("   ").await.is_err());
        assert!(svc.check_domain("").await.is_err());
        assert!(svc.scan_qr(b"").await.is_err());
    }

    #[tokio::test]
    async fn test_oversized_input_is_invalid() {
        let svc = service_with(Arc::new(StaticIntel::new()));
        let big = "a".repeat(crate::config::MAX_INPUT_BYTES + 1);
        assert!(svc.analyze_email(&big).await.is_err());
    }

    #[tokio::test]
    async fn test_verdicts_are_deterministic() {
        // Zero TTL forces full recomputation on every call.
        let intel = Arc::new(StaticIntel::new().with_age("login-update.xyz", 12));
        let svc = service_with(intel);

        let url = "http://login-update.xyz/verify-account";
        let first = svc.analyze_url(url).await.unwrap();
        let second = svc.analyze_url(url).await.unwrap();
        assert_eq!(first.verdict, second.verdict);
        assert_eq!(first.features, second.features);
    }

    #[tokio::test]
    async fn test_mature_https_url_is_benign() {
        let intel = Arc::new(StaticIntel::new().with_age("example.com", 2500));
        let svc = service_with(intel);

        let analysis = svc.analyze_url("https://example.com/docs").await.unwrap();
        assert!(!analysis.verdict.is_malicious);
        assert_eq!(analysis.features.domain_age_days, Some(2500));
        assert!(!analysis
            .verdict
            .tags
            .contains(&PARTIAL_DATA_TAG.to_string()));
    }

    #[tokio::test]
    async fn test_stalled_lookup_degrades_with_partial_data() {
        let svc = service_with(Arc::new(StalledIntel));

        let analysis = svc.analyze_url("https://example.com/docs").await.unwrap();
        assert_eq!(analysis.features.domain_age_days, None);
        assert!(analysis
            .verdict
            .tags
            .contains(&PARTIAL_DATA_TAG.to_string()));
    }

    #[tokio::test]
    async fn test_dead_provider_degrades_with_partial_data() {
        let svc = service_with(Arc::new(DeadIntel));

        let analysis = svc.analyze_url("https://example.com/docs").await.unwrap();
        assert!(analysis
            .verdict
            .tags
            .contains(&PARTIAL_DATA_TAG.to_string()));
        // Still a complete verdict from the remaining signals.
        assert!(!analysis.verdict.is_malicious);
    }

    #[tokio::test]
    async fn test_email_tags_are_idempotent() {
        let svc = service_with(Arc::new(StaticIntel::new()));
        let body = "From: Desk google.com <d@desk.xyz>\n\
                    Action required: verify your account within 24 hours \
                    http://a.xyz/1 http://a.xyz/2 http://a.xyz/3";

        let first = svc.analyze_email(body).await.unwrap();
        let second = svc.analyze_email(body).await.unwrap();
        assert_eq!(first.tags, second.tags);
        assert!(first.is_malicious);
    }

    #[tokio::test]
    async fn test_typosquat_domain_is_impersonating() {
        let svc = service_with(Arc::new(StaticIntel::new()));

        let analysis = svc.check_domain("go0gle.com").await.unwrap();
        assert!(analysis.verdict.is_malicious);
        assert_eq!(analysis.legitimate_domain.as_deref(), Some("google.com"));
    }

    #[tokio::test]
    async fn test_canonical_domain_is_not_impersonating() {
        let svc = service_with(Arc::new(StaticIntel::new()));

        let analysis = svc.check_domain("google.com").await.unwrap();
        assert!(!analysis.verdict.is_malicious);
        assert_eq!(analysis.legitimate_domain, None);
    }

    #[tokio::test]
    async fn test_qr_url_payload_reuses_url_pipeline() {
        let svc = service_with(Arc::new(StaticIntel::new()));

        let analysis = svc
            .scan_qr(b"http://203.0.113.9/secure-login-verify-account")
            .await
            .unwrap();
        assert_eq!(analysis.content_type, QrContentType::Url);
        assert!(analysis
            .verdict
            .tags
            .contains(&"ip-literal-host".to_string()));
        assert!(analysis.verdict.is_malicious);
    }

    #[tokio::test]
    async fn test_qr_text_payload_is_benign() {
        let svc = service_with(Arc::new(StaticIntel::new()));
        let analysis = svc.scan_qr(b"table 7, ask for Ana").await.unwrap();
        assert_eq!(analysis.content_type, QrContentType::Text);
        assert!(!analysis.verdict.is_malicious);
        assert_eq!(analysis.verdict.confidence, 0);
    }

    #[tokio::test]
    async fn test_undecodable_qr_payload_is_unsupported() {
        let svc = service_with(Arc::new(StaticIntel::new()));
        let err = svc.scan_qr(&[0xc3, 0x28]).await.unwrap_err();
        assert!(matches!(err, crate::error::DetectError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_cache_serves_repeat_requests() {
        let config = DetectionConfig {
            lookup_deadline: Duration::from_millis(50),
            ..DetectionConfig::default()
        };
        let svc = DetectionService::new(
            config,
            BrandSet::builtin(),
            Arc::new(StaticIntel::new().with_age("example.com", 2500)),
        );

        let first = svc.analyze_url("https://example.com").await.unwrap();
        // Case and whitespace variants hit the same entry.
        let second = svc.analyze_url("  https://EXAMPLE.com  ").await.unwrap();
        assert_eq!(first.verdict, second.verdict);
    }
}
