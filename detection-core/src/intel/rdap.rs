//! RDAP domain-age provider
//!
//! Queries an RDAP endpoint for the registration event of a domain and
//! derives its age in days. Results are cached in-provider with a TTL so
//! repeated verdict computations do not hammer the registry, and so a
//! lookup that finishes after its caller gave up still pays off for the
//! next request.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::debug;

use super::{DomainIntel, IntelError};

pub const DEFAULT_RDAP_BASE: &str = "https://rdap.org";

const CACHE_MAX_SIZE: usize = 10_000;
const CACHE_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
struct RdapDomain {
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Debug, Deserialize)]
struct RdapEvent {
    #[serde(rename = "eventAction")]
    event_action: String,
    #[serde(rename = "eventDate")]
    event_date: String,
}

struct CachedAge {
    age: Option<i64>,
    cached_at: i64,
}

pub struct RdapProvider {
    base_url: String,
    http: reqwest::Client,
    cache: Mutex<HashMap<String, CachedAge>>,
}

impl RdapProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn get_cached(&self, domain: &str) -> Option<Option<i64>> {
        let cache = self.cache.lock();
        let cached = cache.get(domain)?;
        let age_hours = (Utc::now().timestamp() - cached.cached_at) / 3600;
        if age_hours < CACHE_TTL_HOURS {
            Some(cached.age)
        } else {
            None
        }
    }

    fn cache_result(&self, domain: &str, age: Option<i64>) {
        let mut cache = self.cache.lock();
        if cache.len() >= CACHE_MAX_SIZE && !cache.contains_key(domain) {
            // Evict the oldest entry.
            if let Some(oldest) = cache
                .iter()
                .min_by_key(|(_, v)| v.cached_at)
                .map(|(k, _)| k.clone())
            {
                cache.remove(&oldest);
            }
        }
        cache.insert(
            domain.to_string(),
            CachedAge {
                age,
                cached_at: Utc::now().timestamp(),
            },
        );
    }

    async fn fetch(&self, domain: &str) -> Result<Option<i64>, IntelError> {
        let url = format!("{}/domain/{}", self.base_url, domain);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| IntelError::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(IntelError::Unavailable(format!(
                "RDAP returned {}",
                response.status()
            )));
        }

        let body: RdapDomain = response
            .json()
            .await
            .map_err(|e| IntelError::Unavailable(e.to_string()))?;

        Ok(registration_age_days(&body, Utc::now()))
    }
}

fn registration_age_days(domain: &RdapDomain, now: DateTime<Utc>) -> Option<i64> {
    domain
        .events
        .iter()
        .find(|e| e.event_action == "registration")
        .and_then(|e| DateTime::parse_from_rfc3339(&e.event_date).ok())
        .map(|registered| (now - registered.with_timezone(&Utc)).num_days())
}

#[async_trait::async_trait]
impl DomainIntel for RdapProvider {
    async fn domain_age_days(&self, domain: &str) -> Result<Option<i64>, IntelError> {
        let domain = domain.to_lowercase();
        if let Some(age) = self.get_cached(&domain) {
            debug!(%domain, "RDAP cache hit");
            return Ok(age);
        }

        let age = self.fetch(&domain).await?;
        self.cache_result(&domain, age);
        Ok(age)
    }

    fn name(&self) -> &'static str {
        "rdap"
    }
}
