//! External intelligence
//!
//! Capability interfaces for data the core cannot compute on its own:
//! the known brand set and WHOIS-like domain registration data. Providers
//! sit behind traits with injectable test doubles so scorer logic stays
//! verifiable without network access.

pub mod brands;
pub mod rdap;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntelError {
    #[error("lookup timed out")]
    Timeout,

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// WHOIS-like domain data behind a pluggable provider. Implementations
/// must tolerate concurrent calls; the service enforces the deadline.
#[async_trait]
pub trait DomainIntel: Send + Sync {
    /// Age of the domain registration in days. `Ok(None)` means the
    /// provider has no answer for this domain, which is not a failure.
    async fn domain_age_days(&self, domain: &str) -> Result<Option<i64>, IntelError>;

    fn name(&self) -> &'static str {
        "intel"
    }
}

/// Fixture-backed provider. The offline default and the test double.
#[derive(Debug, Default)]
pub struct StaticIntel {
    ages: HashMap<String, i64>,
}

impl StaticIntel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age(mut self, domain: &str, days: i64) -> Self {
        self.ages.insert(domain.to_lowercase(), days);
        self
    }
}

#[async_trait]
impl DomainIntel for StaticIntel {
    async fn domain_age_days(&self, domain: &str) -> Result<Option<i64>, IntelError> {
        Ok(self.ages.get(&domain.to_lowercase()).copied())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
