//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// RDAP base URL for domain-age lookups. Unset runs the offline
    /// provider instead of the network.
    pub rdap_base_url: Option<String>,

    /// Path to a JSON brand-set file. Unset keeps the built-in list.
    pub brand_set_path: Option<String>,

    /// Maximum accepted payload size in bytes
    pub max_input_bytes: usize,

    /// External lookup deadline in milliseconds
    pub lookup_deadline_ms: u64,

    /// Verdict cache capacity (entries)
    pub cache_capacity: usize,

    /// Verdict cache TTL in seconds
    pub cache_ttl_secs: u64,

    /// Interval between cache sweeps in seconds
    pub cache_sweep_secs: u64,

    /// Interval between brand-set reloads in seconds
    pub brand_reload_secs: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            rdap_base_url: env::var("RDAP_BASE_URL").ok().filter(|s| !s.is_empty()),

            brand_set_path: env::var("BRAND_SET_PATH").ok().filter(|s| !s.is_empty()),

            max_input_bytes: env::var("MAX_INPUT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64 * 1024),

            lookup_deadline_ms: env::var("LOOKUP_DEADLINE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_500),

            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),

            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15 * 60),

            cache_sweep_secs: env::var("CACHE_SWEEP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),

            brand_reload_secs: env::var("BRAND_RELOAD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 60),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
