//! Detection configuration
//!
//! Constants define the defaults; `DetectionConfig` carries the runtime
//! values so deployments can tune limits without touching scorer code.

use std::time::Duration;

use crate::scoring::rules::DecisionThresholds;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Hard cap on raw input size. Prevents resource exhaustion on adversarial
/// payloads.
pub const MAX_INPUT_BYTES: usize = 64 * 1024;

/// Deadline for a single external lookup (domain age). Past this the
/// request proceeds with the feature defaulted.
pub const LOOKUP_DEADLINE_MS: u64 = 1_500;

/// Verdict cache capacity (entries).
pub const CACHE_CAPACITY: usize = 10_000;

/// Verdict cache time-to-live.
pub const CACHE_TTL_SECS: u64 = 15 * 60;

/// Keywords that frequently appear in credential-harvesting URLs.
pub const SUSPICIOUS_URL_KEYWORDS: &[&str] = &[
    "login", "verify", "secure", "account", "update", "confirm",
    "banking", "signin", "password", "wallet", "invoice", "webscr",
];

/// Urgency markers that phishing emails lean on.
pub const URGENT_MARKERS: &[&str] = &[
    "verify your account",
    "confirm your identity",
    "suspended your account",
    "unusual activity",
    "click immediately",
    "reset your password",
    "update your payment",
    "your account will be",
    "within 24 hours",
    "action required",
    "act now",
];

// ============================================================================
// CONFIG
// ============================================================================

/// Runtime configuration for the detection service.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Maximum accepted payload size in bytes.
    pub max_input_bytes: usize,

    /// Deadline for external lookups.
    pub lookup_deadline: Duration,

    /// Verdict cache capacity.
    pub cache_capacity: usize,

    /// Verdict cache TTL.
    pub cache_ttl: Duration,

    /// Keyword list for the URL lexical extractor.
    pub suspicious_keywords: Vec<String>,

    /// Urgency marker list for the email extractor.
    pub urgent_markers: Vec<String>,

    /// Per-modality decision thresholds.
    pub thresholds: DecisionThresholds,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: MAX_INPUT_BYTES,
            lookup_deadline: Duration::from_millis(LOOKUP_DEADLINE_MS),
            cache_capacity: CACHE_CAPACITY,
            cache_ttl: Duration::from_secs(CACHE_TTL_SECS),
            suspicious_keywords: SUSPICIOUS_URL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            urgent_markers: URGENT_MARKERS.iter().map(|m| m.to_string()).collect(),
            thresholds: DecisionThresholds::default(),
        }
    }
}
