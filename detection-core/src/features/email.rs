//! Email content feature extraction
//!
//! Works on plain message text (headers optional). Urgent-language
//! markers come from the configurable list so deployments can localize
//! them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::DetectionConfig;

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"']+"#).unwrap());
static FROM_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^from:[ \t]*(.+)$").unwrap());
static ADDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^<>@\s]+@[^<>\s]+)>").unwrap());
static BARE_ADDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static DOMAIN_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[a-z0-9-]+\.)+[a-z]{2,}").unwrap());

/// Email feature schema. Every field is populated on every extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailFeatures {
    pub length: usize,
    pub word_count: usize,
    /// Distinct urgency markers present in the body.
    pub urgent_keyword_count: usize,
    pub urgent_language: bool,
    pub link_count: usize,
    pub sender_domain: Option<String>,
    /// Display name advertises a different domain than the sender address.
    pub sender_mismatch: bool,
}

impl EmailFeatures {
    pub fn extract(raw: &str, config: &DetectionConfig) -> Self {
        let body = raw.trim();
        let lower = body.to_lowercase();

        let urgent_keyword_count = config
            .urgent_markers
            .iter()
            .filter(|m| lower.contains(m.as_str()))
            .count();

        let link_count = LINK_RE.find_iter(body).count();
        let (sender_domain, sender_mismatch) = sender_of(body);

        Self {
            length: body.len(),
            word_count: body.split_whitespace().count(),
            urgent_keyword_count,
            urgent_language: urgent_keyword_count > 0,
            link_count,
            sender_domain,
            sender_mismatch,
        }
    }
}

/// Parse the first `From:` line, if any. Returns the sender domain and
/// whether the display-name part names a different domain than the
/// address itself.
fn sender_of(body: &str) -> (Option<String>, bool) {
    let Some(caps) = FROM_LINE_RE.captures(body) else {
        return (None, false);
    };
    let from_line = caps.get(1).map(|m| m.as_str()).unwrap_or("");

    // Address in angle brackets wins; otherwise the first bare address.
    let (display, addr) = match ADDR_RE.captures(from_line) {
        Some(c) => {
            let whole = c.get(0).unwrap();
            let display = format!(
                "{}{}",
                &from_line[..whole.start()],
                &from_line[whole.end()..]
            );
            (display, Some(c.get(1).unwrap().as_str().to_string()))
        }
        None => (
            from_line.to_string(),
            BARE_ADDR_RE
                .find(from_line)
                .map(|m| m.as_str().to_string()),
        ),
    };

    let Some(addr) = addr else {
        return (None, false);
    };
    let sender_domain = addr
        .rsplit('@')
        .next()
        .map(|d| d.trim_end_matches('>').to_lowercase());

    let mismatch = match &sender_domain {
        Some(sender) => DOMAIN_TOKEN_RE
            .find_iter(&display.to_lowercase())
            .any(|m| {
                let named = m.as_str();
                named != sender && !sender.ends_with(&format!(".{}", named))
            }),
        None => false,
    };

    (sender_domain, mismatch)
}
