//! Known brand set
//!
//! Reference data mapping canonical domains to brand names. Read-only
//! during request handling; reloads swap a complete immutable snapshot so
//! a reader never observes a half-updated set.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub brand: String,
    pub domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandSet {
    entries: Vec<BrandEntry>,
}

impl BrandSet {
    pub fn new(entries: Vec<BrandEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| BrandEntry {
                brand: e.brand,
                domain: e.domain.trim().to_lowercase(),
            })
            .collect();
        Self { entries }
    }

    /// Brands most frequently impersonated in phishing campaigns. Used
    /// until a deployment supplies its own list.
    pub fn builtin() -> Self {
        const SEED: &[(&str, &str)] = &[
            ("Google", "google.com"),
            ("Google", "gmail.com"),
            ("Microsoft", "microsoft.com"),
            ("Microsoft", "outlook.com"),
            ("Microsoft", "office.com"),
            ("Apple", "apple.com"),
            ("Apple", "icloud.com"),
            ("Amazon", "amazon.com"),
            ("Facebook", "facebook.com"),
            ("PayPal", "paypal.com"),
            ("Netflix", "netflix.com"),
            ("LinkedIn", "linkedin.com"),
            ("Instagram", "instagram.com"),
            ("WhatsApp", "whatsapp.com"),
            ("Dropbox", "dropbox.com"),
            ("GitHub", "github.com"),
            ("Chase", "chase.com"),
            ("Wells Fargo", "wellsfargo.com"),
            ("Bank of America", "bankofamerica.com"),
            ("Coinbase", "coinbase.com"),
            ("Binance", "binance.com"),
            ("DocuSign", "docusign.com"),
            ("Zoom", "zoom.us"),
            ("Adobe", "adobe.com"),
            ("DHL", "dhl.com"),
            ("FedEx", "fedex.com"),
            ("USPS", "usps.com"),
        ];
        Self::new(
            SEED.iter()
                .map(|(brand, domain)| BrandEntry {
                    brand: brand.to_string(),
                    domain: domain.to_string(),
                })
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<BrandEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn load_path(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(std::io::Error::other)
    }

    pub fn is_canonical(&self, domain: &str) -> bool {
        self.entries.iter().any(|e| e.domain == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrandEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared handle to the current brand set. Readers take a cheap `Arc`
/// snapshot; `reload` swaps the whole set atomically.
pub struct BrandStore {
    inner: RwLock<Arc<BrandSet>>,
}

impl BrandStore {
    pub fn new(set: BrandSet) -> Self {
        Self {
            inner: RwLock::new(Arc::new(set)),
        }
    }

    pub fn snapshot(&self) -> Arc<BrandSet> {
        self.inner.read().clone()
    }

    pub fn reload(&self, set: BrandSet) {
        *self.inner.write() = Arc::new(set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_major_brands() {
        let set = BrandSet::builtin();
        assert!(set.is_canonical("google.com"));
        assert!(set.is_canonical("paypal.com"));
        assert!(!set.is_canonical("go0gle.com"));
    }

    #[test]
    fn test_from_json_normalizes_domains() {
        let set = BrandSet::from_json(
            r#"[{"brand": "Example", "domain": " EXAMPLE.com "}]"#,
        )
        .unwrap();
        assert!(set.is_canonical("example.com"));
    }

    #[test]
    fn test_store_snapshot_survives_reload() {
        let store = BrandStore::new(BrandSet::builtin());
        let before = store.snapshot();

        store.reload(BrandSet::new(vec![BrandEntry {
            brand: "Example".into(),
            domain: "example.com".into(),
        }]));

        // The old snapshot is untouched; new readers see the new set.
        assert!(before.is_canonical("google.com"));
        let after = store.snapshot();
        assert!(!after.is_canonical("google.com"));
        assert!(after.is_canonical("example.com"));
    }
}
