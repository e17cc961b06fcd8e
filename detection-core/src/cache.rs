//! Verdict cache
//!
//! Capacity-bounded memoization of verdicts by normalized input key.
//! Eviction is least-recently-used; expiry is lazy on read and confirmed
//! by a periodic `sweep` the server drives. An entry past its TTL is
//! absent even if the sweep has not removed it yet.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::features::Modality;
use crate::verdict::Verdict;

struct CacheEntry {
    verdict: Verdict,
    expires_at: Instant,
    last_used: Instant,
}

pub struct VerdictCache {
    capacity: usize,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl VerdictCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Normalized key: case-folded, whitespace-trimmed input prefixed
    /// with the modality.
    pub fn key(modality: Modality, raw: &str) -> String {
        format!("{}|{}", modality.as_str(), raw.trim().to_lowercase())
    }

    pub fn get(&self, key: &str) -> Option<Verdict> {
        let mut entries = self.entries.lock();
        let now = Instant::now();
        match entries.get_mut(key) {
            Some(entry) if entry.expires_at > now => {
                entry.last_used = now;
                Some(entry.verdict.clone())
            }
            Some(_) => {
                // Lazy expiry.
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: String, verdict: Verdict, ttl: Duration) {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some(lru) = entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&lru);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                verdict,
                expires_at: now + ttl,
                last_used: now,
            },
        );
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.lock();
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
