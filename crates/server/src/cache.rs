//! # Request Cache
//!
//! Finished decks keyed by the normalized request, each with its own expiry.
//!
//! Entries are replaced whole and expire lazily: an expired entry is
//! dropped by the read that finds it, or by [`RequestCache::purge_expired`].
//!
//! There is no in-flight guard. Two concurrent misses for the same key both
//! build a deck and both store it; the later write wins.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use cards::CardRecord;
use tokio::time::Instant;
use tracing::debug;

struct CacheEntry {
    deck: Vec<CardRecord>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Default)]
pub struct RequestCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deck stored under `key`, unless missing or expired
    pub fn get(&self, key: &str) -> Option<Vec<CardRecord>> {
        let now = Instant::now();
        {
            let entries = self.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.deck.clone()),
                Some(_) => {}
            }
        }

        // Expired: evict unless a fresh write landed in between
        let mut entries = self.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            debug!("Evicted expired deck {}", key);
        }
        None
    }

    pub fn set(&self, key: impl Into<String>, deck: Vec<CardRecord>, ttl: Duration) {
        let entry = CacheEntry {
            deck,
            expires_at: Instant::now() + ttl,
        };
        self.write().insert(key.into(), entry);
    }

    /// Drop every expired entry, returning how many went
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Stored entries, expired ones included until evicted
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(|err| err.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards::{DEFAULT_IMAGE_BASE, RawCandidate};

    fn deck(ids: &[u64]) -> Vec<CardRecord> {
        ids.iter()
            .map(|&id| {
                CardRecord::from_candidate(&RawCandidate::new(id, format!("Movie {id}")), DEFAULT_IMAGE_BASE)
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_within_ttl() {
        let cache = RequestCache::new();
        cache.set("k", deck(&[1, 2]), Duration::from_secs(300));

        tokio::time::advance(Duration::from_secs(299)).await;

        assert_eq!(cache.get("k"), Some(deck(&[1, 2])));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_evicted_on_read() {
        let cache = RequestCache::new();
        cache.set("k", deck(&[1]), Duration::from_secs(300));

        tokio::time::advance(Duration::from_secs(300)).await;

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_replaces_whole_entry() {
        let cache = RequestCache::new();
        cache.set("k", deck(&[1]), Duration::from_secs(10));
        cache.set("k", deck(&[2, 3]), Duration::from_secs(600));

        tokio::time::advance(Duration::from_secs(60)).await;

        assert_eq!(cache.get("k"), Some(deck(&[2, 3])));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = RequestCache::new();
        cache.set("short", deck(&[1]), Duration::from_secs(300));
        cache.set("long", deck(&[2]), Duration::from_secs(600));

        tokio::time::advance(Duration::from_secs(400)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("long").is_some());
    }

    #[test]
    fn test_empty_deck_is_a_hit() {
        let cache = RequestCache::new();
        cache.set("k", Vec::new(), Duration::from_secs(60));

        assert_eq!(cache.get("k"), Some(Vec::new()));
        assert!(cache.get("other").is_none());
    }
}
