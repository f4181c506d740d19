//! TTL-bounded memoizing resolver for identity lookups.
//!
//! Lookups against the user/group or account database can be slow when they
//! are backed by a directory service, and a sync touches the same handful of
//! ids for thousands of files. `NameCache` remembers each outcome, successes
//! for a long window and failures for a short one.
//!
//! Locking: hits take the read lock only. Misses take the write lock, check
//! again and call the resolver while still holding it, so one key is never
//! populated by two resolver calls at once.
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::constants::{NEGATIVE_NAME_CACHE_TTL, POSITIVE_NAME_CACHE_TTL};
use crate::types::errors::LookupError;

struct NameCacheEntry<V> {
    outcome: Result<V, LookupError>,
    resolved_at: Instant,
}

impl<V: Clone> NameCacheEntry<V> {
    fn live(&self, now: Instant, positive_ttl: Duration, negative_ttl: Duration) -> bool {
        let ttl = if self.outcome.is_ok() {
            positive_ttl
        } else {
            negative_ttl
        };
        now.saturating_duration_since(self.resolved_at) < ttl
    }
}

pub struct NameCache<K, V = String> {
    entries: RwLock<HashMap<K, NameCacheEntry<V>>>,
    positive_ttl: Duration,
    negative_ttl: Duration,
}

impl<K, V> NameCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttls(POSITIVE_NAME_CACHE_TTL, NEGATIVE_NAME_CACHE_TTL)
    }

    #[must_use]
    pub fn with_ttls(positive_ttl: Duration, negative_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            positive_ttl,
            negative_ttl,
        }
    }

    /// Return the cached outcome for `id`, calling `resolve` only when there
    /// is no live entry.
    ///
    /// A failed resolution is cached too and returned to every caller until
    /// the negative TTL lapses.
    ///
    /// # Errors
    /// Returns the resolver's error, fresh or cached.
    pub fn get_or_populate<Q, F>(&self, id: &Q, resolve: F) -> Result<V, LookupError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce(&Q) -> Result<V, LookupError>,
    {
        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(id) {
                if entry.live(Instant::now(), self.positive_ttl, self.negative_ttl) {
                    return entry.outcome.clone();
                }
            }
        }

        let mut entries = self.entries.write();
        // Another caller may have populated the entry while we waited.
        if let Some(entry) = entries.get(id) {
            if entry.live(Instant::now(), self.positive_ttl, self.negative_ttl) {
                return entry.outcome.clone();
            }
        }

        let outcome = resolve(id);
        entries.insert(
            id.to_owned(),
            NameCacheEntry {
                outcome: outcome.clone(),
                resolved_at: Instant::now(),
            },
        );
        outcome
    }

    /// Drop entries whose TTL has lapsed. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.live(now, self.positive_ttl, self.negative_ttl));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<K, V> Default for NameCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for NameCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameCache")
            .field("entries", &self.entries.read().len())
            .field("positive_ttl", &self.positive_ttl)
            .field("negative_ttl", &self.negative_ttl)
            .finish()
    }
}
