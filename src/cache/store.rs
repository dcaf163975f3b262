//! Cache Store Module
//!
//! The in-memory LRU engine: a recency list plus key index behind a single
//! lock, implementing the generic cache contract.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::lru::{LruList, Token};
use crate::cache::{Cache, CacheEntry, CacheStats};
use crate::config::Config;
use crate::error::Result;
use crate::scheduler::{Scheduler, TokioScheduler};

// == Inner State ==
/// Everything the engine mutates, guarded by one mutex.
///
/// Invariant: `index` holds exactly one token per live key, and every token
/// resolves to a list node whose key matches, so `index.len() == list.len()`
/// at every point the lock is released.
#[derive(Debug)]
struct Inner<V> {
    /// Recency-ordered entries, most recently touched first
    list: LruList<V>,
    /// key -> list token, for O(1) lookup and O(1) arbitrary removal
    index: HashMap<String, Token>,
    /// Performance counters
    stats: CacheStats,
}

impl<V> Inner<V> {
    /// Removes the entry under `key`, if any, from both structures.
    fn remove_key(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(token) => {
                self.list.remove(token);
                true
            }
            None => false,
        }
    }

    /// Removes the entry under `key` only if its deadline has passed.
    fn remove_if_expired(&mut self, key: &str) -> bool {
        let expired = self
            .index
            .get(key)
            .and_then(|&token| self.list.entry(token))
            .is_some_and(|entry| entry.is_expired());

        if expired {
            self.remove_key(key);
            self.stats.record_expiration();
        }
        expired
    }
}

// == Memory Cache ==
/// Capacity-bounded in-memory LRU cache.
///
/// When adding an entry would put the cache over [`Config::max_items`], the
/// least recently touched entries are purged to make room. Reads count as
/// touches. A `max_items` of 0 means unbounded.
///
/// All state sits behind a single mutex, so the handle can be cloned and
/// shared freely across threads; clones operate on the same engine.
pub struct MemoryCache<V> {
    inner: Arc<Mutex<Inner<V>>>,
    /// Maximum number of items; 0 means unbounded
    max_items: usize,
    /// Schedules one-shot purges of expiring entries
    scheduler: Arc<dyn Scheduler>,
}

impl<V: Clone + Send + 'static> MemoryCache<V> {
    // == Constructors ==
    /// Creates a fully-initialized engine from the given configuration,
    /// using the tokio-backed scheduler for expiry cleanup.
    pub fn new(config: Config) -> Self {
        Self::with_scheduler(config, Arc::new(TokioScheduler))
    }

    /// Creates an engine that schedules expiry cleanup through a custom
    /// scheduler.
    pub fn with_scheduler(config: Config, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                list: LruList::new(),
                index: HashMap::new(),
                stats: CacheStats::new(),
            })),
            max_items: config.max_items,
            scheduler,
        }
    }

    // == Accessors ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().list.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().list.is_empty()
    }

    /// Maximum number of items retained; 0 means unbounded.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Returns a snapshot of the performance counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.list.len());
        stats
    }

    // == Purge Expired ==
    /// Removes every entry whose deadline has passed.
    ///
    /// Expiry is already checked lazily on `get`; this sweep reclaims
    /// entries that are never read again.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let expired: Vec<String> = inner
            .list
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.to_string())
            .collect();

        let count = expired.len();
        for key in expired {
            inner.remove_key(&key);
            inner.stats.record_expiration();
        }

        if count > 0 {
            debug!(removed = count, "purged expired cache entries");
        }
        count
    }

    // == Purge Scheduling ==
    /// Schedules a one-shot purge for `key` once `delay` elapses.
    ///
    /// The callback holds a weak reference and re-checks the deadline under
    /// the lock, so it is a no-op when the engine is gone or the entry was
    /// superseded in the meantime. When no scheduler is available the entry
    /// still expires lazily on read.
    fn schedule_purge(&self, key: &str, delay: Duration) {
        let weak: Weak<Mutex<Inner<V>>> = Arc::downgrade(&self.inner);
        let owned = key.to_owned();
        let purge = move || {
            if let Some(inner) = weak.upgrade() {
                if inner.lock().remove_if_expired(&owned) {
                    trace!(key = %owned, "scheduled purge removed expired entry");
                }
            }
        };

        if let Err(err) = self.scheduler.run_once_after(delay, Box::new(purge)) {
            debug!(key, error = %err, "expiry purge not scheduled; entry will expire lazily");
        }
    }
}

impl<V: Clone + Send + 'static> Cache<V> for MemoryCache<V> {
    // == Get ==
    fn get(&self, key: &str) -> Result<Option<V>> {
        let mut inner = self.inner.lock();

        let token = match inner.index.get(key) {
            Some(&token) => token,
            None => {
                inner.stats.record_miss();
                return Ok(None);
            }
        };

        // An expired entry reads as a miss and is dropped on the spot.
        let expired = inner
            .list
            .entry(token)
            .is_some_and(|entry| entry.is_expired());
        if expired {
            inner.remove_key(key);
            inner.stats.record_expiration();
            inner.stats.record_miss();
            return Ok(None);
        }

        // Mark as most recently read.
        inner.list.move_to_front(token);
        inner.stats.record_hit();
        Ok(inner.list.entry(token).map(|entry| entry.value.clone()))
    }

    // == Set ==
    fn set(&self, key: &str, value: V, expire_after: Option<Duration>) -> Result<()> {
        let entry = CacheEntry::new(value, expire_after);
        let ttl = entry.ttl_remaining();

        {
            let mut inner = self.inner.lock();

            match inner.index.get(key) {
                Some(&token) => {
                    // Supersede the existing entry in place and mark it
                    // most recently touched.
                    if let Some(slot) = inner.list.entry_mut(token) {
                        *slot = entry;
                    }
                    inner.list.move_to_front(token);
                }
                None => {
                    let token = inner.list.push_front(key.to_owned(), entry);
                    inner.index.insert(key.to_owned(), token);
                }
            }

            // Evict least recently touched entries until within capacity.
            // A single set can evict more than one entry.
            while self.max_items > 0 && inner.list.len() > self.max_items {
                match inner.list.pop_back() {
                    Some((evicted, _)) => {
                        inner.index.remove(&evicted);
                        inner.stats.record_eviction();
                        trace!(key = %evicted, "evicted least recently used entry");
                    }
                    None => break,
                }
            }
        }

        // Ask the scheduler to purge the entry once its deadline passes.
        // The lazy check on read stays authoritative either way.
        if let Some(delay) = ttl {
            self.schedule_purge(key, delay);
        }

        Ok(())
    }

    // == Clear ==
    fn clear(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.lock();
        Ok(inner.remove_key(key))
    }
}

impl<V> Clone for MemoryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            max_items: self.max_items,
            scheduler: Arc::clone(&self.scheduler),
        }
    }
}

impl<V> fmt::Debug for MemoryCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("max_items", &self.max_items)
            .finish_non_exhaustive()
    }
}
