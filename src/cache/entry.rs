//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with expiry support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value with its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation time
    created_at: Instant,
    /// Absolute expiry deadline, None = never expires
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry, computing the absolute deadline from an optional
    /// time-to-live.
    ///
    /// Both `None` and a zero duration mean "never expires".
    pub fn new(value: V, expire_after: Option<Duration>) -> Self {
        let now = Instant::now();
        let expires_at = expire_after
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| now.checked_add(ttl));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's deadline has passed.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to its deadline.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining time to live.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` once the entry has expired
    /// - `Some(remaining)` while an expiring entry is live
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Returns how long ago the entry was created.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
