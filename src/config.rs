//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold; 0 means unbounded
    pub max_items: usize,
}

impl Config {
    /// Creates a new Config bounded to the given number of items.
    pub fn bounded(max_items: usize) -> Self {
        Self { max_items }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ITEMS` - Maximum cache entries, 0 for unbounded (default: 0)
    pub fn from_env() -> Self {
        Self {
            max_items: env::var("MAX_ITEMS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { max_items: 0 }
    }
}
