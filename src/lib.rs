//! kvcache - A concurrent in-memory LRU cache
//!
//! Provides a generic cache contract with a capacity-bounded LRU backend
//! and a pluggable one-shot scheduler used for expiry cleanup.

pub mod cache;
pub mod config;
pub mod error;
pub mod scheduler;

pub use cache::{Cache, CacheEntry, CacheStats, MemoryCache};
pub use config::Config;
pub use error::{CacheError, Result, SchedulerError};
pub use scheduler::{CancelHandle, Scheduler, TokioScheduler};
