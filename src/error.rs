//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type shared by every [`Cache`](crate::Cache) backend.
///
/// The in-memory backend never fails; these variants exist so that fallible
/// backends (remote or disk-backed caches) can satisfy the same contract
/// without changing it.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend-specific I/O or protocol failure
    #[error("backend error: {0}")]
    Backend(String),

    /// Operation abandoned because the caller canceled or its deadline passed
    #[error("operation canceled")]
    Canceled,
}

// == Scheduler Error Enum ==
/// Errors returned when scheduling a delayed callback.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The default scheduler requires a running tokio runtime to spawn onto
    #[error("no tokio runtime available to schedule onto")]
    NoRuntime,

    /// An alternative scheduler backend failed to register the callback
    #[error("scheduler backend error: {0}")]
    Backend(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
