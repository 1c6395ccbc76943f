//! Platform abstraction ports
//!
//! These traits abstract browser services so that:
//! 1. Application/presentation code remains platform-agnostic
//! 2. web-sys code is isolated in infrastructure
//! 3. Code is testable natively with in-memory implementations
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`. Ports layer contains only trait definitions.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure reported by the underlying key-value medium.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is missing or disabled (private mode, blocked by policy)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The medium rejected a write (e.g. quota exceeded)
    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },

    /// The medium rejected a read
    #[error("Failed to read '{key}': {message}")]
    Read { key: String, message: String },
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn write(key: &str, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn read(key: &str, message: impl Into<String>) -> Self {
        Self::Read {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Time operations abstraction
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    /// Current time in milliseconds since epoch
    fn now_millis(&self) -> u64;
}

/// Persistent key-value storage abstraction (localStorage in the browser)
///
/// Unlike a cache, failures are reported: callers decide how to surface them.
#[cfg_attr(test, mockall::automock)]
pub trait StorageProvider {
    /// Load a string value by key, `Ok(None)` if absent
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Save a string value under the given key, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Deferred work on the UI thread.
///
/// Tasks are fire-and-forget; page teardown drops whatever is pending.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>);
}

/// Storage key constants
///
/// These are kept in the ports layer as they define the persisted layout:
/// each key holds one JSON object mapping record id to record.
pub mod storage_keys {
    pub const ISSUES: &str = "issues";
    pub const REPOSITORIES: &str = "repositories";
}
