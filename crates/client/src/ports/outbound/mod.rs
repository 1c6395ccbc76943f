//! Outbound ports - Interfaces for browser services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services and handlers to run against an in-memory
//! platform in tests and against web-sys in the browser.

pub mod document_port;
pub mod platform;

pub use document_port::{container_ids, DocumentPort, Severity};
pub use platform::{storage_keys, Scheduler, StorageError, StorageProvider, TimeProvider};

#[cfg(test)]
pub use document_port::MockDocumentPort;
#[cfg(test)]
pub use platform::{MockStorageProvider, MockTimeProvider};
