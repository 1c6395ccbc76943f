//! Application services
//!
//! This module contains application services that implement use cases
//! for the Issue Draft client. Services depend on port traits, not concrete
//! infrastructure implementations.

pub mod auto_store_service;
pub mod issue_service;
pub mod record_store;
pub mod repository_service;

pub use auto_store_service::{AutoStoreError, AutoStoreOutcome, AutoStoreService};
pub use issue_service::IssueService;
pub use record_store::{
    issue_store, repository_store, AddOutcome, IssueStore, RecordStore, RepositoryStore,
    StoreError,
};
pub use repository_service::{RepositoryForm, RepositoryService};
