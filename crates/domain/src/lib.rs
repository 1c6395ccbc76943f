//! Issue Draft domain: issue and repository records, their invariants, and
//! the Markdown form of an issue. Free of browser dependencies so it builds
//! and tests natively.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod markdown;

pub use entities::{Issue, IssueDraft, Record, Repository, GITHUB_ORIGIN};
pub use error::DomainError;
pub use ids::{IssueId, RepositoryId};
pub use markdown::to_markdown;
