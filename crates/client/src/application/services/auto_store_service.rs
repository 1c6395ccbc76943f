//! Auto-store Service - persists issues embedded in server responses
//!
//! Server-rendered fragments that want an issue kept locally carry one element
//! flagged with `data-auto-store="true"` whose `data-issue` attribute holds the
//! issue as JSON. This service validates that payload and commits it.

use std::rc::Rc;

use issuedraft_domain::{DomainError, IssueDraft, IssueId};
use thiserror::Error;

use super::record_store::{AddOutcome, IssueStore, StoreError};
use crate::ports::outbound::TimeProvider;

/// Attribute holding the JSON issue payload.
pub const ISSUE_PAYLOAD_ATTR: &str = "data-issue";
/// Selector for the flagged element.
pub const AUTO_STORE_SELECTOR: &str = r#"[data-auto-store="true"]"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoStoreOutcome {
    Stored(IssueId),
    /// Same issue delivered again (retried request, duplicate event)
    AlreadyStored(IssueId),
}

#[derive(Debug, Error)]
pub enum AutoStoreError {
    #[error("Malformed issue payload: {0}")]
    Malformed(String),

    #[error("Invalid issue payload: {0}")]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AutoStoreError {
    /// Whether the payload itself was at fault, as opposed to storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Invalid(_))
    }
}

#[derive(Clone)]
pub struct AutoStoreService {
    issues: IssueStore,
    time: Rc<dyn TimeProvider>,
}

impl AutoStoreService {
    pub fn new(issues: IssueStore, time: Rc<dyn TimeProvider>) -> Self {
        Self { issues, time }
    }

    /// Parse, validate and store one payload.
    ///
    /// Nothing is written unless the payload validates.
    pub fn store_payload(&self, payload: &str) -> Result<AutoStoreOutcome, AutoStoreError> {
        let draft: IssueDraft =
            serde_json::from_str(payload).map_err(|e| AutoStoreError::Malformed(e.to_string()))?;
        let issue = draft.into_issue(self.time.now())?;
        let id = issue.id.clone();

        match self.issues.add(issue)? {
            AddOutcome::Added => {
                tracing::info!(id = %id, "Stored issue from response");
                Ok(AutoStoreOutcome::Stored(id))
            }
            AddOutcome::Duplicate => {
                tracing::debug!(id = %id, "Issue already stored, skipping");
                Ok(AutoStoreOutcome::AlreadyStored(id))
            }
        }
    }
}
