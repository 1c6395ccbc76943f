//! Issue entity - a drafted software issue
//!
//! Issues are generated server-side and delivered embedded in response
//! markup. The client stores them verbatim; they are never edited after
//! creation, only deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;
use crate::common::{parse_datetime, require_text, to_iso_string};
use crate::error::DomainError;
use crate::ids::IssueId;
use crate::markdown;

/// A drafted issue: user story plus optional criteria and requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    /// The user story text, rendered as-is
    pub story: String,
    /// Newline-delimited acceptance criteria (may be empty)
    #[serde(default)]
    pub criteria: String,
    /// Newline-delimited technical requirements (may be empty)
    #[serde(default)]
    pub requirements: String,
    /// ISO-8601 text exactly as it was delivered or stored
    pub created_at: String,
    /// Fields this client does not interpret, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Render this issue as GitHub-flavoured Markdown.
    pub fn to_markdown(&self) -> String {
        markdown::to_markdown(self)
    }
}

impl Record for Issue {
    const ENTITY_TYPE: &'static str = "Issue";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Unvalidated issue as it arrives in an auto-store payload.
///
/// Every field is optional so a malformed payload surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub story: Option<String>,
    pub criteria: Option<String>,
    pub requirements: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IssueDraft {
    /// Validate the draft into an [`Issue`].
    ///
    /// `id`, `title` and `story` must be present and non-blank. A parseable
    /// `created_at` is kept verbatim; a missing or unparsable one is replaced
    /// by `now` in `toISOString` form.
    pub fn into_issue(self, now: DateTime<Utc>) -> Result<Issue, DomainError> {
        let id = match self.id {
            Some(raw) => IssueId::parse(raw)?,
            None => return Err(DomainError::validation("Issue id is missing")),
        };
        let title = self
            .title
            .ok_or_else(|| DomainError::validation("Issue title is missing"))?;
        let story = self
            .story
            .ok_or_else(|| DomainError::validation("Issue story is missing"))?;
        require_text("Issue title", &title)?;
        require_text("Issue story", &story)?;

        let created_at = match self.created_at {
            Some(raw) if parse_datetime(&raw).is_some() => raw,
            _ => to_iso_string(&now),
        };

        Ok(Issue {
            id,
            title,
            story,
            criteria: self.criteria.unwrap_or_default(),
            requirements: self.requirements.unwrap_or_default(),
            created_at,
            extra: self.extra,
        })
    }
}
