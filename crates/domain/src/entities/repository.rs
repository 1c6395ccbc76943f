//! Repository entity - a GitHub repository issues can be filed against
//!
//! Repositories are registered from the settings form. The `(owner, name)`
//! pair is unique case-insensitively, and the URL always points at GitHub.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::common::{require_text, to_iso_string};
use crate::error::DomainError;
use crate::ids::RepositoryId;

/// Every repository URL must start with this origin.
pub const GITHUB_ORIGIN: &str = "https://github.com/";

/// Characters left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: RepositoryId,
    pub name: String,
    pub owner: String,
    pub url: String,
    /// ISO-8601 text exactly as it was stored
    pub created_at: String,
}

impl Repository {
    /// Build a repository from raw form input.
    ///
    /// Owner and name are trimmed and must be non-empty; they may not
    /// contain `/` or whitespace since both end up in the URL path.
    pub fn new(owner: &str, name: &str, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let owner = path_segment("Owner", owner)?;
        let name = path_segment("Repository name", name)?;
        let url = format!("{GITHUB_ORIGIN}{owner}/{name}");

        Ok(Self {
            id: RepositoryId::generate(),
            name,
            owner,
            url,
            created_at: to_iso_string(&now),
        })
    }

    /// Whether this record can be offered as an issue target.
    ///
    /// Stored data is not trusted: records written by older clients may
    /// lack an owner or point somewhere other than GitHub.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.owner.trim().is_empty()
            && self.url.starts_with(GITHUB_ORIGIN)
    }

    /// `owner/name`, as GitHub displays it.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Case-insensitive `(owner, name)` comparison.
    pub fn matches(&self, owner: &str, name: &str) -> bool {
        self.owner.trim().to_lowercase() == owner.trim().to_lowercase()
            && self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// GitHub "new issue" URL with title and body prefilled.
    pub fn new_issue_url(&self, title: &str, body: &str) -> String {
        format!(
            "{}/issues/new?title={}&body={}",
            self.url.trim_end_matches('/'),
            utf8_percent_encode(title, URI_COMPONENT),
            utf8_percent_encode(body, URI_COMPONENT),
        )
    }
}

impl Record for Repository {
    const ENTITY_TYPE: &'static str = "Repository";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Find a repository with the same `(owner, name)`, ignoring case.
pub fn find_duplicate<'a>(
    existing: impl IntoIterator<Item = &'a Repository>,
    owner: &str,
    name: &str,
) -> Option<&'a Repository> {
    existing.into_iter().find(|repo| repo.matches(owner, name))
}

fn path_segment(field: &str, raw: &str) -> Result<String, DomainError> {
    let value = require_text(field, raw)?;
    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(DomainError::validation(format!(
            "{field} cannot contain '/' or spaces"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_trims_input_and_derives_url() {
        let repo = Repository::new("  octo ", " hello-world\n", now()).unwrap();
        assert_eq!(repo.owner, "octo");
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.url, "https://github.com/octo/hello-world");
        assert_eq!(repo.created_at, "2024-05-01T12:00:00.000Z");
        assert!(repo.is_valid());
    }

    #[test]
    fn new_rejects_blank_or_path_breaking_input() {
        assert!(Repository::new("", "name", now()).is_err());
        assert!(Repository::new("owner", "   ", now()).is_err());
        assert!(Repository::new("own/er", "name", now()).is_err());
        assert!(Repository::new("owner", "my repo", now()).is_err());
    }

    #[test]
    fn is_valid_rejects_foreign_urls() {
        let mut repo = Repository::new("octo", "hello", now()).unwrap();
        repo.url = "https://gitlab.com/octo/hello".into();
        assert!(!repo.is_valid());
        repo.url = "http://github.com/octo/hello".into();
        assert!(!repo.is_valid());
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let existing = vec![Repository::new("Bar", "foo", now()).unwrap()];
        assert!(find_duplicate(&existing, "bar", "Foo").is_some());
        assert!(find_duplicate(&existing, "bar", "foo2").is_none());
    }

    #[test]
    fn new_issue_url_encodes_like_encode_uri_component() {
        let repo = Repository::new("octo", "hello", now()).unwrap();
        let url = repo.new_issue_url("Fix login & logout", "## User Story\n- a (b)");
        assert_eq!(
            url,
            "https://github.com/octo/hello/issues/new\
             ?title=Fix%20login%20%26%20logout\
             &body=%23%23%20User%20Story%0A-%20a%20(b)"
        );
    }
}
