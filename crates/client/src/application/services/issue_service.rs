//! Issue Service - read and delete issues for list and preview views

use issuedraft_domain::entities::sort_newest_first;
use issuedraft_domain::Issue;

use super::record_store::{IssueStore, StoreError};

/// Issue queries shared by the home, history and preview pages.
#[derive(Clone)]
pub struct IssueService {
    store: IssueStore,
}

impl IssueService {
    pub fn new(store: IssueStore) -> Self {
        Self { store }
    }

    /// The `limit` most recently created issues, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<Issue>, StoreError> {
        let mut issues = self.history()?;
        issues.truncate(limit);
        Ok(issues)
    }

    /// Every issue, newest first.
    pub fn history(&self) -> Result<Vec<Issue>, StoreError> {
        let mut issues = self.store.get_all()?;
        sort_newest_first(&mut issues);
        Ok(issues)
    }

    pub fn find(&self, id: &str) -> Result<Option<Issue>, StoreError> {
        if id.trim().is_empty() {
            return Ok(None);
        }
        self.store.get(id)
    }

    /// Returns whether an issue was actually removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.store.remove(id)?;
        if removed {
            tracing::info!(id, "Issue deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::issue_store;
    use crate::infrastructure::platform::mock::MemoryStorage;
    use chrono::{Duration, TimeZone, Utc};
    use issuedraft_domain::common::to_iso_string;
    use issuedraft_domain::IssueId;
    use std::rc::Rc;

    fn service_with(count: i64) -> IssueService {
        let store = issue_store(Rc::new(MemoryStorage::new()));
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for n in 0..count {
            store
                .add(Issue {
                    id: IssueId::parse(format!("issue-{n}")).unwrap(),
                    title: format!("Issue {n}"),
                    story: "story".into(),
                    criteria: String::new(),
                    requirements: String::new(),
                    created_at: to_iso_string(&(base + Duration::hours(n))),
                    extra: Default::default(),
                })
                .unwrap();
        }
        IssueService::new(store)
    }

    #[test]
    fn history_is_newest_first() {
        let titles: Vec<_> = service_with(3)
            .history()
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Issue 2", "Issue 1", "Issue 0"]);
    }

    #[test]
    fn recent_keeps_only_the_newest() {
        let recent = service_with(8).recent(5).unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].title, "Issue 7");
        assert_eq!(recent[4].title, "Issue 3");
    }

    #[test]
    fn find_blank_id_is_none() {
        assert!(service_with(1).find("").unwrap().is_none());
        assert!(service_with(1).find("issue-0").unwrap().is_some());
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let service = service_with(1);
        assert!(service.delete("issue-0").unwrap());
        assert!(!service.delete("issue-0").unwrap());
    }
}
