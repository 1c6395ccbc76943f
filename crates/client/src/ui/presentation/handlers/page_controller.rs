//! Page controller
//!
//! Owns the route decided at page load and renders that page's container
//! from the record store. User actions (form submit, delete, copy) land here
//! and every failure is turned into a notification; nothing propagates past
//! this boundary.

use issuedraft_domain::{DomainError, Issue, Record};

use crate::application::services::{IssueService, RepositoryForm, RepositoryService, StoreError};
use crate::application::ServiceError;
use crate::ports::outbound::{container_ids, Severity};
use crate::runner::config::ClientConfig;
use crate::state::Platform;
use crate::ui::presentation::components::{
    issue_preview, issue_row, render_list, repository_row, EmptyRow, ISSUE_COLUMNS,
    REPOSITORY_COLUMNS,
};
use crate::ui::routes::{Route, HISTORY_PATH};

pub struct PageController {
    platform: Platform,
    issues: IssueService,
    repositories: RepositoryService,
    config: ClientConfig,
    route: Route,
}

impl PageController {
    pub fn new(
        platform: Platform,
        issues: IssueService,
        repositories: RepositoryService,
        config: ClientConfig,
        route: Route,
    ) -> Self {
        Self {
            platform,
            issues,
            repositories,
            config,
            route,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Render the current page for the first time.
    pub fn initialize(&self) {
        tracing::info!(route = ?self.route, "Initializing page");
        self.refresh();
    }

    /// Re-render the current page from the store.
    pub fn refresh(&self) {
        match &self.route {
            Route::Home => {
                let issues = self.issues.recent(self.config.recent_issue_limit);
                self.render_issues(container_ids::RECENT_ISSUES, issues);
            }
            Route::History => {
                let issues = self.issues.history();
                self.render_issues(container_ids::ISSUE_HISTORY, issues);
            }
            Route::Preview(id) => self.render_preview(id),
            Route::Settings => self.render_repositories(),
        }
    }

    /// Handle a repository form submission.
    ///
    /// Returns whether the repository was added, so the caller knows to
    /// reset the form.
    pub fn submit_repository(&self, form: &RepositoryForm) -> bool {
        match self.repositories.register(form) {
            Ok(repository) => {
                self.platform.notify(
                    &format!("Added repository {}", repository.full_name()),
                    Severity::Success,
                );
                self.render_repositories();
                true
            }
            Err(e) => {
                if e.is_user_error() {
                    tracing::warn!(error = %e, "Repository rejected");
                } else {
                    tracing::error!(error = %e, "Failed to register repository");
                }
                self.platform.notify(&e.user_message(), Severity::Error);
                false
            }
        }
    }

    pub fn delete_issue(&self, id: &str) {
        let removed = self.issues.delete(id);
        self.report_delete("Issue", removed);
    }

    pub fn delete_repository(&self, id: &str) {
        let removed = self.repositories.delete(id);
        self.report_delete("Repository", removed);
    }

    /// Report the outcome of a clipboard write of the Markdown tab.
    pub fn copy_markdown_result(&self, result: Result<(), String>) {
        match result {
            Ok(()) => self
                .platform
                .notify("Markdown copied to clipboard", Severity::Success),
            Err(reason) => {
                tracing::warn!(%reason, "Clipboard write failed");
                self.platform
                    .notify(&format!("Copy failed: {reason}"), Severity::Error);
            }
        }
    }

    fn report_delete(&self, entity: &str, removed: Result<bool, StoreError>) {
        match removed {
            Ok(true) => self
                .platform
                .notify(&format!("{entity} deleted"), Severity::Success),
            Ok(false) => self
                .platform
                .notify(&format!("{entity} was already deleted"), Severity::Warning),
            Err(e) => {
                self.report_store_error(&e);
                return;
            }
        }
        self.refresh();
    }

    fn render_issues(&self, container_id: &str, issues: Result<Vec<Issue>, StoreError>) {
        match issues {
            Ok(issues) => {
                let empty = EmptyRow {
                    message: &self.config.empty_issues_message,
                    colspan: ISSUE_COLUMNS,
                };
                let html = render_list(&issues, empty, issue_row).into_string();
                self.write(container_id, &html);
            }
            Err(e) => self.report_store_error(&e),
        }
    }

    fn render_repositories(&self) {
        match self.repositories.list() {
            Ok(repositories) => {
                let empty = EmptyRow {
                    message: &self.config.empty_repositories_message,
                    colspan: REPOSITORY_COLUMNS,
                };
                let html = render_list(&repositories, empty, repository_row).into_string();
                self.write(container_ids::REPOSITORIES, &html);
            }
            Err(e) => self.report_store_error(&e),
        }
    }

    fn render_preview(&self, id: &str) {
        let issue = match self.issues.find(id) {
            Ok(Some(issue)) => issue,
            Ok(None) => {
                let error = ServiceError::from(DomainError::not_found(Issue::ENTITY_TYPE, id));
                tracing::warn!(%error, "Cannot preview issue");
                self.platform.notify(&error.user_message(), Severity::Error);
                self.platform.redirect(HISTORY_PATH);
                return;
            }
            Err(e) => {
                self.report_store_error(&e);
                self.platform.redirect(HISTORY_PATH);
                return;
            }
        };

        // A broken repository list only costs the hand-off links
        let targets = self.repositories.valid_targets().unwrap_or_else(|e| {
            self.report_store_error(&e);
            Vec::new()
        });
        let html = issue_preview(&issue, &targets).into_string();
        if self.write(container_ids::ISSUE_PREVIEW, &html) {
            self.platform.highlight_code();
        }
    }

    fn write(&self, container_id: &str, html: &str) -> bool {
        let written = self.platform.set_inner_html(container_id, html);
        if !written {
            tracing::debug!(container_id, "Container not on this page");
        }
        written
    }

    fn report_store_error(&self, error: &StoreError) {
        tracing::error!(%error, "Record store failure");
        self.platform
            .notify(&format!("Could not access saved data: {error}"), Severity::Error);
    }
}
