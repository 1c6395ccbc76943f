//! DocumentPort - the page as seen by handlers
//!
//! Handlers never touch the DOM directly. They write rendered fragments into
//! named containers, raise notifications, and drive the loading overlay
//! through this trait.

/// Notification severity. Drives only the visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Bulma modifier class, e.g. `is-danger`.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "is-info",
            Self::Success => "is-success",
            Self::Warning => "is-warning",
            Self::Error => "is-danger",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait DocumentPort {
    /// Replace the contents of the element with the given id.
    ///
    /// Returns `false` when the page has no such container.
    fn set_inner_html(&self, container_id: &str, html: &str) -> bool;

    /// Show a dismissible notification.
    fn notify(&self, message: &str, severity: Severity);

    /// Navigate away from the current page.
    fn redirect(&self, path: &str);

    /// Show the loading overlay with the given message.
    fn show_loading(&self, message: &str);

    /// Hide the loading overlay if present.
    fn hide_loading(&self);

    /// Run the external syntax highlighter over the page.
    fn highlight_code(&self);
}

/// Ids of the containers the server-rendered pages provide.
pub mod container_ids {
    pub const RECENT_ISSUES: &str = "recent-issues-container";
    pub const ISSUE_HISTORY: &str = "issues-container";
    pub const ISSUE_PREVIEW: &str = "issue-preview-container";
    pub const REPOSITORIES: &str = "repos-container";
    pub const REPOSITORY_FORM: &str = "repo-form";
}
