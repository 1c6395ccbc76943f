//! Issue table rows for the home and history pages.

use issuedraft_domain::common::display_timestamp;
use issuedraft_domain::Issue;
use maud::{html, Markup};

use crate::ui::routes::preview_path;

/// Title, created, actions
pub const ISSUE_COLUMNS: u8 = 3;

pub fn issue_row(issue: &Issue) -> Markup {
    html! {
        tr {
            td { (issue.title) }
            td { (display_timestamp(&issue.created_at)) }
            td {
                div class="buttons are-small" {
                    a class="button is-primary" href=(preview_path(issue.id.as_str()))
                        title="Preview" {
                        span class="icon" { i class="fas fa-eye" {} }
                    }
                    button class="button is-danger is-outlined" type="button"
                        data-delete-issue=(issue.id) title="Delete" {
                        span class="icon" { i class="fas fa-trash" {} }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuedraft_domain::IssueId;

    fn issue(id: &str, title: &str) -> Issue {
        Issue {
            id: IssueId::parse(id).unwrap(),
            title: title.into(),
            story: "story".into(),
            criteria: String::new(),
            requirements: String::new(),
            created_at: "2024-02-03T04:05:06.000Z".into(),
            extra: Default::default(),
        }
    }

    #[test]
    fn row_links_to_preview_and_shows_time() {
        let html = issue_row(&issue("issue-1", "Login")).into_string();
        assert!(html.contains(r#"href="/preview/issue-1""#));
        assert!(html.contains("<td>Login</td>"));
        assert!(html.contains("2024/02/03 04:05"));
        assert!(html.contains(r#"data-delete-issue="issue-1""#));
    }

    #[test]
    fn timestamps_without_offset_display_as_utc() {
        let mut record = issue("issue-2", "Python era");
        record.created_at = "2024-01-15T10:30:00.123456".into();
        assert!(issue_row(&record).into_string().contains("2024/01/15 10:30"));

        record.created_at = "last week".into();
        assert!(issue_row(&record).into_string().contains("<td>last week</td>"));
    }

    #[test]
    fn stored_markup_in_title_is_escaped() {
        let hostile = issue("x\"><script>", "<img src=x onerror=alert(1)>");
        let html = issue_row(&hostile).into_string();
        assert!(!html.contains("<img"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }
}
