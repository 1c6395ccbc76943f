//! Issue preview: rendered view, raw Markdown tab and GitHub hand-off.

use issuedraft_domain::common::non_blank_lines;
use issuedraft_domain::{Issue, Repository};
use maud::{html, Markup};

use crate::ui::routes::SETTINGS_PATH;

/// Id of the button that copies the Markdown tab to the clipboard.
pub const COPY_MARKDOWN_BUTTON_ID: &str = "copy-markdown-btn";

/// Full preview of one issue.
///
/// `targets` are offered as-is in the hand-off dropdown; callers pass only
/// repositories that point at GitHub.
pub fn issue_preview(issue: &Issue, targets: &[Repository]) -> Markup {
    let markdown = issue.to_markdown();
    html! {
        article class="message is-primary" {
            div class="message-header" {
                p { (issue.title) }
                (repository_dropdown(issue, &markdown, targets))
            }
            div class="message-body" {
                div class="tabs is-boxed" {
                    ul {
                        li class="is-active" { a href="#" data-tab="preview" { "Preview" } }
                        li { a href="#" data-tab="markdown" { "Markdown" } }
                    }
                }
                div id="tab-preview" class="tab-content content" {
                    h2 { "User Story" }
                    p { (issue.story) }
                    (bullet_section("Acceptance Criteria", &issue.criteria))
                    (bullet_section("Technical Requirements", &issue.requirements))
                }
                div id="tab-markdown" class="tab-content is-hidden" {
                    div class="buttons is-right" {
                        button id=(COPY_MARKDOWN_BUTTON_ID) class="button is-small is-info"
                            type="button" {
                            span class="icon" { i class="fas fa-copy" {} }
                            span { "Copy" }
                        }
                    }
                    pre { code class="language-markdown" { (markdown) } }
                }
            }
        }
    }
}

fn bullet_section(heading: &str, text: &str) -> Markup {
    html! {
        @if !text.trim().is_empty() {
            h2 { (heading) }
            ul {
                @for line in non_blank_lines(text) {
                    li { (line) }
                }
            }
        }
    }
}

/// "Create on GitHub" dropdown with one prefilled new-issue link per
/// target, or a pointer to the settings page when there is none.
pub fn repository_dropdown(issue: &Issue, markdown: &str, targets: &[Repository]) -> Markup {
    html! {
        div class="dropdown is-right" {
            div class="dropdown-trigger" {
                button class="button is-small" type="button" aria-haspopup="true"
                    aria-controls="repository-menu" {
                    span { "Create on GitHub" }
                    span class="icon is-small" {
                        i class="fas fa-angle-down" aria-hidden="true" {}
                    }
                }
            }
            div class="dropdown-menu" id="repository-menu" role="menu" {
                div class="dropdown-content" {
                    @if targets.is_empty() {
                        a class="dropdown-item" href=(SETTINGS_PATH) {
                            "Register a repository first"
                        }
                    } @else {
                        @for repository in targets {
                            a class="dropdown-item"
                                href=(repository.new_issue_url(&issue.title, markdown))
                                target="_blank" rel="noopener noreferrer" {
                                (repository.full_name())
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use issuedraft_domain::IssueId;

    fn issue() -> Issue {
        Issue {
            id: IssueId::parse("issue-1").unwrap(),
            title: "Login & <logout>".into(),
            story: "As a user I want to sign in".into(),
            criteria: "a\n\nb\n  \nc".into(),
            requirements: String::new(),
            created_at: "2024-01-01T00:00:00.000Z".into(),
            extra: Default::default(),
        }
    }

    fn repository(owner: &str) -> Repository {
        Repository::new(owner, "app", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn preview_has_tabs_panels_and_copy_button() {
        let html = issue_preview(&issue(), &[]).into_string();
        assert!(html.contains(r#"data-tab="preview""#));
        assert!(html.contains(r#"data-tab="markdown""#));
        assert!(html.contains(r#"id="tab-preview""#));
        assert!(html.contains(r#"id="tab-markdown""#));
        assert!(html.contains(r#"id="copy-markdown-btn""#));
        assert!(html.contains(r#"<code class="language-markdown">"#));
    }

    #[test]
    fn blank_criteria_lines_are_dropped() {
        let html = issue_preview(&issue(), &[]).into_string();
        assert!(html.contains("<ul><li>a</li><li>b</li><li>c</li></ul>"));
        assert!(!html.contains("Technical Requirements</h2>"));
    }

    #[test]
    fn title_and_markdown_are_escaped() {
        let html = issue_preview(&issue(), &[]).into_string();
        assert!(html.contains("Login &amp; &lt;logout&gt;"));
        assert!(!html.contains("<logout>"));
    }

    #[test]
    fn dropdown_without_targets_points_to_settings() {
        let issue = issue();
        let html = repository_dropdown(&issue, &issue.to_markdown(), &[]).into_string();
        assert!(html.contains(r#"href="/settings""#));
    }

    #[test]
    fn dropdown_links_each_target_with_prefilled_issue() {
        let issue = issue();
        let targets = [repository("octo"), repository("acme")];
        let html = repository_dropdown(&issue, &issue.to_markdown(), &targets).into_string();
        assert!(html.contains(
            "https://github.com/octo/app/issues/new?title=Login%20%26%20%3Clogout%3E"
        ));
        assert!(html.contains("acme/app"));
        assert!(!html.contains(r#"href="/settings""#));
    }
}
