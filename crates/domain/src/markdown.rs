//! Markdown serialization of issues.
//!
//! The output is Markdown source, not HTML: callers embedding it in a page
//! must escape it themselves.

use std::fmt::Write;

use crate::common::non_blank_lines;
use crate::entities::Issue;

pub const USER_STORY_HEADING: &str = "## User Story";
pub const CRITERIA_HEADING: &str = "## Acceptance Criteria";
pub const REQUIREMENTS_HEADING: &str = "## Technical Requirements";

/// Render an issue as Markdown.
///
/// Sections appear in a fixed order. Criteria and requirements sections are
/// omitted when their text is blank; inside them every non-blank line
/// becomes one `- ` bullet.
pub fn to_markdown(issue: &Issue) -> String {
    let mut md = String::new();
    md.push_str(USER_STORY_HEADING);
    md.push('\n');
    md.push_str(&issue.story);
    md.push('\n');

    push_bullet_section(&mut md, CRITERIA_HEADING, &issue.criteria);
    push_bullet_section(&mut md, REQUIREMENTS_HEADING, &issue.requirements);
    md
}

fn push_bullet_section(md: &mut String, heading: &str, items: &str) {
    if items.trim().is_empty() {
        return;
    }
    md.push('\n');
    md.push_str(heading);
    md.push('\n');
    for item in non_blank_lines(items) {
        // Writing into a String cannot fail
        let _ = writeln!(md, "- {item}");
    }
}
