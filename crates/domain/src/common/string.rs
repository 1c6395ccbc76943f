//! String helpers for free-text record fields.

use crate::error::DomainError;

/// Iterates the trimmed, non-blank lines of a newline-delimited list.
///
/// Handles both `\n` and `\r\n` line endings.
///
/// ```
/// use issuedraft_domain::common::non_blank_lines;
///
/// let lines: Vec<_> = non_blank_lines("a\n\n  b \r\n\t\n").collect();
/// assert_eq!(lines, vec!["a", "b"]);
/// ```
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Trims a required text field, failing validation when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
