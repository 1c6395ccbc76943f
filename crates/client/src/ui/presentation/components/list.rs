//! Table body rendering shared by every list view.

use maud::{html, Markup};

/// Placeholder row shown when a list has no records.
#[derive(Debug, Clone, Copy)]
pub struct EmptyRow<'a> {
    pub message: &'a str,
    /// Number of columns the placeholder spans
    pub colspan: u8,
}

/// One `<tr>` per record in the given order, or the placeholder row.
///
/// Sorting is the caller's job.
pub fn render_list<T>(records: &[T], empty: EmptyRow<'_>, row: impl Fn(&T) -> Markup) -> Markup {
    html! {
        @if records.is_empty() {
            tr {
                td colspan=(empty.colspan) class="has-text-centered" { (empty.message) }
            }
        } @else {
            @for record in records {
                (row(record))
            }
        }
    }
}
