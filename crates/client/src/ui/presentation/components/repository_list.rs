//! Repository table rows for the settings page.

use issuedraft_domain::common::display_timestamp;
use issuedraft_domain::Repository;
use maud::{html, Markup};

/// Repository, URL, created, actions
pub const REPOSITORY_COLUMNS: u8 = 4;

pub fn repository_row(repository: &Repository) -> Markup {
    html! {
        tr {
            td { (repository.full_name()) }
            td {
                // Only GitHub URLs become links; anything else stays inert text
                @if repository.is_valid() {
                    a href=(repository.url) target="_blank" rel="noopener noreferrer" {
                        (repository.url)
                    }
                } @else {
                    span class="has-text-grey" { (repository.url) }
                }
            }
            td { (display_timestamp(&repository.created_at)) }
            td {
                button class="button is-small is-danger is-outlined" type="button"
                    data-delete-repo=(repository.id) title="Delete" {
                    span class="icon" { i class="fas fa-trash" {} }
                }
            }
        }
    }
}
