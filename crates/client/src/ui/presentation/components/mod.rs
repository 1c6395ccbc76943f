//! HTML fragments
//!
//! All markup is built with `maud::html!`, which escapes every interpolated
//! value. Stored titles, names and URLs are free user text that ends up in
//! `innerHTML`, so raw string interpolation is never used here.

pub mod common;
pub mod issue_list;
pub mod issue_preview;
pub mod list;
pub mod repository_list;

pub use common::{loading_overlay, notification, LOADING_OVERLAY_ID};
pub use issue_list::{issue_row, ISSUE_COLUMNS};
pub use issue_preview::{issue_preview, repository_dropdown, COPY_MARKDOWN_BUTTON_ID};
pub use list::{render_list, EmptyRow};
pub use repository_list::{repository_row, REPOSITORY_COLUMNS};
