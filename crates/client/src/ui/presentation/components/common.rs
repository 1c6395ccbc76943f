//! Page-level fragments: notifications and the loading overlay.

use maud::{html, Markup};

use crate::ports::outbound::Severity;

pub const LOADING_OVERLAY_ID: &str = "loading-overlay";

/// Dismissible notification box.
pub fn notification(message: &str, severity: Severity) -> Markup {
    html! {
        div class={ "notification " (severity.css_class()) } {
            button class="delete" type="button" aria-label="delete" {}
            p { (message) }
        }
    }
}

/// Full-page overlay shown while a request is in flight.
pub fn loading_overlay(message: &str) -> Markup {
    html! {
        div id=(LOADING_OVERLAY_ID) {
            div class="loading-content" {
                span class="icon is-large" {
                    i class="fas fa-spinner fa-pulse fa-2x" {}
                }
                p class="mt-3" { (message) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_carries_severity_class() {
        let html = notification("Saved", Severity::Success).into_string();
        assert!(html.starts_with(r#"<div class="notification is-success">"#));
        assert!(html.contains(r#"<button class="delete""#));
        assert!(html.contains("<p>Saved</p>"));
    }

    #[test]
    fn error_maps_to_danger() {
        let html = notification("x", Severity::Error).into_string();
        assert!(html.contains("is-danger"));
    }

    #[test]
    fn notification_message_is_escaped() {
        let html = notification("<b>boom</b>", Severity::Error).into_string();
        assert!(html.contains("&lt;b&gt;boom&lt;/b&gt;"));
    }

    #[test]
    fn overlay_has_fixed_id_and_message() {
        let html = loading_overlay("Generating...").into_string();
        assert!(html.starts_with(r#"<div id="loading-overlay">"#));
        assert!(html.contains("Generating..."));
    }
}
