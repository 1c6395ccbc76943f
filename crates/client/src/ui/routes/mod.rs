//! Route selection from the URL path
//!
//! Pages are rendered by the server; the client only decides which view to
//! initialize. The route is fixed for the lifetime of the page.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

pub const HISTORY_PATH: &str = "/history";
pub const SETTINGS_PATH: &str = "/settings";
pub const PREVIEW_PREFIX: &str = "/preview";
/// Endpoint that generates a draft and answers with preview markup
pub const GENERATE_ISSUE_PATH: &str = "/generate_issue";

/// Characters escaped when an id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    History,
    /// Issue id taken from the path tail; may be empty for `/preview/`
    Preview(String),
    Settings,
}

impl Route {
    /// Decide the route from `location.pathname`.
    ///
    /// Only the first segment matters. Unknown paths fall back to `Home`,
    /// whose containers such pages simply do not have.
    pub fn from_path(path: &str) -> Self {
        let mut segments = path.trim_start_matches('/').splitn(2, '/');
        match segments.next().unwrap_or_default() {
            "history" => Self::History,
            "settings" => Self::Settings,
            "preview" => {
                let tail = segments.next().unwrap_or_default().trim_end_matches('/');
                Self::Preview(percent_decode_str(tail).decode_utf8_lossy().into_owned())
            }
            "" => Self::Home,
            other => {
                tracing::debug!(segment = other, "Unrecognized path, treating as home");
                Self::Home
            }
        }
    }
}

/// Link to the preview page of an issue.
pub fn preview_path(id: &str) -> String {
    format!("{PREVIEW_PREFIX}/{}", utf8_percent_encode(id, PATH_SEGMENT))
}

/// Whether a swapped-in response carries preview markup worth highlighting.
pub fn is_preview_request(request_path: &str) -> bool {
    let path = request_path.split(['?', '#']).next().unwrap_or_default();
    path == PREVIEW_PREFIX
        || path.starts_with("/preview/")
        || path == GENERATE_ISSUE_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/history"), Route::History);
        assert_eq!(Route::from_path("/history/"), Route::History);
        assert_eq!(Route::from_path("/settings"), Route::Settings);
    }

    #[test]
    fn preview_takes_the_path_tail() {
        assert_eq!(
            Route::from_path("/preview/issue-42"),
            Route::Preview("issue-42".into())
        );
        assert_eq!(
            Route::from_path("/preview/a%20b/"),
            Route::Preview("a b".into())
        );
        assert_eq!(Route::from_path("/preview"), Route::Preview(String::new()));
    }

    #[test]
    fn unknown_paths_fall_back_to_home() {
        assert_eq!(Route::from_path("/about"), Route::Home);
        assert_eq!(Route::from_path("/api/requests"), Route::Home);
    }

    #[test]
    fn preview_path_round_trips() {
        let path = preview_path("a b/c");
        assert_eq!(path, "/preview/a%20b%2Fc");
        assert_eq!(Route::from_path(&path), Route::Preview("a b/c".into()));
    }

    #[test]
    fn preview_requests() {
        assert!(is_preview_request("/preview"));
        assert!(is_preview_request("/preview/abc?x=1"));
        assert!(is_preview_request("/generate_issue"));
        assert!(!is_preview_request("/previewer"));
        assert!(!is_preview_request("/history"));
    }
}
