use std::rc::Rc;

use crate::application::services::{
    issue_store, repository_store, AutoStoreService, IssueService, RepositoryService,
};
use crate::state::Platform;
use crate::ui::presentation::{PageController, RequestLifecycleObserver};
use crate::ui::Route;

/// Configuration types for the client runner.
pub mod config {
    /// Page-level settings.
    ///
    /// Defaults match the stock pages; a page can override the numeric
    /// values through `data-*` attributes on `<body>`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ClientConfig {
        /// Shortest time the loading overlay stays visible
        pub min_loading_time_ms: u64,
        /// Issues shown on the home page
        pub recent_issue_limit: usize,
        pub loading_message: String,
        pub empty_issues_message: String,
        pub empty_repositories_message: String,
    }

    pub const MIN_LOADING_ATTR: &str = "data-min-loading-ms";
    pub const RECENT_LIMIT_ATTR: &str = "data-recent-limit";

    impl Default for ClientConfig {
        fn default() -> Self {
            Self {
                min_loading_time_ms: 2000,
                recent_issue_limit: 5,
                loading_message: "Generating issue...".to_string(),
                empty_issues_message: "No issues have been created yet".to_string(),
                empty_repositories_message: "No repositories registered yet".to_string(),
            }
        }
    }

    impl ClientConfig {
        /// Apply overrides looked up by attribute name.
        ///
        /// Values that do not parse are ignored with a warning.
        pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
            if let Some(ms) = parse_attr(&lookup, MIN_LOADING_ATTR) {
                self.min_loading_time_ms = ms;
            }
            if let Some(limit) = parse_attr(&lookup, RECENT_LIMIT_ATTR) {
                self.recent_issue_limit = limit;
            }
            self
        }
    }

    fn parse_attr<T: std::str::FromStr>(
        lookup: &impl Fn(&str) -> Option<String>,
        attr: &str,
    ) -> Option<T> {
        let raw = lookup(attr)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(attr, value = %raw, "Ignoring unparsable config attribute");
                None
            }
        }
    }

}

use config::ClientConfig;

pub struct RunnerDeps {
    pub platform: Platform,
    pub config: ClientConfig,
    pub route: Route,
}

/// The wired client: what DOM listeners call into.
#[derive(Clone)]
pub struct Runner {
    pub page: Rc<PageController>,
    pub observer: RequestLifecycleObserver,
}

/// Build every component once and render the current page.
pub fn run(deps: RunnerDeps) -> Runner {
    let RunnerDeps {
        platform,
        config,
        route,
    } = deps;

    let issues = issue_store(platform.storage());
    let repositories = repository_store(platform.storage());

    let page = Rc::new(PageController::new(
        platform.clone(),
        IssueService::new(issues.clone()),
        RepositoryService::new(repositories, platform.time()),
        config.clone(),
        route,
    ));
    let observer = RequestLifecycleObserver::new(
        platform.clone(),
        AutoStoreService::new(issues, platform.time()),
        Rc::clone(&page),
        &config,
    );

    page.initialize();
    Runner { page, observer }
}

/// WASM entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting Issue Draft client");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        tracing::error!("No document available");
        return;
    };
    let Some(body) = document.body() else {
        tracing::error!("Document has no body");
        return;
    };

    let config = ClientConfig::default().with_overrides(|attr| body.get_attribute(attr));
    let path = document
        .location()
        .and_then(|location| location.pathname().ok())
        .unwrap_or_default();
    let route = Route::from_path(&path);
    let platform = crate::infrastructure::platform::create_platform(document.clone());

    let runner = run(RunnerDeps {
        platform,
        config,
        route,
    });

    crate::ui::chrome::attach_behaviors(&body);
    crate::ui::chrome::install_document_listeners(&document, Rc::clone(&runner.page));
    crate::ui::chrome::bind_repository_form(&document, Rc::clone(&runner.page));
    crate::infrastructure::htmx::install(&body, runner.observer);
}
