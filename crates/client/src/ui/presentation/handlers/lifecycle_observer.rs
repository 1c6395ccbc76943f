//! Request lifecycle observer
//!
//! Reacts to the three htmx lifecycle notifications. The loading overlay
//! stays up for at least `min_loading_time_ms` so fast responses do not
//! flash, and issues embedded in successful responses are committed to the
//! store.
//!
//! ```text
//! Idle --before--> Loading --after--> Settling --timer--> Idle
//!          ^                                 |
//!          +------------ before -------------+
//! ```
//!
//! Every before-request starts a new generation. A removal timer only acts if
//! its generation is still current, so an overlapping request keeps its
//! overlay until its own timer fires.

use std::cell::Cell;
use std::rc::Rc;

use crate::application::services::{AutoStoreOutcome, AutoStoreService};
use crate::ports::outbound::Severity;
use crate::runner::config::ClientConfig;
use crate::state::Platform;
use crate::ui::presentation::handlers::PageController;
use crate::ui::routes::is_preview_request;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading { started_at_ms: u64 },
    /// Response received, overlay waiting for its removal timer
    Settling,
}

/// What the observer needs from an `htmx:afterRequest` event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AfterRequest {
    pub successful: bool,
    /// `data-issue` of the response's auto-store element, if any
    pub auto_store_payload: Option<String>,
}

#[derive(Clone)]
pub struct RequestLifecycleObserver {
    inner: Rc<ObserverInner>,
}

struct ObserverInner {
    platform: Platform,
    auto_store: AutoStoreService,
    page: Rc<PageController>,
    min_loading_time_ms: u64,
    loading_message: String,
    state: Cell<LoadingState>,
    generation: Cell<u64>,
}

impl RequestLifecycleObserver {
    pub fn new(
        platform: Platform,
        auto_store: AutoStoreService,
        page: Rc<PageController>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            inner: Rc::new(ObserverInner {
                platform,
                auto_store,
                page,
                min_loading_time_ms: config.min_loading_time_ms,
                loading_message: config.loading_message.clone(),
                state: Cell::new(LoadingState::Idle),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn state(&self) -> LoadingState {
        self.inner.state.get()
    }

    pub fn on_before_request(&self) {
        let inner = &self.inner;
        let generation = inner.generation.get() + 1;
        inner.generation.set(generation);

        if inner.state.get() != LoadingState::Idle {
            tracing::debug!(generation, "Request started before previous overlay cleared");
        }
        inner.state.set(LoadingState::Loading {
            started_at_ms: inner.platform.now_millis(),
        });
        inner.platform.show_loading(&inner.loading_message);
    }

    pub fn on_after_request(&self, event: AfterRequest) {
        match self.inner.state.get() {
            LoadingState::Idle => {
                tracing::debug!("After-request without a pending request, ignored");
                return;
            }
            LoadingState::Loading { started_at_ms } => self.settle(started_at_ms),
            // Repeated after-request for the same cycle; the timer is already set
            LoadingState::Settling => {}
        }

        if !event.successful {
            tracing::debug!("Request failed, skipping auto-store");
            return;
        }
        if let Some(payload) = event.auto_store_payload {
            self.store(&payload);
        }
    }

    /// Handle a completed swap. Returns whether the highlighter ran.
    ///
    /// Chrome behaviours are attached by the DOM adapter before this call.
    pub fn on_after_swap(&self, request_path: Option<&str>) -> bool {
        match request_path {
            Some(path) if is_preview_request(path) => {
                self.inner.platform.highlight_code();
                true
            }
            _ => false,
        }
    }

    fn settle(&self, started_at_ms: u64) {
        let inner = &self.inner;
        let elapsed = inner.platform.now_millis().saturating_sub(started_at_ms);
        let remaining = inner.min_loading_time_ms.saturating_sub(elapsed);
        let generation = inner.generation.get();
        inner.state.set(LoadingState::Settling);

        tracing::debug!(elapsed, remaining, generation, "Request settled");
        let observer = Rc::clone(inner);
        inner
            .platform
            .schedule(remaining, move || observer.finish(generation));
    }

    fn store(&self, payload: &str) {
        let inner = &self.inner;
        match inner.auto_store.store_payload(payload) {
            Ok(AutoStoreOutcome::Stored(_)) => inner.page.refresh(),
            Ok(AutoStoreOutcome::AlreadyStored(_)) => {}
            Err(e) if e.is_validation() => {
                tracing::warn!(error = %e, "Rejected auto-store payload");
                inner
                    .platform
                    .notify("The generated issue could not be read", Severity::Error);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store generated issue");
                inner.platform.notify(
                    &format!("The generated issue could not be saved: {e}"),
                    Severity::Error,
                );
            }
        }
    }
}

impl ObserverInner {
    fn finish(&self, generation: u64) {
        if self.generation.get() != generation {
            tracing::debug!(generation, "Stale overlay removal skipped");
            return;
        }
        self.state.set(LoadingState::Idle);
        self.platform.hide_loading();
    }
}
