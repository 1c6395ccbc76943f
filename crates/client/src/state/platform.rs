//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates all platform-specific service implementations behind port traits.
//!
//! Usage:
//! - Created by `create_platform()` in `infrastructure/platform/wasm.rs`, or by
//!   `TestPlatform::new()` in `infrastructure/platform/mock.rs`
//! - Built once by the runner and handed to services and handlers explicitly

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::ports::outbound::{DocumentPort, Scheduler, Severity, StorageProvider, TimeProvider};

/// Unified platform services container
///
/// Everything runs on the browser's UI thread, so services are shared through
/// `Rc` rather than `Arc`.
#[derive(Clone)]
pub struct Platform {
    time: Rc<dyn TimeProvider>,
    storage: Rc<dyn StorageProvider>,
    scheduler: Rc<dyn Scheduler>,
    document: Rc<dyn DocumentPort>,
}

impl Platform {
    /// Create a new Platform with the given providers
    pub fn new<Tm, S, Sc, D>(time: Tm, storage: S, scheduler: Sc, document: D) -> Self
    where
        Tm: TimeProvider + 'static,
        S: StorageProvider + 'static,
        Sc: Scheduler + 'static,
        D: DocumentPort + 'static,
    {
        Self {
            time: Rc::new(time),
            storage: Rc::new(storage),
            scheduler: Rc::new(scheduler),
            document: Rc::new(document),
        }
    }

    // -------------------------------------------------------------------------
    // Time operations
    // -------------------------------------------------------------------------

    pub fn now(&self) -> DateTime<Utc> {
        self.time.now()
    }

    pub fn now_millis(&self) -> u64 {
        self.time.now_millis()
    }

    /// Shared handle for services that stamp records
    pub fn time(&self) -> Rc<dyn TimeProvider> {
        Rc::clone(&self.time)
    }

    // -------------------------------------------------------------------------
    // Storage operations
    // -------------------------------------------------------------------------

    /// Shared handle for record stores
    pub fn storage(&self) -> Rc<dyn StorageProvider> {
        Rc::clone(&self.storage)
    }

    // -------------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------------

    /// Run `task` after `delay_ms` milliseconds on the UI thread.
    pub fn schedule(&self, delay_ms: u64, task: impl FnOnce() + 'static) {
        self.scheduler.schedule(delay_ms, Box::new(task))
    }

    // -------------------------------------------------------------------------
    // Document operations
    // -------------------------------------------------------------------------

    pub fn set_inner_html(&self, container_id: &str, html: &str) -> bool {
        self.document.set_inner_html(container_id, html)
    }

    pub fn notify(&self, message: &str, severity: Severity) {
        self.document.notify(message, severity)
    }

    pub fn redirect(&self, path: &str) {
        self.document.redirect(path)
    }

    pub fn show_loading(&self, message: &str) {
        self.document.show_loading(message)
    }

    pub fn hide_loading(&self) {
        self.document.hide_loading()
    }

    pub fn highlight_code(&self) {
        self.document.highlight_code()
    }
}
