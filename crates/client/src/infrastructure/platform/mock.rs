//! In-memory platform
//!
//! Shared-state adapters for driving handlers without a browser. Each type is
//! a cheap handle: clones observe the same state, so a test can keep one
//! handle while the `Platform` owns another.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::ports::outbound::{
    DocumentPort, Scheduler, Severity, StorageError, StorageProvider, TimeProvider,
};
use crate::state::Platform;

// =============================================================================
// Storage
// =============================================================================

/// Key-value storage backed by a `HashMap`.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw value in place without counting it as a write.
    pub fn seed(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Number of successful `save`/`remove` calls.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Make every following write fail like a full quota.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::write(key, "QuotaExceededError"));
        }
        Ok(())
    }
}

impl StorageProvider for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.seed(key, value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// Time
// =============================================================================

/// Manually advanced clock.
#[derive(Clone, Default)]
pub struct FixedClock {
    millis: Rc<Cell<u64>>,
}

impl FixedClock {
    pub fn at_millis(millis: u64) -> Self {
        Self {
            millis: Rc::new(Cell::new(millis)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.millis.set(self.millis.get() + ms);
    }
}

impl TimeProvider for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = i64::try_from(self.millis.get()).unwrap_or(i64::MAX);
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
    }

    fn now_millis(&self) -> u64 {
        self.millis.get()
    }
}

// =============================================================================
// Scheduler
// =============================================================================

type PendingTask = (u64, Box<dyn FnOnce()>);

/// Scheduler that only runs tasks when told to.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<RefCell<Vec<PendingTask>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays of the tasks still waiting, in scheduling order.
    pub fn pending_delays(&self) -> Vec<u64> {
        self.pending.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every pending task in scheduling order. Returns how many ran.
    pub fn run_all(&self) -> usize {
        let tasks: Vec<PendingTask> = self.pending.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push((delay_ms, task));
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Default)]
struct DocumentState {
    containers: HashMap<String, String>,
    notifications: Vec<(String, Severity)>,
    redirects: Vec<String>,
    loading_visible: bool,
    loading_shown: usize,
    highlights: usize,
}

/// Document that records everything handlers do to it.
///
/// Only containers registered with [`RecordingDocument::with_container`]
/// exist, mirroring pages that render just their own containers.
#[derive(Clone, Default)]
pub struct RecordingDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl RecordingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(self, id: &str) -> Self {
        self.state
            .borrow_mut()
            .containers
            .insert(id.to_string(), String::new());
        self
    }

    pub fn html(&self, id: &str) -> Option<String> {
        self.state.borrow().containers.get(id).cloned()
    }

    pub fn notifications(&self) -> Vec<(String, Severity)> {
        self.state.borrow().notifications.clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.state.borrow().redirects.clone()
    }

    pub fn loading_visible(&self) -> bool {
        self.state.borrow().loading_visible
    }

    /// How many times the overlay was actually put on screen.
    pub fn loading_shown(&self) -> usize {
        self.state.borrow().loading_shown
    }

    pub fn highlights(&self) -> usize {
        self.state.borrow().highlights
    }
}

impl DocumentPort for RecordingDocument {
    fn set_inner_html(&self, container_id: &str, html: &str) -> bool {
        match self.state.borrow_mut().containers.get_mut(container_id) {
            Some(slot) => {
                *slot = html.to_string();
                true
            }
            None => false,
        }
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.state
            .borrow_mut()
            .notifications
            .push((message.to_string(), severity));
    }

    fn redirect(&self, path: &str) {
        self.state.borrow_mut().redirects.push(path.to_string());
    }

    fn show_loading(&self, _message: &str) {
        let mut state = self.state.borrow_mut();
        if !state.loading_visible {
            state.loading_visible = true;
            state.loading_shown += 1;
        }
    }

    fn hide_loading(&self) {
        self.state.borrow_mut().loading_visible = false;
    }

    fn highlight_code(&self) {
        self.state.borrow_mut().highlights += 1;
    }
}

// =============================================================================
// Platform
// =============================================================================

/// A `Platform` wired to in-memory adapters, with handles to inspect them.
#[derive(Clone)]
pub struct TestPlatform {
    pub platform: Platform,
    pub storage: MemoryStorage,
    pub clock: FixedClock,
    pub scheduler: ManualScheduler,
    pub document: RecordingDocument,
}

impl TestPlatform {
    pub fn new(document: RecordingDocument) -> Self {
        let storage = MemoryStorage::new();
        let clock = FixedClock::at_millis(1_700_000_000_000);
        let scheduler = ManualScheduler::new();
        let platform = Platform::new(
            clock.clone(),
            storage.clone(),
            scheduler.clone(),
            document.clone(),
        );
        Self {
            platform,
            storage,
            clock,
            scheduler,
            document,
        }
    }
}
