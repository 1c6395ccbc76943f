//! Handlers that turn page events into store calls and DOM updates.

pub mod lifecycle_observer;
pub mod page_controller;

pub use lifecycle_observer::{AfterRequest, LoadingState, RequestLifecycleObserver};
pub use page_controller::PageController;
