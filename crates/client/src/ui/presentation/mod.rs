//! Presentation layer: HTML fragments and the handlers that place them.

pub mod components;
pub mod handlers;

pub use handlers::{AfterRequest, LoadingState, PageController, RequestLifecycleObserver};
