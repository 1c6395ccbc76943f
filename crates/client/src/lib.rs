//! Issue Draft browser client.
//!
//! Persists drafted issues and target repositories in `localStorage`, renders
//! the list, preview and settings views, and observes the htmx request
//! lifecycle. Browser adapters are compiled for `wasm32` only; everything
//! else builds natively so it can be tested without a browser.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod state;
pub mod ui;

pub use runner::config::ClientConfig;
pub use runner::{run, Runner, RunnerDeps};
pub use state::Platform;
pub use ui::Route;
