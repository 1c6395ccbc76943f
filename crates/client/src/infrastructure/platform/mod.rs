//! Platform-specific implementations
//!
//! This module provides implementations of the platform abstraction traits
//! defined in `ports/outbound/platform.rs` and `ports/outbound/document_port.rs`.
//!
//! The browser platform is only compiled for `wasm32`; the in-memory platform
//! is always available so handlers can be exercised natively.

#[cfg(target_arch = "wasm32")]
mod wasm;

pub mod mock;

#[cfg(target_arch = "wasm32")]
pub use wasm::{
    create_platform, js_error_message, WasmDocument, WasmScheduler, WasmStorageProvider,
    WasmTimeProvider,
};
