//! Common utility functions shared by the domain and the client.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **WASM compatible** - all code must work in both native and WASM targets

pub mod datetime;
pub mod string;

pub use datetime::{display_timestamp, parse_datetime, to_iso_string};
pub use string::{non_blank_lines, require_text};
