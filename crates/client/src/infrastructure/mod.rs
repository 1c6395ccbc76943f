pub mod platform;

#[cfg(target_arch = "wasm32")]
pub mod htmx;
