pub mod presentation;
pub mod routes;

#[cfg(target_arch = "wasm32")]
pub mod chrome;

pub use routes::Route;
