//! Browser platform adapters built on web-sys

use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Storage};

use crate::ports::outbound::{
    DocumentPort, Scheduler, Severity, StorageError, StorageProvider, TimeProvider,
};
use crate::state::Platform;
use crate::ui::chrome;
use crate::ui::presentation::components::{loading_overlay, notification, LOADING_OVERLAY_ID};

const LOADING_BODY_CLASS: &str = "is-loading";
const HIDING_CLASS: &str = "is-hiding";

/// Best-effort text for a thrown JS value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// WASM time provider using `Date.now()`
#[derive(Clone, Default)]
pub struct WasmTimeProvider;

impl TimeProvider for WasmTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        let millis = i64::try_from(self.now_millis()).unwrap_or(i64::MAX);
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
    }

    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// WASM storage provider using `localStorage`
#[derive(Clone, Default)]
pub struct WasmStorageProvider;

impl WasmStorageProvider {
    fn local_storage() -> Result<Storage, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::unavailable("no window object"))?;
        window
            .local_storage()
            .map_err(|e| StorageError::unavailable(js_error_message(&e)))?
            .ok_or_else(|| StorageError::unavailable("localStorage is disabled"))
    }
}

impl StorageProvider for WasmStorageProvider {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::read(key, js_error_message(&e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::write(key, js_error_message(&e)))
    }
}

/// Fire-and-forget timers via `gloo-timers`
#[derive(Clone, Default)]
pub struct WasmScheduler;

impl Scheduler for WasmScheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) {
        let delay = u32::try_from(delay_ms).unwrap_or(u32::MAX);
        Timeout::new(delay, task).forget();
    }
}

/// The live page.
#[derive(Clone)]
pub struct WasmDocument {
    document: Document,
}

impl WasmDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn body(&self) -> Option<HtmlElement> {
        let body = self.document.body();
        if body.is_none() {
            tracing::warn!("Document has no body");
        }
        body
    }

    /// Append markup to `<body>` and return the element it produced.
    fn append_to_body(&self, html: &str) -> Option<Element> {
        let body = self.body()?;
        if let Err(e) = body.insert_adjacent_html("beforeend", html) {
            tracing::error!(error = %js_error_message(&e), "Failed to append to body");
            return None;
        }
        body.last_element_child()
    }
}

impl DocumentPort for WasmDocument {
    fn set_inner_html(&self, container_id: &str, html: &str) -> bool {
        let Some(container) = self.document.get_element_by_id(container_id) else {
            return false;
        };
        container.set_inner_html(html);
        chrome::attach_behaviors(&container);
        true
    }

    fn notify(&self, message: &str, severity: Severity) {
        let html = notification(message, severity).into_string();
        if let Some(element) = self.append_to_body(&html) {
            chrome::attach_behaviors(&element);
        }
    }

    fn redirect(&self, path: &str) {
        let result = self
            .document
            .location()
            .ok_or_else(|| JsValue::from_str("no location"))
            .and_then(|location| location.set_href(path));
        if let Err(e) = result {
            tracing::error!(path, error = %js_error_message(&e), "Redirect failed");
        }
    }

    fn show_loading(&self, message: &str) {
        // An overlay mid fade-out would remove itself on transitionend
        if let Some(existing) = self.document.get_element_by_id(LOADING_OVERLAY_ID) {
            existing.remove();
        }
        if self
            .append_to_body(&loading_overlay(message).into_string())
            .is_none()
        {
            return;
        }
        if let Some(body) = self.body() {
            let _ = body.class_list().add_1(LOADING_BODY_CLASS);
        }
    }

    fn hide_loading(&self) {
        if let Some(body) = self.body() {
            let _ = body.class_list().remove_1(LOADING_BODY_CLASS);
        }
        if let Some(overlay) = self.document.get_element_by_id(LOADING_OVERLAY_ID) {
            chrome::fade_out(&overlay);
        }
    }

    fn highlight_code(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let hljs = match js_sys::Reflect::get(&window, &JsValue::from_str("hljs")) {
            Ok(value) if value.is_object() => value,
            _ => {
                tracing::debug!("hljs not loaded, skipping highlight");
                return;
            }
        };
        let highlight_all = js_sys::Reflect::get(&hljs, &JsValue::from_str("highlightAll"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        match highlight_all {
            Some(f) => {
                if let Err(e) = f.call0(&hljs) {
                    tracing::warn!(error = %js_error_message(&e), "hljs.highlightAll failed");
                }
            }
            None => tracing::debug!("hljs.highlightAll missing"),
        }
    }
}

/// Browser platform for the given document.
pub fn create_platform(document: Document) -> Platform {
    Platform::new(
        WasmTimeProvider,
        WasmStorageProvider,
        WasmScheduler,
        WasmDocument::new(document),
    )
}
