//! htmx lifecycle adapter
//!
//! Translates `htmx:*` DOM events on `<body>` into calls on the
//! [`RequestLifecycleObserver`]. Event details are read through
//! `js_sys::Reflect` since htmx exposes them as plain objects.

use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, Element, Event, HtmlElement};

use crate::application::services::auto_store_service::{AUTO_STORE_SELECTOR, ISSUE_PAYLOAD_ATTR};
use crate::infrastructure::platform::js_error_message;
use crate::ui::chrome;
use crate::ui::presentation::{AfterRequest, RequestLifecycleObserver};

pub const BEFORE_REQUEST: &str = "htmx:beforeRequest";
pub const AFTER_REQUEST: &str = "htmx:afterRequest";
pub const AFTER_SWAP: &str = "htmx:afterSwap";

pub fn install(body: &HtmlElement, observer: RequestLifecycleObserver) {
    let before = observer.clone();
    listen(body, BEFORE_REQUEST, move |_| before.on_before_request());

    let after = observer.clone();
    listen(body, AFTER_REQUEST, move |event| {
        after.on_after_request(after_request(&event))
    });

    listen(body, AFTER_SWAP, move |event| {
        let detail = detail(&event);
        if let Some(swapped) = detail
            .as_ref()
            .and_then(|d| field(d, "target").or_else(|| field(d, "elt")))
            .and_then(|el| el.dyn_into::<Element>().ok())
        {
            chrome::attach_behaviors(&swapped);
        }
        let path = detail
            .as_ref()
            .and_then(|d| field(d, "pathInfo"))
            .and_then(|info| field(&info, "requestPath"))
            .and_then(|p| p.as_string());
        observer.on_after_swap(path.as_deref());
    });
}

fn after_request(event: &Event) -> AfterRequest {
    let Some(detail) = detail(event) else {
        return AfterRequest::default();
    };
    let successful = field(&detail, "successful")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let auto_store_payload = ["elt", "target"]
        .iter()
        .filter_map(|key| field(&detail, key)?.dyn_into::<Element>().ok())
        .find_map(|el| payload_within(&el));
    AfterRequest {
        successful,
        auto_store_payload,
    }
}

/// `data-issue` of the auto-store element at or below `root`.
fn payload_within(root: &Element) -> Option<String> {
    let flagged = if root.matches(AUTO_STORE_SELECTOR).unwrap_or(false) {
        root.clone()
    } else {
        root.query_selector(AUTO_STORE_SELECTOR).ok().flatten()?
    };
    flagged.get_attribute(ISSUE_PAYLOAD_ATTR)
}

fn detail(event: &Event) -> Option<JsValue> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    (!detail.is_undefined() && !detail.is_null()).then_some(detail)
}

fn field(object: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(object, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn listen(body: &HtmlElement, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = body.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        tracing::error!(event, error = %js_error_message(&e), "Failed to add htmx listener");
    }
    closure.forget();
}
