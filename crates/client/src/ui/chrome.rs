//! DOM chrome: tabs, dropdowns, navbar burger, notifications, action buttons
//!
//! Per-element behaviours are attached by [`attach_behaviors`], which is safe
//! to call again on the same subtree after every swap: each element records
//! the behaviours it already has in `data-issuedraft-bound`.
//!
//! Buttons that need the page controller (delete, copy) are handled by one
//! delegated click listener on the document, installed once at start-up.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, FormData, HtmlFormElement};

use crate::application::services::RepositoryForm;
use crate::infrastructure::platform::js_error_message;
use crate::ports::outbound::container_ids;
use crate::ui::presentation::components::COPY_MARKDOWN_BUTTON_ID;
use crate::ui::presentation::PageController;

pub const BOUND_ATTR: &str = "data-issuedraft-bound";

const ACTIVE: &str = "is-active";
const HIDDEN: &str = "is-hidden";
const HIDING: &str = "is-hiding";

const TAB_SELECTOR: &str = "[data-tab]";
const DROPDOWN_TRIGGER_SELECTOR: &str = ".dropdown-trigger button";
const BURGER_SELECTOR: &str = ".navbar-burger";
const NOTIFICATION_DELETE_SELECTOR: &str = ".notification .delete";

/// Attach per-element behaviours to `root` and its descendants.
pub fn attach_behaviors(root: &Element) {
    for_each_match(root, TAB_SELECTOR, |tab| {
        bind_click(&tab, "tab", |tab, event| {
            event.prevent_default();
            activate_tab(tab);
        });
    });

    for_each_match(root, DROPDOWN_TRIGGER_SELECTOR, |button| {
        bind_click(&button, "dropdown", |button, event| {
            // Keep the document listener from closing it again
            event.stop_propagation();
            if let Ok(Some(dropdown)) = button.closest(".dropdown") {
                let _ = dropdown.class_list().toggle(ACTIVE);
            }
        });
    });

    for_each_match(root, BURGER_SELECTOR, |burger| {
        bind_click(&burger, "burger", |burger, _| {
            let _ = burger.class_list().toggle(ACTIVE);
            let target = burger
                .get_attribute("data-target")
                .and_then(|id| burger.owner_document()?.get_element_by_id(&id));
            if let Some(menu) = target {
                let _ = menu.class_list().toggle(ACTIVE);
            }
        });
    });

    for_each_match(root, NOTIFICATION_DELETE_SELECTOR, |button| {
        bind_click(&button, "dismiss", |button, _| {
            if let Ok(Some(notification)) = button.closest(".notification") {
                fade_out(&notification);
            }
        });
    });
}

/// Add `is-hiding` and remove the element once its transition ends.
pub fn fade_out(element: &Element) {
    let target = element.clone();
    let remove = Closure::once_into_js(move || target.remove());
    if element
        .add_event_listener_with_callback("transitionend", remove.unchecked_ref())
        .is_err()
    {
        element.remove();
        return;
    }
    let _ = element.class_list().add_1(HIDING);
}

/// Install the delegated document listener for controller-backed buttons
/// and for closing open dropdowns.
pub fn install_document_listeners(document: &Document, page: Rc<PageController>) {
    let doc = document.clone();
    listen(document, "click", move |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };

        if let Some(id) = closest_attr(&target, "[data-delete-issue]", "data-delete-issue") {
            page.delete_issue(&id);
        } else if let Some(id) = closest_attr(&target, "[data-delete-repo]", "data-delete-repo") {
            page.delete_repository(&id);
        } else if matches!(target.closest(&format!("#{COPY_MARKDOWN_BUTTON_ID}")), Ok(Some(_))) {
            copy_markdown(&doc, Rc::clone(&page));
        }

        close_dropdowns(&doc);
    });
}

/// Intercept the settings form and hand it to the page controller.
pub fn bind_repository_form(document: &Document, page: Rc<PageController>) {
    let Some(form) = document
        .get_element_by_id(container_ids::REPOSITORY_FORM)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };

    let target = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let data = match FormData::new_with_form(&target) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %js_error_message(&e), "Could not read repository form");
                return;
            }
        };
        let field = |name: &str| data.get(name).as_string().unwrap_or_default();
        let submitted = RepositoryForm::new(field("owner"), field("name"));
        if page.submit_repository(&submitted) {
            target.reset();
        }
    });
}

fn activate_tab(tab: &Element) {
    let Some(name) = tab.get_attribute("data-tab") else {
        return;
    };

    if let Ok(Some(tabs)) = tab.closest(".tabs") {
        for_each_descendant(&tabs, "li", |li| {
            let _ = li.class_list().remove_1(ACTIVE);
        });
    }
    if let Ok(Some(li)) = tab.closest("li") {
        let _ = li.class_list().add_1(ACTIVE);
    }

    let Ok(Some(body)) = tab.closest(".message-body") else {
        return;
    };
    for_each_descendant(&body, ".tab-content", |panel| {
        let _ = panel.class_list().add_1(HIDDEN);
    });
    if let Ok(Some(panel)) = body.query_selector(&format!("#tab-{name}")) {
        let _ = panel.class_list().remove_1(HIDDEN);
    }
}

fn copy_markdown(document: &Document, page: Rc<PageController>) {
    let markdown = document
        .query_selector("#tab-markdown code")
        .ok()
        .flatten()
        .and_then(|code| code.text_content())
        .unwrap_or_default();
    let Some(window) = web_sys::window() else {
        return;
    };

    let promise = window.navigator().clipboard().write_text(&markdown);
    wasm_bindgen_futures::spawn_local(async move {
        let result = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| js_error_message(&e));
        page.copy_markdown_result(result);
    });
}

fn close_dropdowns(document: &Document) {
    if let Ok(open) = document.query_selector_all(".dropdown.is-active") {
        for i in 0..open.length() {
            if let Some(el) = open.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.class_list().remove_1(ACTIVE);
            }
        }
    }
}

fn closest_attr(element: &Element, selector: &str, attr: &str) -> Option<String> {
    element.closest(selector).ok().flatten()?.get_attribute(attr)
}

/// Run `f` on `root` if it matches, then on every matching descendant.
fn for_each_match(root: &Element, selector: &str, mut f: impl FnMut(Element)) {
    if root.matches(selector).unwrap_or(false) {
        f(root.clone());
    }
    for_each_descendant(root, selector, f);
}

fn for_each_descendant(root: &Element, selector: &str, mut f: impl FnMut(Element)) {
    let Ok(nodes) = root.query_selector_all(selector) else {
        tracing::warn!(selector, "Invalid selector");
        return;
    };
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            f(el);
        }
    }
}

/// Record `behavior` on the element; `false` if it was already there.
fn mark_bound(element: &Element, behavior: &str) -> bool {
    let current = element.get_attribute(BOUND_ATTR).unwrap_or_default();
    if current.split_whitespace().any(|b| b == behavior) {
        return false;
    }
    let updated = if current.is_empty() {
        behavior.to_string()
    } else {
        format!("{current} {behavior}")
    };
    element.set_attribute(BOUND_ATTR, &updated).is_ok()
}

fn bind_click(
    element: &Element,
    behavior: &str,
    mut handler: impl FnMut(&Element, Event) + 'static,
) {
    if mark_bound(element, behavior) {
        let bound = element.clone();
        listen(element, "click", move |event| handler(&bound, event));
    }
}

/// Page-lifetime listener; the closure is leaked on purpose.
fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::error!(event, error = %js_error_message(&e), "Failed to add listener");
    }
    closure.forget();
}
