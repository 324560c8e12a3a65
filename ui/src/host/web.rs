//! Browser [`Host`] backed by `web-sys`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, HtmlInputElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    TouchEvent, Window,
};

use super::{Event, EventHandler, EventKind, Host, Target, Task, TimerId, VisibilityOptions};
use crate::error::HostError;

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub struct WebHost {
    window: Window,
    document: Document,
    timers: Rc<RefCell<HashMap<TimerId, Timeout>>>,
    next_timer: Cell<u32>,
}

impl WebHost {
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::Unavailable("window"))?;
        let document = window
            .document()
            .ok_or(HostError::Unavailable("document"))?;
        Ok(Self {
            window,
            document,
            timers: Rc::new(RefCell::new(HashMap::new())),
            next_timer: Cell::new(0),
        })
    }

    fn event_target(&self, target: &Target<Element>) -> EventTarget {
        match target {
            Target::Node(element) => element.clone().unchecked_into(),
            Target::Document => self.document.clone().unchecked_into(),
            Target::Window => self.window.clone().unchecked_into(),
        }
    }

    fn local_storage(&self) -> Result<web_sys::Storage, HostError> {
        self.window
            .local_storage()
            .map_err(|err| HostError::Storage(js_message(&err)))?
            .ok_or(HostError::Unavailable("localStorage"))
    }
}

fn translate(kind: EventKind, raw: &web_sys::Event) -> Event {
    let mut event = Event::new(kind);
    if let Some(keyboard) = raw.dyn_ref::<KeyboardEvent>() {
        event = event.with_key(keyboard.key());
    }
    if let Some(touch) = raw
        .dyn_ref::<TouchEvent>()
        .and_then(|touch| touch.changed_touches().get(0))
    {
        event = event.with_screen_x(f64::from(touch.screen_x()));
    }
    event
}

fn collect_elements(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Host for WebHost {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => collect_elements(list),
            Err(err) => {
                tracing::warn!("query `{selector}` failed: {}", js_message(&err));
                Vec::new()
            }
        }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_within(&self, root: &Element, selector: &str) -> Vec<Element> {
        match root.query_selector_all(selector) {
            Ok(list) => collect_elements(list),
            Err(err) => {
                tracing::warn!("query `{selector}` failed: {}", js_message(&err));
                Vec::new()
            }
        }
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_class(&self, node: &Element, class: &str, on: bool) {
        if let Err(err) = node.class_list().toggle_with_force(class, on) {
            tracing::warn!("toggling class `{class}` failed: {}", js_message(&err));
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = element.style().set_property(property, value) {
            tracing::warn!("setting style `{property}` failed: {}", js_message(&err));
        }
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Err(err) = node.toggle_attribute_with_force("disabled", disabled) {
            tracing::warn!("toggling `disabled` failed: {}", js_message(&err));
        }
    }

    fn value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn offset_width(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|element| f64::from(element.offset_width()))
            .unwrap_or(0.0)
    }

    fn set_document_language(&self, code: &str) {
        if let Some(root) = self.document.document_element() {
            if let Err(err) = root.set_attribute("lang", code) {
                tracing::warn!("setting document language failed: {}", js_message(&err));
            }
        }
    }

    fn inject_style(&self, css: &str) {
        let Some(head) = self.document.head() else {
            tracing::warn!("{}", HostError::Unavailable("document.head"));
            return;
        };
        let result = self
            .document
            .create_element("style")
            .and_then(|style| {
                style.set_text_content(Some(css));
                head.append_child(&style)
            });
        if let Err(err) = result {
            tracing::warn!("injecting stylesheet: {}", HostError::Js(js_message(&err)));
        }
    }

    fn storage_get(&self, key: &str) -> Result<Option<String>, HostError> {
        self.local_storage()?
            .get_item(key)
            .map_err(|err| HostError::Storage(js_message(&err)))
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.local_storage()?
            .set_item(key, value)
            .map_err(|err| HostError::Storage(js_message(&err)))
    }

    fn listen(&self, target: Target<Element>, kind: EventKind, mut handler: EventHandler) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
            let event = translate(kind, &raw);
            handler(&event);
            if event.is_default_prevented() {
                raw.prevent_default();
            }
        });

        let target = self.event_target(&target);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        let result = if kind.is_passive() {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind.dom_name(),
                callback,
                &options,
            )
        } else {
            target.add_event_listener_with_callback(kind.dom_name(), callback)
        };

        match result {
            Ok(()) => closure.forget(),
            Err(err) => tracing::warn!(
                "listening for `{}`: {}",
                kind.dom_name(),
                HostError::Js(js_message(&err))
            ),
        }
    }

    fn set_timeout(&self, delay_ms: u32, task: Task) -> TimerId {
        let id = TimerId(self.next_timer.get());
        self.next_timer.set(id.0.wrapping_add(1));

        let timers = self.timers.clone();
        let timeout = Timeout::new(delay_ms, move || {
            // wasm-bindgen defers freeing a closure dropped mid-call, so the
            // fired entry can go now.
            let fired = timers.borrow_mut().remove(&id);
            drop(fired);
            task();
        });
        self.timers.borrow_mut().insert(id, timeout);
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        // Dropping a gloo `Timeout` cancels it.
        let cancelled = self.timers.borrow_mut().remove(&id);
        drop(cancelled);
    }

    fn observe_visibility(
        &self,
        nodes: &[Element],
        options: &VisibilityOptions,
        mut on_visible: Box<dyn FnMut(&Element) -> bool>,
    ) {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    if on_visible(&target) {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for node in nodes {
                    observer.observe(node);
                }
                callback.forget();
            }
            Err(err) => tracing::warn!(
                "creating intersection observer: {}",
                HostError::Js(js_message(&err))
            ),
        }
    }
}
