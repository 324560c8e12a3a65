//! The rendering / event-source boundary the widgets talk to.
//!
//! Widgets never touch browser APIs directly. They look elements up, subscribe
//! to events, mutate styles and schedule timers through [`Host`], which keeps
//! their logic runnable against [`fake::FakeHost`] in plain `cargo test`.
//!
//! Implementations:
//! - `web::WebHost` (wasm32 only): `web-sys` + `gloo-timers`.
//! - [`fake::FakeHost`]: in-memory element tree with a virtual clock.

use std::cell::Cell;
use std::fmt;

use crate::error::HostError;

pub mod fake;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub type EventHandler = Box<dyn FnMut(&Event)>;
pub type Task = Box<dyn FnOnce()>;

/// Identifier of a scheduled timeout, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<N> {
    Node(N),
    Document,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Focus,
    Blur,
    KeyDown,
    DragStart,
    DragMove,
    DragEnd,
    Resize,
}

impl EventKind {
    /// Name of the DOM event this kind is delivered from.
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::KeyDown => "keydown",
            Self::DragStart => "touchstart",
            Self::DragMove => "touchmove",
            Self::DragEnd => "touchend",
            Self::Resize => "resize",
        }
    }

    /// Drag listeners never cancel scrolling, so hosts may register them as passive.
    pub fn is_passive(self) -> bool {
        matches!(self, Self::DragStart | Self::DragMove | Self::DragEnd)
    }
}

/// A host-neutral view of a DOM event.
pub struct Event {
    kind: EventKind,
    key: Option<String>,
    screen_x: Option<f64>,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            key: None,
            screen_x: None,
            default_prevented: Cell::new(false),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_screen_x(mut self, x: f64) -> Self {
        self.screen_x = Some(x);
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Horizontal screen coordinate of the first changed touch point.
    pub fn screen_x(&self) -> Option<f64> {
        self.screen_x
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("screen_x", &self.screen_x)
            .field("default_prevented", &self.default_prevented.get())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub root_margin: String,
}

pub trait Host: 'static {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// Descendants of `root` matching `selector`, in document order.
    fn query_within(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_inner_html(&self, node: &Self::Node, html: &str);

    /// Add (`on`) or remove a class.
    fn set_class(&self, node: &Self::Node, class: &str, on: bool);

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn set_disabled(&self, node: &Self::Node, disabled: bool);

    /// Current value of a form input; empty for anything else.
    fn value(&self, node: &Self::Node) -> String;

    /// Rendered layout width in px.
    fn offset_width(&self, node: &Self::Node) -> f64;

    fn set_document_language(&self, code: &str);

    /// Append a global stylesheet rule block to the document.
    fn inject_style(&self, css: &str);

    fn storage_get(&self, key: &str) -> Result<Option<String>, HostError>;

    fn storage_set(&self, key: &str, value: &str) -> Result<(), HostError>;

    /// Listeners stay attached for the lifetime of the page.
    fn listen(&self, target: Target<Self::Node>, kind: EventKind, handler: EventHandler);

    fn set_timeout(&self, delay_ms: u32, task: Task) -> TimerId;

    /// Cancel a pending timeout. Unknown or already fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);

    /// Watch `nodes` against the viewport. `on_visible` runs whenever a node
    /// crosses the threshold; returning `true` stops observing that node.
    fn observe_visibility(
        &self,
        nodes: &[Self::Node],
        options: &VisibilityOptions,
        on_visible: Box<dyn FnMut(&Self::Node) -> bool>,
    );
}
