//! In-memory [`Host`] used by tests (and anywhere a browser is unavailable).
//!
//! Elements live in a flat arena in creation order, which doubles as document
//! order. The selector matcher understands compound simple selectors
//! (`tag`, `.class`, `#id`, `[attr]`, `[attr=value]`) and comma lists, which
//! is all the widgets ask for. Time only moves when [`FakeHost::advance`] is
//! called.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use super::{Event, EventHandler, EventKind, Host, Target, Task, TimerId, VisibilityOptions};
use crate::error::HostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A recorded write performed through the [`Host`] interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    InnerHtml { node: NodeId, html: String },
    Class { node: NodeId, class: String, on: bool },
    Style { node: NodeId, property: String, value: String },
    Disabled { node: NodeId, disabled: bool },
    DocumentLanguage(String),
    StyleInjected,
    StorageSet { key: String, value: String },
}

#[derive(Debug, Default)]
struct FakeElement {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    inner_html: String,
    styles: BTreeMap<String, String>,
    value: String,
    width: f64,
    disabled: bool,
    parent: Option<NodeId>,
}

struct Listener {
    target: Target<NodeId>,
    kind: EventKind,
    handler: Rc<RefCell<EventHandler>>,
}

struct PendingTimer {
    id: TimerId,
    due: u64,
    task: Task,
}

type VisibilityCallback = Rc<RefCell<Box<dyn FnMut(&NodeId) -> bool>>>;

struct Observer {
    nodes: Vec<NodeId>,
    options: VisibilityOptions,
    on_visible: VisibilityCallback,
}

#[derive(Default)]
pub struct FakeHost {
    elements: RefCell<Vec<FakeElement>>,
    storage: RefCell<HashMap<String, String>>,
    storage_fails: Cell<bool>,
    document_language: RefCell<Option<String>>,
    injected_styles: RefCell<Vec<String>>,
    listeners: RefCell<Vec<Listener>>,
    timers: RefCell<Vec<PendingTimer>>,
    next_timer: Cell<u32>,
    now_ms: Cell<u64>,
    observers: RefCell<Vec<Observer>>,
    mutations: RefCell<Vec<Mutation>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    // -- page construction --------------------------------------------------

    pub fn create(&self, tag: &str) -> NodeId {
        let mut elements = self.elements.borrow_mut();
        elements.push(FakeElement {
            tag: tag.to_ascii_lowercase(),
            ..FakeElement::default()
        });
        NodeId(elements.len() - 1)
    }

    /// Create an element under `parent` carrying the given classes.
    pub fn create_in(&self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.create(tag);
        self.append(parent, node);
        for class in classes {
            self.add_class(node, class);
        }
        node
    }

    pub fn append(&self, parent: NodeId, child: NodeId) {
        self.elements.borrow_mut()[child.0].parent = Some(parent);
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        self.elements.borrow_mut()[node.0].classes.insert(class.to_string());
    }

    pub fn set_id(&self, node: NodeId, id: &str) {
        self.elements.borrow_mut()[node.0].id = Some(id.to_string());
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.elements.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        self.elements.borrow_mut()[node.0].value = value.to_string();
    }

    pub fn set_width(&self, node: NodeId, width: f64) {
        self.elements.borrow_mut()[node.0].width = width;
    }

    pub fn seed_inner_html(&self, node: NodeId, html: &str) {
        self.elements.borrow_mut()[node.0].inner_html = html.to_string();
    }

    pub fn seed_storage(&self, key: &str, value: &str) {
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Make every storage call fail, as with disabled cookies / private mode.
    pub fn set_storage_fails(&self, fails: bool) {
        self.storage_fails.set(fails);
    }

    // -- inspection -----------------------------------------------------------

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements.borrow()[node.0].classes.contains(class)
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        self.elements.borrow()[node.0].inner_html.clone()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.elements.borrow()[node.0].styles.get(property).cloned()
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.elements.borrow()[node.0].disabled
    }

    pub fn document_language(&self) -> Option<String> {
        self.document_language.borrow().clone()
    }

    pub fn injected_styles(&self) -> Vec<String> {
        self.injected_styles.borrow().clone()
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.borrow().clone()
    }

    pub fn clear_mutations(&self) {
        self.mutations.borrow_mut().clear();
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn now(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observers
            .borrow()
            .iter()
            .any(|observer| observer.nodes.contains(&node))
    }

    pub fn observer_options(&self) -> Vec<VisibilityOptions> {
        self.observers
            .borrow()
            .iter()
            .map(|observer| observer.options.clone())
            .collect()
    }

    // -- driving --------------------------------------------------------------

    /// Deliver `event` to every listener registered for `target` and the
    /// event's kind. Returns whether a handler prevented the default action.
    pub fn dispatch(&self, target: Target<NodeId>, event: Event) -> bool {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == event.kind() && listener.target == target)
            .map(|listener| listener.handler.clone())
            .collect();
        for handler in handlers {
            (handler.borrow_mut())(&event);
        }
        event.is_default_prevented()
    }

    pub fn click(&self, node: NodeId) {
        self.dispatch(Target::Node(node), Event::new(EventKind::Click));
    }

    /// Fire a submit event; returns whether navigation was prevented.
    pub fn submit(&self, form: NodeId) -> bool {
        self.dispatch(Target::Node(form), Event::new(EventKind::Submit))
    }

    pub fn focus(&self, node: NodeId) {
        self.dispatch(Target::Node(node), Event::new(EventKind::Focus));
    }

    pub fn blur(&self, node: NodeId) {
        self.dispatch(Target::Node(node), Event::new(EventKind::Blur));
    }

    pub fn key_down(&self, key: &str) {
        self.dispatch(Target::Document, Event::new(EventKind::KeyDown).with_key(key));
    }

    /// A complete drag gesture from `from_x` to `to_x` on `node`.
    pub fn drag(&self, node: NodeId, from_x: f64, to_x: f64) {
        let target = Target::Node(node);
        self.dispatch(
            target.clone(),
            Event::new(EventKind::DragStart).with_screen_x(from_x),
        );
        self.dispatch(
            target.clone(),
            Event::new(EventKind::DragMove).with_screen_x(to_x),
        );
        self.dispatch(target, Event::new(EventKind::DragEnd).with_screen_x(to_x));
    }

    pub fn resize(&self) {
        self.dispatch(Target::Window, Event::new(EventKind::Resize));
    }

    /// Move the virtual clock forward, running every timeout that comes due
    /// (including ones scheduled by the timeouts themselves) in order.
    pub fn advance(&self, ms: u64) {
        let until = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let position = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= until)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(position, _)| position);
                position.map(|position| timers.remove(position))
            };
            let Some(timer) = next else { break };
            self.now_ms.set(timer.due);
            (timer.task)();
        }
        self.now_ms.set(until);
    }

    /// Report `node` as crossing the visibility threshold.
    pub fn intersect(&self, node: NodeId) {
        let callbacks: Vec<_> = self
            .observers
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, observer)| observer.nodes.contains(&node))
            .map(|(index, observer)| (index, observer.on_visible.clone()))
            .collect();
        for (index, callback) in callbacks {
            let stop = (callback.borrow_mut())(&node);
            if stop {
                self.observers.borrow_mut()[index]
                    .nodes
                    .retain(|observed| *observed != node);
            }
        }
    }

    fn record(&self, mutation: Mutation) {
        self.mutations.borrow_mut().push(mutation);
    }

    fn is_descendant(elements: &[FakeElement], node: NodeId, root: NodeId) -> bool {
        let mut current = elements[node.0].parent;
        while let Some(parent) = current {
            if parent == root {
                return true;
            }
            current = elements[parent.0].parent;
        }
        false
    }
}

impl Host for FakeHost {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let elements = self.elements.borrow();
        (0..elements.len())
            .filter(|&index| matches_list(&elements[index], selector))
            .map(NodeId)
            .collect()
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        let elements = self.elements.borrow();
        (0..elements.len())
            .map(NodeId)
            .filter(|&node| Self::is_descendant(&elements, node, *root))
            .filter(|node| matches_list(&elements[node.0], selector))
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.elements.borrow()[node.0].parent
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let elements = self.elements.borrow();
        let element = &elements[node.0];
        match name {
            "id" => element.id.clone(),
            _ => element.attributes.get(name).cloned(),
        }
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.elements.borrow_mut()[node.0].inner_html = html.to_string();
        self.record(Mutation::InnerHtml {
            node: *node,
            html: html.to_string(),
        });
    }

    fn set_class(&self, node: &NodeId, class: &str, on: bool) {
        {
            let mut elements = self.elements.borrow_mut();
            let classes = &mut elements[node.0].classes;
            if on {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }
        self.record(Mutation::Class {
            node: *node,
            class: class.to_string(),
            on,
        });
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.elements.borrow_mut()[node.0]
            .styles
            .insert(property.to_string(), value.to_string());
        self.record(Mutation::Style {
            node: *node,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn set_disabled(&self, node: &NodeId, disabled: bool) {
        self.elements.borrow_mut()[node.0].disabled = disabled;
        self.record(Mutation::Disabled {
            node: *node,
            disabled,
        });
    }

    fn value(&self, node: &NodeId) -> String {
        self.elements.borrow()[node.0].value.clone()
    }

    fn offset_width(&self, node: &NodeId) -> f64 {
        self.elements.borrow()[node.0].width
    }

    fn set_document_language(&self, code: &str) {
        *self.document_language.borrow_mut() = Some(code.to_string());
        self.record(Mutation::DocumentLanguage(code.to_string()));
    }

    fn inject_style(&self, css: &str) {
        self.injected_styles.borrow_mut().push(css.to_string());
        self.record(Mutation::StyleInjected);
    }

    fn storage_get(&self, key: &str) -> Result<Option<String>, HostError> {
        if self.storage_fails.get() {
            return Err(HostError::Storage("storage disabled".into()));
        }
        Ok(self.storage.borrow().get(key).cloned())
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), HostError> {
        if self.storage_fails.get() {
            return Err(HostError::Storage("storage disabled".into()));
        }
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.record(Mutation::StorageSet {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn listen(&self, target: Target<NodeId>, kind: EventKind, handler: EventHandler) {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
    }

    fn set_timeout(&self, delay_ms: u32, task: Task) -> TimerId {
        let id = TimerId(self.next_timer.get());
        self.next_timer.set(id.0 + 1);
        self.timers.borrow_mut().push(PendingTimer {
            id,
            due: self.now_ms.get() + u64::from(delay_ms),
            task,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|timer| timer.id != id);
    }

    fn observe_visibility(
        &self,
        nodes: &[NodeId],
        options: &VisibilityOptions,
        on_visible: Box<dyn FnMut(&NodeId) -> bool>,
    ) {
        self.observers.borrow_mut().push(Observer {
            nodes: nodes.to_vec(),
            options: options.clone(),
            on_visible: Rc::new(RefCell::new(on_visible)),
        });
    }
}

fn matches_list(element: &FakeElement, selector: &str) -> bool {
    selector
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .any(|part| matches_compound(element, part))
}

fn matches_compound(element: &FakeElement, selector: &str) -> bool {
    if selector == "*" {
        return true;
    }
    let mut rest = selector;
    while !rest.is_empty() {
        let (matched, remaining) = match rest.as_bytes()[0] {
            b'.' => {
                let (name, remaining) = split_ident(&rest[1..]);
                (element.classes.contains(name), remaining)
            }
            b'#' => {
                let (name, remaining) = split_ident(&rest[1..]);
                (element.id.as_deref() == Some(name), remaining)
            }
            b'[' => {
                let Some(end) = rest.find(']') else {
                    return false;
                };
                let inner = &rest[1..end];
                let matched = match inner.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim_matches(|c| c == '"' || c == '\'');
                        element.attributes.get(name.trim()).map(String::as_str) == Some(value)
                    }
                    None => element.attributes.contains_key(inner.trim()),
                };
                (matched, &rest[end + 1..])
            }
            _ => {
                let (name, remaining) = split_ident(rest);
                if name.is_empty() {
                    return false;
                }
                (element.tag.eq_ignore_ascii_case(name), remaining)
            }
        };
        if !matched {
            return false;
        }
        rest = remaining;
    }
    true
}

fn split_ident(src: &str) -> (&str, &str) {
    let end = src
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(src.len());
    src.split_at(end)
}
