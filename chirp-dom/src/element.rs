//! Elements: attributes, text, form state, children, and listeners.

use crate::event::{DomEvent, EventTarget};
use crate::id::{ElementId, ListenerId};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

const FORM_CONTROLS: [&str; 4] = ["input", "textarea", "select", "progress"];

struct ElementInner {
    id: ElementId,
    tag: String,
    state: Mutex<ElementState>,
    events: EventTarget,
}

#[derive(Default)]
struct ElementState {
    attributes: IndexMap<String, String>,
    text: String,
    /// `None` for elements that are not form controls.
    value: Option<String>,
    checked: bool,
    files: Vec<String>,
    children: Vec<Element>,
    parent: Weak<ElementInner>,
}

/// A shared handle to an element. Clones refer to the same element;
/// equality is identity.
#[derive(Clone)]
pub struct Element {
    inner: Arc<ElementInner>,
}

/// A non-owning element handle. Holding one never keeps an element alive.
#[derive(Clone)]
pub struct WeakElement {
    id: ElementId,
    inner: Weak<ElementInner>,
}

impl Element {
    /// Create a detached element. `input`, `textarea`, `select` and
    /// `progress` elements start as form controls with an empty value.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let state = ElementState {
            value: FORM_CONTROLS.contains(&tag.as_str()).then(String::new),
            ..ElementState::default()
        };
        Self {
            inner: Arc::new(ElementInner {
                id: ElementId::next(),
                tag,
                state: Mutex::new(state),
                events: EventTarget::new(),
            }),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: set own text.
    pub fn with_text(self, text: &str) -> Self {
        self.inner.state.lock().text = text.to_owned();
        self
    }

    /// Builder: make this a form control holding `value`.
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Builder: append a child.
    pub fn with_child(self, child: Element) -> Self {
        self.append_child(&child);
        self
    }

    /// Stable identity.
    pub fn id(&self) -> ElementId {
        self.inner.id
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// A non-owning handle to this element.
    pub fn downgrade(&self) -> WeakElement {
        WeakElement {
            id: self.inner.id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    // --- Attributes ---

    /// Read an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.state.lock().attributes.get(name).cloned()
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.state.lock().attributes.contains_key(name)
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .state
            .lock()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    /// Remove an attribute.
    pub fn remove_attribute(&self, name: &str) {
        self.inner.state.lock().attributes.shift_remove(name);
    }

    /// Add (as an empty value) or remove a boolean attribute.
    pub fn toggle_attribute(&self, name: &str, force: bool) {
        if force {
            let mut state = self.inner.state.lock();
            state.attributes.entry(name.to_owned()).or_default();
        } else {
            self.remove_attribute(name);
        }
    }

    /// Whether the `hidden` attribute is set.
    pub fn hidden(&self) -> bool {
        self.has_attribute("hidden")
    }

    /// Set or clear the `hidden` attribute.
    pub fn set_hidden(&self, hidden: bool) {
        if hidden {
            self.set_attribute("hidden", "hidden");
        } else {
            self.remove_attribute("hidden");
        }
    }

    /// Whether the `disabled` attribute is set.
    pub fn disabled(&self) -> bool {
        self.has_attribute("disabled")
    }

    // --- Text and form state ---

    /// Own text followed by the text of every descendant, in document order.
    pub fn text_content(&self) -> String {
        let (mut text, children) = {
            let state = self.inner.state.lock();
            (state.text.clone(), state.children.clone())
        };
        for child in &children {
            text.push_str(&child.text_content());
        }
        text
    }

    /// Replace the element's content with `text`. Children are detached.
    pub fn set_text_content(&self, text: &str) {
        let children = {
            let mut state = self.inner.state.lock();
            state.text = text.to_owned();
            std::mem::take(&mut state.children)
        };
        for child in children {
            child.inner.state.lock().parent = Weak::new();
        }
    }

    /// Form value, or `None` if this element is not a form control.
    pub fn value(&self) -> Option<String> {
        self.inner.state.lock().value.clone()
    }

    /// Set the form value (turning the element into a form control).
    pub fn set_value(&self, value: &str) {
        self.inner.state.lock().value = Some(value.to_owned());
    }

    /// Checkbox state.
    pub fn checked(&self) -> bool {
        self.inner.state.lock().checked
    }

    /// Set checkbox state.
    pub fn set_checked(&self, checked: bool) {
        self.inner.state.lock().checked = checked;
    }

    /// Names of the files selected in a file input.
    pub fn files(&self) -> Vec<String> {
        self.inner.state.lock().files.clone()
    }

    /// Replace the selected files.
    pub fn set_files(&self, files: Vec<String>) {
        self.inner.state.lock().files = files;
    }

    // --- Tree ---

    /// Direct children in order.
    pub fn children(&self) -> Vec<Element> {
        self.inner.state.lock().children.clone()
    }

    /// The parent element, if attached and still alive.
    pub fn parent(&self) -> Option<Element> {
        self.inner
            .state
            .lock()
            .parent
            .upgrade()
            .map(|inner| Element { inner })
    }

    /// Append `child` as the last child, moving it from its current parent.
    pub fn append_child(&self, child: &Element) {
        if let Some(old) = child.parent() {
            old.remove_child(child);
        }
        child.inner.state.lock().parent = Arc::downgrade(&self.inner);
        self.inner.state.lock().children.push(child.clone());
    }

    /// Detach `child`. Returns `false` if it was not a child of this element.
    pub fn remove_child(&self, child: &Element) -> bool {
        let removed = {
            let mut state = self.inner.state.lock();
            let before = state.children.len();
            state.children.retain(|c| c != child);
            state.children.len() != before
        };
        if removed {
            child.inner.state.lock().parent = Weak::new();
        }
        removed
    }

    /// First descendant carrying `attribute`, in document order.
    pub fn query_selector(&self, attribute: &str) -> Option<Element> {
        for child in self.children() {
            if child.has_attribute(attribute) {
                return Some(child);
            }
            if let Some(found) = child.query_selector(attribute) {
                return Some(found);
            }
        }
        None
    }

    /// Every descendant carrying `attribute`, in document order.
    pub fn query_selector_all(&self, attribute: &str) -> Vec<Element> {
        let mut found = Vec::new();
        self.collect(attribute, &mut found);
        found
    }

    fn collect(&self, attribute: &str, found: &mut Vec<Element>) {
        for child in self.children() {
            if child.has_attribute(attribute) {
                found.push(child.clone());
            }
            child.collect(attribute, found);
        }
    }

    // --- Events ---

    /// The element's own listener list.
    pub fn events(&self) -> &EventTarget {
        &self.inner.events
    }

    /// See [`EventTarget::add_event_listener`].
    pub fn add_event_listener(
        &self,
        event_type: &str,
        listener: impl Fn(&DomEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.inner.events.add_event_listener(event_type, listener)
    }

    /// See [`EventTarget::remove_event_listener`].
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner.events.remove_event_listener(id)
    }

    /// See [`EventTarget::dispatch_event`].
    pub fn dispatch_event(&self, event: &DomEvent) -> usize {
        self.inner.events.dispatch_event(event)
    }

    /// Simulate a user click. Disabled elements swallow it.
    pub fn click(&self) -> bool {
        if self.disabled() {
            return false;
        }
        self.dispatch_event(&DomEvent::new("click"));
        true
    }

    /// Simulate typing: set the value, then fire `input`.
    pub fn input(&self, value: &str) {
        self.set_value(value);
        self.dispatch_event(&DomEvent::new("input"));
    }

    /// Simulate toggling a checkbox: set `checked`, then fire `change`.
    pub fn toggle(&self, checked: bool) {
        self.set_checked(checked);
        self.dispatch_event(&DomEvent::new("change"));
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.inner.id)
            .field("tag", &self.inner.tag)
            .finish()
    }
}

impl WeakElement {
    /// Id of the element this handle was taken from.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Recover the element if it is still alive.
    pub fn upgrade(&self) -> Option<Element> {
        self.inner.upgrade().map(|inner| Element { inner })
    }

    /// Whether the element has been dropped.
    pub fn is_detached(&self) -> bool {
        self.inner.strong_count() == 0
    }
}

impl fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakElement")
            .field("id", &self.id)
            .field("alive", &!self.is_detached())
            .finish()
    }
}
