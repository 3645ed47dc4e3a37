//! Element - Shared handle to a caller-owned node.
//!
//! Cloning an `Element` clones the handle, not the node. Equality is
//! identity. Attributes, classes and styles keep insertion order.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::types::Interaction;

/// Identifies a registered listener for removal.
pub type ListenerId = usize;

type Listener = Rc<dyn Fn()>;

struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    children: Vec<Element>,
    parent: Weak<RefCell<ElementData>>,
    /// Full height of the content when unclamped (scroll height).
    content_extent: u32,
    listeners: Vec<(ListenerId, Interaction, Listener)>,
    next_listener: ListenerId,
}

/// Shared handle to one element.
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("attributes", &data.attributes)
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl Element {
    /// Create a detached element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            tag: tag.into(),
            attributes: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
            parent: Weak::new(),
            content_extent: 0,
            listeners: Vec::new(),
            next_listener: 0,
        })))
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn with_id(self, id: &str) -> Self {
        self.set_id(id);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_extent(self, extent: u32) -> Self {
        self.set_content_extent(extent);
        self
    }

    pub fn with_children(self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self.append_child(&child);
        }
        self
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.borrow().attributes.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute, replacing any previous value in place.
    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match data.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.retain(|(n, _)| n != name);
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.0.borrow().attributes.clone()
    }

    /// Markup id. Empty ids count as absent.
    pub fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    pub fn set_id(&self, id: &str) {
        self.set_attribute("id", id);
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn has_class(&self, class: &str) -> bool {
        !class.is_empty() && self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        self.0.borrow_mut().classes.push(class.to_string());
    }

    pub fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    // =========================================================================
    // Style & Extent
    // =========================================================================

    pub fn style(&self, property: &str) -> Option<String> {
        self.0
            .borrow()
            .style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    pub fn set_style(&self, property: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match data.style.iter_mut().find(|(p, _)| p == property) {
            Some(slot) => slot.1 = value.to_string(),
            None => data.style.push((property.to_string(), value.to_string())),
        }
    }

    /// Unclamped content height, as measured by the caller's renderer.
    pub fn content_extent(&self) -> u32 {
        self.0.borrow().content_extent
    }

    pub fn set_content_extent(&self, extent: u32) {
        self.0.borrow_mut().content_extent = extent;
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Append `child`, detaching it from any previous parent first.
    pub fn append_child(&self, child: &Element) {
        child.remove();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<Element> {
        self.0.borrow().parent.upgrade().map(Element)
    }

    /// Remove `child` from this element. Returns false if it was not a child.
    pub fn remove_child(&self, child: &Element) -> bool {
        let mut data = self.0.borrow_mut();
        let before = data.children.len();
        data.children.retain(|c| c != child);
        let removed = data.children.len() != before;
        drop(data);
        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Detach from the parent, if any.
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    /// Depth-first descendants, excluding self.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        for child in self.children() {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a listener for an interaction. Returns its id for removal.
    pub fn add_listener<F>(&self, interaction: Interaction, listener: F) -> ListenerId
    where
        F: Fn() + 'static,
    {
        let mut data = self.0.borrow_mut();
        let id = data.next_listener;
        data.next_listener += 1;
        data.listeners.push((id, interaction, Rc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut data = self.0.borrow_mut();
        let before = data.listeners.len();
        data.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        data.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    /// Deliver an interaction to every matching listener in registration
    /// order. Returns true if at least one listener ran.
    pub fn dispatch(&self, interaction: Interaction) -> bool {
        // Snapshot so listeners may add/remove listeners while running
        let listeners: Vec<Listener> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == interaction)
            .map(|(_, _, listener)| listener.clone())
            .collect();

        for listener in &listeners {
            listener();
        }
        !listeners.is_empty()
    }
}
