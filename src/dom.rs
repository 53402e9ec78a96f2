//! Element side-model the editing core resolves against and mutates.
//!
//! The crate does not render anything; a host toolkit owns the real widget
//! tree and mirrors the relevant elements into a [`Document`]. Nodes live in
//! an arena and are addressed by [`NodeId`]. Nodes are never removed, so an
//! id stays valid for the lifetime of the document that created it. Ids from
//! one document are meaningless in another; entry points guard against that
//! with [`Document::contains`].

use std::collections::{BTreeMap, BTreeSet};

/// Handle to one element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    /// Rendered content of a display element.
    text: String,
    /// Current value of a form control.
    value: String,
}

/// Arena of elements with attributes, classes, text and control values.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document containing only a `body` root element.
    pub fn new() -> Self {
        let mut doc = Self { nodes: Vec::new() };
        doc.push_node("body", None);
        doc
    }

    /// The root element.
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push_node(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_owned(),
            parent,
            ..Node::default()
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Create a new element as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.push_node(tag, Some(parent));
        self.node_mut(parent).children.push(id);
        id
    }

    /// Whether `id` belongs to this document.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Tag name of an element.
    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    /// Parent element, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Child elements in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Attribute value, `None` when absent.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attrs.get(name).map(String::as_str)
    }

    /// Whether an attribute is present, even with an empty value.
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.node(id).attrs.contains_key(name)
    }

    /// Set (or replace) an attribute.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.node_mut(id)
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    /// Remove an attribute if present.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.node_mut(id).attrs.remove(name);
    }

    /// Whether the element carries a CSS class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.contains(class)
    }

    /// Add a CSS class (idempotent).
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        self.node_mut(id).classes.insert(class.to_owned());
    }

    /// Remove a CSS class (idempotent).
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.node_mut(id).classes.remove(class);
    }

    /// Display text of an element.
    pub fn text(&self, id: NodeId) -> &str {
        &self.node(id).text
    }

    /// Set the display text of an element.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        text.clone_into(&mut self.node_mut(id).text);
    }

    /// Current value of a form control.
    pub fn value(&self, id: NodeId) -> &str {
        &self.node(id).value
    }

    /// Set the value of a form control.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        value.clone_into(&mut self.node_mut(id).value);
    }

    /// Ancestors of an element, nearest first. Excludes the element itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    /// The element followed by its ancestors, nearest first.
    pub fn self_and_ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(id).chain(self.ancestors(id))
    }

    /// Descendants of an element in document order. Excludes the element.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    /// Elements sharing the parent of `id`, in document order, excluding `id`.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        self.parent(id).map_or_else(Vec::new, |parent| {
            self.children(parent)
                .iter()
                .copied()
                .filter(|&child| child != id)
                .collect()
        })
    }

    /// Nearest ancestor matching a predicate.
    pub fn find_ancestor(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(NodeId) -> bool,
    ) -> Option<NodeId> {
        self.ancestors(id).find(|&el| predicate(el))
    }

    /// First descendant matching a predicate, in document order.
    pub fn find_descendant(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(NodeId) -> bool,
    ) -> Option<NodeId> {
        self.descendants(id).find(|&el| predicate(el))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
