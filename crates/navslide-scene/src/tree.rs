//! Retained element tree.
//!
//! Pages and their parts live in an [`ElementTree`]: an arena of elements
//! addressed by [`NodeId`], each carrying a tag, class list, attributes, an
//! inline [`Style`] and a laid-out bounding [`Rect`]. Nodes are never freed;
//! detaching a node only unlinks it from its parent so it can be inserted again.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::animation::types::Style;

/// Handle to an element in an [`ElementTree`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

/// Bounding box in tree coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A single element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: Style,
    pub rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of elements.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    nodes: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element {
            tag: tag.to_string(),
            ..Element::default()
        });
        id
    }

    /// Create a detached element with the given classes.
    pub fn create_with_classes(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.create(tag);
        for class in classes {
            self.add_class(id, class);
        }
        id
    }

    pub fn contains(&self, node: NodeId) -> bool {
        (node.0 as usize) < self.nodes.len()
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0 as usize)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(Element::parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(Element::children).unwrap_or(&[])
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    ///
    /// Returns false if either node is unknown.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return false;
        }
        self.detach(child);
        self.nodes[parent.0 as usize].children.push(child);
        self.nodes[child.0 as usize].parent = Some(parent);
        true
    }

    /// Insert `node` directly before `reference` under the reference's parent.
    ///
    /// Returns false if `reference` is unknown or has no parent.
    pub fn insert_before(&mut self, node: NodeId, reference: NodeId) -> bool {
        if !self.contains(node) || node == reference {
            return false;
        }
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        self.detach(node);
        let siblings = &mut self.nodes[parent.0 as usize].children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(index, node);
        self.nodes[node.0 as usize].parent = Some(parent);
        true
    }

    /// Unlink `node` from its parent. Returns true if it had one.
    pub fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };
        self.nodes[parent.0 as usize].children.retain(|&c| c != node);
        self.nodes[node.0 as usize].parent = None;
        true
    }

    /// Position of `node` among its siblings.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // ------------------------------------------------------------------------
    // Classes and attributes
    // ------------------------------------------------------------------------

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|e| e.classes.contains(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            element.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            element.classes.remove(class);
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.get_mut(node) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    // ------------------------------------------------------------------------
    // Style and geometry
    // ------------------------------------------------------------------------

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.get(node).map(|e| &e.style)
    }

    pub fn style_mut(&mut self, node: NodeId) -> Option<&mut Style> {
        self.get_mut(node).map(|e| &mut e.style)
    }

    pub fn set_style(&mut self, node: NodeId, style: Style) {
        if let Some(element) = self.get_mut(node) {
            element.style = style;
        }
    }

    /// Bounding box of `node`; unknown nodes measure as an empty rect.
    pub fn rect(&self, node: NodeId) -> Rect {
        self.get(node).map(|e| e.rect).unwrap_or_default()
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(element) = self.get_mut(node) {
            element.rect = rect;
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// First direct child of `node` carrying `class`.
    pub fn find_child_by_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&c| self.has_class(c, class))
    }

    /// First descendant of `node` carrying `class`, depth-first in document order.
    pub fn find_descendant_by_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.has_class(id, class) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }

    /// Nearest strict ancestor of `node` matching `predicate`.
    pub fn find_ancestor<F>(&self, node: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&ElementTree, NodeId) -> bool,
    {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if predicate(self, id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }
}
