//! Opaque backdrop inserted behind the animating pages.

use navslide_scene::animation::{Style, StyleProperty};
use navslide_scene::tree::{ElementTree, NodeId, Rect};
use tracing::trace;

pub const MASK_CLASS: &str = "navigator-transition-mask";

/// Stacking order of the mask relative to its siblings.
const MASK_Z_INDEX: i32 = 2;

/// A single reusable mask element.
///
/// The element is created on first insertion and detached, never destroyed,
/// on removal. At most one insertion is live at a time.
#[derive(Debug, Clone)]
pub struct MaskOverlay {
    color: [f32; 4],
    node: Option<NodeId>,
}

impl Default for MaskOverlay {
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0, 1.0])
    }
}

impl MaskOverlay {
    pub fn new(color: [f32; 4]) -> Self {
        Self { color, node: None }
    }

    /// The mask element, once created.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn is_attached(&self, tree: &ElementTree) -> bool {
        self.node.is_some_and(|node| tree.parent(node).is_some())
    }

    /// Insert the mask directly before `reference`, removing any stale insertion.
    ///
    /// Returns false when `reference` has no parent to insert into.
    pub fn insert_before(&mut self, tree: &mut ElementTree, reference: NodeId) -> bool {
        self.remove(tree);
        let Some(parent) = tree.parent(reference) else {
            return false;
        };

        let node = self.ensure_node(tree);
        let bounds = tree.rect(parent);
        tree.set_rect(node, Rect::new(0.0, 0.0, bounds.width, bounds.height));
        tree.insert_before(node, reference);
        trace!(?node, ?reference, "mask inserted");
        true
    }

    /// Detach the mask. Returns true if it was attached.
    pub fn remove(&mut self, tree: &mut ElementTree) -> bool {
        let removed = self.node.is_some_and(|node| tree.detach(node));
        if removed {
            trace!(node = ?self.node, "mask removed");
        }
        removed
    }

    fn ensure_node(&mut self, tree: &mut ElementTree) -> NodeId {
        if let Some(node) = self.node {
            return node;
        }
        let node = tree.create_with_classes("div", &[MASK_CLASS]);
        tree.set_style(
            node,
            Style::new()
                .with(StyleProperty::BackgroundColor, self.color)
                .with(StyleProperty::ZIndex, MASK_Z_INDEX),
        );
        self.node = Some(node);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> (ElementTree, NodeId, NodeId, NodeId) {
        let mut tree = ElementTree::new();
        let navigator = tree.create("navigator");
        tree.set_rect(navigator, Rect::new(10.0, 20.0, 320.0, 480.0));
        let below = tree.create("div");
        let above = tree.create("div");
        tree.append_child(navigator, below);
        tree.append_child(navigator, above);
        (tree, navigator, below, above)
    }

    #[test]
    fn test_insert_and_remove() {
        let (mut tree, navigator, below, above) = stack();
        let mut mask = MaskOverlay::default();

        assert!(mask.insert_before(&mut tree, above));
        let node = mask.node().unwrap();
        assert_eq!(tree.children(navigator), &[below, node, above]);
        assert!(tree.has_class(node, MASK_CLASS));
        assert_eq!(tree.rect(node), Rect::new(0.0, 0.0, 320.0, 480.0));
        assert_eq!(
            tree.style(node)
                .and_then(|s| s.get(StyleProperty::BackgroundColor))
                .and_then(|v| v.as_color()),
            Some([0.0, 0.0, 0.0, 1.0])
        );

        assert!(mask.remove(&mut tree));
        assert!(!mask.is_attached(&tree));
        assert!(!mask.remove(&mut tree));
        assert_eq!(tree.children(navigator), &[below, above]);
    }

    #[test]
    fn test_reinsert_replaces_stale_mask() {
        let (mut tree, navigator, below, above) = stack();
        let mut mask = MaskOverlay::new([1.0, 1.0, 1.0, 1.0]);

        mask.insert_before(&mut tree, above);
        let node = mask.node().unwrap();
        mask.insert_before(&mut tree, below);

        assert_eq!(mask.node(), Some(node));
        assert_eq!(tree.children(navigator), &[node, below, above]);
    }

    #[test]
    fn test_reference_without_parent() {
        let mut tree = ElementTree::new();
        let orphan = tree.create("div");
        let mut mask = MaskOverlay::default();
        assert!(!mask.insert_before(&mut tree, orphan));
        assert!(!mask.is_attached(&tree));
    }
}
