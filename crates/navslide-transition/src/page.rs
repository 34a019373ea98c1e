//! Pages and the parts a slide transition animates.
//!
//! A page is anything that can point at its parts inside an [`ElementTree`]:
//!
//! ```text
//! .page                      (root)
//!   .toolbar                 [modifier="material transparent"] [inline]
//!     .toolbar__left
//!       .back-button
//!         .back-button__icon
//!         .back-button__label
//!     .toolbar__center
//!     .toolbar__right
//!   .page__background
//!   .page__content
//!   .bottom-bar
//! ```
//!
//! [`ClassPage`] finds these parts by class name. Every part is optional.

use std::fmt;
use std::rc::Rc;

use navslide_scene::tree::{ElementTree, NodeId};

pub const PAGE_CLASS: &str = "page";
pub const CONTENT_CLASS: &str = "page__content";
pub const BACKGROUND_CLASS: &str = "page__background";
pub const BOTTOM_BAR_CLASS: &str = "bottom-bar";
pub const TOOLBAR_CLASS: &str = "toolbar";
pub const TOOLBAR_LEFT_CLASS: &str = "toolbar__left";
pub const TOOLBAR_CENTER_CLASS: &str = "toolbar__center";
pub const TOOLBAR_RIGHT_CLASS: &str = "toolbar__right";
pub const BACK_BUTTON_CLASS: &str = "back-button";
pub const BACK_BUTTON_ICON_CLASS: &str = "back-button__icon";
pub const BACK_BUTTON_LABEL_CLASS: &str = "back-button__label";

/// Space separated list of style variants on a toolbar.
pub const MODIFIER_ATTR: &str = "modifier";
/// Marks a toolbar that scrolls with the content and is never animated on its own.
pub const INLINE_ATTR: &str = "inline";
/// Marks a page container that transitions on behalf of the pages inside it.
pub const TRANSITION_TARGET_ATTR: &str = "transition-target";

/// Structural queries a slide transition needs from a page.
///
/// Only `root` is required; the remaining queries default to "absent".
pub trait Page: fmt::Debug {
    fn root(&self) -> NodeId;

    fn toolbar(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn toolbar_left(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn toolbar_center(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn toolbar_right(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn back_button_icon(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn back_button_label(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn content(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn background(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    fn bottom_bar(&self, _tree: &ElementTree) -> Option<NodeId> {
        None
    }

    /// Whether the header bar may animate separately from the content.
    fn can_animate_toolbar(&self, tree: &ElementTree) -> bool {
        self.toolbar(tree)
            .is_some_and(|toolbar| !tree.has_attribute(toolbar, INLINE_ATTR))
    }

    /// Whether the header bar carries the style variant `name`.
    fn has_style_variant(&self, tree: &ElementTree, name: &str) -> bool {
        self.toolbar(tree)
            .and_then(|toolbar| tree.attribute(toolbar, MODIFIER_ATTR))
            .is_some_and(|modifiers| modifiers.split_whitespace().any(|m| m == name))
    }

    /// The enclosing page that transitions in place of this one, if any.
    fn resolve_toolbar_target(&self, _tree: &ElementTree) -> Option<Rc<dyn Page>> {
        None
    }
}

/// A page whose parts are located by class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassPage {
    root: NodeId,
}

impl ClassPage {
    pub fn new(root: NodeId) -> Self {
        Self { root }
    }

    pub fn shared(root: NodeId) -> Rc<dyn Page> {
        Rc::new(Self::new(root))
    }

    fn back_button(&self, tree: &ElementTree) -> Option<NodeId> {
        self.toolbar(tree)
            .and_then(|toolbar| tree.find_descendant_by_class(toolbar, BACK_BUTTON_CLASS))
    }

    fn toolbar_part(&self, tree: &ElementTree, class: &str) -> Option<NodeId> {
        self.toolbar(tree)
            .and_then(|toolbar| tree.find_child_by_class(toolbar, class))
    }
}

impl Page for ClassPage {
    fn root(&self) -> NodeId {
        self.root
    }

    fn toolbar(&self, tree: &ElementTree) -> Option<NodeId> {
        tree.find_child_by_class(self.root, TOOLBAR_CLASS)
    }

    fn toolbar_left(&self, tree: &ElementTree) -> Option<NodeId> {
        self.toolbar_part(tree, TOOLBAR_LEFT_CLASS)
    }

    fn toolbar_center(&self, tree: &ElementTree) -> Option<NodeId> {
        self.toolbar_part(tree, TOOLBAR_CENTER_CLASS)
    }

    fn toolbar_right(&self, tree: &ElementTree) -> Option<NodeId> {
        self.toolbar_part(tree, TOOLBAR_RIGHT_CLASS)
    }

    fn back_button_icon(&self, tree: &ElementTree) -> Option<NodeId> {
        self.back_button(tree)
            .and_then(|button| tree.find_child_by_class(button, BACK_BUTTON_ICON_CLASS))
    }

    fn back_button_label(&self, tree: &ElementTree) -> Option<NodeId> {
        self.back_button(tree)
            .and_then(|button| tree.find_child_by_class(button, BACK_BUTTON_LABEL_CLASS))
    }

    fn content(&self, tree: &ElementTree) -> Option<NodeId> {
        tree.find_child_by_class(self.root, CONTENT_CLASS)
    }

    fn background(&self, tree: &ElementTree) -> Option<NodeId> {
        tree.find_child_by_class(self.root, BACKGROUND_CLASS)
    }

    fn bottom_bar(&self, tree: &ElementTree) -> Option<NodeId> {
        tree.find_child_by_class(self.root, BOTTOM_BAR_CLASS)
    }

    fn resolve_toolbar_target(&self, tree: &ElementTree) -> Option<Rc<dyn Page>> {
        tree.find_ancestor(self.root, |tree, node| {
            tree.has_class(node, PAGE_CLASS) && tree.has_attribute(node, TRANSITION_TARGET_ATTR)
        })
        .map(ClassPage::shared)
    }
}

/// The page that actually transitions: the enclosing target, or `page` itself.
pub fn resolve_target(tree: &ElementTree, page: &Rc<dyn Page>) -> Rc<dyn Page> {
    page.resolve_toolbar_target(tree)
        .unwrap_or_else(|| Rc::clone(page))
}
