//! Splitting a page into the element groups a slide animates separately.

use navslide_scene::tree::{ElementTree, NodeId};

use crate::page::{BACK_BUTTON_CLASS, Page};

/// Per-transition snapshot of the parts of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decomposition {
    /// Root of the page handed to the animator.
    pub page: NodeId,
    /// Root of the page actually decomposed, after target resolution.
    pub target: NodeId,
    pub content: Option<NodeId>,
    pub background: Option<NodeId>,
    pub bottom_bar: Option<NodeId>,
    pub toolbar: Option<NodeId>,
    pub toolbar_center: Option<NodeId>,
    pub back_button_icon: Option<NodeId>,
    pub back_button_label: Option<NodeId>,
    /// Header items other than the back button, left side first.
    pub other: Vec<NodeId>,
}

impl Decomposition {
    /// Content, bottom bar and background: the parts that slide together.
    pub fn content_group(&self) -> Vec<NodeId> {
        [self.content, self.bottom_bar, self.background]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Decompose `page`, or the enclosing transition target when it has one.
pub fn decompose(tree: &ElementTree, page: &dyn Page) -> Decomposition {
    let resolved = page.resolve_toolbar_target(tree);
    let target: &dyn Page = match &resolved {
        Some(target) => target.as_ref(),
        None => page,
    };

    let mut other = Vec::new();
    for side in [target.toolbar_left(tree), target.toolbar_right(tree)]
        .into_iter()
        .flatten()
    {
        other.extend(without_back_button(tree, side));
    }

    Decomposition {
        page: page.root(),
        target: target.root(),
        content: target.content(tree),
        background: target.background(tree),
        bottom_bar: target.bottom_bar(tree),
        toolbar: target.toolbar(tree),
        toolbar_center: target.toolbar_center(tree),
        back_button_icon: target.back_button_icon(tree),
        back_button_label: target.back_button_label(tree),
        other,
    }
}

/// Children of a side container minus the back button.
///
/// An empty container stands in for itself.
fn without_back_button(tree: &ElementTree, container: NodeId) -> Vec<NodeId> {
    let children = tree.children(container);
    if children.is_empty() {
        return vec![container];
    }
    children
        .iter()
        .copied()
        .filter(|&child| !tree.has_class(child, BACK_BUTTON_CLASS))
        .collect()
}
