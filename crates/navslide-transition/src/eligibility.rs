use navslide_scene::tree::ElementTree;

use crate::page::Page;

/// Style variants whose header bars never animate separately.
const FLAT_VARIANTS: [&str; 2] = ["material", "transparent"];

/// Whether the header bars of both pages take part in the transition.
///
/// Pages are resolved to their transition targets first. When this is false
/// the transition falls back to sliding the whole pages.
pub fn should_animate_toolbar(tree: &ElementTree, enter: &dyn Page, leave: &dyn Page) -> bool {
    let enter_target = enter.resolve_toolbar_target(tree);
    let leave_target = leave.resolve_toolbar_target(tree);
    let pages: [&dyn Page; 2] = [
        match &enter_target {
            Some(target) => target.as_ref(),
            None => enter,
        },
        match &leave_target {
            Some(target) => target.as_ref(),
            None => leave,
        },
    ];

    pages.iter().all(|page| page.can_animate_toolbar(tree))
        && !pages.iter().any(|page| {
            FLAT_VARIANTS
                .iter()
                .any(|variant| page.has_style_variant(tree, variant))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ClassPage, INLINE_ATTR, MODIFIER_ATTR, PAGE_CLASS, TOOLBAR_CLASS};
    use navslide_scene::tree::NodeId;

    fn page(tree: &mut ElementTree, modifier: Option<&str>) -> (ClassPage, NodeId) {
        let root = tree.create_with_classes("div", &[PAGE_CLASS]);
        let toolbar = tree.create_with_classes("div", &[TOOLBAR_CLASS]);
        tree.append_child(root, toolbar);
        if let Some(modifier) = modifier {
            tree.set_attribute(toolbar, MODIFIER_ATTR, modifier);
        }
        (ClassPage::new(root), toolbar)
    }

    #[test]
    fn test_plain_toolbars_animate() {
        let mut tree = ElementTree::new();
        let (enter, _) = page(&mut tree, None);
        let (leave, _) = page(&mut tree, None);
        assert!(should_animate_toolbar(&tree, &enter, &leave));
    }

    #[test]
    fn test_flat_variants_disable_toolbar_animation() {
        for (enter_modifier, leave_modifier) in [
            (Some("material"), None),
            (None, Some("material")),
            (Some("transparent"), None),
            (None, Some("noshadow transparent")),
        ] {
            let mut tree = ElementTree::new();
            let (enter, _) = page(&mut tree, enter_modifier);
            let (leave, _) = page(&mut tree, leave_modifier);
            assert!(
                !should_animate_toolbar(&tree, &enter, &leave),
                "{enter_modifier:?} / {leave_modifier:?}"
            );
        }
    }

    #[test]
    fn test_missing_capability_disables_toolbar_animation() {
        let mut tree = ElementTree::new();
        let (enter, toolbar) = page(&mut tree, None);
        let (leave, _) = page(&mut tree, Some("noshadow"));
        tree.set_attribute(toolbar, INLINE_ATTR, "");
        assert!(!should_animate_toolbar(&tree, &enter, &leave));

        let bare = ClassPage::new(tree.create_with_classes("div", &[PAGE_CLASS]));
        assert!(!should_animate_toolbar(&tree, &leave, &bare));
    }
}
