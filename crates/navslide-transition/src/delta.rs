//! Horizontal offsets for the header title and back-button label.

use navslide_scene::tree::{ElementTree, NodeId};

use crate::decompose::Decomposition;
use crate::page::{BACK_BUTTON_ICON_CLASS, BACK_BUTTON_LABEL_CLASS};

/// Share of half the page width the title travels when there is no label to meet.
const TITLE_FALLBACK_FACTOR: f64 = 0.6;
/// Gap kept between the back-button icon and the sliding label.
const ICON_GAP: f64 = 2.0;

/// Pixel offsets used by the header tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Delta {
    /// Distance between the centered title and the back-button label.
    pub title: Option<f64>,
    /// Distance the back-button label slides behind its icon.
    pub label: Option<f64>,
}

impl Delta {
    pub fn title_or_zero(&self) -> f64 {
        self.title.unwrap_or(0.0)
    }

    pub fn label_or_zero(&self) -> f64 {
        self.label.unwrap_or(0.0)
    }
}

/// Measure the header offsets against the bounding box of `reference`.
pub fn calculate_delta(
    tree: &ElementTree,
    reference: NodeId,
    decomposition: &Decomposition,
) -> Delta {
    let half_width = tree.rect(reference).width / 2.0;

    let title = match decomposition.back_button_label {
        Some(label) if tree.has_class(label, BACK_BUTTON_LABEL_CLASS) => {
            let rect = tree.rect(label);
            round_half_up(half_width - rect.width / 2.0 - rect.left())
        }
        _ => round_half_up(half_width * TITLE_FALLBACK_FACTOR),
    };

    let label = decomposition
        .back_button_icon
        .filter(|&icon| tree.has_class(icon, BACK_BUTTON_ICON_CLASS))
        .map(|icon| tree.rect(icon).right() - ICON_GAP);

    Delta {
        title: Some(title),
        label,
    }
}

/// Round to the nearest integer, halves towards positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use navslide_scene::tree::Rect;

    fn reference(tree: &mut ElementTree, width: f64) -> NodeId {
        let node = tree.create("div");
        tree.set_rect(node, Rect::new(0.0, 0.0, width, 600.0));
        node
    }

    #[test]
    fn test_title_meets_active_label() {
        let mut tree = ElementTree::new();
        let page = reference(&mut tree, 400.0);
        let label = tree.create_with_classes("span", &[BACK_BUTTON_LABEL_CLASS]);
        tree.set_rect(label, Rect::new(30.0, 0.0, 61.0, 20.0));

        let decomposition = Decomposition {
            back_button_label: Some(label),
            ..Decomposition::default()
        };
        let delta = calculate_delta(&tree, page, &decomposition);
        // 200 - 30.5 - 30 = 139.5
        assert_eq!(delta.title, Some(140.0));
        assert_eq!(delta.label, None);
        assert_eq!(delta.label_or_zero(), 0.0);
    }

    #[test]
    fn test_negative_half_rounds_up() {
        let mut tree = ElementTree::new();
        let page = reference(&mut tree, 400.0);
        let label = tree.create_with_classes("span", &[BACK_BUTTON_LABEL_CLASS]);
        tree.set_rect(label, Rect::new(170.0, 0.0, 61.0, 20.0));

        let decomposition = Decomposition {
            back_button_label: Some(label),
            ..Decomposition::default()
        };
        // 200 - 30.5 - 170 = -0.5
        assert_eq!(calculate_delta(&tree, page, &decomposition).title, Some(0.0));

        tree.set_rect(label, Rect::new(171.0, 0.0, 61.0, 20.0));
        assert_eq!(calculate_delta(&tree, page, &decomposition).title, Some(-1.0));
    }

    #[test]
    fn test_title_fallback_without_active_label() {
        let mut tree = ElementTree::new();
        let page = reference(&mut tree, 375.0);
        let plain = tree.create("span");

        for label in [None, Some(plain)] {
            let decomposition = Decomposition {
                back_button_label: label,
                ..Decomposition::default()
            };
            // 187.5 * 0.6 = 112.5
            assert_eq!(calculate_delta(&tree, page, &decomposition).title, Some(113.0));
        }
    }

    #[test]
    fn test_label_from_active_icon() {
        let mut tree = ElementTree::new();
        let page = reference(&mut tree, 400.0);
        let icon = tree.create_with_classes("i", &[BACK_BUTTON_ICON_CLASS]);
        tree.set_rect(icon, Rect::new(8.0, 0.0, 14.0, 20.0));
        let inactive = tree.create("i");
        tree.set_rect(inactive, Rect::new(8.0, 0.0, 14.0, 20.0));

        let active = Decomposition {
            back_button_icon: Some(icon),
            ..Decomposition::default()
        };
        assert_eq!(calculate_delta(&tree, page, &active).label, Some(20.0));

        let inactive = Decomposition {
            back_button_icon: Some(inactive),
            ..Decomposition::default()
        };
        assert_eq!(calculate_delta(&tree, page, &inactive).label, None);
    }
}
