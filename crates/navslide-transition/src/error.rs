use navslide_scene::animation::EasingParseError;
use navslide_scene::tree::NodeId;
use thiserror::Error;

/// Result type for transition operations.
pub type Result<T> = std::result::Result<T, TransitionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    /// A page root is not part of the element tree.
    #[error("page root {0:?} is not in the element tree")]
    MissingNode(NodeId),

    /// The two pages must be siblings for the mask to sit between them.
    #[error("pages {enter:?} and {leave:?} do not share a parent")]
    NoSharedParent { enter: NodeId, leave: NodeId },

    #[error("invalid timing function: {0}")]
    InvalidTiming(#[from] EasingParseError),

    #[error("invalid {key}: {value} (must be finite and non-negative)")]
    InvalidSeconds { key: &'static str, value: f64 },
}
