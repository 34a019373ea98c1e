//! Element tree and track animation primitives for navslide.

pub mod animation;
pub mod tree;

pub use animation::{EasingFunction, Length, Style, StyleProperty, Track, TrackRunner};
pub use tree::{Element, ElementTree, NodeId, Rect};
