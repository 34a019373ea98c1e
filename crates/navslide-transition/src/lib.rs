//! iOS style slide transitions between the pages of a navigation stack.
//!
//! A transition breaks both pages into element groups, decides whether their
//! header bars animate on their own, measures where the title and back label
//! travel, and runs one track per group on the stage's [`TrackRunner`]. The
//! mask overlay hides whatever sits below the pages while they move and the
//! transition guard blocks the entering page until everything has finished.
//!
//! [`TrackRunner`]: navslide_scene::animation::TrackRunner

pub mod animator;
pub mod config;
pub mod decompose;
pub mod delta;
pub mod eligibility;
pub mod error;
pub mod guard;
pub mod handle;
pub mod mask;
pub mod page;
pub mod runner;
pub mod stage;
pub mod timeline;

pub use animator::{DoneCallback, NavigatorTransition, SlideTransition};
pub use config::SlideTiming;
pub use decompose::{Decomposition, decompose};
pub use delta::{Delta, calculate_delta};
pub use eligibility::should_animate_toolbar;
pub use error::{Result, TransitionError};
pub use guard::{GuardRelease, TransitionGuard};
pub use handle::TransitionHandle;
pub use mask::{MASK_CLASS, MaskOverlay};
pub use page::{ClassPage, Page};
pub use runner::TransitionRunner;
pub use stage::Stage;
pub use timeline::{Direction, TrackKey, TrackSet, build_timeline};
