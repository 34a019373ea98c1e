//! Track-based style animation.
//!
//! This module provides:
//! - **Tracks**: ordered save / queue / wait / restore / call steps over a set of elements
//! - **Runner**: starts groups of tracks together and reports when they end
//! - **Easing Functions**: standard CSS timing functions
//! - **Events**: lifecycle notifications polled after each update
//!
//! # Architecture
//!
//! ```text
//! TrackRunner
//!   └── Track groups
//!         └── Active tracks (step queue → inline styles in the ElementTree)
//! ```

pub mod easing;
pub mod events;
pub mod interpolate;
pub mod runner;
pub mod track;
pub mod types;

pub use easing::{EasingFunction, EasingParseError, StepPosition};
pub use events::{EventQueue, TrackEvent};
pub use interpolate::Interpolate;
pub use runner::TrackRunner;
pub use track::{ActiveTrack, Step, StepCallback, StyleStep, Track};
pub use types::{
    AnimationId, AnimationState, Length, Style, StyleProperty, StyleValue, Translate,
};
