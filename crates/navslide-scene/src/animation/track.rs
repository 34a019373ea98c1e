//! Tracks: ordered sequences of timed style steps over a set of elements.
//!
//! - `Track`: builder describing the steps
//! - `ActiveTrack`: runtime state for a track being driven by a
//!   [`TrackRunner`](super::runner::TrackRunner)
//!
//! # Example
//!
//! ```
//! use navslide_scene::animation::{EasingFunction, Length, Style, Track};
//! use navslide_scene::tree::ElementTree;
//!
//! let mut tree = ElementTree::new();
//! let content = tree.create("div");
//!
//! let track = Track::new("enter/content", [content])
//!     .save_style()
//!     .queue(Style::new().translate_x(Length::Percent(100.0)), 0.0)
//!     .wait(0.0)
//!     .queue_eased(
//!         Style::new().translate_x(Length::Percent(0.0)),
//!         0.4,
//!         EasingFunction::EaseOut,
//!     )
//!     .restore_style();
//! assert_eq!(track.duration(), 0.4);
//! ```

use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use super::easing::EasingFunction;
use super::types::{AnimationId, AnimationState, Style, StyleProperty};
use crate::tree::{ElementTree, NodeId};

/// Zero-duration side effect run when a track reaches it.
pub type StepCallback = Box<dyn FnOnce(&mut ElementTree)>;

/// A timed transition of the targets towards `style`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleStep {
    pub style: Style,
    /// Duration in seconds; zero applies the style immediately.
    pub duration: f64,
    /// Timing curve, linear when absent.
    pub easing: Option<EasingFunction>,
    /// Curves that replace `easing` for single properties.
    pub property_easing: Vec<(StyleProperty, EasingFunction)>,
}

impl StyleStep {
    pub fn new(style: Style, duration: f64) -> Self {
        Self {
            style,
            duration,
            easing: None,
            property_easing: Vec::new(),
        }
    }

    pub fn eased(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Drive `property` with its own curve instead of the step's.
    pub fn ease_property(mut self, property: StyleProperty, easing: EasingFunction) -> Self {
        self.property_easing.retain(|(p, _)| *p != property);
        self.property_easing.push((property, easing));
        self
    }

    /// Curve driving `property` during this step.
    pub fn easing_for(&self, property: StyleProperty) -> EasingFunction {
        self.property_easing
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, easing)| *easing)
            .or(self.easing)
            .unwrap_or(EasingFunction::Linear)
    }
}

/// One step of a track.
pub enum Step {
    /// Snapshot the inline style of every target.
    SaveStyle,
    /// Transition towards a style.
    Queue(StyleStep),
    /// Do nothing for a while.
    Wait { seconds: f64 },
    /// Put back the snapshot taken by the last `SaveStyle`.
    RestoreStyle,
    /// Run a callback.
    Call(StepCallback),
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaveStyle => f.write_str("SaveStyle"),
            Self::Queue(step) => f.debug_tuple("Queue").field(step).finish(),
            Self::Wait { seconds } => f.debug_struct("Wait").field("seconds", seconds).finish(),
            Self::RestoreStyle => f.write_str("RestoreStyle"),
            Self::Call(_) => f.write_str("Call(..)"),
        }
    }
}

impl Step {
    /// Time this step takes, in seconds.
    pub fn duration(&self) -> f64 {
        match self {
            Self::Queue(step) => step.duration.max(0.0),
            Self::Wait { seconds } => seconds.max(0.0),
            Self::SaveStyle | Self::RestoreStyle | Self::Call(_) => 0.0,
        }
    }

    pub fn as_style_step(&self) -> Option<&StyleStep> {
        match self {
            Self::Queue(step) => Some(step),
            _ => None,
        }
    }
}

/// Builder for a sequence of steps over one or more elements.
#[derive(Debug)]
pub struct Track {
    label: String,
    targets: Vec<NodeId>,
    steps: Vec<Step>,
}

impl Track {
    pub fn new(label: impl Into<String>, targets: impl IntoIterator<Item = NodeId>) -> Self {
        let mut deduped: Vec<NodeId> = Vec::new();
        for target in targets {
            if !deduped.contains(&target) {
                deduped.push(target);
            }
        }
        Self {
            label: label.into(),
            targets: deduped,
            steps: Vec::new(),
        }
    }

    pub fn save_style(mut self) -> Self {
        self.steps.push(Step::SaveStyle);
        self
    }

    /// Transition linearly towards `style` over `duration` seconds.
    pub fn queue(self, style: Style, duration: f64) -> Self {
        self.queue_step(StyleStep::new(style, duration))
    }

    /// Transition towards `style` over `duration` seconds with `easing`.
    pub fn queue_eased(self, style: Style, duration: f64, easing: EasingFunction) -> Self {
        self.queue_step(StyleStep::new(style, duration).eased(easing))
    }

    pub fn queue_step(mut self, step: StyleStep) -> Self {
        self.steps.push(Step::Queue(step));
        self
    }

    pub fn wait(mut self, seconds: f64) -> Self {
        self.steps.push(Step::Wait { seconds });
        self
    }

    pub fn restore_style(mut self) -> Self {
        self.steps.push(Step::RestoreStyle);
        self
    }

    pub fn call<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut ElementTree) + 'static,
    {
        self.steps.push(Step::Call(Box::new(callback)));
        self
    }

    /// Append a step to an already built track.
    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Style steps in order, skipping bookkeeping steps.
    pub fn style_steps(&self) -> impl Iterator<Item = &StyleStep> {
        self.steps.iter().filter_map(Step::as_style_step)
    }

    /// Total time from the first step to the last, in seconds.
    pub fn duration(&self) -> f64 {
        self.steps.iter().map(Step::duration).sum()
    }

    /// True when the track animates nothing.
    pub fn has_no_targets(&self) -> bool {
        self.targets.is_empty()
    }
}

/// The step currently consuming time.
#[derive(Debug)]
enum Running {
    Wait {
        remaining: f64,
    },
    Style {
        step: StyleStep,
        /// Starting value of every animated property, per target.
        from: Vec<(NodeId, Style)>,
        elapsed: f64,
    },
}

/// A track being driven by a runner.
#[derive(Debug)]
pub struct ActiveTrack {
    pub id: AnimationId,
    pub label: String,
    pub state: AnimationState,
    targets: Vec<NodeId>,
    steps: VecDeque<Step>,
    current: Option<Running>,
    snapshot: Vec<(NodeId, Style)>,
    elapsed: f64,
}

impl ActiveTrack {
    pub fn new(track: Track) -> Self {
        Self {
            id: AnimationId::new(),
            label: track.label,
            state: AnimationState::Pending,
            targets: track.targets,
            steps: track.steps.into(),
            current: None,
            snapshot: Vec::new(),
            elapsed: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != AnimationState::Finished
    }

    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// Time consumed so far, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of steps not yet started.
    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    /// Advance the track by `dt` seconds, applying styles to `tree`.
    ///
    /// Zero-duration steps run as soon as they are reached; time left over
    /// when a timed step completes carries into the following steps.
    /// Returns `true` while the track still has work to do.
    pub fn advance(&mut self, dt: f64, tree: &mut ElementTree) -> bool {
        if self.is_finished() {
            return false;
        }
        self.state = AnimationState::Running;
        let mut budget = dt.max(0.0);

        loop {
            let Some(running) = self.current.as_mut() else {
                let Some(step) = self.steps.pop_front() else {
                    self.state = AnimationState::Finished;
                    trace!(track = %self.label, elapsed = self.elapsed, "track finished");
                    return false;
                };
                self.start_step(step, tree);
                continue;
            };

            match running {
                Running::Wait { remaining } => {
                    if budget >= *remaining {
                        budget -= *remaining;
                        self.elapsed += *remaining;
                        self.current = None;
                    } else {
                        *remaining -= budget;
                        self.elapsed += budget;
                        return true;
                    }
                }
                Running::Style {
                    step,
                    from,
                    elapsed,
                } => {
                    let left = step.duration - *elapsed;
                    if budget >= left {
                        budget -= left;
                        self.elapsed += left;
                        for (node, _) in from.iter() {
                            apply_exact(tree, *node, &step.style);
                        }
                        self.current = None;
                    } else {
                        *elapsed += budget;
                        self.elapsed += budget;
                        let progress = *elapsed / step.duration;
                        apply_interpolated(tree, from, step, progress);
                        return true;
                    }
                }
            }
        }
    }

    fn start_step(&mut self, step: Step, tree: &mut ElementTree) {
        trace!(track = %self.label, ?step, "step");
        match step {
            Step::SaveStyle => {
                self.snapshot = self
                    .targets
                    .iter()
                    .filter_map(|&node| tree.style(node).map(|s| (node, s.clone())))
                    .collect();
            }
            Step::RestoreStyle => {
                for (node, style) in self.snapshot.drain(..) {
                    tree.set_style(node, style);
                }
            }
            Step::Call(callback) => callback(tree),
            Step::Wait { seconds } => {
                if seconds > 0.0 {
                    self.current = Some(Running::Wait { remaining: seconds });
                }
            }
            Step::Queue(step) => {
                if step.duration <= 0.0 {
                    for &node in &self.targets {
                        apply_exact(tree, node, &step.style);
                    }
                    return;
                }
                let from = self
                    .targets
                    .iter()
                    .filter_map(|&node| {
                        let current = tree.style(node)?;
                        let start = step
                            .style
                            .properties()
                            .fold(Style::new(), |acc, p| acc.with(p, current.computed(p)));
                        Some((node, start))
                    })
                    .collect();
                self.current = Some(Running::Style {
                    step,
                    from,
                    elapsed: 0.0,
                });
                // Progress zero takes effect on the tick that starts the step.
                if let Some(Running::Style { step, from, .. }) = &self.current {
                    apply_interpolated(tree, from, step, 0.0);
                }
            }
        }
    }
}

fn apply_exact(tree: &mut ElementTree, node: NodeId, style: &Style) {
    if let Some(target) = tree.style_mut(node) {
        target.apply(style);
    }
}

fn apply_interpolated(
    tree: &mut ElementTree,
    from: &[(NodeId, Style)],
    step: &StyleStep,
    progress: f64,
) {
    for (node, start) in from {
        let rect = tree.rect(*node);
        let Some(target) = tree.style_mut(*node) else {
            continue;
        };
        for (property, end) in step.style.iter() {
            let t = step.easing_for(property).evaluate(progress);
            let value = start
                .computed(property)
                .lerp(end, t, rect.width, rect.height);
            target.set(property, value);
        }
    }
}
