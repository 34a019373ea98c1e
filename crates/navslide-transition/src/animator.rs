//! iOS style slide animator for a navigation stack.
//!
//! # Example
//!
//! ```
//! use navslide_transition::{ClassPage, NavigatorTransition, SlideTransition, Stage};
//!
//! let mut stage = Stage::default();
//! let navigator = stage.tree.create("navigator");
//! let below = stage.tree.create_with_classes("div", &["page"]);
//! let above = stage.tree.create_with_classes("div", &["page"]);
//! stage.tree.append_child(navigator, below);
//! stage.tree.append_child(navigator, above);
//!
//! let animator = SlideTransition::default();
//! let handle = animator
//!     .push(&mut stage, ClassPage::shared(above), ClassPage::shared(below), Box::new(|| {}))
//!     .unwrap();
//!
//! while !handle.is_complete() {
//!     stage.tick(1.0 / 60.0);
//! }
//! assert!(!animator.is_mask_attached(&stage.tree));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use navslide_config::NavslideConfig;
use navslide_scene::animation::StepCallback;
use navslide_scene::tree::{ElementTree, NodeId};
use tracing::{debug, error};

use crate::config::SlideTiming;
use crate::decompose::decompose;
use crate::delta::calculate_delta;
use crate::eligibility::should_animate_toolbar;
use crate::error::{Result, TransitionError};
use crate::guard::{GuardRelease, TransitionGuard};
use crate::handle::TransitionHandle;
use crate::mask::MaskOverlay;
use crate::page::Page;
use crate::runner::TransitionRunner;
use crate::stage::Stage;
use crate::timeline::{Direction, TrackKey, build_timeline};

/// Invoked once when a transition has finished.
pub type DoneCallback = Box<dyn FnOnce()>;

/// Animates the pages of a navigation stack.
pub trait NavigatorTransition {
    /// Slide `enter` in over `leave`.
    ///
    /// Starts once the entering page's content is ready.
    fn push(
        &self,
        stage: &mut Stage,
        enter: Rc<dyn Page>,
        leave: Rc<dyn Page>,
        on_done: DoneCallback,
    ) -> Result<TransitionHandle>;

    /// Slide `leave` off to reveal `enter`. Starts immediately.
    fn pop(
        &self,
        stage: &mut Stage,
        enter: Rc<dyn Page>,
        leave: Rc<dyn Page>,
        on_done: DoneCallback,
    ) -> Result<TransitionHandle>;
}

#[derive(Debug, Clone, Default)]
pub struct SlideTransition {
    timing: SlideTiming,
    guard: TransitionGuard,
    mask: Rc<RefCell<MaskOverlay>>,
}

impl SlideTransition {
    pub fn new(timing: SlideTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    /// Share `guard` with the navigator instead of owning a private one.
    pub fn with_guard(timing: SlideTiming, guard: TransitionGuard) -> Self {
        Self {
            timing,
            guard,
            ..Self::default()
        }
    }

    pub fn from_config(config: &NavslideConfig) -> Result<Self> {
        Ok(Self {
            timing: SlideTiming::try_from(&config.transition)?,
            guard: TransitionGuard::new(),
            mask: Rc::new(RefCell::new(MaskOverlay::new(config.mask.color))),
        })
    }

    pub fn timing(&self) -> &SlideTiming {
        &self.timing
    }

    pub fn guard(&self) -> &TransitionGuard {
        &self.guard
    }

    pub fn mask_node(&self) -> Option<NodeId> {
        self.mask.borrow().node()
    }

    pub fn is_mask_attached(&self, tree: &ElementTree) -> bool {
        self.mask.borrow().is_attached(tree)
    }

    /// Remove the mask, release the guard, then notify the caller.
    fn finalizer(&self, release: GuardRelease, on_done: DoneCallback) -> StepCallback {
        let mask = Rc::clone(&self.mask);
        Box::new(move |tree: &mut ElementTree| {
            mask.borrow_mut().remove(tree);
            release.release();
            on_done();
        })
    }
}

impl NavigatorTransition for SlideTransition {
    fn push(
        &self,
        stage: &mut Stage,
        enter: Rc<dyn Page>,
        leave: Rc<dyn Page>,
        on_done: DoneCallback,
    ) -> Result<TransitionHandle> {
        let (enter_root, leave_root) = validate_siblings(&stage.tree, &*enter, &*leave)?;
        debug!(?enter_root, ?leave_root, "push requested");

        let release = self.guard.acquire(enter_root);
        self.mask
            .borrow_mut()
            .insert_before(&mut stage.tree, enter_root);

        let handle = TransitionHandle::new();
        let completion = handle.clone();
        let timing = self.timing;
        let mask = Rc::clone(&self.mask);
        let finalize = self.finalizer(release, on_done);

        stage.content_ready(
            enter_root,
            Box::new(move |stage: &mut Stage| {
                if let Err(err) = validate_siblings(&stage.tree, &*enter, &*leave) {
                    // The guard is released when `finalize` drops
                    error!(%err, "page vanished before push could start");
                    mask.borrow_mut().remove(&mut stage.tree);
                    return;
                }

                let enter_parts = decompose(&stage.tree, &*enter);
                let leave_parts = decompose(&stage.tree, &*leave);
                let delta = calculate_delta(&stage.tree, leave_root, &enter_parts);
                let animate_toolbar = should_animate_toolbar(&stage.tree, &*enter, &*leave);
                debug!(animate_toolbar, ?delta, "push started");

                let tracks = build_timeline(
                    Direction::Push,
                    &enter_parts,
                    &leave_parts,
                    delta,
                    animate_toolbar,
                    &timing,
                );
                TransitionRunner::run_with_handle(
                    &mut stage.runner,
                    tracks,
                    TrackKey::finalizing(animate_toolbar),
                    completion,
                    finalize,
                );
            }),
        );

        Ok(handle)
    }

    fn pop(
        &self,
        stage: &mut Stage,
        enter: Rc<dyn Page>,
        leave: Rc<dyn Page>,
        on_done: DoneCallback,
    ) -> Result<TransitionHandle> {
        let (enter_root, leave_root) = validate_siblings(&stage.tree, &*enter, &*leave)?;

        let release = self.guard.acquire(enter_root);
        self.mask
            .borrow_mut()
            .insert_before(&mut stage.tree, leave_root);

        let enter_parts = decompose(&stage.tree, &*enter);
        let leave_parts = decompose(&stage.tree, &*leave);
        let delta = calculate_delta(&stage.tree, leave_root, &leave_parts);
        let animate_toolbar = should_animate_toolbar(&stage.tree, &*enter, &*leave);
        debug!(?enter_root, ?leave_root, animate_toolbar, ?delta, "pop started");

        let tracks = build_timeline(
            Direction::Pop,
            &enter_parts,
            &leave_parts,
            delta,
            animate_toolbar,
            &self.timing,
        );
        Ok(TransitionRunner::run(
            &mut stage.runner,
            tracks,
            TrackKey::finalizing(animate_toolbar),
            self.finalizer(release, on_done),
        ))
    }
}

/// Both page roots must be in the tree under the same parent.
fn validate_siblings(
    tree: &ElementTree,
    enter: &dyn Page,
    leave: &dyn Page,
) -> Result<(NodeId, NodeId)> {
    let (enter, leave) = (enter.root(), leave.root());
    for root in [enter, leave] {
        if !tree.contains(root) {
            return Err(TransitionError::MissingNode(root));
        }
    }
    match (tree.parent(enter), tree.parent(leave)) {
        (Some(a), Some(b)) if a == b => Ok((enter, leave)),
        _ => Err(TransitionError::NoSharedParent { enter, leave }),
    }
}
