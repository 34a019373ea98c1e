//! Starting a transition's tracks and finalizing it exactly once.

use navslide_scene::animation::{Step, StepCallback, Track, TrackRunner};
use navslide_scene::tree::ElementTree;
use tracing::{debug, warn};

use crate::handle::TransitionHandle;
use crate::timeline::{TrackKey, TrackSet};

/// Tolerance when comparing track durations.
const DURATION_EPSILON: f64 = 1e-9;

/// Runs a [`TrackSet`] on a [`TrackRunner`].
pub struct TransitionRunner;

impl TransitionRunner {
    /// Start `tracks` together and finalize after the last step of the set.
    ///
    /// `finalize` runs as a terminal step of the `finalizing` track, which is
    /// advanced last on every tick. If some other track outlasts it, the
    /// terminal step moves to the longest track instead.
    pub fn run<F>(
        runner: &mut TrackRunner,
        tracks: TrackSet,
        finalizing: TrackKey,
        finalize: F,
    ) -> TransitionHandle
    where
        F: FnOnce(&mut ElementTree) + 'static,
    {
        let handle = TransitionHandle::new();
        Self::run_with_handle(runner, tracks, finalizing, handle.clone(), finalize);
        handle
    }

    /// Like [`run`](Self::run), completing an existing `handle`.
    pub fn run_with_handle<F>(
        runner: &mut TrackRunner,
        tracks: TrackSet,
        finalizing: TrackKey,
        handle: TransitionHandle,
        finalize: F,
    ) where
        F: FnOnce(&mut ElementTree) + 'static,
    {
        let key = finalizing_track(&tracks, finalizing);
        let terminal: StepCallback = Box::new(move |tree: &mut ElementTree| {
            finalize(tree);
            handle.complete();
            debug!(track = %key.map_or("group", TrackKey::label), "transition finalized");
        });

        let mut ordered: Vec<Track> = Vec::with_capacity(tracks.len());
        let mut last: Option<Track> = None;
        for (k, track) in tracks.into_vec() {
            if Some(k) == key {
                last = Some(track);
            } else {
                ordered.push(track);
            }
        }

        match last {
            Some(mut track) => {
                track.push_step(Step::Call(terminal));
                ordered.push(track);
                runner.run_all(ordered, None);
            }
            // Nothing to animate: finalize when the group ends
            None => {
                runner.run_all(ordered, Some(terminal));
            }
        }
    }
}

/// The track that should carry finalization.
fn finalizing_track(tracks: &TrackSet, designated: TrackKey) -> Option<TrackKey> {
    let longest = tracks.longest();
    let Some(track) = tracks.get(designated) else {
        if let Some((key, _)) = longest {
            warn!(%designated, fallback = %key, "finalizing track missing");
        }
        return longest.map(|(key, _)| key);
    };

    match longest {
        Some((key, duration)) if duration > track.duration() + DURATION_EPSILON => {
            warn!(
                %designated,
                longest = %key,
                "finalizing track is not the longest, moving finalization"
            );
            Some(key)
        }
        _ => Some(designated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navslide_scene::animation::{Style, TrackEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn timed(label: &'static str, node: navslide_scene::tree::NodeId, seconds: f64) -> Track {
        Track::new(label, [node])
            .save_style()
            .queue(Style::new().opacity(0.0), seconds)
            .restore_style()
    }

    #[test]
    fn test_finalizing_track_runs_last() {
        let mut tree = ElementTree::new();
        let node = tree.create("div");
        let mut set = TrackSet::new();
        set.insert(TrackKey::LeaveContent, timed("leave", node, 0.4));
        set.insert(TrackKey::EnterContent, timed("enter", node, 0.4));

        let mut runner = TrackRunner::new();
        let handle = TransitionRunner::run(&mut runner, set, TrackKey::LeaveContent, |_| {});
        runner.drain_events();

        runner.update(0.2, &mut tree);
        assert!(!handle.is_complete());
        runner.update(0.2, &mut tree);
        assert!(handle.is_complete());

        let ended: Vec<_> = runner
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                TrackEvent::Ended { label, .. } => Some(label),
                _ => None,
            })
            .collect();
        assert_eq!(ended, vec!["enter".to_string(), "leave".to_string()]);
    }

    #[test]
    fn test_finalization_moves_to_longest_track() {
        let mut tree = ElementTree::new();
        let node = tree.create("div");
        let calls = Rc::new(RefCell::new(0));
        let mut set = TrackSet::new();
        set.insert(TrackKey::LeaveContent, timed("leave", node, 0.2));
        set.insert(TrackKey::EnterContent, timed("enter", node, 0.5));

        let mut runner = TrackRunner::new();
        let seen = calls.clone();
        let handle = TransitionRunner::run(&mut runner, set, TrackKey::LeaveContent, move |_| {
            *seen.borrow_mut() += 1;
        });

        runner.update(0.3, &mut tree);
        assert!(!handle.is_complete());
        runner.update(0.3, &mut tree);
        assert!(handle.is_complete());
        runner.update(0.3, &mut tree);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_empty_set_still_finalizes() {
        let mut tree = ElementTree::new();
        let mut runner = TrackRunner::new();
        let handle =
            TransitionRunner::run(&mut runner, TrackSet::new(), TrackKey::LeavePage, |_| {});
        runner.update(0.0, &mut tree);
        assert!(handle.is_complete());
        assert!(runner.is_idle());
    }
}
