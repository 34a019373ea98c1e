//! Runner for groups of concurrently started tracks.
//!
//! The `TrackRunner` is the central coordinator for tracks in the scene. It:
//! - Starts a group of tracks together so they share a time origin
//! - Advances every active track each frame, in the order they were started
//! - Runs the group's completion callback once its last track ends
//! - Queues lifecycle events for the host to poll
//!
//! # Usage
//!
//! ```
//! use navslide_scene::animation::{Style, Track, TrackRunner};
//! use navslide_scene::tree::ElementTree;
//!
//! let mut tree = ElementTree::new();
//! let node = tree.create("div");
//! let mut runner = TrackRunner::new();
//!
//! runner.run_all(vec![Track::new("fade", [node]).queue(Style::new().opacity(0.0), 0.3)], None);
//! while !runner.is_idle() {
//!     runner.update(1.0 / 60.0, &mut tree);
//! }
//! assert_eq!(tree.style(node).and_then(Style::opacity_value), Some(0.0));
//! ```

use tracing::{debug, trace};

use super::events::{EventQueue, TrackEvent};
use super::track::{ActiveTrack, StepCallback, Track};
use super::types::AnimationId;
use crate::tree::ElementTree;

/// Tracks started together, plus what to do once all of them end.
struct TrackGroup {
    id: AnimationId,
    tracks: Vec<ActiveTrack>,
    on_finished: Option<StepCallback>,
}

impl std::fmt::Debug for TrackGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackGroup")
            .field("id", &self.id)
            .field("tracks", &self.tracks)
            .field("on_finished", &self.on_finished.is_some())
            .finish()
    }
}

/// Drives every active track group.
#[derive(Debug, Default)]
pub struct TrackRunner {
    groups: Vec<TrackGroup>,
    event_queue: EventQueue,
}

impl TrackRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tracks` concurrently.
    ///
    /// On every update the tracks advance in the order given, so a step of a
    /// later track observes the effects of earlier tracks in the same frame.
    /// `on_finished` runs once, after the last track has executed its last step.
    pub fn run_all(&mut self, tracks: Vec<Track>, on_finished: Option<StepCallback>) -> AnimationId {
        let id = AnimationId::new();
        let tracks: Vec<ActiveTrack> = tracks.into_iter().map(ActiveTrack::new).collect();

        for track in &tracks {
            self.event_queue.push(TrackEvent::Started {
                group: id,
                track: track.id,
                label: track.label.clone(),
            });
        }
        debug!(group = id.0, tracks = tracks.len(), "track group started");

        self.groups.push(TrackGroup {
            id,
            tracks,
            on_finished,
        });
        id
    }

    /// Advance all groups by `dt` seconds.
    ///
    /// Groups whose tracks have all ended are removed after their callback runs.
    pub fn update(&mut self, dt: f64, tree: &mut ElementTree) {
        if self.groups.is_empty() {
            return;
        }

        let mut finished = Vec::new();
        for (index, group) in self.groups.iter_mut().enumerate() {
            for track in group.tracks.iter_mut().filter(|t| t.is_active()) {
                if !track.advance(dt, tree) {
                    trace!(group = group.id.0, track = %track.label, "track ended");
                    self.event_queue.push(TrackEvent::Ended {
                        group: group.id,
                        track: track.id,
                        label: track.label.clone(),
                    });
                }
            }
            if group.tracks.iter().all(ActiveTrack::is_finished) {
                finished.push(index);
            }
        }

        // Remove back to front so earlier indices stay valid
        for index in finished.into_iter().rev() {
            let mut group = self.groups.remove(index);
            if let Some(callback) = group.on_finished.take() {
                callback(tree);
            }
            debug!(group = group.id.0, "track group ended");
            self.event_queue
                .push(TrackEvent::GroupEnded { group: group.id });
        }
    }

    /// Remove and return every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<TrackEvent> {
        self.event_queue.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    /// True when no group is running.
    pub fn is_idle(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_running(&self, group: AnimationId) -> bool {
        self.groups.iter().any(|g| g.id == group)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of tracks that still have steps to run.
    pub fn active_track_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.tracks.iter())
            .filter(|t| t.is_active())
            .count()
    }
}
