//! Track lifecycle events.
//!
//! The [`TrackRunner`](super::runner::TrackRunner) queues an event whenever a
//! track starts or ends and when a whole group completes. Events are polled
//! after each update:
//!
//! ```ignore
//! runner.update(1.0 / 60.0, &mut tree);
//! for event in runner.drain_events() {
//!     if let TrackEvent::GroupEnded { group } = event {
//!         println!("group {:?} finished", group);
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::AnimationId;

/// Event emitted when a track or group changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackEvent {
    /// A track was scheduled as part of a group.
    Started {
        group: AnimationId,
        track: AnimationId,
        label: String,
    },
    /// A track executed its last step.
    Ended {
        group: AnimationId,
        track: AnimationId,
        label: String,
    },
    /// Every track of the group has ended and the group callback has run.
    GroupEnded { group: AnimationId },
}

impl TrackEvent {
    pub fn group(&self) -> AnimationId {
        match self {
            Self::Started { group, .. }
            | Self::Ended { group, .. }
            | Self::GroupEnded { group } => *group,
        }
    }

    /// Label of the track, if this is a per-track event.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Started { label, .. } | Self::Ended { label, .. } => Some(label),
            Self::GroupEnded { .. } => None,
        }
    }
}

/// FIFO queue of track events.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<TrackEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TrackEvent) {
        self.events.push_back(event);
    }

    /// Remove and return all pending events in emission order.
    pub fn drain(&mut self) -> Vec<TrackEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
