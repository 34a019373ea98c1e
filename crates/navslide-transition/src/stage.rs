//! The element tree, its track runner and page readiness, driven by one clock.

use std::collections::HashSet;

use navslide_scene::animation::{TrackEvent, TrackRunner};
use navslide_scene::tree::{ElementTree, NodeId};
use tracing::trace;

/// Work deferred until a page's content is ready.
pub type ReadyCallback = Box<dyn FnOnce(&mut Stage)>;

/// Owns everything a transition touches.
///
/// Pages are ready unless marked as loading; work queued through
/// [`content_ready`](Self::content_ready) for a loading page runs when it is
/// marked ready.
#[derive(Default)]
pub struct Stage {
    pub tree: ElementTree,
    pub runner: TrackRunner,
    loading: HashSet<NodeId>,
    pending: Vec<(NodeId, ReadyCallback)>,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("tree", &self.tree)
            .field("runner", &self.runner)
            .field("loading", &self.loading)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Stage {
    pub fn new(tree: ElementTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    pub fn is_ready(&self, page: NodeId) -> bool {
        !self.loading.contains(&page)
    }

    /// Hold back `content_ready` work for `page` until [`mark_ready`](Self::mark_ready).
    pub fn mark_loading(&mut self, page: NodeId) {
        self.loading.insert(page);
    }

    /// Run `callback` once `page` is ready, immediately if it already is.
    pub fn content_ready(&mut self, page: NodeId, callback: ReadyCallback) {
        if self.is_ready(page) {
            callback(self);
        } else {
            trace!(?page, "deferred until content is ready");
            self.pending.push((page, callback));
        }
    }

    /// Mark `page` ready and run the work queued for it, in queue order.
    pub fn mark_ready(&mut self, page: NodeId) {
        self.loading.remove(&page);

        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(node, _)| *node == page);
        self.pending = waiting;

        for (_, callback) in ready {
            callback(self);
        }
    }

    /// Number of callbacks waiting on loading pages.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance every running track by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.runner.update(dt, &mut self.tree);
    }

    pub fn drain_events(&mut self) -> Vec<TrackEvent> {
        self.runner.drain_events()
    }

    /// True when nothing is animating and nothing is waiting.
    pub fn is_idle(&self) -> bool {
        self.runner.is_idle() && self.pending.is_empty()
    }
}
