//! Blocking pages while they transition.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use navslide_scene::tree::NodeId;
use tracing::{trace, warn};

/// Shared registry of pages that are mid-transition.
///
/// Clones share the same registry so a navigator and its animator agree on
/// which pages are blocked.
#[derive(Debug, Clone, Default)]
pub struct TransitionGuard {
    blocked: Rc<RefCell<HashMap<NodeId, usize>>>,
}

impl TransitionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block `page` until the returned handle is released or dropped.
    ///
    /// Overlapping transitions are not rejected; the page stays blocked until
    /// every handle taken on it is released.
    pub fn acquire(&self, page: NodeId) -> GuardRelease {
        let mut blocked = self.blocked.borrow_mut();
        let count = blocked.entry(page).or_insert(0);
        if *count > 0 {
            warn!(?page, "page is already transitioning");
        }
        *count += 1;
        trace!(?page, holders = *count, "guard acquired");

        GuardRelease {
            page,
            blocked: Rc::clone(&self.blocked),
            released: false,
        }
    }

    pub fn is_blocked(&self, page: NodeId) -> bool {
        self.blocked.borrow().contains_key(&page)
    }

    /// Number of distinct pages currently blocked.
    pub fn blocked_count(&self) -> usize {
        self.blocked.borrow().len()
    }
}

/// Releases its page exactly once, explicitly or on drop.
#[derive(Debug)]
#[must_use = "dropping the handle releases the page immediately"]
pub struct GuardRelease {
    page: NodeId,
    blocked: Rc<RefCell<HashMap<NodeId, usize>>>,
    released: bool,
}

impl GuardRelease {
    pub fn page(&self) -> NodeId {
        self.page
    }

    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let mut blocked = self.blocked.borrow_mut();
        if let Some(count) = blocked.get_mut(&self.page) {
            *count -= 1;
            if *count == 0 {
                blocked.remove(&self.page);
            }
        }
        trace!(page = ?self.page, "guard released");
    }
}

impl Drop for GuardRelease {
    fn drop(&mut self) {
        self.release_once();
    }
}
