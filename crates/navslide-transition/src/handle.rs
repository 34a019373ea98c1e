use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug, Default)]
struct HandleState {
    done: bool,
    waker: Option<Waker>,
}

/// Completion signal of one transition.
///
/// Clones observe the same transition. Awaiting the handle resolves once the
/// transition has finalized; polling from a plain loop works through
/// [`is_complete`](Self::is_complete).
#[derive(Debug, Clone, Default)]
pub struct TransitionHandle {
    state: Rc<RefCell<HandleState>>,
}

impl TransitionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.state.borrow().done
    }

    pub(crate) fn complete(&self) {
        let waker = {
            let mut state = self.state.borrow_mut();
            state.done = true;
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Future for TransitionHandle {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.done {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_is_shared_by_clones() {
        let handle = TransitionHandle::new();
        let observer = handle.clone();
        assert!(!observer.is_complete());
        handle.complete();
        assert!(observer.is_complete());
    }

    #[test]
    fn test_future_resolves_after_completion() {
        let mut handle = TransitionHandle::new();
        let mut cx = Context::from_waker(Waker::noop());

        assert_eq!(Pin::new(&mut handle).poll(&mut cx), Poll::Pending);
        handle.complete();
        assert_eq!(Pin::new(&mut handle).poll(&mut cx), Poll::Ready(()));
    }
}
