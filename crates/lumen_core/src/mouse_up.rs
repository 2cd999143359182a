//! Global pointer-release listener
//!
//! `:active` styles end when the pointer is released anywhere, not only over
//! the element that was pressed. The host feeds global pointer-up events into
//! a [`MouseUpListener`] via [`MouseUpListener::notify`], and owners subscribe
//! to it once per mount.
//!
//! The listener is an ordinary value: construct one per test, or use
//! [`MouseUpListener::shared`] for the process-wide instance of the UI thread.
//!
//! ```rust
//! use lumen_core::mouse_up::MouseUpListener;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let listener = MouseUpListener::new();
//! let released = Rc::new(Cell::new(0));
//!
//! let counter = released.clone();
//! let subscription = listener.subscribe(move || counter.set(counter.get() + 1));
//!
//! listener.notify();
//! subscription.remove();
//! listener.notify();
//! assert_eq!(released.get(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback invoked on a global pointer release
pub type MouseUpCallback = Rc<dyn Fn()>;

#[derive(Default)]
struct ListenerInner {
    next_id: u64,
    subscribers: Vec<(u64, MouseUpCallback)>,
}

/// Subscription list for global pointer-release events
#[derive(Clone, Default)]
pub struct MouseUpListener {
    inner: Rc<RefCell<ListenerInner>>,
}

thread_local! {
    static SHARED_LISTENER: MouseUpListener = MouseUpListener::new();
}

impl MouseUpListener {
    /// Create an empty listener
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide listener of the current (UI) thread
    pub fn shared() -> Self {
        SHARED_LISTENER.with(Clone::clone)
    }

    /// Register a callback, returning a handle that can remove it
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Rc::new(callback)));
        tracing::debug!(subscription = id, "mouse-up listener subscribed");

        Subscription {
            id,
            listener: Rc::downgrade(&self.inner),
        }
    }

    /// Invoke every current subscriber in registration order
    ///
    /// Subscribers added or removed while notifying take effect on the next
    /// notification.
    pub fn notify(&self) {
        let callbacks: Vec<MouseUpCallback> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        tracing::trace!(subscribers = callbacks.len(), "global mouse-up");
        for callback in callbacks {
            callback();
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl fmt::Debug for MouseUpListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseUpListener")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle for removing a mouse-up subscription
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listener: Weak<RefCell<ListenerInner>>,
}

impl Subscription {
    /// Detach the callback from the listener
    ///
    /// Removing after the listener was dropped is a no-op.
    pub fn remove(self) {
        if let Some(inner) = self.listener.upgrade() {
            inner
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
            tracing::debug!(subscription = self.id, "mouse-up listener unsubscribed");
        }
    }
}
