//! Component owners
//!
//! An [`Owner`] stands for the component instance whose render output is
//! being resolved. It holds the owner's [`InteractionState`] snapshot across
//! renders, knows whether the component is still mounted, and raises a
//! rebuild request whenever a synthesized handler commits a new snapshot.
//!
//! ```rust
//! use lumen_core::interaction::{ElementIdentity, StateKind};
//! use lumen_core::owner::Owner;
//!
//! let owner = Owner::new("Button");
//! let id = ElementIdentity::key("primary");
//!
//! owner.update_state(|state| state.with(&id, StateKind::Focus, true));
//! assert!(owner.state().get(&id, StateKind::Focus));
//! assert!(owner.take_rebuild_request());
//! assert!(!owner.take_rebuild_request());
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::interaction::{InteractionState, StateKind};
use crate::mouse_up::{MouseUpListener, Subscription};

/// Callback for requesting a re-render of the owner
pub type RebuildCallback = Rc<dyn Fn()>;

struct OwnerInner {
    name: String,
    state: RefCell<InteractionState>,
    mounted: Cell<bool>,
    rebuild_requested: Cell<bool>,
    update_count: Cell<usize>,
    on_rebuild: RefCell<Option<RebuildCallback>>,
    mouse_up: RefCell<Option<Subscription>>,
}

impl Drop for OwnerInner {
    fn drop(&mut self) {
        if let Some(subscription) = self.mouse_up.get_mut().take() {
            subscription.remove();
        }
    }
}

/// Handle to a component instance that owns interaction state
///
/// Cloning shares the same owner.
#[derive(Clone)]
pub struct Owner {
    inner: Rc<OwnerInner>,
}

impl Owner {
    /// Create a mounted owner with empty interaction state
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(OwnerInner {
                name: name.into(),
                state: RefCell::new(InteractionState::new()),
                mounted: Cell::new(true),
                rebuild_requested: Cell::new(false),
                update_count: Cell::new(0),
                on_rebuild: RefCell::new(None),
                mouse_up: RefCell::new(None),
            }),
        }
    }

    /// Set the callback invoked after every committed state update
    pub fn with_rebuild_callback<F>(self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        *self.inner.on_rebuild.borrow_mut() = Some(Rc::new(callback));
        self
    }

    /// Display name, used in diagnostics
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The current interaction state snapshot
    pub fn state(&self) -> InteractionState {
        self.inner.state.borrow().clone()
    }

    /// Replace the interaction state snapshot and request a rebuild
    ///
    /// Returns `false` (and does nothing) once the owner is unmounted.
    pub fn set_state(&self, next: InteractionState) -> bool {
        if !self.is_mounted() {
            tracing::trace!(owner = %self.inner.name, "state update after unmount ignored");
            return false;
        }
        *self.inner.state.borrow_mut() = next;
        self.inner.update_count.set(self.inner.update_count.get() + 1);
        self.request_rebuild();
        true
    }

    /// Derive the next snapshot from the current one and commit it
    pub fn update_state<F>(&self, f: F) -> bool
    where
        F: FnOnce(&InteractionState) -> InteractionState,
    {
        if !self.is_mounted() {
            return false;
        }
        let next = f(&self.state());
        self.set_state(next)
    }

    /// Turn off every `:active` flag of this owner
    ///
    /// Does nothing when no element is active, so a redundant release does
    /// not trigger a rebuild.
    pub fn release_active(&self) -> bool {
        match self.state().clear_kind(StateKind::Active) {
            Some(next) => self.set_state(next),
            None => false,
        }
    }

    /// Whether the owner is still mounted
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Mark the owner mounted again after an [`unmount`](Self::unmount)
    pub fn mount(&self) {
        self.inner.mounted.set(true);
    }

    /// Mark the owner unmounted and drop its mouse-up subscription
    pub fn unmount(&self) {
        self.inner.mounted.set(false);
        if let Some(subscription) = self.inner.mouse_up.borrow_mut().take() {
            subscription.remove();
        }
    }

    /// Consume the pending rebuild request, if any
    pub fn take_rebuild_request(&self) -> bool {
        self.inner.rebuild_requested.replace(false)
    }

    /// Number of committed state updates so far
    pub fn update_count(&self) -> usize {
        self.inner.update_count.get()
    }

    /// Subscribe to global pointer releases, once per mount
    ///
    /// Returns `true` if a new subscription was made.
    pub fn ensure_mouse_up_subscription(&self, listener: &MouseUpListener) -> bool {
        if !self.is_mounted() || self.inner.mouse_up.borrow().is_some() {
            return false;
        }
        let weak = self.downgrade();
        let subscription = listener.subscribe(move || {
            if let Some(owner) = weak.upgrade() {
                owner.release_active();
            }
        });
        *self.inner.mouse_up.borrow_mut() = Some(subscription);
        tracing::debug!(owner = %self.inner.name, "subscribed to global mouse-up");
        true
    }

    /// Whether this owner currently holds a mouse-up subscription
    pub fn has_mouse_up_subscription(&self) -> bool {
        self.inner.mouse_up.borrow().is_some()
    }

    /// Non-owning handle, for callbacks that must not keep the owner alive
    pub fn downgrade(&self) -> WeakOwner {
        WeakOwner {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles refer to the same owner
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn request_rebuild(&self) {
        self.inner.rebuild_requested.set(true);
        let callback = self.inner.on_rebuild.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("name", &self.inner.name)
            .field("mounted", &self.is_mounted())
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

/// Weak handle to an [`Owner`]
#[derive(Clone)]
pub struct WeakOwner {
    inner: Weak<OwnerInner>,
}

impl WeakOwner {
    /// Upgrade to a strong handle if the owner is still alive
    pub fn upgrade(&self) -> Option<Owner> {
        self.inner.upgrade().map(|inner| Owner { inner })
    }
}

impl fmt::Debug for WeakOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakOwner")
    }
}
