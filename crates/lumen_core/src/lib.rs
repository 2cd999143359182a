//! Lumen Core Runtime
//!
//! Foundational primitives shared by the lumen style resolver:
//!
//! - **Interaction State**: immutable per-owner snapshots of hover/focus/active flags
//! - **Owners**: handles for component instances that persist state across renders
//! - **Mouse-up Listener**: process-wide subscription list for global pointer releases
//! - **Event Handlers**: per-element handler storage with composition
//! - **Configuration**: development/production switches
//!
//! # Example
//!
//! ```rust
//! use lumen_core::{ElementIdentity, MouseUpListener, Owner, StateKind};
//!
//! let listener = MouseUpListener::new();
//! let owner = Owner::new("Menu");
//! owner.ensure_mouse_up_subscription(&listener);
//!
//! let item = ElementIdentity::key("item-1");
//! owner.update_state(|s| s.with(&item, StateKind::Active, true));
//! assert!(owner.state().get(&item, StateKind::Active));
//!
//! // Releasing the pointer anywhere ends the active state
//! listener.notify();
//! assert!(!owner.state().get(&item, StateKind::Active));
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod interaction;
pub mod mouse_up;
pub mod owner;

pub use config::ResolveConfig;
pub use error::{ConfigError, ResolveError, Result};
pub use events::{event_types, Event, EventCallback, EventHandlers, EventType};
pub use interaction::{ElementIdentity, InteractionState, StateKind, TreePath};
pub use mouse_up::{MouseUpListener, Subscription};
pub use owner::{Owner, WeakOwner};
