//! Event handler storage for element props
//!
//! Elements carry at most one handler per DOM-facing event prop (`onMouseEnter`,
//! `onFocus`, ...). The style resolver attaches its own handlers next to the ones
//! the author wrote, so this module also provides handler composition.
//!
//! # Architecture
//!
//! ```text
//! Element props
//!     ↓ .on(MOUSE_ENTER, |e| ...)
//! EventHandlers (one callback per event type)
//!     ↓ resolver composes state toggles
//! EventHandlers (author handler, then toggle)
//!     ↓ host dispatches
//! Callback invoked
//! ```
//!
//! # Example
//!
//! ```rust
//! use lumen_core::events::{event_types, Event, EventHandlers};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let hits = Rc::new(Cell::new(0));
//! let mut handlers = EventHandlers::new();
//!
//! let counter = hits.clone();
//! handlers.on(event_types::MOUSE_ENTER, move |_| counter.set(counter.get() + 1));
//!
//! let counter = hits.clone();
//! handlers.compose(event_types::MOUSE_ENTER, move |_| counter.set(counter.get() + 10));
//!
//! handlers.dispatch(&Event::new(event_types::MOUSE_ENTER));
//! assert_eq!(hits.get(), 11);
//! ```

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Numeric event type identifier
pub type EventType = u32;

/// Well-known event types
pub mod event_types {
    use super::EventType;

    /// Pointer entered the element bounds
    pub const MOUSE_ENTER: EventType = 1;
    /// Pointer left the element bounds
    pub const MOUSE_LEAVE: EventType = 2;
    /// Pointer button pressed over the element
    pub const MOUSE_DOWN: EventType = 3;
    /// Pointer button released over the element
    pub const MOUSE_UP: EventType = 4;
    /// Element received focus
    pub const FOCUS: EventType = 5;
    /// Element lost focus
    pub const BLUR: EventType = 6;
    /// Press followed by release on the same element
    pub const CLICK: EventType = 7;
    /// Key pressed while focused
    pub const KEY_DOWN: EventType = 8;
    /// Key released while focused
    pub const KEY_UP: EventType = 9;
}

/// DOM-facing prop name for an event type
pub fn event_name(event_type: EventType) -> Option<&'static str> {
    use event_types::*;
    Some(match event_type {
        MOUSE_ENTER => "onMouseEnter",
        MOUSE_LEAVE => "onMouseLeave",
        MOUSE_DOWN => "onMouseDown",
        MOUSE_UP => "onMouseUp",
        FOCUS => "onFocus",
        BLUR => "onBlur",
        CLICK => "onClick",
        KEY_DOWN => "onKeyDown",
        KEY_UP => "onKeyUp",
        _ => return None,
    })
}

/// Parse a DOM-facing prop name back into an event type
pub fn event_type_from_name(name: &str) -> Option<EventType> {
    use event_types::*;
    [
        MOUSE_ENTER,
        MOUSE_LEAVE,
        MOUSE_DOWN,
        MOUSE_UP,
        FOCUS,
        BLUR,
        CLICK,
        KEY_DOWN,
        KEY_UP,
    ]
    .into_iter()
    .find(|ty| event_name(*ty) == Some(name))
}

/// An event delivered to a handler
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    /// The type of event that occurred
    pub event_type: EventType,
}

impl Event {
    /// Create a new event
    pub fn new(event_type: EventType) -> Self {
        Self { event_type }
    }
}

/// Callback for handling events
///
/// Uses Rc since the UI is single-threaded.
pub type EventCallback = Rc<dyn Fn(&Event)>;

/// Storage for event handlers on an element
///
/// Unlike a general dispatcher, each event type holds a single callback, which
/// is how element props behave. Registration order is preserved.
#[derive(Default, Clone)]
pub struct EventHandlers {
    handlers: IndexMap<EventType, EventCallback, FxBuildHasher>,
}

impl EventHandlers {
    /// Create a new empty event handlers storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any handlers registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Number of registered event types
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if a handler is registered for a specific event type
    pub fn has_handler(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Register a handler, replacing any existing one for the same event type
    pub fn on<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.handlers.insert(event_type, Rc::new(handler));
    }

    /// Register an already shared callback
    pub fn set(&mut self, event_type: EventType, callback: EventCallback) {
        self.handlers.insert(event_type, callback);
    }

    /// Get the handler for an event type
    pub fn get(&self, event_type: EventType) -> Option<&EventCallback> {
        self.handlers.get(&event_type)
    }

    /// Get all registered event types in registration order
    pub fn event_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.handlers.keys().copied()
    }

    /// Dispatch an event to the handler registered for its type
    ///
    /// Returns `false` if no handler was registered.
    pub fn dispatch(&self, event: &Event) -> bool {
        match self.handlers.get(&event.event_type) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    /// Chain `handler` after whatever is registered for `event_type`
    ///
    /// The existing handler runs first, then the new one.
    pub fn compose<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        let composed: EventCallback = match self.handlers.get(&event_type).cloned() {
            Some(existing) => Rc::new(move |event: &Event| {
                existing(event);
                handler(event);
            }),
            None => Rc::new(handler),
        };
        self.handlers.insert(event_type, composed);
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.event_types()
                    .map(|ty| event_name(ty).map_or_else(|| ty.to_string(), str::to_string)),
            )
            .finish()
    }
}
