//! State toggle handlers
//!
//! For every state an element's style depends on, the resolver attaches
//! handlers that flip the element's flag in its owner's interaction state:
//!
//! | state    | on            | off                  |
//! |----------|---------------|----------------------|
//! | `hover`  | mouse enter   | mouse leave          |
//! | `focus`  | focus         | blur                 |
//! | `active` | mouse down    | global mouse release |
//!
//! A handler the author already set for the same event keeps running, before
//! the toggle. Toggles commit a fresh snapshot each time and do nothing once
//! the owner is unmounted or dropped.

use lumen_core::events::{EventHandlers, EventType};
use lumen_core::{ElementIdentity, Owner, StateKind};

use crate::special::registration;

/// Attach the toggles for `kind` to `handlers`
pub fn attach_state_handlers(
    handlers: &mut EventHandlers,
    owner: &Owner,
    identity: &ElementIdentity,
    kind: StateKind,
) {
    let registration = registration(kind);
    attach_toggle(handlers, owner, identity, kind, registration.activate, true);
    if let Some(deactivate) = registration.deactivate {
        attach_toggle(handlers, owner, identity, kind, deactivate, false);
    }
}

fn attach_toggle(
    handlers: &mut EventHandlers,
    owner: &Owner,
    identity: &ElementIdentity,
    kind: StateKind,
    event_type: EventType,
    value: bool,
) {
    let owner = owner.downgrade();
    let identity = identity.clone();
    handlers.compose(event_type, move |_event| {
        let Some(owner) = owner.upgrade() else {
            return;
        };
        tracing::trace!(
            owner = owner.name(),
            identity = %identity,
            state = %kind,
            value,
            "interaction state toggle"
        );
        owner.update_state(|state| state.with(&identity, kind, value));
    });
}
