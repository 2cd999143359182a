//! State-conditional styles
//!
//! A merged style map may contain `:hover`, `:focus` and `:active` keys whose
//! values are nested styles. [`extract`] separates them from the base style
//! (keeping declaration order), and [`ExtractedStyle::apply`] produces the
//! flat style for a given set of active states.
//!
//! Each state is described by a [`StateRegistration`]: which events switch it
//! on and off, and whether a global pointer release ends it.
//!
//! ```rust
//! use lumen_core::StateKind;
//! use lumen_style::special::extract;
//! use lumen_style::style::style;
//!
//! let merged = style()
//!     .set("color", "black")
//!     .state(StateKind::Hover, style().set("color", "blue"));
//!
//! let extracted = extract(&merged);
//! let hovered = extracted.apply(|kind| kind == StateKind::Hover);
//! assert_eq!(hovered.get_text("color"), Some("blue"));
//! assert!(!hovered.contains_key(":hover"));
//! ```

use lumen_core::events::{event_types, EventType};
use lumen_core::StateKind;
use smallvec::SmallVec;

use crate::merge::flatten;
use crate::style::{PropertyValue, StyleMap};

/// How an interaction state is driven by events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateRegistration {
    /// The state
    pub kind: StateKind,
    /// Event that turns the state on
    pub activate: EventType,
    /// Event on the element that turns the state off
    pub deactivate: Option<EventType>,
    /// Whether a global pointer release turns the state off
    pub global_release: bool,
}

/// Registered states, in registration order
pub const REGISTRATIONS: [StateRegistration; 3] = [
    StateRegistration {
        kind: StateKind::Hover,
        activate: event_types::MOUSE_ENTER,
        deactivate: Some(event_types::MOUSE_LEAVE),
        global_release: false,
    },
    StateRegistration {
        kind: StateKind::Focus,
        activate: event_types::FOCUS,
        deactivate: Some(event_types::BLUR),
        global_release: false,
    },
    StateRegistration {
        kind: StateKind::Active,
        activate: event_types::MOUSE_DOWN,
        deactivate: None,
        global_release: true,
    },
];

/// The registration for a state
pub fn registration(kind: StateKind) -> &'static StateRegistration {
    match kind {
        StateKind::Hover => &REGISTRATIONS[0],
        StateKind::Focus => &REGISTRATIONS[1],
        StateKind::Active => &REGISTRATIONS[2],
    }
}

/// A nested style applied while a state is on
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalStyle {
    /// The state
    pub kind: StateKind,
    /// The nested style, already flattened
    pub style: StyleMap,
}

/// A merged style split into base and conditional parts
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedStyle {
    /// Properties that always apply
    pub base: StyleMap,
    /// Conditional styles in declaration order
    pub conditional: SmallVec<[ConditionalStyle; 3]>,
    /// `:`-prefixed keys that name no known state, dropped from the output
    pub unknown: Vec<String>,
}

impl ExtractedStyle {
    /// Whether the style depends on interaction state
    pub fn is_interactive(&self) -> bool {
        !self.conditional.is_empty()
    }

    /// The states the style depends on, in declaration order
    pub fn kinds(&self) -> impl Iterator<Item = StateKind> + '_ {
        self.conditional.iter().map(|c| c.kind)
    }

    /// The flat style for the states reported on by `is_on`
    ///
    /// Active conditional styles are applied over the base in declaration
    /// order, so the last declared active state wins on conflicts.
    pub fn apply<F>(&self, is_on: F) -> StyleMap
    where
        F: Fn(StateKind) -> bool,
    {
        let mut result = self.base.clone();
        for conditional in &self.conditional {
            if is_on(conditional.kind) {
                result.extend_from(&conditional.style);
            }
        }
        result
    }
}

/// Split a merged style into base and conditional parts
pub fn extract(merged: &StyleMap) -> ExtractedStyle {
    let mut extracted = ExtractedStyle::default();

    for (key, value) in merged.iter() {
        if !key.starts_with(':') {
            extracted.base.insert(key, value.clone());
            continue;
        }
        let Some(kind) = StateKind::from_selector(key) else {
            extracted.unknown.push(key.to_string());
            continue;
        };

        let mut style = match value {
            PropertyValue::Nested(nested) => flatten(nested),
            _ => StyleMap::new(),
        };
        // Selectors do not nest
        let nested_selectors: Vec<String> = style
            .keys()
            .filter(|k| k.starts_with(':'))
            .map(str::to_string)
            .collect();
        for selector in nested_selectors {
            style.remove(&selector);
            extracted.unknown.push(format!("{key}{selector}"));
        }

        extracted.conditional.push(ConditionalStyle { kind, style });
    }

    extracted
}
