//! Lumen Style Resolver
//!
//! Turns declarative element styles into flat style maps: style lists are
//! merged, `:hover`/`:focus`/`:active` sub-styles are applied from the owner's
//! interaction state, and the handlers that keep that state current are
//! attached to the elements.
//!
//! # Example
//!
//! ```rust
//! use lumen_style::prelude::*;
//!
//! let owner = Owner::new("Button");
//! let resolver = Resolver::new().with_mouse_up_listener(MouseUpListener::new());
//!
//! let button = div().key("ok").style(StyleValue::list([
//!     style().set("background", "blue").into(),
//!     StyleValue::Bool(false),
//!     style()
//!         .set("color", "white")
//!         .state(StateKind::Active, style().set("background", "navy"))
//!         .into(),
//! ]));
//!
//! let resolved = resolver.resolve(&owner, &button.into()).unwrap();
//! let element = resolved.as_element().unwrap();
//! let flat = element.style_map().unwrap();
//! assert_eq!(flat.get_text("background"), Some("blue"));
//! assert!(!flat.contains_key(":active"));
//! assert!(element.handlers().has_handler(event_types::MOUSE_DOWN));
//! ```

pub mod diagnostics;
pub mod element;
pub mod handlers;
pub mod identity;
pub mod merge;
pub mod prefixer;
pub mod resolver;
pub mod shorthand;
pub mod special;
pub mod style;

#[cfg(test)]
mod tests;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use element::{Children, ComponentType, Element, ElementKind, Node, Props};
pub use prefixer::{NoopPrefixer, Prefixer};
pub use resolver::{ResolveStats, Resolver};
pub use style::{PropertyValue, StyleMap, StyleValue};

/// Commonly used types and builders
pub mod prelude {
    pub use crate::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
    pub use crate::element::{
        composite, div, empty, host, number, span, text, Children, Element, Node,
    };
    pub use crate::prefixer::{NoopPrefixer, Prefixer};
    pub use crate::resolver::{ResolveStats, Resolver};
    pub use crate::style::{style, PropertyValue, StyleMap, StyleValue};
    pub use lumen_core::events::{event_types, Event, EventHandlers};
    pub use lumen_core::{
        ElementIdentity, MouseUpListener, Owner, ResolveConfig, ResolveError, StateKind,
    };
}
