//! Development diagnostics
//!
//! Problems that do not stop resolution (currently shorthand/longhand
//! conflicts) are reported as [`Diagnostic`]s through a [`DiagnosticSink`].
//! The default [`TracingSink`] logs them with `tracing::warn!`;
//! [`CollectingSink`] keeps them for inspection.

use std::cell::RefCell;
use std::fmt;

use lumen_core::StateKind;

use crate::shorthand::ShorthandConflict;

/// A shorthand/longhand conflict found while resolving
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the owner whose render output contained the style
    pub owner: String,
    /// The state whose nested style held the conflict, `None` for the base style
    pub state: Option<StateKind>,
    /// The conflict itself
    pub conflict: ShorthandConflict,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lumen: property {:?} is used together with its longhand {}",
            self.conflict.shorthand,
            quoted_list(&self.conflict.longhands)
        )?;
        if let Some(state) = self.state {
            write!(f, " inside {:?}", state.selector())?;
        }
        write!(
            f,
            " in {}. Do not mix longhand and shorthand properties in the same style object.",
            self.owner
        )
    }
}

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("{item:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Receiver for diagnostics
pub trait DiagnosticSink {
    /// Report one diagnostic
    fn report(&self, diagnostic: Diagnostic);
}

/// Logs diagnostics as warnings
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            owner = %diagnostic.owner,
            shorthand = diagnostic.conflict.shorthand,
            state = ?diagnostic.state,
            "{diagnostic}"
        );
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Remove and return everything reported so far
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Number of diagnostics reported so far
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "diagnostic collected");
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
