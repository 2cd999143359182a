//! Element identity
//!
//! Interaction state is stored per element identity, so every element with a
//! state-conditional style must be distinguishable from the other interactive
//! elements of the same owner.
//!
//! Identity is taken from, in order of precedence:
//!
//! 1. the element's explicit `key`,
//! 2. its `ref` name,
//! 3. its position: the path of its parent. Keyless siblings share this slot,
//!    so two keyless interactive siblings cannot be told apart.
//!
//! [`IdentityRegistry`] tracks the identities claimed during one resolution
//! pass and rejects duplicates.

use lumen_core::{ElementIdentity, ResolveError, Result, StateKind, TreePath};
use rustc_hash::FxHashSet;

use crate::element::Element;

/// Identity of `element` found at `path`
pub fn identity_of(element: &Element, path: &TreePath) -> ElementIdentity {
    let props = element.props();
    if let Some(key) = &props.key {
        ElementIdentity::key(key.clone())
    } else if let Some(name) = &props.ref_name {
        ElementIdentity::ref_name(name.clone())
    } else {
        ElementIdentity::anonymous(path)
    }
}

/// Identities claimed by interactive elements in one pass
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    claimed: FxHashSet<ElementIdentity>,
}

impl IdentityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `identity` for an element whose style depends on `state`
    ///
    /// Fails if another element already claimed the same identity.
    pub fn claim(&mut self, identity: &ElementIdentity, state: StateKind) -> Result<()> {
        if self.claimed.insert(identity.clone()) {
            Ok(())
        } else {
            Err(ResolveError::DuplicateIdentity {
                identity: identity.clone(),
                state,
            })
        }
    }

    /// Number of claimed identities
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Whether nothing was claimed
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
