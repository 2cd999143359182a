//! Interaction state snapshots
//!
//! An [`InteractionState`] records which interaction states (hover, focus,
//! active) are currently on for which elements of one owner. Snapshots are
//! immutable: every update builds a new snapshot, so "did anything change"
//! is an identity comparison ([`InteractionState::ptr_eq`]).
//!
//! ```rust
//! use lumen_core::interaction::{ElementIdentity, InteractionState, StateKind};
//!
//! let button = ElementIdentity::key("save");
//! let before = InteractionState::new();
//! let after = before.with(&button, StateKind::Hover, true);
//!
//! assert!(!before.get(&button, StateKind::Hover));
//! assert!(after.get(&button, StateKind::Hover));
//! assert!(!before.ptr_eq(&after));
//! ```

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Interaction states a style can be conditioned on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKind {
    /// Pointer is over the element
    Hover,
    /// Element has keyboard focus
    Focus,
    /// Pointer is pressed on the element
    Active,
}

impl StateKind {
    /// All state kinds, in registration order
    pub const ALL: [StateKind; 3] = [StateKind::Hover, StateKind::Focus, StateKind::Active];

    /// The style key selecting this state (`:hover`, ...)
    pub fn selector(self) -> &'static str {
        match self {
            StateKind::Hover => ":hover",
            StateKind::Focus => ":focus",
            StateKind::Active => ":active",
        }
    }

    /// Parse a style key into a state kind
    pub fn from_selector(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.selector() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector()[1..])
    }
}

/// Position of an element in a rendered tree, as child indices from the root
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TreePath(SmallVec<[usize; 8]>);

impl TreePath {
    /// Path of the root element
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th child of this element
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    /// Number of segments (0 for the root)
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Child indices from the root
    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// The slot shared by every unkeyed sibling at this position
    ///
    /// Siblings without a key or ref cannot be told apart across renders, so
    /// they all map to their parent's path plus a wildcard.
    pub fn anonymous_slot(&self) -> String {
        let Some((_, parent)) = self.0.split_last() else {
            return "root".to_string();
        };
        let mut slot = String::from("root");
        for index in parent {
            slot.push('.');
            slot.push_str(&index.to_string());
        }
        slot.push_str(".*");
        slot
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for index in &self.0 {
            write!(f, ".{index}")?;
        }
        Ok(())
    }
}

/// Stable identity of an element within its owner
///
/// Derived from an explicit key, else a ref name, else the element's position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementIdentity {
    /// Explicit `key` prop
    Key(String),
    /// Explicit `ref` prop
    Ref(String),
    /// No key or ref; shared by all unkeyed siblings
    Anonymous(String),
}

impl ElementIdentity {
    /// Identity from a key
    pub fn key(key: impl Into<String>) -> Self {
        ElementIdentity::Key(key.into())
    }

    /// Identity from a ref name
    pub fn ref_name(name: impl Into<String>) -> Self {
        ElementIdentity::Ref(name.into())
    }

    /// Positional identity for an element without key or ref
    pub fn anonymous(path: &TreePath) -> Self {
        ElementIdentity::Anonymous(path.anonymous_slot())
    }

    /// Whether this identity came from an explicit key or ref
    pub fn is_explicit(&self) -> bool {
        !matches!(self, ElementIdentity::Anonymous(_))
    }
}

impl fmt::Display for ElementIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementIdentity::Key(key) => write!(f, "key {key:?}"),
            ElementIdentity::Ref(name) => write!(f, "ref {name:?}"),
            ElementIdentity::Anonymous(slot) => write!(f, "unkeyed element at {slot}"),
        }
    }
}

/// Per-element flags, indexed by [`StateKind`]
type Flags = [bool; 3];

type Entries = FxHashMap<ElementIdentity, Flags>;

/// Immutable snapshot of an owner's interaction state
///
/// Cloning is cheap and shares the snapshot. Entries are created lazily on
/// first update and never removed; entries for elements that left the tree
/// are harmless.
#[derive(Clone, Default)]
pub struct InteractionState {
    entries: Rc<Entries>,
}

impl InteractionState {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `kind` is currently on for `identity` (absent means off)
    pub fn get(&self, identity: &ElementIdentity, kind: StateKind) -> bool {
        self.entries
            .get(identity)
            .is_some_and(|flags| flags[kind.index()])
    }

    /// Build a new snapshot with one flag set
    ///
    /// Always allocates, even when the flag already holds `value`.
    pub fn with(&self, identity: &ElementIdentity, kind: StateKind, value: bool) -> Self {
        let mut entries = (*self.entries).clone();
        entries.entry(identity.clone()).or_default()[kind.index()] = value;
        Self {
            entries: Rc::new(entries),
        }
    }

    /// Build a new snapshot with every `kind` flag turned off
    ///
    /// Returns `None` when no `kind` flag was on, so callers can skip the update.
    pub fn clear_kind(&self, kind: StateKind) -> Option<Self> {
        let index = kind.index();
        if !self.entries.values().any(|flags| flags[index]) {
            return None;
        }
        let mut entries = (*self.entries).clone();
        for flags in entries.values_mut() {
            flags[index] = false;
        }
        Some(Self {
            entries: Rc::new(entries),
        })
    }

    /// Identities that currently have `kind` on
    pub fn active_identities(&self, kind: StateKind) -> Vec<ElementIdentity> {
        self.entries
            .iter()
            .filter(|(_, flags)| flags[kind.index()])
            .map(|(identity, _)| identity.clone())
            .collect()
    }

    /// Number of elements with recorded state (on or off)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether two handles point at the same snapshot
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut on: Vec<String> = self
            .entries
            .iter()
            .flat_map(|(identity, flags)| {
                StateKind::ALL
                    .into_iter()
                    .filter(move |kind| flags[kind.index()])
                    .map(move |kind| format!("{identity}:{kind}"))
            })
            .collect();
        on.sort();
        f.debug_struct("InteractionState").field("on", &on).finish()
    }
}
