//! Style resolution
//!
//! [`Resolver::resolve`] walks the render output of one owner and rewrites
//! every host element's style:
//!
//! ```text
//! style (map or list)
//!     ↓ merge           list entries folded left to right
//!     ↓ diagnostics     shorthand/longhand conflicts (development only)
//!     ↓ extract         base style + :hover/:focus/:active styles
//!     ↓ apply           active states from the owner's snapshot
//!     ↓ prefix          exactly once per styled element
//! flat style map
//! ```
//!
//! Elements with state-conditional styles also get toggle handlers composed
//! onto their existing ones, and `:active` styles subscribe the owner to the
//! global mouse-up listener.
//!
//! The input tree is never modified. Elements with nothing to change are
//! returned as they are; everything else is rebuilt once and tagged as
//! resolved, so resolving an already resolved tree is a no-op.
//!
//! # Example
//!
//! ```rust
//! use lumen_core::events::event_types;
//! use lumen_core::{MouseUpListener, Owner, StateKind};
//! use lumen_style::element::{div, Node};
//! use lumen_style::resolver::Resolver;
//! use lumen_style::style::style;
//!
//! let owner = Owner::new("Link");
//! let resolver = Resolver::new().with_mouse_up_listener(MouseUpListener::new());
//! let render = || -> Node {
//!     div()
//!         .style(
//!             style()
//!                 .set("color", "black")
//!                 .state(StateKind::Hover, style().set("color", "blue")),
//!         )
//!         .into()
//! };
//!
//! let first = resolver.resolve(&owner, &render()).unwrap();
//! let element = first.as_element().unwrap();
//! assert_eq!(element.style_map().unwrap().get_text("color"), Some("black"));
//!
//! element.dispatch(event_types::MOUSE_ENTER);
//! let second = resolver.resolve(&owner, &render()).unwrap();
//! let element = second.as_element().unwrap();
//! assert_eq!(element.style_map().unwrap().get_text("color"), Some("blue"));
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use lumen_core::{
    ElementIdentity, InteractionState, MouseUpListener, Owner, ResolveConfig, Result, StateKind,
    TreePath,
};

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::element::{Children, Element, ElementKind, Node, Props};
use crate::handlers::attach_state_handlers;
use crate::identity::{identity_of, IdentityRegistry};
use crate::merge::flatten;
use crate::prefixer::{NoopPrefixer, Prefixer};
use crate::shorthand::find_conflicts;
use crate::special::{extract, registration};
use crate::style::{StyleMap, StyleValue};

/// Counters for the last resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Elements examined (already resolved elements are not counted)
    pub elements_visited: usize,
    /// Elements rebuilt with new props
    pub elements_constructed: usize,
    /// Calls made to the prefixer
    pub prefixer_calls: usize,
    /// Elements whose style depends on interaction state
    pub interactive_elements: usize,
}

/// Resolves element trees for owners
///
/// One resolver can serve any number of owners; all per-owner state lives in
/// the [`Owner`].
pub struct Resolver {
    config: ResolveConfig,
    prefixer: Rc<dyn Prefixer>,
    diagnostics: Rc<dyn DiagnosticSink>,
    mouse_up: MouseUpListener,
    stats: Cell<ResolveStats>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Create a resolver with development config, no prefixing, diagnostics
    /// logged through `tracing`, and the thread's shared mouse-up listener
    pub fn new() -> Self {
        Self {
            config: ResolveConfig::default(),
            prefixer: Rc::new(NoopPrefixer),
            diagnostics: Rc::new(TracingSink),
            mouse_up: MouseUpListener::shared(),
            stats: Cell::new(ResolveStats::default()),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the prefixer
    pub fn with_prefixer(mut self, prefixer: impl Prefixer + 'static) -> Self {
        self.prefixer = Rc::new(prefixer);
        self
    }

    /// Set where diagnostics go
    pub fn with_diagnostics(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Set the listener `:active` styles subscribe to
    pub fn with_mouse_up_listener(mut self, listener: MouseUpListener) -> Self {
        self.mouse_up = listener;
        self
    }

    /// The configuration
    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// The mouse-up listener
    pub fn mouse_up_listener(&self) -> &MouseUpListener {
        &self.mouse_up
    }

    /// Counters for the last successful pass
    pub fn stats(&self) -> ResolveStats {
        self.stats.get()
    }

    /// Resolve the render output of `owner`
    ///
    /// Fails if two interactive elements share an identity; nothing is
    /// returned or subscribed in that case.
    pub fn resolve(&self, owner: &Owner, node: &Node) -> Result<Node> {
        let mut pass = Pass::new(owner);
        let resolved = match node {
            Node::Element(element) => {
                match self.resolve_element(&mut pass, element, &TreePath::root())? {
                    Some(rebuilt) => Node::Element(rebuilt),
                    None => node.clone(),
                }
            }
            other => other.clone(),
        };

        if pass.needs_mouse_up {
            owner.ensure_mouse_up_subscription(&self.mouse_up);
        }
        tracing::debug!(
            owner = owner.name(),
            visited = pass.stats.elements_visited,
            constructed = pass.stats.elements_constructed,
            interactive = pass.stats.interactive_elements,
            "resolved"
        );
        self.stats.set(pass.stats);
        Ok(resolved)
    }

    /// Returns `None` when the element is passed through unchanged
    fn resolve_element(
        &self,
        pass: &mut Pass<'_>,
        element: &Element,
        path: &TreePath,
    ) -> Result<Option<Element>> {
        if element.is_resolved() {
            tracing::trace!(path = %path, "already resolved");
            Self::claim_resolved(pass, element)?;
            return Ok(None);
        }
        pass.stats.elements_visited += 1;
        tracing::trace!(path = %path, element = element.type_name(), "resolving element");

        let children = self.resolve_children(pass, element.child_nodes(), path)?;

        let style = match (element.kind(), element.style_value()) {
            (ElementKind::Host(_), Some(style)) => style,
            _ => {
                // Composite props and unstyled hosts keep everything but children
                return Ok(children.map(|children| {
                    let mut props = element.props().clone();
                    props.children = children;
                    pass.construct(element, props, None)
                }));
            }
        };

        let mut props = element.props().clone();
        let (flat, claimed) = self.resolve_style(pass, element, path, style, &mut props)?;
        props.style = Some(StyleValue::Map(flat));
        if let Some(children) = children {
            props.children = children;
        }
        Ok(Some(pass.construct(element, props, claimed)))
    }

    /// Claim the identities already bound inside a resolved subtree
    ///
    /// Reused output shares state with fresh elements of the same identity,
    /// so it takes part in duplicate detection.
    fn claim_resolved(pass: &mut Pass<'_>, element: &Element) -> Result<()> {
        if let Some((identity, kind)) = element.claimed() {
            pass.identities.claim(identity, *kind)?;
        }
        for child in element.child_nodes().iter().filter_map(Node::as_element) {
            Self::claim_resolved(pass, child)?;
        }
        Ok(())
    }

    fn resolve_children(
        &self,
        pass: &mut Pass<'_>,
        children: &Children,
        path: &TreePath,
    ) -> Result<Option<Children>> {
        match children {
            Children::None => Ok(None),
            Children::One(node) => Ok(self
                .resolve_child(pass, node, &path.child(0))?
                .map(|node| Children::One(Box::new(node)))),
            Children::Many(nodes) => {
                let mut changed = false;
                let mut resolved = Vec::with_capacity(nodes.len());
                for (index, node) in nodes.iter().enumerate() {
                    match self.resolve_child(pass, node, &path.child(index))? {
                        Some(rebuilt) => {
                            changed = true;
                            resolved.push(rebuilt);
                        }
                        None => resolved.push(node.clone()),
                    }
                }
                Ok(changed.then_some(Children::Many(resolved)))
            }
        }
    }

    fn resolve_child(
        &self,
        pass: &mut Pass<'_>,
        node: &Node,
        path: &TreePath,
    ) -> Result<Option<Node>> {
        match node {
            Node::Element(element) => Ok(self
                .resolve_element(pass, element, path)?
                .map(Node::Element)),
            _ => Ok(None),
        }
    }

    /// Flatten one host style and attach state handlers to `props`
    fn resolve_style(
        &self,
        pass: &mut Pass<'_>,
        element: &Element,
        path: &TreePath,
        style: &StyleValue,
        props: &mut Props,
    ) -> Result<(StyleMap, Option<(ElementIdentity, StateKind)>)> {
        let merged = flatten(style);
        self.check_shorthands(pass.owner, &merged, None);

        let extracted = extract(&merged);
        if self.config.warn_unknown_selectors {
            for selector in &extracted.unknown {
                tracing::debug!(
                    owner = pass.owner.name(),
                    path = %path,
                    selector = selector.as_str(),
                    "ignoring unknown selector"
                );
            }
        }

        let mut claimed = None;
        let flat = if extracted.is_interactive() {
            for conditional in &extracted.conditional {
                self.check_shorthands(pass.owner, &conditional.style, Some(conditional.kind));
            }

            let identity = identity_of(element, path);
            if let Some(first) = extracted.kinds().next() {
                pass.identities.claim(&identity, first)?;
                claimed = Some((identity.clone(), first));
            }
            pass.stats.interactive_elements += 1;

            for kind in extracted.kinds() {
                attach_state_handlers(&mut props.handlers, pass.owner, &identity, kind);
                if registration(kind).global_release {
                    pass.needs_mouse_up = true;
                }
            }

            let state = &pass.state;
            extracted.apply(|kind| state.get(&identity, kind))
        } else {
            extracted.base
        };

        pass.stats.prefixer_calls += 1;
        Ok((self.prefixer.prefix(flat), claimed))
    }

    fn check_shorthands(&self, owner: &Owner, style: &StyleMap, state: Option<StateKind>) {
        if !self.config.diagnostics_enabled() {
            return;
        }
        for conflict in find_conflicts(style) {
            self.diagnostics.report(Diagnostic {
                owner: owner.name().to_string(),
                state,
                conflict,
            });
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("mouse_up", &self.mouse_up)
            .field("stats", &self.stats.get())
            .finish()
    }
}

/// Working state of one resolution pass
struct Pass<'a> {
    owner: &'a Owner,
    state: InteractionState,
    identities: IdentityRegistry,
    stats: ResolveStats,
    needs_mouse_up: bool,
}

impl<'a> Pass<'a> {
    fn new(owner: &'a Owner) -> Self {
        Self {
            owner,
            state: owner.state(),
            identities: IdentityRegistry::new(),
            stats: ResolveStats::default(),
            needs_mouse_up: false,
        }
    }

    fn construct(
        &mut self,
        element: &Element,
        props: Props,
        claimed: Option<(ElementIdentity, StateKind)>,
    ) -> Element {
        self.stats.elements_constructed += 1;
        element.construct(props, claimed)
    }
}
