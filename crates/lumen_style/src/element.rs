//! Element trees
//!
//! The resolver consumes and produces trees of [`Node`]s. Elements are built
//! with a fluent API:
//!
//! ```rust
//! use lumen_core::StateKind;
//! use lumen_style::element::{div, text};
//! use lumen_style::style::style;
//!
//! let tree = div()
//!     .key("card")
//!     .style(style().set("padding", 8))
//!     .child(text("Title"))
//!     .child(
//!         div()
//!             .key("action")
//!             .style(style().state(StateKind::Hover, style().set("color", "red"))),
//!     );
//! assert_eq!(tree.child_nodes().len(), 2);
//! ```
//!
//! Elements are values: the resolver never mutates its input and returns new
//! elements only where something changed.

use std::fmt;

use indexmap::IndexMap;
use lumen_core::events::{event_types, Event, EventCallback, EventHandlers, EventType};
use lumen_core::{ElementIdentity, StateKind};

use crate::style::{StyleMap, StyleValue};

/// A node in an element tree
#[derive(Clone, Debug, Default)]
pub enum Node {
    /// An element
    Element(Element),
    /// A text leaf
    Text(String),
    /// A numeric leaf
    Number(f64),
    /// Nothing (a null or invalid child), kept in place
    #[default]
    Empty,
}

impl Node {
    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Whether this node is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Depth-first search for the first element matching `predicate`
    pub fn find<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool + Copy,
    {
        let element = self.as_element()?;
        if predicate(element) {
            return Some(element);
        }
        element
            .child_nodes()
            .iter()
            .find_map(|child| child.find(predicate))
    }

    /// Find the element with the given key
    pub fn find_by_key(&self, key: &str) -> Option<&Element> {
        self.find(|element| element.props.key.as_deref() == Some(key))
    }

    /// Find the element with the given ref name
    pub fn find_by_ref(&self, name: &str) -> Option<&Element> {
        self.find(|element| element.props.ref_name.as_deref() == Some(name))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Number(f64::from(value))
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Empty, Into::into)
    }
}

/// Children of an element
///
/// A single child stays a single child through resolution.
#[derive(Clone, Debug, Default)]
pub enum Children {
    /// No children
    #[default]
    None,
    /// Exactly one child
    One(Box<Node>),
    /// A sequence of children (possibly containing empty nodes)
    Many(Vec<Node>),
}

impl Children {
    /// Number of child nodes, counting empty ones
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether there are no child nodes
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The child nodes as a slice
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Children::None => &[],
            Children::One(node) => std::slice::from_ref(&**node),
            Children::Many(nodes) => nodes.as_slice(),
        }
    }

    /// Iterate child nodes in order
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.as_slice().iter()
    }

    /// Child at `index`
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.as_slice().get(index)
    }

    /// The child, if this is the single-child shape
    pub fn only(&self) -> Option<&Node> {
        match self {
            Children::One(node) => Some(node),
            _ => None,
        }
    }
}

/// What an element renders as
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A host element (`div`, `button`, ...); its style is resolved
    Host(String),
    /// Another component; its own props are passed through untouched
    Composite(ComponentType),
}

/// Identifies a composite component
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentType {
    name: String,
}

impl ComponentType {
    /// Create a component type with a display name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Element properties
#[derive(Clone, Debug, Default)]
pub struct Props {
    /// Style as written, or the flat style after resolution
    pub style: Option<StyleValue>,
    /// Child nodes
    pub children: Children,
    /// Explicit key
    pub key: Option<String>,
    /// Ref name
    pub ref_name: Option<String>,
    /// Event handlers
    pub handlers: EventHandlers,
    /// Other attributes, passed through untouched
    pub attributes: IndexMap<String, String>,
}

/// An element: kind plus props
#[derive(Clone, Debug)]
pub struct Element {
    kind: ElementKind,
    props: Props,
    resolved: bool,
    claimed: Option<(ElementIdentity, StateKind)>,
}

impl Element {
    /// Create an element with empty props
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            props: Props::default(),
            resolved: false,
            claimed: None,
        }
    }

    /// Create an element from existing props
    pub fn with_props(kind: ElementKind, props: Props) -> Self {
        Self {
            kind,
            props,
            resolved: false,
            claimed: None,
        }
    }

    /// Copy of this element with replaced props, tagged as resolved
    ///
    /// `claimed` is the identity its state handlers toggle, if any, and the
    /// first state that needed it.
    pub(crate) fn construct(
        &self,
        props: Props,
        claimed: Option<(ElementIdentity, StateKind)>,
    ) -> Self {
        Self {
            kind: self.kind.clone(),
            props,
            resolved: true,
            claimed,
        }
    }

    /// The identity claimed when this element was resolved
    pub(crate) fn claimed(&self) -> Option<&(ElementIdentity, StateKind)> {
        self.claimed.as_ref()
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set the style
    pub fn style(mut self, style: impl Into<StyleValue>) -> Self {
        self.props.style = Some(style.into());
        self.resolved = false;
        self
    }

    /// Set the key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.props.key = Some(key.into());
        self.resolved = false;
        self
    }

    /// Set the ref name
    pub fn ref_name(mut self, name: impl Into<String>) -> Self {
        self.props.ref_name = Some(name.into());
        self.resolved = false;
        self
    }

    /// Set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.attributes.insert(name.into(), value.into());
        self.resolved = false;
        self
    }

    /// Set the handler for an event type
    pub fn on<F>(mut self, event_type: EventType, handler: F) -> Self
    where
        F: Fn(&Event) + 'static,
    {
        self.props.handlers.on(event_type, handler);
        self.resolved = false;
        self
    }

    /// Set an already shared handler
    pub fn handler(mut self, event_type: EventType, callback: EventCallback) -> Self {
        self.props.handlers.set(event_type, callback);
        self.resolved = false;
        self
    }

    /// Set the mouse enter handler
    pub fn on_mouse_enter<F: Fn(&Event) + 'static>(self, handler: F) -> Self {
        self.on(event_types::MOUSE_ENTER, handler)
    }

    /// Set the mouse leave handler
    pub fn on_mouse_leave<F: Fn(&Event) + 'static>(self, handler: F) -> Self {
        self.on(event_types::MOUSE_LEAVE, handler)
    }

    /// Set the mouse down handler
    pub fn on_mouse_down<F: Fn(&Event) + 'static>(self, handler: F) -> Self {
        self.on(event_types::MOUSE_DOWN, handler)
    }

    /// Set the focus handler
    pub fn on_focus<F: Fn(&Event) + 'static>(self, handler: F) -> Self {
        self.on(event_types::FOCUS, handler)
    }

    /// Set the blur handler
    pub fn on_blur<F: Fn(&Event) + 'static>(self, handler: F) -> Self {
        self.on(event_types::BLUR, handler)
    }

    /// Add a child
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        let child = child.into();
        self.props.children = match std::mem::take(&mut self.props.children) {
            Children::None => Children::One(Box::new(child)),
            Children::One(first) => Children::Many(vec![*first, child]),
            Children::Many(mut nodes) => {
                nodes.push(child);
                Children::Many(nodes)
            }
        };
        self.resolved = false;
        self
    }

    /// Replace the children with a sequence
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.props.children = Children::Many(children.into_iter().map(Into::into).collect());
        self.resolved = false;
        self
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// The element kind
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Whether this is a host element
    pub fn is_host(&self) -> bool {
        matches!(self.kind, ElementKind::Host(_))
    }

    /// The host tag or component name
    pub fn type_name(&self) -> &str {
        match &self.kind {
            ElementKind::Host(tag) => tag,
            ElementKind::Composite(component) => component.name(),
        }
    }

    /// The props
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Take the props
    pub fn into_props(self) -> Props {
        self.props
    }

    /// Whether the resolver produced this element
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// The style as stored on the element
    pub fn style_value(&self) -> Option<&StyleValue> {
        self.props.style.as_ref()
    }

    /// The style, if it is a single map (always the case after resolution)
    pub fn style_map(&self) -> Option<&StyleMap> {
        self.props.style.as_ref().and_then(StyleValue::as_map)
    }

    /// The children
    pub fn child_nodes(&self) -> &Children {
        &self.props.children
    }

    /// The event handlers
    pub fn handlers(&self) -> &EventHandlers {
        &self.props.handlers
    }

    /// Invoke the handler for `event_type`, returning whether one ran
    pub fn dispatch(&self, event_type: EventType) -> bool {
        self.props.handlers.dispatch(&Event::new(event_type))
    }
}

// =========================================================================
// Constructors
// =========================================================================

/// Create a host element
pub fn host(tag: impl Into<String>) -> Element {
    Element::new(ElementKind::Host(tag.into()))
}

/// Create a `div` host element
pub fn div() -> Element {
    host("div")
}

/// Create a `span` host element
pub fn span() -> Element {
    host("span")
}

/// Create a composite component element
pub fn composite(name: impl Into<String>) -> Element {
    Element::new(ElementKind::Composite(ComponentType::new(name)))
}

/// Create a text node
pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

/// Create a number node
pub fn number(value: f64) -> Node {
    Node::Number(value)
}

/// Create an empty node
pub fn empty() -> Node {
    Node::Empty
}
