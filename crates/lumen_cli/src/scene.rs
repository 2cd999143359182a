//! JSON scenes
//!
//! A scene is the render output of one component, written as JSON:
//!
//! ```json
//! {
//!   "type": "div",
//!   "key": "card",
//!   "style": [{"padding": 8}, {":hover": {"background": "#eee"}}],
//!   "children": ["Title", 42, null, {"type": "Button", "component": true}]
//! }
//! ```
//!
//! Strings and numbers are text and number nodes, `null` is an empty node.
//! `children` may be a single node instead of a list. Resolved trees are
//! written back in the same shape, with the event props each element
//! handles listed under `handlers`.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use lumen_core::events::event_name;
use lumen_style::element::{composite, host, Children, Element, ElementKind, Node};
use lumen_style::style::{serialize_number, StyleValue};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An element as written in a scene file
#[derive(Debug, Deserialize)]
struct SceneElement {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    component: bool,
    key: Option<String>,
    #[serde(rename = "ref")]
    ref_name: Option<String>,
    style: Option<StyleValue>,
    #[serde(default)]
    attributes: Map<String, Value>,
    #[serde(default)]
    children: Value,
}

/// Read a scene node
pub fn parse_node(value: &Value) -> Result<Node> {
    match value {
        Value::Null | Value::Bool(_) => Ok(Node::Empty),
        Value::String(text) => Ok(Node::Text(text.clone())),
        Value::Number(n) => Ok(Node::Number(n.as_f64().unwrap_or_default())),
        Value::Object(_) => parse_element(value).map(Node::Element),
        Value::Array(_) => bail!("a node cannot be a list; wrap it in an element's \"children\""),
    }
}

fn parse_element(value: &Value) -> Result<Element> {
    let scene = SceneElement::deserialize(value)?;
    let type_name = scene.type_name.as_str();

    let mut element = if scene.component {
        composite(type_name)
    } else {
        host(type_name)
    };
    if let Some(key) = scene.key {
        element = element.key(key);
    }
    if let Some(name) = scene.ref_name {
        element = element.ref_name(name);
    }
    if let Some(style) = scene.style {
        element = element.style(style);
    }
    for (name, value) in scene.attributes {
        let value = match value {
            Value::String(text) => text,
            other => other.to_string(),
        };
        element = element.attr(name, value);
    }

    match &scene.children {
        Value::Null => {}
        Value::Array(children) => {
            let nodes = children
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    parse_node(child)
                        .with_context(|| format!("in child {index} of <{type_name}>"))
                })
                .collect::<Result<Vec<_>>>()?;
            element = element.children(nodes);
        }
        single => {
            let node = parse_node(single).with_context(|| format!("in child of <{type_name}>"))?;
            element = element.child(node);
        }
    }

    Ok(element)
}

// =============================================================================
// Output
// =============================================================================

/// Serializes a node in scene form
struct SceneNode<'a>(&'a Node);

impl Serialize for SceneNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Node::Element(element) => ResolvedElement::new(element).serialize(serializer),
            Node::Text(text) => serializer.serialize_str(text),
            Node::Number(n) => serialize_number(n, serializer),
            Node::Empty => serializer.serialize_unit(),
        }
    }
}

struct SceneChildren<'a>(&'a Children);

impl SceneChildren<'_> {
    fn is_none(&self) -> bool {
        matches!(self.0, Children::None)
    }
}

impl Serialize for SceneChildren<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Children::None => serializer.serialize_unit(),
            Children::One(child) => SceneNode(child).serialize(serializer),
            Children::Many(children) => {
                let mut seq = serializer.serialize_seq(Some(children.len()))?;
                for child in children {
                    seq.serialize_element(&SceneNode(child))?;
                }
                seq.end()
            }
        }
    }
}

/// An element as written back after resolution
#[derive(Serialize)]
struct ResolvedElement<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    component: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    ref_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a StyleValue>,
    #[serde(skip_serializing_if = "no_attributes")]
    attributes: &'a IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    handlers: Vec<Value>,
    #[serde(skip_serializing_if = "SceneChildren::is_none")]
    children: SceneChildren<'a>,
}

impl<'a> ResolvedElement<'a> {
    fn new(element: &'a Element) -> Self {
        let props = element.props();
        Self {
            type_name: element.type_name(),
            component: matches!(element.kind(), ElementKind::Composite(_)),
            key: props.key.as_deref(),
            ref_name: props.ref_name.as_deref(),
            style: props.style.as_ref(),
            attributes: &props.attributes,
            handlers: props
                .handlers
                .event_types()
                .map(|ty| event_name(ty).map_or_else(|| Value::from(ty), Value::from))
                .collect(),
            children: SceneChildren(&props.children),
        }
    }
}

fn no_attributes(attributes: &&IndexMap<String, String>) -> bool {
    attributes.is_empty()
}

/// Write a node as JSON
pub fn node_to_json(node: &Node) -> Result<Value> {
    serde_json::to_value(SceneNode(node)).context("Failed to serialize resolved tree")
}
