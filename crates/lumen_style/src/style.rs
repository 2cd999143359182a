//! Style values
//!
//! A style on an element is a [`StyleValue`]: either one [`StyleMap`] or an
//! ordered list of style values to merge. A map may contain state-conditional
//! keys such as `:hover` whose value is itself a nested style value.
//!
//! # Example
//!
//! ```rust
//! use lumen_core::StateKind;
//! use lumen_style::style::{style, StyleValue};
//!
//! let button = style()
//!     .set("background", "blue")
//!     .set("padding", 4)
//!     .state(StateKind::Hover, style().set("background", "red"));
//!
//! let value = StyleValue::list([
//!     StyleValue::from(button),
//!     StyleValue::Bool(false),
//!     StyleValue::from(style().set("color", "white")),
//! ]);
//! assert!(value.is_list());
//! ```
//!
//! Styles (de)serialize as plain JSON-like data: maps, lists and scalars.

use indexmap::IndexMap;
use lumen_core::StateKind;
use serde::{Deserialize, Serialize, Serializer};

/// Value of a single style property
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Explicit null; passed through untouched
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (unitless, or pixels by host convention)
    Number(#[serde(serialize_with = "serialize_number")] f64),
    /// Text value such as `"1px solid black"`
    Text(String),
    /// Nested style, used by state-conditional keys
    Nested(StyleValue),
}

impl PropertyValue {
    /// The nested map, if this value is a nested style map
    pub fn as_nested_map(&self) -> Option<&StyleMap> {
        match self {
            PropertyValue::Nested(StyleValue::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// The text, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The number, if this is a numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<StyleMap> for PropertyValue {
    fn from(value: StyleMap) -> Self {
        PropertyValue::Nested(StyleValue::Map(value))
    }
}

impl From<StyleValue> for PropertyValue {
    fn from(value: StyleValue) -> Self {
        PropertyValue::Nested(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

/// Insertion-ordered mapping of property name to value
///
/// Overwriting an existing key keeps its original position. Equality ignores
/// order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StyleMap {
    entries: IndexMap<String, PropertyValue>,
}

impl StyleMap {
    /// Create an empty style map
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set a property
    pub fn set(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the nested style applied while `kind` is on
    pub fn state(self, kind: StateKind, nested: impl Into<StyleValue>) -> Self {
        self.selector(kind.selector(), nested)
    }

    /// Set a nested style under an arbitrary selector key
    pub fn selector(mut self, key: impl Into<String>, nested: impl Into<StyleValue>) -> Self {
        self.insert(key, PropertyValue::Nested(nested.into()));
        self
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Insert a property, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a property
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Look up a text property
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_text)
    }

    /// Whether a property is present (even if null)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a property, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.shift_remove(key)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no properties
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Property names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Shallow-merge `other` on top of this map (later wins)
    pub fn extend_from(&mut self, other: &StyleMap) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for StyleMap {
    type Item = (String, PropertyValue);
    type IntoIter = indexmap::map::IntoIter<String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A style as written on an element
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// A single mapping
    Map(StyleMap),
    /// Ordered values merged left to right; non-map entries are skipped
    List(Vec<StyleValue>),
    /// Null entry
    Null,
    /// Boolean entry (typically `false` from a conditional)
    Bool(bool),
    /// Numeric entry
    Number(#[serde(serialize_with = "serialize_number")] f64),
    /// Text entry
    Text(String),
}

impl StyleValue {
    /// Build a list value
    pub fn list(values: impl IntoIterator<Item = StyleValue>) -> Self {
        StyleValue::List(values.into_iter().collect())
    }

    /// The map, if this value is a single mapping
    pub fn as_map(&self) -> Option<&StyleMap> {
        match self {
            StyleValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value is a list
    pub fn is_list(&self) -> bool {
        matches!(self, StyleValue::List(_))
    }
}

impl From<StyleMap> for StyleValue {
    fn from(value: StyleMap) -> Self {
        StyleValue::Map(value)
    }
}

impl From<Vec<StyleValue>> for StyleValue {
    fn from(value: Vec<StyleValue>) -> Self {
        StyleValue::List(value)
    }
}

impl From<Vec<StyleMap>> for StyleValue {
    fn from(value: Vec<StyleMap>) -> Self {
        StyleValue::List(value.into_iter().map(StyleValue::Map).collect())
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleValue::Null, Into::into)
    }
}

/// Create a new empty style map
pub fn style() -> StyleMap {
    StyleMap::new()
}

/// Serialize a number, writing integral values as integers
pub fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}
