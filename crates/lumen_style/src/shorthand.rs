//! Shorthand/longhand conflict detection
//!
//! Mixing a shorthand property such as `border` with one of its longhands
//! (`borderWidth`) in the same style object renders inconsistently once
//! styles change, because the host applies individual property updates in no
//! guaranteed order. These checks only report; they never change a style.

use crate::style::StyleMap;

/// Shorthand properties and the longhands each one expands to
pub const SHORTHANDS: &[(&str, &[&str])] = &[
    (
        "background",
        &[
            "backgroundAttachment",
            "backgroundBlendMode",
            "backgroundClip",
            "backgroundColor",
            "backgroundImage",
            "backgroundOrigin",
            "backgroundPosition",
            "backgroundPositionX",
            "backgroundPositionY",
            "backgroundRepeat",
            "backgroundRepeatX",
            "backgroundRepeatY",
            "backgroundSize",
        ],
    ),
    (
        "border",
        &[
            "borderBottom",
            "borderBottomColor",
            "borderBottomStyle",
            "borderBottomWidth",
            "borderColor",
            "borderLeft",
            "borderLeftColor",
            "borderLeftStyle",
            "borderLeftWidth",
            "borderRight",
            "borderRightColor",
            "borderRightStyle",
            "borderRightWidth",
            "borderStyle",
            "borderTop",
            "borderTopColor",
            "borderTopStyle",
            "borderTopWidth",
            "borderWidth",
        ],
    ),
    (
        "borderImage",
        &[
            "borderImageOutset",
            "borderImageRepeat",
            "borderImageSlice",
            "borderImageSource",
            "borderImageWidth",
        ],
    ),
    (
        "borderRadius",
        &[
            "borderBottomLeftRadius",
            "borderBottomRightRadius",
            "borderTopLeftRadius",
            "borderTopRightRadius",
        ],
    ),
    (
        "font",
        &[
            "fontFamily",
            "fontKerning",
            "fontSize",
            "fontStretch",
            "fontStyle",
            "fontVariant",
            "fontVariantLigatures",
            "fontWeight",
            "lineHeight",
        ],
    ),
    (
        "listStyle",
        &["listStyleImage", "listStylePosition", "listStyleType"],
    ),
    (
        "margin",
        &["marginBottom", "marginLeft", "marginRight", "marginTop"],
    ),
    (
        "padding",
        &["paddingBottom", "paddingLeft", "paddingRight", "paddingTop"],
    ),
    (
        "transition",
        &[
            "transitionDelay",
            "transitionDuration",
            "transitionProperty",
            "transitionTimingFunction",
        ],
    ),
];

/// Longhands of a shorthand property, if `property` is one
pub fn longhands(property: &str) -> Option<&'static [&'static str]> {
    SHORTHANDS
        .iter()
        .find(|(shorthand, _)| *shorthand == property)
        .map(|(_, longhands)| *longhands)
}

/// A shorthand declared together with some of its longhands
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShorthandConflict {
    /// The shorthand property
    pub shorthand: &'static str,
    /// Longhands present in the same map, in table order
    pub longhands: Vec<&'static str>,
}

/// Find every shorthand in `style` that is mixed with its longhands
///
/// Only the top level of the map is inspected; nested state styles are
/// separate style objects and are checked on their own. A key counts as
/// present even if its value is null.
pub fn find_conflicts(style: &StyleMap) -> Vec<ShorthandConflict> {
    style
        .keys()
        .filter_map(|key| {
            let (shorthand, family) = SHORTHANDS.iter().find(|(name, _)| *name == key)?;
            let present: Vec<&'static str> = family
                .iter()
                .copied()
                .filter(|longhand| style.contains_key(longhand))
                .collect();
            (!present.is_empty()).then(|| ShorthandConflict {
                shorthand: *shorthand,
                longhands: present,
            })
        })
        .collect()
}
