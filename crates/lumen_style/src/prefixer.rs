//! Vendor prefixing seam
//!
//! After a style has been flattened the resolver hands it to a [`Prefixer`],
//! exactly once per styled element. The resolver does not interpret the
//! result. Without a real prefixer, [`NoopPrefixer`] returns the style as is.

use crate::style::StyleMap;

/// Rewrites a flat style for the host (vendor prefixes, value fallbacks)
pub trait Prefixer {
    /// Transform a flat style
    fn prefix(&self, style: StyleMap) -> StyleMap;
}

/// A prefixer that changes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPrefixer;

impl Prefixer for NoopPrefixer {
    fn prefix(&self, style: StyleMap) -> StyleMap {
        style
    }
}

impl<F> Prefixer for F
where
    F: Fn(StyleMap) -> StyleMap,
{
    fn prefix(&self, style: StyleMap) -> StyleMap {
        self(style)
    }
}
