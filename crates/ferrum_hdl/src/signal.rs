//! Signal definitions.
//!
//! A [`Signal`] is a named bit-vector wire. Signals live in the
//! [`Design`](crate::Design)'s signal table and are referred to everywhere else
//! by [`SignalId`], so the same signal can be a port of a child fragment and a
//! plain wire of its parent.

use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque, copyable ID for a signal in a [`Design`](crate::Design).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalId(u32);

impl SignalId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// A source location, rendered as `file:line`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SrcLoc {
    /// Path of the source file, as the front-end recorded it.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

impl SrcLoc {
    /// Creates a source location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SrcLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The value of an attribute or cell parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// An integer value.
    Int(i64),
    /// A string value.
    Str(String),
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

/// A bit-vector signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// The signal name, without any escape marker.
    pub name: String,
    /// Width and signedness.
    pub shape: Shape,
    /// Reset value, truncated to the signal's width.
    #[serde(default)]
    pub reset: i64,
    /// Where the signal was declared.
    #[serde(default)]
    pub src: Option<SrcLoc>,
    /// User attributes, emitted ahead of the signal's wire.
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Signal {
    /// Creates a signal with reset value 0 and no attributes.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            reset: 0,
            src: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Sets the reset value.
    pub fn with_reset(mut self, reset: i64) -> Self {
        self.reset = reset;
        self
    }

    /// Sets the declaration site.
    pub fn with_src(mut self, src: SrcLoc) -> Self {
        self.src = Some(src);
        self
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Returns the signal's width in bits.
    pub fn width(&self) -> u32 {
        self.shape.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods() {
        let sig = Signal::new("count", Shape::unsigned(8))
            .with_reset(5)
            .with_src(SrcLoc::new("ctr.fe", 7))
            .with_attr("keep", 1i64);
        assert_eq!(sig.width(), 8);
        assert_eq!(sig.reset, 5);
        assert_eq!(sig.src.as_ref().map(|s| s.to_string()).as_deref(), Some("ctr.fe:7"));
        assert_eq!(sig.attrs.get("keep"), Some(&AttrValue::Int(1)));
    }

    #[test]
    fn attr_value_conversions() {
        assert_eq!(AttrValue::from(true), AttrValue::Int(1));
        assert_eq!(AttrValue::from(16u32), AttrValue::Int(16));
        assert_eq!(AttrValue::from("x"), AttrValue::Str("x".to_string()));
    }

    #[test]
    fn attr_value_untagged_json() {
        let attrs: BTreeMap<String, AttrValue> =
            serde_json::from_str(r#"{"keep": 1, "note": "hi"}"#).unwrap();
        assert_eq!(attrs["keep"], AttrValue::Int(1));
        assert_eq!(attrs["note"], AttrValue::Str("hi".to_string()));
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let sig: Signal =
            serde_json::from_str(r#"{"name": "a", "shape": {"width": 2}}"#).unwrap();
        assert_eq!(sig.reset, 0);
        assert!(sig.src.is_none());
        assert!(sig.attrs.is_empty());
    }

    #[test]
    fn signal_id_is_transparent() {
        let id = SignalId::from_raw(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
        assert_eq!(id.as_raw(), 3);
    }
}
