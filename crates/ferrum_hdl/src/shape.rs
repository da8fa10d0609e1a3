//! Bit-vector shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The width and signedness of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Number of bits.
    pub width: u32,
    /// Whether the bits are interpreted as two's complement.
    #[serde(default)]
    pub signed: bool,
}

impl Shape {
    /// An unsigned shape of the given width.
    pub const fn unsigned(width: u32) -> Self {
        Self {
            width,
            signed: false,
        }
    }

    /// A signed shape of the given width.
    pub const fn signed(width: u32) -> Self {
        Self {
            width,
            signed: true,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signed {
            write!(f, "signed({})", self.width)
        } else {
            write!(f, "unsigned({})", self.width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert!(!Shape::unsigned(8).signed);
        assert!(Shape::signed(8).signed);
        assert_eq!(Shape::signed(3).width, 3);
    }

    #[test]
    fn display() {
        assert_eq!(Shape::unsigned(4).to_string(), "unsigned(4)");
        assert_eq!(Shape::signed(16).to_string(), "signed(16)");
    }

    #[test]
    fn signedness_defaults_to_unsigned() {
        let shape: Shape = serde_json::from_str(r#"{"width": 5}"#).unwrap();
        assert_eq!(shape, Shape::unsigned(5));
    }
}
