//! Four-state bit values as they appear in RTLIL constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 4-state bit.
///
/// RTLIL constants are strings over `0`, `1`, `x` and `z`; this type is one
/// character of such a string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Logic low (0).
    Zero = 0,
    /// Logic high (1).
    One = 1,
    /// Unknown or don't-care.
    X = 2,
    /// High-impedance (tri-state).
    Z = 3,
}

impl Logic {
    /// Converts a character to a [`Logic`] value.
    ///
    /// Accepts '0', '1', 'x'/'X', and 'z'/'Z'.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the RTLIL character for this value.
    pub fn to_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::Logic;
    use super::Logic::*;

    #[test]
    fn display_is_lowercase() {
        assert_eq!(format!("{Zero}"), "0");
        assert_eq!(format!("{One}"), "1");
        assert_eq!(format!("{X}"), "x");
        assert_eq!(format!("{Z}"), "z");
    }

    #[test]
    fn from_char_valid() {
        assert_eq!(Logic::from_char('0'), Some(Zero));
        assert_eq!(Logic::from_char('1'), Some(One));
        assert_eq!(Logic::from_char('x'), Some(X));
        assert_eq!(Logic::from_char('X'), Some(X));
        assert_eq!(Logic::from_char('z'), Some(Z));
        assert_eq!(Logic::from_char('Z'), Some(Z));
    }

    #[test]
    fn from_char_invalid() {
        assert_eq!(Logic::from_char('a'), None);
        assert_eq!(Logic::from_char('2'), None);
        assert_eq!(Logic::from_char('-'), None);
    }

    #[test]
    fn char_roundtrip() {
        for v in [Zero, One, X, Z] {
            assert_eq!(Logic::from_char(v.to_char()), Some(v));
        }
    }
}
