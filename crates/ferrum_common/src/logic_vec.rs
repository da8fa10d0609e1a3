//! Packed vectors of 4-state logic values for constants and reset values.

use crate::logic::Logic;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A vector of 4-state [`Logic`] values packed for efficient storage.
///
/// Each logic value occupies 2 bits (encoding 4 states), with 32 values packed
/// per `u64` word. Index 0 is the least significant bit. The [`Display`]
/// form is the RTLIL bit string: most significant bit first, lowercase
/// `x`/`z`, always exactly [`width`](Self::width) characters.
///
/// [`Display`]: fmt::Display
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LogicVec {
    width: u32,
    /// Packed storage: 2 bits per logic value, 32 values per u64.
    data: Vec<u64>,
}

/// Number of logic values packed per u64 word.
const VALUES_PER_WORD: u32 = 32;

impl LogicVec {
    /// Creates a new `LogicVec` of the given width, initialized to all `Zero`.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            data: vec![0; word_count(width)],
        }
    }

    /// Returns the number of logic values in this vector.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Gets the logic value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let word_idx = (index / VALUES_PER_WORD) as usize;
        let bit_offset = (index % VALUES_PER_WORD) * 2;
        match (self.data[word_idx] >> bit_offset) & 0b11 {
            0 => Logic::Zero,
            1 => Logic::One,
            2 => Logic::X,
            _ => Logic::Z,
        }
    }

    /// Sets the logic value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let word_idx = (index / VALUES_PER_WORD) as usize;
        let bit_offset = (index % VALUES_PER_WORD) * 2;
        let mask = !(0b11u64 << bit_offset);
        self.data[word_idx] = (self.data[word_idx] & mask) | ((value as u64) << bit_offset);
    }

    /// Creates the two's complement encoding of `value` truncated or
    /// sign-extended to `width` bits.
    pub fn from_i64(value: i64, width: u32) -> Self {
        let mut v = Self::new(width);
        for i in 0..width {
            let bit = if i < 64 {
                (value >> i) & 1 != 0
            } else {
                value < 0
            };
            if bit {
                v.set(i, Logic::One);
            }
        }
        v
    }

    /// Returns the most significant bit, or `None` for a zero-width vector.
    pub fn msb(&self) -> Option<Logic> {
        self.width.checked_sub(1).map(|i| self.get(i))
    }

    /// Returns a copy truncated or extended to `width` bits.
    ///
    /// Extension repeats the most significant bit when `sign_extend` is set
    /// and pads with `Zero` otherwise.
    pub fn resize(&self, width: u32, sign_extend: bool) -> Self {
        let fill = match self.msb() {
            Some(msb) if sign_extend => msb,
            _ => Logic::Zero,
        };
        let mut v = Self::new(width);
        for i in 0..width {
            let bit = if i < self.width { self.get(i) } else { fill };
            v.set(i, bit);
        }
        v
    }

    /// Parses a binary string like `"10xz"` into a `LogicVec`.
    ///
    /// The leftmost character is the most significant bit (highest index).
    /// Returns `None` if the string contains invalid characters.
    pub fn from_binary_str(s: &str) -> Option<Self> {
        let width = s.chars().count() as u32;
        let mut v = Self::new(width);
        for (i, c) in s.chars().rev().enumerate() {
            v.set(i as u32, Logic::from_char(c)?);
        }
        Some(v)
    }
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width).rev() {
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec({}'{self})", self.width)
    }
}

// Serialized as the bit string so design files stay readable.
impl Serialize for LogicVec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogicVec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LogicVec::from_binary_str(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid logic vector `{s}`")))
    }
}

/// Returns the number of u64 words needed to store `width` logic values.
fn word_count(width: u32) -> usize {
    width.div_ceil(VALUES_PER_WORD) as usize
}
