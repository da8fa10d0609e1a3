//! Shared foundational types used across the Ferrum workspace.
//!
//! This crate provides 4-state logic values, packed logic vectors rendered in
//! RTLIL bit-string form, and content hashing of emitted artifacts.

#![warn(missing_docs)]

pub mod hash;
pub mod logic;
pub mod logic_vec;

pub use hash::ContentHash;
pub use logic::Logic;
pub use logic_vec::LogicVec;
