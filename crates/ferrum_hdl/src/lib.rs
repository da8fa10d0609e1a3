//! The Ferrum design graph.
//!
//! This crate defines the hierarchical hardware description consumed by the
//! RTLIL backend: [`Signal`]s stored once per [`Design`], typed [`Value`]
//! expression trees, [`Statement`]s, clock domains, and [`Fragment`]s that
//! nest into a module hierarchy. Front-ends build a [`Design`] and hand it
//! over through the [`Prepare`] trait, which checks the invariants the
//! backend relies on.

#![warn(missing_docs)]

pub mod design;
pub mod error;
pub mod fragment;
pub mod prepare;
pub mod shape;
pub mod signal;
pub mod stmt;
pub mod value;

pub use design::Design;
pub use error::{HdlError, HdlResult};
pub use fragment::{ClockDomain, ClockEdge, DriverGroup, Fragment, PortDirection, ResetKind, Subfragment};
pub use prepare::Prepare;
pub use shape::Shape;
pub use signal::{AttrValue, Signal, SignalId, SrcLoc};
pub use stmt::{Statement, SwitchCase};
pub use value::{BinaryOp, Const, UnaryOp, Value};
