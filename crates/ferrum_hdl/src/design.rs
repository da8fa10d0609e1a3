//! The design root: the signal table plus the top fragment.

use crate::fragment::Fragment;
use crate::signal::{Signal, SignalId};
use serde::{Deserialize, Serialize};

/// A complete design ready to be lowered.
///
/// Signals are stored once here and referenced by [`SignalId`] from every
/// fragment, so a signal shared between a parent and a child is the same
/// entry. IDs are stable: signals are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// All signals, indexed by [`SignalId`].
    pub signals: Vec<Signal>,
    /// The outermost fragment.
    pub top: Fragment,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a signal and returns its ID.
    pub fn add_signal(&mut self, signal: Signal) -> SignalId {
        let id = SignalId::from_raw(self.signals.len() as u32);
        self.signals.push(signal);
        id
    }

    /// Returns the signal with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn signal(&self, id: SignalId) -> &Signal {
        &self.signals[id.as_raw() as usize]
    }

    /// Returns the signal with the given ID, or `None` if it does not exist.
    pub fn get_signal(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(id.as_raw() as usize)
    }
}
