//! Fragments: the units of the design hierarchy.
//!
//! Each [`Fragment`] becomes one RTLIL module. It records which signals it
//! drives from which clock domain, its statements, its boundary ports, the
//! domains it declares, and its child fragments in instantiation order.

use crate::signal::SignalId;
use crate::stmt::Statement;
use serde::{Deserialize, Serialize};

/// Direction of a fragment port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    /// Driven from outside.
    Input,
    /// Driven from inside.
    Output,
    /// Bidirectional.
    Inout,
}

impl PortDirection {
    /// The RTLIL keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::Inout => "inout",
        }
    }
}

/// How a clock domain's reset is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetKind {
    /// The reset is only observed on the clock edge.
    #[default]
    Sync,
    /// The reset acts immediately on its own edge.
    Async,
}

/// The clock edge a domain samples on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEdge {
    /// Rising edge.
    #[default]
    Pos,
    /// Falling edge.
    Neg,
}

/// A named clock domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockDomain {
    /// Domain name, e.g. `sync`.
    pub name: String,
    /// The clock signal.
    pub clk: SignalId,
    /// The active clock edge.
    #[serde(default)]
    pub clk_edge: ClockEdge,
    /// The reset signal, if the domain has one.
    #[serde(default)]
    pub rst: Option<SignalId>,
    /// How the reset is sampled.
    #[serde(default)]
    pub reset_kind: ResetKind,
}

impl ClockDomain {
    /// A domain with a synchronous reset.
    pub fn new(name: impl Into<String>, clk: SignalId, rst: Option<SignalId>) -> Self {
        Self {
            name: name.into(),
            clk,
            clk_edge: ClockEdge::Pos,
            rst,
            reset_kind: ResetKind::Sync,
        }
    }

    /// Sets the active clock edge.
    pub fn with_clk_edge(mut self, edge: ClockEdge) -> Self {
        self.clk_edge = edge;
        self
    }

    /// Sets the reset kind.
    pub fn with_reset_kind(mut self, kind: ResetKind) -> Self {
        self.reset_kind = kind;
        self
    }

    /// Returns `true` if the reset is asynchronous.
    pub fn is_async_reset(&self) -> bool {
        self.reset_kind == ResetKind::Async
    }
}

/// The signals driven from one domain, or combinationally when `domain` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverGroup {
    /// Domain name, `None` for combinational logic.
    #[serde(default)]
    pub domain: Option<String>,
    /// Driven signals in registration order.
    pub signals: Vec<SignalId>,
}

/// A child fragment and its optional instance name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subfragment {
    /// The child.
    pub fragment: Fragment,
    /// Instance name; unnamed children become `anonymous`.
    #[serde(default)]
    pub name: Option<String>,
}

/// One level of the design hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Boundary signals in declaration order.
    #[serde(default)]
    pub ports: Vec<(SignalId, PortDirection)>,
    /// Driven signals grouped by domain.
    #[serde(default)]
    pub drivers: Vec<DriverGroup>,
    /// Statements in source order.
    #[serde(default)]
    pub statements: Vec<Statement>,
    /// Child fragments in instantiation order.
    #[serde(default)]
    pub subfragments: Vec<Subfragment>,
    /// Clock domains declared by this fragment.
    #[serde(default)]
    pub domains: Vec<ClockDomain>,
}

impl Fragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `signal` as a port. Re-declaring a port updates its direction
    /// and keeps its position.
    pub fn add_port(&mut self, signal: SignalId, direction: PortDirection) {
        match self.ports.iter_mut().find(|(s, _)| *s == signal) {
            Some(entry) => entry.1 = direction,
            None => self.ports.push((signal, direction)),
        }
    }

    /// Records that `signal` is driven from `domain` (`None` for
    /// combinational logic).
    pub fn add_driver(&mut self, signal: SignalId, domain: Option<&str>) {
        let group = match self
            .drivers
            .iter()
            .position(|g| g.domain.as_deref() == domain)
        {
            Some(index) => &mut self.drivers[index],
            None => {
                self.drivers.push(DriverGroup {
                    domain: domain.map(str::to_string),
                    signals: Vec::new(),
                });
                let last = self.drivers.len() - 1;
                &mut self.drivers[last]
            }
        };
        if !group.signals.contains(&signal) {
            group.signals.push(signal);
        }
    }

    /// Appends statements to the body.
    pub fn add_statements(&mut self, stmts: impl IntoIterator<Item = Statement>) {
        self.statements.extend(stmts);
    }

    /// Appends a child fragment.
    pub fn add_subfragment(&mut self, fragment: Fragment, name: Option<&str>) {
        self.subfragments.push(Subfragment {
            fragment,
            name: name.map(str::to_string),
        });
    }

    /// Declares a clock domain, replacing any previous domain with the same
    /// name.
    pub fn add_domain(&mut self, domain: ClockDomain) {
        match self.domains.iter_mut().find(|d| d.name == domain.name) {
            Some(existing) => *existing = domain,
            None => self.domains.push(domain),
        }
    }

    /// Looks up a declared domain.
    pub fn domain(&self, name: &str) -> Option<&ClockDomain> {
        self.domains.iter().find(|d| d.name == name)
    }

    /// Iterates over every driven signal with its domain.
    pub fn iter_drivers(&self) -> impl Iterator<Item = (Option<&str>, SignalId)> + '_ {
        self.drivers.iter().flat_map(|group| {
            group
                .signals
                .iter()
                .map(move |&sig| (group.domain.as_deref(), sig))
        })
    }

    /// Iterates over the synchronously driven signals with their domain.
    pub fn iter_sync(&self) -> impl Iterator<Item = (&str, SignalId)> + '_ {
        self.iter_drivers()
            .filter_map(|(domain, sig)| domain.map(|d| (d, sig)))
    }
}
