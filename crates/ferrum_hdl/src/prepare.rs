//! Hand-over of an elaborated design to a backend.
//!
//! Front-ends implement [`Prepare`] for whatever they elaborate from; the
//! backend calls it once and lowers the returned [`Design`]. The in-tree
//! implementation for [`Design`] itself only checks invariants.

use crate::design::Design;
use crate::error::{HdlError, HdlResult};
use crate::fragment::Fragment;
use crate::signal::SignalId;
use crate::value::Value;
use std::collections::{HashMap, HashSet};

/// Produces a design whose invariants the backend can rely on.
pub trait Prepare {
    /// Consumes the input and returns a checked design.
    fn prepare(self) -> HdlResult<Design>;
}

impl Prepare for Design {
    fn prepare(self) -> HdlResult<Design> {
        self.validate()?;
        Ok(self)
    }
}

impl Design {
    /// Checks every fragment of the hierarchy.
    ///
    /// Verifies that every referenced signal exists, that each fragment has
    /// at most one driver group per domain and drives every signal once, that
    /// driver domains are declared, that slices stay inside their operands
    /// and that no expression width overflows.
    pub fn validate(&self) -> HdlResult<()> {
        validate_fragment(self, &self.top)
    }
}

fn validate_fragment(design: &Design, fragment: &Fragment) -> HdlResult<()> {
    for &(sig, _) in &fragment.ports {
        check_signal(design, sig)?;
    }
    for domain in &fragment.domains {
        check_signal(design, domain.clk)?;
        if let Some(rst) = domain.rst {
            check_signal(design, rst)?;
        }
    }

    let mut groups: HashSet<Option<&str>> = HashSet::new();
    for group in &fragment.drivers {
        let domain = group.domain.as_deref();
        if !groups.insert(domain) {
            return Err(HdlError::DuplicateDriverGroup {
                domain: domain.unwrap_or("comb").to_string(),
            });
        }
    }

    let mut seen: HashMap<SignalId, Option<&str>> = HashMap::new();
    for (domain, sig) in fragment.iter_drivers() {
        check_signal(design, sig)?;
        if let Some(name) = domain {
            if fragment.domain(name).is_none() {
                return Err(HdlError::UndeclaredDomain {
                    domain: name.to_string(),
                });
            }
        }
        if let Some(first) = seen.insert(sig, domain) {
            let signal = design.signal(sig).name.clone();
            return Err(if first == domain {
                HdlError::DuplicateDriver {
                    signal,
                    domain: domain.unwrap_or("comb").to_string(),
                }
            } else {
                HdlError::ConflictingDrivers {
                    signal,
                    first: first.unwrap_or("comb").to_string(),
                    second: domain.unwrap_or("comb").to_string(),
                }
            });
        }
    }

    for stmt in &fragment.statements {
        let mut result: HdlResult<()> = Ok(());
        stmt.for_each_value(&mut |value| {
            if result.is_ok() {
                result = check_value(design, value).map(|_| ());
            }
        });
        result?;
    }

    for sub in &fragment.subfragments {
        validate_fragment(design, &sub.fragment)?;
    }
    Ok(())
}

fn check_signal(design: &Design, sig: SignalId) -> HdlResult<()> {
    match design.get_signal(sig) {
        Some(_) => Ok(()),
        None => Err(HdlError::UnknownSignal { id: sig.as_raw() }),
    }
}

/// Checks `value` bottom-up and returns its width.
///
/// Operands are checked before their parent, so slice bounds are only
/// compared against widths of valid sub-expressions.
fn check_value(design: &Design, value: &Value) -> HdlResult<u32> {
    match value {
        Value::Const(c) => Ok(c.shape().width),
        Value::Signal(id) => {
            check_signal(design, *id)?;
            Ok(design.signal(*id).width())
        }
        Value::Slice { value, start, end } => {
            let width = check_value(design, value)?;
            if start > end || *end > width {
                return Err(HdlError::SliceOutOfRange {
                    start: *start,
                    end: *end,
                    width,
                });
            }
            Ok(end - start)
        }
        Value::Cat(parts) => parts.iter().try_fold(0u32, |total, part| {
            let width = check_value(design, part)?;
            total
                .checked_add(width)
                .ok_or(HdlError::WidthOverflow { what: "concatenation" })
        }),
        Value::Repl { value, count } => check_value(design, value)?
            .checked_mul(*count)
            .ok_or(HdlError::WidthOverflow { what: "replication" }),
        Value::Unary { operand, shape, .. } => {
            check_value(design, operand)?;
            Ok(shape.width)
        }
        Value::Binary { lhs, rhs, shape, .. } => {
            check_value(design, lhs)?;
            check_value(design, rhs)?;
            Ok(shape.width)
        }
        Value::Mux {
            sel,
            if_true,
            if_false,
            shape,
            ..
        } => {
            check_value(design, sel)?;
            check_value(design, if_true)?;
            check_value(design, if_false)?;
            Ok(shape.width)
        }
        Value::Part {
            value,
            offset,
            width,
        } => {
            check_value(design, value)?;
            check_value(design, offset)?;
            Ok(*width)
        }
        Value::ArrayProxy {
            elems,
            index,
            shape,
        } => {
            for elem in elems {
                check_value(design, elem)?;
            }
            check_value(design, index)?;
            Ok(shape.width)
        }
    }
}
