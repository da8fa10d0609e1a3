//! Errors raised while preparing a design for lowering.

/// Result alias for design-graph operations.
pub type HdlResult<T> = Result<T, HdlError>;

/// A design that violates an invariant the backend relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HdlError {
    /// A fragment refers to a signal that is not in the design.
    #[error("signal id {id} is not part of the design")]
    UnknownSignal {
        /// The raw ID.
        id: u32,
    },

    /// One fragment drives a signal from two domains.
    #[error("signal `{signal}` is driven from both `{first}` and `{second}`")]
    ConflictingDrivers {
        /// The signal name.
        signal: String,
        /// The domain that drove it first (`comb` for combinational).
        first: String,
        /// The conflicting domain.
        second: String,
    },

    /// A fragment lists the same signal twice in one driver group.
    #[error("signal `{signal}` is driven twice from `{domain}`")]
    DuplicateDriver {
        /// The signal name.
        signal: String,
        /// The domain (`comb` for combinational).
        domain: String,
    },

    /// A fragment has two driver groups for one domain.
    #[error("domain `{domain}` has more than one driver group")]
    DuplicateDriverGroup {
        /// The domain name (`comb` for combinational).
        domain: String,
    },

    /// A driver group names a domain the fragment does not declare.
    #[error("domain `{domain}` is used but not declared")]
    UndeclaredDomain {
        /// The domain name.
        domain: String,
    },

    /// A slice reaches outside its operand.
    #[error("slice {start}..{end} is out of range for a {width}-bit value")]
    SliceOutOfRange {
        /// First bit.
        start: u32,
        /// One past the last bit.
        end: u32,
        /// Width of the operand.
        width: u32,
    },

    /// The width of an expression does not fit in 32 bits.
    #[error("width of {what} overflows")]
    WidthOverflow {
        /// The kind of expression.
        what: &'static str,
    },
}
