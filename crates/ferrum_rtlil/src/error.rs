//! Errors raised while lowering a design to RTLIL.

use ferrum_hdl::HdlError;

/// Result alias for lowering operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// A failure that aborts lowering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The design uses an expression this backend cannot lower.
    #[error("{0} is not supported by the RTLIL backend")]
    Unsupported(&'static str),

    /// An assignment target is not a plain signal.
    #[error("{0} cannot be used as an assignment target")]
    InvalidTarget(&'static str),

    /// An assignment targets a signal the fragment does not drive.
    #[error("no next-state wire for signal `{name}`, which is not driven by this fragment")]
    UndrivenTarget {
        /// The signal name.
        name: String,
    },

    /// A driver group names a domain the fragment does not declare.
    #[error("unknown clock domain `{0}`")]
    UnknownDomain(String),

    /// The statement tree is malformed.
    #[error("malformed switch: {0}")]
    Structural(String),

    /// The design failed preparation.
    #[error(transparent)]
    Prepare(#[from] HdlError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ConvertError::Unsupported("dynamic part-select").to_string(),
            "dynamic part-select is not supported by the RTLIL backend"
        );
        assert_eq!(
            ConvertError::UndrivenTarget { name: "o".into() }.to_string(),
            "no next-state wire for signal `o`, which is not driven by this fragment"
        );
    }

    #[test]
    fn prepare_errors_are_transparent() {
        let err: ConvertError = HdlError::UnknownSignal { id: 4 }.into();
        assert_eq!(err.to_string(), "signal id 4 is not part of the design");
    }
}
