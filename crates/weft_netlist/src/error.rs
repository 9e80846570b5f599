//! Errors returned by netlist operations.

use crate::data_type::DataType;
use crate::expr::BinaryOp;
use crate::ids::NodeId;
use weft_common::InternalError;
use weft_source::Span;

/// An invariant violation observable from outside the netlist.
///
/// Each variant means the caller built or tore down the IR incorrectly.
/// Problems in the user's design are reported as diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// A signal was deleted while expressions or assignments still refer to it.
    #[error(
        "{fileline}: internal error: attempt to delete signal `{name}` which has \
         {eref} expression and {lref} assign references\n{dump}"
    )]
    SignalInUse {
        /// Location of the signal's declaration.
        fileline: String,
        /// Signal name.
        name: String,
        /// Outstanding expression references.
        eref: u32,
        /// Outstanding assignment references.
        lref: u32,
        /// Structural dump of the signal.
        dump: String,
    },

    /// The branches of a `?:` have incompatible value types.
    #[error("internal error: unexpected ?: type clash: true={if_true}, false={if_false}")]
    TypeClash {
        /// Type of the true branch.
        if_true: DataType,
        /// Type of the false branch.
        if_false: DataType,
        /// Location of the condition.
        span: Span,
    },

    /// The operands of an arithmetic or bitwise operator have no common type.
    #[error("internal error: unexpected operand types for `{op}`: {left} and {right}")]
    OperandClash {
        /// The operator.
        op: BinaryOp,
        /// Type of the left operand.
        left: DataType,
        /// Type of the right operand.
        right: DataType,
        /// Location of the left operand.
        span: Span,
    },

    /// A delay list did not have 1, 2, 3, 6 or 12 values.
    #[error("a transition delay list takes 1, 2, 3, 6 or 12 values, got {0}")]
    BadDelayCount(usize),

    /// A task or function body was set twice.
    #[error("body of {what} is already set")]
    BodyAlreadySet {
        /// `"task"` or `"function"`.
        what: &'static str,
    },

    /// A system task name did not start with `$`.
    #[error("system task name `{0}` does not start with `$`")]
    BadSystemTaskName(String),

    /// A handle named an object that no longer exists.
    #[error("stale netlist handle {0}")]
    StaleNode(NodeId),

    /// Errors were reported, so the netlist may not go to a backend.
    #[error("netlist construction failed with {errors} error(s)")]
    ElaborationFailed {
        /// Number of errors reported.
        errors: usize,
    },

    /// Any other internal inconsistency.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_bad_delay_count() {
        assert_eq!(
            NetlistError::BadDelayCount(4).to_string(),
            "a transition delay list takes 1, 2, 3, 6 or 12 values, got 4"
        );
    }

    #[test]
    fn display_type_clash() {
        let err = NetlistError::TypeClash {
            if_true: DataType::Real,
            if_false: DataType::Void,
            span: Span::DUMMY,
        };
        assert_eq!(
            err.to_string(),
            "internal error: unexpected ?: type clash: true=real, false=void"
        );
    }

    #[test]
    fn internal_is_transparent() {
        let err: NetlistError = InternalError::new("boom").into();
        assert_eq!(err.to_string(), "internal error: boom");
    }

    #[test]
    fn display_stale() {
        assert_eq!(
            NetlistError::StaleNode(NodeId::from_raw(4)).to_string(),
            "stale netlist handle n4"
        );
    }
}
