//! Value-type tags carried by signals and expressions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of value a signal holds or an expression yields.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Not yet decided.
    #[default]
    NoType,
    /// No value (a function without a result).
    Void,
    /// 4-state bits.
    Logic,
    /// 2-state bits.
    Bool,
    /// Double-precision real.
    Real,
}

impl DataType {
    /// Joins the types of two alternative values, as the branches of `?:`.
    ///
    /// 2-state widens to 4-state, and a bit vector alongside a real becomes
    /// real. Any other pair of distinct types has no join.
    pub fn reconcile(a: DataType, b: DataType) -> Option<DataType> {
        use DataType::*;
        match (a, b) {
            (Logic, Bool) | (Bool, Logic) => Some(Logic),
            (Real, Logic | Bool) | (Logic | Bool, Real) => Some(Real),
            _ if a == b => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::NoType => "no_type",
            DataType::Void => "void",
            DataType::Logic => "logic",
            DataType::Bool => "bool",
            DataType::Real => "real",
        };
        f.write_str(s)
    }
}
