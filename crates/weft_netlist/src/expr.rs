//! Expression trees used by procedural statements and delays.
//!
//! Every node carries its result width, signedness and value type, computed
//! once by the constructor from the operands. Operands are owned; dropping a
//! tree releases every signal and event reference it holds.

use crate::data_type::DataType;
use crate::error::NetlistError;
use crate::ids::{FuncId, ScopeId};
use crate::liveness::{EventRef, ExprRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use weft_common::{Ident, LogicVec};
use weft_source::Span;

/// Unary operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `!`
    LogicNot,
    /// `~`
    BitNot,
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `$abs`
    Abs,
    /// `&`
    RedAnd,
    /// `|`
    RedOr,
    /// `^`
    RedXor,
    /// `~&`
    RedNand,
    /// `~|`
    RedNor,
    /// `~^`
    RedXnor,
}

impl UnaryOp {
    /// Returns `true` for the reduction operators.
    pub fn is_reduction(self) -> bool {
        matches!(
            self,
            UnaryOp::RedAnd
                | UnaryOp::RedOr
                | UnaryOp::RedXor
                | UnaryOp::RedNand
                | UnaryOp::RedNor
                | UnaryOp::RedXnor
        )
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::LogicNot => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Abs => "$abs",
            UnaryOp::RedAnd => "&",
            UnaryOp::RedOr => "|",
            UnaryOp::RedXor => "^",
            UnaryOp::RedNand => "~&",
            UnaryOp::RedNor => "~|",
            UnaryOp::RedXnor => "~^",
        };
        f.write_str(s)
    }
}

/// How a binary operator sizes its result.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryClass {
    /// Arithmetic: max width, signed if both operands are.
    Arith,
    /// Bitwise: max width, signed if both operands are.
    Bits,
    /// Shift: the left operand's width and sign.
    Shift,
    /// Relational/equality: one unsigned bit.
    Compare,
    /// `&&`, `||`: one unsigned bit.
    Logical,
}

/// Binary operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    And,
    Or,
    Xor,
    Xnor,
    Shl,
    Shr,
    AShl,
    AShr,
    Eq,
    Ne,
    CaseEq,
    CaseNe,
    Lt,
    Le,
    Gt,
    Ge,
    LogicAnd,
    LogicOr,
}

impl BinaryOp {
    /// The sizing class.
    pub fn class(self) -> BinaryClass {
        use BinaryOp::*;
        match self {
            Add | Sub | Mul | Div | Mod | Pow => BinaryClass::Arith,
            And | Or | Xor | Xnor => BinaryClass::Bits,
            Shl | Shr | AShl | AShr => BinaryClass::Shift,
            Eq | Ne | CaseEq | CaseNe | Lt | Le | Gt | Ge => BinaryClass::Compare,
            LogicAnd | LogicOr => BinaryClass::Logical,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;
        let s = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            And => "&",
            Or => "|",
            Xor => "^",
            Xnor => "~^",
            Shl => "<<",
            Shr => ">>",
            AShl => "<<<",
            AShr => ">>>",
            Eq => "==",
            Ne => "!=",
            CaseEq => "===",
            CaseNe => "!==",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            LogicAnd => "&&",
            LogicOr => "||",
        };
        f.write_str(s)
    }
}

/// The shape of an expression node.
#[derive(Clone, Debug)]
pub enum ExprKind {
    /// A literal bit vector.
    Const(LogicVec),
    /// A real literal.
    Real(f64),
    /// A named parameter with its elaborated value.
    Param {
        /// Declaring scope.
        scope: ScopeId,
        /// Parameter name.
        name: Ident,
        /// Value.
        value: LogicVec,
    },
    /// A signal read, optionally of one memory word.
    Signal {
        /// The read, holding one `eref` on the signal.
        sig: ExprRef,
        /// Word index for memories.
        word: Option<Box<NetExpr>>,
    },
    /// A named event, as in `@(e)`.
    Event(EventRef),
    /// A scope name, as an argument to a system task.
    Scope(ScopeId),
    /// A unary operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<NetExpr>,
    },
    /// A binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<NetExpr>,
        /// Right operand.
        right: Box<NetExpr>,
    },
    /// `cond ? if_true : if_false`.
    Ternary {
        /// Condition.
        cond: Box<NetExpr>,
        /// Value when true.
        if_true: Box<NetExpr>,
        /// Value when false.
        if_false: Box<NetExpr>,
    },
    /// A user function call.
    UFunc {
        /// The function called.
        func: FuncId,
        /// The function's result variable.
        result: Option<Box<NetExpr>>,
        /// Arguments.
        args: Vec<NetExpr>,
    },
    /// A system function call such as `$time`.
    SFunc {
        /// Name including the `$`.
        name: String,
        /// Arguments.
        args: Vec<NetExpr>,
    },
}

/// An expression node.
///
/// Cloning a tree takes fresh references on every signal and event in it.
#[derive(Clone, Debug)]
pub struct NetExpr {
    kind: ExprKind,
    width: u32,
    signed: bool,
    data_type: DataType,
    span: Span,
}

impl NetExpr {
    fn make(kind: ExprKind, width: u32, signed: bool, data_type: DataType) -> Self {
        Self {
            kind,
            width,
            signed,
            data_type,
            span: Span::DUMMY,
        }
    }

    fn const_type(value: &LogicVec) -> DataType {
        if value.width() == 0 || !value.is_defined() {
            DataType::Logic
        } else {
            DataType::Bool
        }
    }

    /// A literal. Fully defined values are 2-state.
    pub fn constant(value: LogicVec, signed: bool) -> Self {
        let width = value.width();
        let data_type = Self::const_type(&value);
        Self::make(ExprKind::Const(value), width, signed, data_type)
    }

    /// A real literal.
    pub fn real(value: f64) -> Self {
        Self::make(ExprKind::Real(value), 1, true, DataType::Real)
    }

    /// A parameter reference.
    pub fn param(scope: ScopeId, name: Ident, value: LogicVec, signed: bool) -> Self {
        let width = value.width();
        let data_type = Self::const_type(&value);
        Self::make(
            ExprKind::Param { scope, name, value },
            width,
            signed,
            data_type,
        )
    }

    pub(crate) fn signal(
        sig: ExprRef,
        word: Option<NetExpr>,
        width: u32,
        signed: bool,
        data_type: DataType,
    ) -> Self {
        Self::make(
            ExprKind::Signal {
                sig,
                word: word.map(Box::new),
            },
            width,
            signed,
            data_type,
        )
    }

    pub(crate) fn event(event: EventRef) -> Self {
        Self::make(ExprKind::Event(event), 0, false, DataType::NoType)
    }

    /// A scope reference.
    pub fn scope(scope: ScopeId) -> Self {
        Self::make(ExprKind::Scope(scope), 0, false, DataType::NoType)
    }

    /// A unary operation.
    pub fn unary(op: UnaryOp, operand: NetExpr) -> Self {
        let one_bit = op == UnaryOp::LogicNot || op.is_reduction();
        let width = if one_bit { 1 } else { operand.width };
        let signed = matches!(op, UnaryOp::Neg | UnaryOp::Plus | UnaryOp::Abs) && operand.signed;
        let data_type = match operand.data_type {
            DataType::Bool if one_bit => DataType::Bool,
            _ if one_bit => DataType::Logic,
            t => t,
        };
        Self::make(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            width,
            signed,
            data_type,
        )
    }

    /// A binary operation.
    ///
    /// Arithmetic and bitwise operators fail if the operand types have no
    /// common type.
    pub fn binary(op: BinaryOp, left: NetExpr, right: NetExpr) -> Result<Self, NetlistError> {
        let (width, signed) = match op.class() {
            BinaryClass::Arith | BinaryClass::Bits => {
                (left.width.max(right.width), left.signed && right.signed)
            }
            BinaryClass::Shift => (left.width, left.signed),
            BinaryClass::Compare | BinaryClass::Logical => (1, false),
        };
        let data_type = match op.class() {
            BinaryClass::Compare | BinaryClass::Logical => {
                if left.data_type == DataType::Bool && right.data_type == DataType::Bool {
                    DataType::Bool
                } else {
                    DataType::Logic
                }
            }
            BinaryClass::Shift => left.data_type,
            BinaryClass::Arith | BinaryClass::Bits => {
                match DataType::reconcile(left.data_type, right.data_type) {
                    Some(t) => t,
                    None => {
                        log::error!(
                            "internal error: unexpected operand types for `{op}`: {} and {}",
                            left.data_type,
                            right.data_type
                        );
                        return Err(NetlistError::OperandClash {
                            op,
                            left: left.data_type,
                            right: right.data_type,
                            span: left.span,
                        });
                    }
                }
            }
        };
        Ok(Self::make(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            width,
            signed,
            data_type,
        ))
    }

    /// `cond ? if_true : if_false`.
    ///
    /// Fails if the branch types cannot be reconciled; that means elaboration
    /// produced an ill-typed tree.
    pub fn ternary(cond: NetExpr, if_true: NetExpr, if_false: NetExpr) -> Result<Self, NetlistError> {
        let Some(data_type) = DataType::reconcile(if_true.data_type, if_false.data_type) else {
            log::error!(
                "internal error: unexpected ?: type clash: true={}, false={}",
                if_true.data_type,
                if_false.data_type
            );
            return Err(NetlistError::TypeClash {
                if_true: if_true.data_type,
                if_false: if_false.data_type,
                span: cond.span,
            });
        };
        let width = if_true.width.max(if_false.width);
        let signed = cond.signed && if_true.signed && if_false.signed;
        Ok(Self::make(
            ExprKind::Ternary {
                cond: Box::new(cond),
                if_true: Box::new(if_true),
                if_false: Box::new(if_false),
            },
            width,
            signed,
            data_type,
        ))
    }

    /// A user function call. The result variable decides width and type.
    pub fn ufunc(func: FuncId, result: Option<NetExpr>, args: Vec<NetExpr>) -> Self {
        let (width, signed, data_type) = match &result {
            Some(r) => (r.width, r.signed, r.data_type),
            None => (0, false, DataType::Void),
        };
        Self::make(
            ExprKind::UFunc {
                func,
                result: result.map(Box::new),
                args,
            },
            width,
            signed,
            data_type,
        )
    }

    /// A system function call with a known result shape.
    pub fn sfunc(name: impl Into<String>, width: u32, data_type: DataType, args: Vec<NetExpr>) -> Self {
        Self::make(
            ExprKind::SFunc {
                name: name.into(),
                args,
            },
            width,
            false,
            data_type,
        )
    }

    /// Attaches a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The node's shape.
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Result width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Overrides the result width once the context size is known.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Signedness of the result.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Overrides signedness (`$signed`, `$unsigned`).
    pub fn cast_signed(&mut self, signed: bool) {
        self.signed = signed;
    }

    /// Value type of the result.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Source location.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The value of a literal or parameter.
    pub fn const_value(&self) -> Option<&LogicVec> {
        match &self.kind {
            ExprKind::Const(v) | ExprKind::Param { value: v, .. } => Some(v),
            _ => None,
        }
    }

    /// The value of a real literal.
    pub fn real_value(&self) -> Option<f64> {
        match self.kind {
            ExprKind::Real(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_common::Logic;

    fn lit(width: u32, value: u64) -> NetExpr {
        NetExpr::constant(LogicVec::from_u64(value, width), false)
    }

    fn signed_lit(width: u32, value: u64) -> NetExpr {
        NetExpr::constant(LogicVec::from_u64(value, width), true)
    }

    #[test]
    fn constant_types() {
        assert_eq!(lit(4, 3).data_type(), DataType::Bool);
        assert_eq!(lit(4, 3).width(), 4);
        let xs = NetExpr::constant(LogicVec::filled(Logic::X, 2), false);
        assert_eq!(xs.data_type(), DataType::Logic);
        let empty = NetExpr::constant(LogicVec::new(0), false);
        assert_eq!(empty.data_type(), DataType::Logic);
    }

    #[test]
    fn bitwise_takes_max_width() {
        let e = NetExpr::binary(BinaryOp::And, lit(4, 1), lit(9, 2)).unwrap();
        assert_eq!(e.width(), 9);
        assert!(!e.is_signed());
        let s = NetExpr::binary(BinaryOp::Add, signed_lit(4, 1), signed_lit(8, 1)).unwrap();
        assert!(s.is_signed());
        assert_eq!(s.width(), 8);
    }

    #[test]
    fn compare_and_logical_are_one_bit() {
        for op in [BinaryOp::Lt, BinaryOp::CaseEq, BinaryOp::LogicAnd] {
            let e = NetExpr::binary(op, signed_lit(8, 1), signed_lit(8, 2)).unwrap();
            assert_eq!(e.width(), 1, "{op}");
            assert!(!e.is_signed());
        }
    }

    #[test]
    fn shift_follows_left_operand() {
        let e = NetExpr::binary(BinaryOp::AShr, signed_lit(8, 1), lit(3, 2)).unwrap();
        assert_eq!(e.width(), 8);
        assert!(e.is_signed());
    }

    #[test]
    fn unary_rules() {
        let not = NetExpr::unary(UnaryOp::LogicNot, signed_lit(8, 0));
        assert_eq!(not.width(), 1);
        assert!(!not.is_signed());
        let red = NetExpr::unary(UnaryOp::RedXor, lit(8, 5));
        assert_eq!(red.width(), 1);
        let neg = NetExpr::unary(UnaryOp::Neg, signed_lit(8, 3));
        assert_eq!(neg.width(), 8);
        assert!(neg.is_signed());
        let abs = NetExpr::unary(UnaryOp::Abs, signed_lit(8, 3));
        assert!(abs.is_signed());
        let inv = NetExpr::unary(UnaryOp::BitNot, signed_lit(8, 3));
        assert!(!inv.is_signed());
        assert_eq!(inv.width(), 8);
    }

    #[test]
    fn one_bit_unary_ops_are_bit_typed() {
        let not_real = NetExpr::unary(UnaryOp::LogicNot, NetExpr::real(2.5));
        assert_eq!(not_real.data_type(), DataType::Logic);
        let red = NetExpr::unary(UnaryOp::RedOr, lit(8, 5));
        assert_eq!(red.data_type(), DataType::Bool);
        let xs = NetExpr::constant(LogicVec::filled(Logic::X, 4), false);
        assert_eq!(NetExpr::unary(UnaryOp::RedAnd, xs).data_type(), DataType::Logic);
        let neg = NetExpr::unary(UnaryOp::Neg, NetExpr::real(2.5));
        assert_eq!(neg.data_type(), DataType::Real);
    }

    #[test]
    fn arithmetic_rejects_unrelated_operand_types() {
        let mut void = NetExpr::real(1.0);
        void.data_type = DataType::Void;
        match NetExpr::binary(BinaryOp::Add, void, NetExpr::real(1.0)) {
            Err(NetlistError::OperandClash { op, left, right, .. }) => {
                assert_eq!(op, BinaryOp::Add);
                assert_eq!((left, right), (DataType::Void, DataType::Real));
            }
            other => panic!("expected OperandClash, got {other:?}"),
        }
        let mixed = NetExpr::binary(BinaryOp::Mul, NetExpr::real(1.0), lit(4, 2)).unwrap();
        assert_eq!(mixed.data_type(), DataType::Real);
    }

    #[test]
    fn ternary_width_and_sign() {
        let t = NetExpr::ternary(signed_lit(1, 1), signed_lit(4, 1), signed_lit(6, 2)).unwrap();
        assert_eq!(t.width(), 6);
        assert!(t.is_signed());
        let u = NetExpr::ternary(lit(1, 1), signed_lit(4, 1), signed_lit(6, 2)).unwrap();
        assert!(!u.is_signed());
    }

    #[test]
    fn ternary_type_reconciliation() {
        let xs = NetExpr::constant(LogicVec::filled(Logic::X, 4), false);
        let t = NetExpr::ternary(lit(1, 1), xs, lit(4, 1)).unwrap();
        assert_eq!(t.data_type(), DataType::Logic);
        let r = NetExpr::ternary(lit(1, 1), NetExpr::real(1.0), lit(4, 1)).unwrap();
        assert_eq!(r.data_type(), DataType::Real);
    }

    #[test]
    fn ternary_type_clash_is_error() {
        let void = NetExpr::sfunc("$void", 0, DataType::Void, Vec::new());
        let err = NetExpr::ternary(lit(1, 1), void, NetExpr::real(0.5)).unwrap_err();
        assert!(matches!(
            err,
            NetlistError::TypeClash {
                if_true: DataType::Void,
                if_false: DataType::Real,
                ..
            }
        ));
    }

    #[test]
    fn ufunc_takes_result_shape() {
        let call = NetExpr::ufunc(FuncId::from_raw(0), Some(signed_lit(16, 0)), vec![lit(1, 0)]);
        assert_eq!(call.width(), 16);
        assert!(call.is_signed());
        let void = NetExpr::ufunc(FuncId::from_raw(0), None, Vec::new());
        assert_eq!(void.data_type(), DataType::Void);
    }

    #[test]
    fn const_accessors() {
        assert_eq!(lit(4, 9).const_value().and_then(|v| v.to_u64()), Some(9));
        assert_eq!(NetExpr::real(2.5).real_value(), Some(2.5));
        assert!(NetExpr::real(2.5).const_value().is_none());
    }

    #[test]
    fn parameter_carries_value_and_casts() {
        let mut d = crate::design::Design::new();
        let top = d.new_scope(None, "top", crate::scope::ScopeKind::Module);
        let name = d.intern("WIDTH");
        let mut p = NetExpr::param(top, name, LogicVec::from_u64(8, 32), false);
        assert_eq!(p.width(), 32);
        assert_eq!(p.const_value().and_then(|v| v.to_u64()), Some(8));
        assert!(matches!(p.kind(), ExprKind::Param { scope, .. } if *scope == top));

        p.set_width(4);
        p.cast_signed(true);
        assert_eq!(p.width(), 4);
        assert!(p.is_signed());
    }
}
