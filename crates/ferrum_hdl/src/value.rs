//! Expression trees.
//!
//! [`Value`] is the closed set of expressions a statement may read or write.
//! Operator nodes carry the result [`Shape`] the front-end computed for them,
//! so the backend never re-derives arithmetic width rules.

use crate::design::Design;
use crate::shape::Shape;
use crate::signal::{SignalId, SrcLoc};
use ferrum_common::LogicVec;
use serde::{Deserialize, Serialize};

/// A constant bit-vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Const {
    /// The bits, index 0 least significant. The width of the constant is the
    /// width of this vector.
    pub bits: LogicVec,
    /// Whether the constant is interpreted as two's complement.
    #[serde(default)]
    pub signed: bool,
}

impl Const {
    /// Creates a constant holding `value` truncated to `shape`.
    pub fn new(value: i64, shape: Shape) -> Self {
        Self {
            bits: LogicVec::from_i64(value, shape.width),
            signed: shape.signed,
        }
    }

    /// Returns the constant's shape.
    pub fn shape(&self) -> Shape {
        Shape {
            width: self.bits.width(),
            signed: self.signed,
        }
    }

    /// Returns the bits re-rendered at `shape`.
    ///
    /// Widening sign-extends when this constant is signed and zero-extends
    /// otherwise; narrowing truncates.
    pub fn resized(&self, shape: Shape) -> Const {
        Const {
            bits: self.bits.resize(shape.width, self.signed),
            signed: shape.signed,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// Bitwise inversion (`~`).
    Not,
    /// Arithmetic negation (`-`).
    Neg,
    /// Non-zero test, yielding one bit.
    Bool,
    /// AND of all bits.
    ReduceAnd,
    /// OR of all bits.
    ReduceOr,
    /// XOR of all bits.
    ReduceXor,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `&`
    And,
    /// `^`
    Xor,
    /// `|`
    Or,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// An expression over signals and constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// A literal.
    Const(Const),
    /// A reference to a signal of the design.
    Signal(SignalId),
    /// Bits `start..end` of `value`.
    Slice {
        /// The sliced expression.
        value: Box<Value>,
        /// First bit, inclusive.
        start: u32,
        /// Last bit, exclusive.
        end: u32,
    },
    /// Concatenation; the first part occupies the least significant bits.
    Cat(Vec<Value>),
    /// `value` repeated `count` times.
    Repl {
        /// The repeated expression.
        value: Box<Value>,
        /// Number of copies.
        count: u32,
    },
    /// A unary operator.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Value>,
        /// Declared result shape.
        shape: Shape,
        /// Where the expression was written.
        #[serde(default)]
        src: Option<SrcLoc>,
    },
    /// A binary operator.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Value>,
        /// Right operand.
        rhs: Box<Value>,
        /// Declared result shape.
        shape: Shape,
        /// Where the expression was written.
        #[serde(default)]
        src: Option<SrcLoc>,
    },
    /// `if_true` when `sel` is non-zero, else `if_false`.
    Mux {
        /// Selector.
        sel: Box<Value>,
        /// Value when the selector is non-zero.
        if_true: Box<Value>,
        /// Value when the selector is zero.
        if_false: Box<Value>,
        /// Declared result shape.
        shape: Shape,
        /// Where the expression was written.
        #[serde(default)]
        src: Option<SrcLoc>,
    },
    /// `width` bits of `value` starting at the run-time `offset`.
    Part {
        /// The selected-from expression.
        value: Box<Value>,
        /// Dynamic bit offset.
        offset: Box<Value>,
        /// Width of the selection.
        width: u32,
    },
    /// The element of `elems` selected by the run-time `index`.
    ArrayProxy {
        /// Candidate elements.
        elems: Vec<Value>,
        /// Dynamic element index.
        index: Box<Value>,
        /// Declared result shape.
        shape: Shape,
    },
}

impl Value {
    /// A constant of the given shape.
    pub fn constant(value: i64, shape: Shape) -> Self {
        Value::Const(Const::new(value, shape))
    }

    /// A reference to a signal.
    pub fn signal(id: SignalId) -> Self {
        Value::Signal(id)
    }

    /// Bits `start..end` of `value`.
    pub fn slice(value: Value, start: u32, end: u32) -> Self {
        Value::Slice {
            value: Box::new(value),
            start,
            end,
        }
    }

    /// Bit `index` of `value`.
    pub fn bit(value: Value, index: u32) -> Self {
        Value::slice(value, index, index + 1)
    }

    /// Concatenation of `parts`, least significant first.
    pub fn cat(parts: Vec<Value>) -> Self {
        Value::Cat(parts)
    }

    /// `value` repeated `count` times.
    pub fn repl(value: Value, count: u32) -> Self {
        Value::Repl {
            value: Box::new(value),
            count,
        }
    }

    /// A unary operator with the given result shape.
    pub fn unary(op: UnaryOp, operand: Value, shape: Shape) -> Self {
        Value::Unary {
            op,
            operand: Box::new(operand),
            shape,
            src: None,
        }
    }

    /// A binary operator with the given result shape.
    pub fn binary(op: BinaryOp, lhs: Value, rhs: Value, shape: Shape) -> Self {
        Value::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            shape,
            src: None,
        }
    }

    /// A two-way multiplexer with the given result shape.
    pub fn mux(sel: Value, if_true: Value, if_false: Value, shape: Shape) -> Self {
        Value::Mux {
            sel: Box::new(sel),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
            shape,
            src: None,
        }
    }

    /// Attaches a source location to an operator node.
    ///
    /// Non-operator variants carry no location and are returned unchanged.
    pub fn with_src(mut self, loc: SrcLoc) -> Self {
        match &mut self {
            Value::Unary { src, .. } | Value::Binary { src, .. } | Value::Mux { src, .. } => {
                *src = Some(loc);
            }
            _ => {}
        }
        self
    }

    /// Returns the source location of an operator node.
    pub fn src(&self) -> Option<&SrcLoc> {
        match self {
            Value::Unary { src, .. } | Value::Binary { src, .. } | Value::Mux { src, .. } => {
                src.as_ref()
            }
            _ => None,
        }
    }

    /// Computes the shape of this expression.
    ///
    /// # Panics
    ///
    /// Panics if a referenced signal is not part of `design`.
    pub fn shape(&self, design: &Design) -> Shape {
        match self {
            Value::Const(c) => c.shape(),
            Value::Signal(id) => design.signal(*id).shape,
            Value::Slice { start, end, .. } => Shape::unsigned(end.saturating_sub(*start)),
            Value::Cat(parts) => Shape::unsigned(
                parts
                    .iter()
                    .fold(0u32, |total, p| total.saturating_add(p.shape(design).width)),
            ),
            Value::Repl { value, count } => {
                Shape::unsigned(value.shape(design).width.saturating_mul(*count))
            }
            Value::Unary { shape, .. }
            | Value::Binary { shape, .. }
            | Value::Mux { shape, .. }
            | Value::ArrayProxy { shape, .. } => *shape,
            Value::Part { width, .. } => Shape::unsigned(*width),
        }
    }

    /// Calls `f` on this expression and every sub-expression, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&Value)) {
        f(self);
        match self {
            Value::Const(_) | Value::Signal(_) => {}
            Value::Slice { value, .. } | Value::Repl { value, .. } => value.walk(f),
            Value::Cat(parts) => parts.iter().for_each(|p| p.walk(f)),
            Value::Unary { operand, .. } => operand.walk(f),
            Value::Binary { lhs, rhs, .. } => {
                lhs.walk(f);
                rhs.walk(f);
            }
            Value::Mux {
                sel,
                if_true,
                if_false,
                ..
            } => {
                sel.walk(f);
                if_true.walk(f);
                if_false.walk(f);
            }
            Value::Part { value, offset, .. } => {
                value.walk(f);
                offset.walk(f);
            }
            Value::ArrayProxy { elems, index, .. } => {
                elems.iter().for_each(|e| e.walk(f));
                index.walk(f);
            }
        }
    }
}

impl From<SignalId> for Value {
    fn from(id: SignalId) -> Self {
        Value::Signal(id)
    }
}

impl From<Const> for Value {
    fn from(c: Const) -> Self {
        Value::Const(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;

    fn design_with(width: u32) -> (Design, SignalId) {
        let mut design = Design::new();
        let id = design.add_signal(Signal::new("a", Shape::signed(width)));
        (design, id)
    }

    #[test]
    fn const_new_truncates() {
        let c = Const::new(0x1ff, Shape::unsigned(8));
        assert_eq!(c.bits.to_string(), "11111111");
        assert_eq!(c.shape(), Shape::unsigned(8));
    }

    #[test]
    fn const_resized_sign_extends_signed() {
        let c = Const::new(-2, Shape::signed(3));
        assert_eq!(c.resized(Shape::signed(6)).bits.to_string(), "111110");
        let u = Const::new(6, Shape::unsigned(3));
        assert_eq!(u.resized(Shape::signed(6)).bits.to_string(), "000110");
    }

    #[test]
    fn shape_of_structural_variants() {
        let (design, a) = design_with(4);
        let sig = Value::signal(a);
        assert_eq!(sig.shape(&design), Shape::signed(4));
        assert_eq!(
            Value::slice(sig.clone(), 1, 3).shape(&design),
            Shape::unsigned(2)
        );
        assert_eq!(
            Value::cat(vec![sig.clone(), Value::constant(0, Shape::unsigned(2))]).shape(&design),
            Shape::unsigned(6)
        );
        assert_eq!(Value::repl(sig, 3).shape(&design), Shape::unsigned(12));
    }

    #[test]
    fn shape_of_operators_is_declared() {
        let (design, a) = design_with(4);
        let add = Value::binary(BinaryOp::Add, a.into(), a.into(), Shape::signed(5));
        assert_eq!(add.shape(&design), Shape::signed(5));
        let b = Value::unary(UnaryOp::Bool, a.into(), Shape::unsigned(1));
        assert_eq!(b.shape(&design), Shape::unsigned(1));
    }

    #[test]
    fn with_src_only_touches_operators() {
        let loc = SrcLoc::new("top.fe", 3);
        let op = Value::unary(UnaryOp::Not, Value::constant(1, Shape::unsigned(1)), Shape::unsigned(1))
            .with_src(loc.clone());
        assert_eq!(op.src(), Some(&loc));
        let c = Value::constant(1, Shape::unsigned(1)).with_src(loc);
        assert_eq!(c.src(), None);
    }

    #[test]
    fn walk_visits_every_node() {
        let (_, a) = design_with(4);
        let v = Value::mux(
            Value::bit(a.into(), 0),
            Value::cat(vec![a.into(), a.into()]),
            Value::constant(0, Shape::unsigned(8)),
            Shape::unsigned(8),
        );
        let mut count = 0;
        v.walk(&mut |_| count += 1);
        // mux, slice, signal, cat, signal, signal, const
        assert_eq!(count, 7);
    }

    #[test]
    fn json_form_is_tagged() {
        let v = Value::binary(
            BinaryOp::Add,
            Value::signal(SignalId::from_raw(0)),
            Value::constant(1, Shape::unsigned(2)),
            Shape::unsigned(3),
        );
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["binary"]["op"], "add");
        assert_eq!(json["binary"]["lhs"]["signal"], 0);
        assert_eq!(json["binary"]["rhs"]["const"]["bits"], "01");
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }
}
