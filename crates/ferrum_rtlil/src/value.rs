//! Lowering of expressions to RTLIL signal specifications.
//!
//! [`ValueCompilerState`] holds everything one module needs while its
//! expressions are lowered: the open [`ModuleBuilder`], the wires already
//! declared for each signal, which signals are driven, and which are ports.
//! [`RhsCompiler`] turns any readable [`Value`] into a sigspec, emitting cells
//! for operators; [`LhsCompiler`] resolves assignment targets to their
//! next-state wires.

use crate::builder::ModuleBuilder;
use crate::error::{ConvertError, ConvertResult};
use ferrum_hdl::{
    AttrValue, BinaryOp, Const, Design, PortDirection, Shape, SignalId, UnaryOp, Value,
};
use std::collections::HashMap;

/// Per-module lowering state. Created for one fragment and dropped once its
/// module is closed.
#[derive(Debug)]
pub struct ValueCompilerState<'d> {
    rtlil: ModuleBuilder,
    design: &'d Design,
    wires: HashMap<SignalId, (String, Option<String>)>,
    driven: HashMap<SignalId, bool>,
    ports: HashMap<SignalId, (u32, PortDirection)>,
    sub_name: Option<String>,
}

impl<'d> ValueCompilerState<'d> {
    /// Starts lowering into `rtlil`.
    pub fn new(rtlil: ModuleBuilder, design: &'d Design) -> Self {
        Self {
            rtlil,
            design,
            wires: HashMap::new(),
            driven: HashMap::new(),
            ports: HashMap::new(),
            sub_name: None,
        }
    }

    /// The design the lowered values belong to.
    pub fn design(&self) -> &'d Design {
        self.design
    }

    /// The module being built.
    pub fn module(&mut self) -> &mut ModuleBuilder {
        &mut self.rtlil
    }

    /// Gives the module back once lowering is done.
    pub fn into_module(self) -> ModuleBuilder {
        self.rtlil
    }

    /// Marks `signal` as driven by this module, synchronously or not.
    ///
    /// Must happen before the signal is first resolved, since only driven
    /// signals get a next-state wire.
    pub fn add_driven(&mut self, signal: SignalId, sync: bool) {
        self.driven.insert(signal, sync);
    }

    /// Registers `signal` as a port. Port numbers follow registration order
    /// starting at 0.
    pub fn add_port(&mut self, signal: SignalId, direction: PortDirection) {
        let next_id = self.ports.len() as u32;
        self.ports.entry(signal).or_insert((next_id, direction));
    }

    /// Returns the current and next-state wires of `signal`, declaring them
    /// on first use.
    ///
    /// A fresh wire is named after the signal, prefixed by `prefix` when one
    /// is given. Driven signals also get a `$next` wire.
    pub fn resolve(&mut self, signal: SignalId, prefix: Option<&str>) -> (String, Option<String>) {
        if let Some(wires) = self.wires.get(&signal) {
            return wires.clone();
        }
        let design = self.design;
        let sig = design.signal(signal);
        let port = self.ports.get(&signal).copied();
        let wire_name = match prefix {
            Some(prefix) => format!("{prefix}_{}", sig.name),
            None => sig.name.clone(),
        };
        for (name, value) in &sig.attrs {
            self.rtlil.attribute(name, value);
        }
        let curr = self
            .rtlil
            .wire(sig.width(), port, Some(&wire_name), sig.src.as_ref());
        let next = if self.driven.contains_key(&signal) {
            let next_name = format!("{curr}$next");
            Some(
                self.rtlil
                    .wire(sig.width(), None, Some(&next_name), sig.src.as_ref()),
            )
        } else {
            None
        };
        tracing::trace!(signal = %sig.name, wire = %curr, driven = next.is_some(), "declared wire");
        self.wires.insert(signal, (curr.clone(), next.clone()));
        (curr, next)
    }

    /// Returns the current-state wire of `signal`.
    pub fn resolve_curr(&mut self, signal: SignalId, prefix: Option<&str>) -> String {
        self.resolve(signal, prefix).0
    }

    /// Runs `f` with wires first declared inside it named after the child
    /// module `sub_name`.
    pub fn hierarchy<R>(&mut self, sub_name: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.sub_name = Some(sub_name.to_string());
        let result = f(self);
        self.sub_name = None;
        result
    }

    /// A compiler for readable values.
    pub fn rhs(&mut self) -> RhsCompiler<'_, 'd> {
        RhsCompiler { s: self }
    }

    /// A compiler for assignment targets.
    pub fn lhs(&mut self) -> LhsCompiler<'_, 'd> {
        LhsCompiler { s: self }
    }
}

/// Lowers readable values.
#[derive(Debug)]
pub struct RhsCompiler<'s, 'd> {
    s: &'s mut ValueCompilerState<'d>,
}

impl RhsCompiler<'_, '_> {
    /// Lowers `value` to a sigspec, emitting cells for any operators.
    pub fn compile(&mut self, value: &Value) -> ConvertResult<String> {
        match value {
            Value::Const(c) => Ok(render_const(c)),
            Value::Signal(id) => {
                let prefix = self.s.sub_name.clone();
                Ok(self.s.resolve_curr(*id, prefix.as_deref()))
            }
            Value::Slice { value, start, end } => {
                let width = value.shape(self.s.design).width;
                let inner = self.compile(value)?;
                Ok(if *start == 0 && *end == width {
                    inner
                } else if *end == *start + 1 {
                    format!("{inner} [{start}]")
                } else if end > start {
                    format!("{inner} [{}:{start}]", end - 1)
                } else {
                    "{ }".to_string()
                })
            }
            Value::Cat(parts) => {
                let mut wires = parts
                    .iter()
                    .map(|part| self.compile(part))
                    .collect::<ConvertResult<Vec<_>>>()?;
                wires.reverse();
                Ok(brace_group(&wires))
            }
            Value::Repl { value, count } => {
                let wire = self.compile(value)?;
                if value.shape(self.s.design).width == 0 {
                    return Ok(brace_group(&[]));
                }
                let copies = vec![wire; *count as usize];
                Ok(brace_group(&copies))
            }
            Value::Unary {
                op,
                operand,
                shape,
                src,
            } => {
                let arg_shape = operand.shape(self.s.design);
                let arg = self.compile(operand)?;
                let res = self.s.rtlil.wire(shape.width, None, None, None);
                self.s.rtlil.cell(
                    unary_cell_kind(*op),
                    None,
                    &[
                        ("A_SIGNED", AttrValue::from(arg_shape.signed)),
                        ("A_WIDTH", AttrValue::from(arg_shape.width)),
                        ("Y_WIDTH", AttrValue::from(shape.width)),
                    ],
                    &[("\\A", arg.as_str()), ("\\Y", res.as_str())],
                    src.as_ref(),
                );
                Ok(res)
            }
            Value::Binary {
                op,
                lhs,
                rhs,
                shape,
                src,
            } => {
                let mut lhs_shape = lhs.shape(self.s.design);
                let mut rhs_shape = rhs.shape(self.s.design);
                let (lhs_wire, rhs_wire) = if lhs_shape.signed == rhs_shape.signed {
                    (self.compile(lhs)?, self.compile(rhs)?)
                } else {
                    let common = Shape::signed(lhs_shape.width.max(rhs_shape.width));
                    lhs_shape = common;
                    rhs_shape = common;
                    (
                        self.match_shape(lhs, common)?,
                        self.match_shape(rhs, common)?,
                    )
                };
                let res = self.s.rtlil.wire(shape.width, None, None, None);
                self.s.rtlil.cell(
                    binary_cell_kind(*op),
                    None,
                    &[
                        ("A_SIGNED", AttrValue::from(lhs_shape.signed)),
                        ("A_WIDTH", AttrValue::from(lhs_shape.width)),
                        ("B_SIGNED", AttrValue::from(rhs_shape.signed)),
                        ("B_WIDTH", AttrValue::from(rhs_shape.width)),
                        ("Y_WIDTH", AttrValue::from(shape.width)),
                    ],
                    &[
                        ("\\A", lhs_wire.as_str()),
                        ("\\B", rhs_wire.as_str()),
                        ("\\Y", res.as_str()),
                    ],
                    src.as_ref(),
                );
                Ok(res)
            }
            Value::Mux {
                sel,
                if_true,
                if_false,
                shape,
                src,
            } => {
                let true_shape = if_true.shape(self.s.design);
                let false_shape = if_false.shape(self.s.design);
                let width = shape.width.max(true_shape.width).max(false_shape.width);
                let true_wire = self.match_shape(
                    if_true,
                    Shape {
                        width,
                        signed: true_shape.signed,
                    },
                )?;
                let false_wire = self.match_shape(
                    if_false,
                    Shape {
                        width,
                        signed: false_shape.signed,
                    },
                )?;
                let sel_wire = self.select_bit(sel)?;
                let res = self.s.rtlil.wire(width, None, None, None);
                self.s.rtlil.cell(
                    "$mux",
                    None,
                    &[("WIDTH", AttrValue::from(width))],
                    &[
                        ("\\A", false_wire.as_str()),
                        ("\\B", true_wire.as_str()),
                        ("\\S", sel_wire.as_str()),
                        ("\\Y", res.as_str()),
                    ],
                    src.as_ref(),
                );
                Ok(res)
            }
            Value::Part { .. } => Err(ConvertError::Unsupported("dynamic part-select")),
            Value::ArrayProxy { .. } => Err(ConvertError::Unsupported("array multiplexer")),
        }
    }

    /// Lowers `value` resized to `target`.
    ///
    /// Constants are re-rendered at the target shape. Narrower targets take a
    /// truncating slice; wider ones go through a `$pos` cell that extends
    /// according to the value's own signedness.
    pub fn match_shape(&mut self, value: &Value, target: Shape) -> ConvertResult<String> {
        if let Value::Const(c) = value {
            return Ok(render_const(&c.resized(target)));
        }
        let shape = value.shape(self.s.design);
        let wire = self.compile(value)?;
        if target.width == shape.width {
            Ok(wire)
        } else if target.width < shape.width {
            Ok(match target.width {
                0 => "{ }".to_string(),
                1 => format!("{wire} [0]"),
                width => format!("{wire} [{}:0]", width - 1),
            })
        } else {
            let res = self.s.rtlil.wire(target.width, None, None, None);
            self.s.rtlil.cell(
                "$pos",
                None,
                &[
                    ("A_SIGNED", AttrValue::from(shape.signed)),
                    ("A_WIDTH", AttrValue::from(shape.width)),
                    ("Y_WIDTH", AttrValue::from(target.width)),
                ],
                &[("\\A", wire.as_str()), ("\\Y", res.as_str())],
                value.src(),
            );
            Ok(res)
        }
    }

    /// Lowers a mux selector, reducing it to one bit if it is wider.
    fn select_bit(&mut self, sel: &Value) -> ConvertResult<String> {
        let shape = sel.shape(self.s.design);
        let wire = self.compile(sel)?;
        if shape.width == 1 {
            return Ok(wire);
        }
        let res = self.s.rtlil.wire(1, None, None, None);
        self.s.rtlil.cell(
            "$reduce_bool",
            None,
            &[
                ("A_SIGNED", AttrValue::from(shape.signed)),
                ("A_WIDTH", AttrValue::from(shape.width)),
                ("Y_WIDTH", AttrValue::Int(1)),
            ],
            &[("\\A", wire.as_str()), ("\\Y", res.as_str())],
            sel.src(),
        );
        Ok(res)
    }
}

/// Lowers assignment targets.
#[derive(Debug)]
pub struct LhsCompiler<'s, 'd> {
    s: &'s mut ValueCompilerState<'d>,
}

impl LhsCompiler<'_, '_> {
    /// Resolves `value` to the next-state wire it assigns.
    ///
    /// Only signals driven by the current module are valid targets.
    pub fn compile(&mut self, value: &Value) -> ConvertResult<String> {
        match value {
            Value::Signal(id) => {
                let prefix = self.s.sub_name.clone();
                match self.s.resolve(*id, prefix.as_deref()) {
                    (_, Some(next)) => Ok(next),
                    (_, None) => Err(ConvertError::UndrivenTarget {
                        name: self.s.design.signal(*id).name.clone(),
                    }),
                }
            }
            Value::Const(_) => Err(ConvertError::InvalidTarget("a constant")),
            Value::Slice { .. } => Err(ConvertError::InvalidTarget("a slice")),
            Value::Cat(_) => Err(ConvertError::InvalidTarget("a concatenation")),
            Value::Repl { .. } => Err(ConvertError::InvalidTarget("a replication")),
            Value::Unary { .. } | Value::Binary { .. } | Value::Mux { .. } => {
                Err(ConvertError::InvalidTarget("an operator"))
            }
            Value::Part { .. } => Err(ConvertError::Unsupported("dynamic part-select")),
            Value::ArrayProxy { .. } => Err(ConvertError::Unsupported("array multiplexer")),
        }
    }
}

/// Renders a sigspec concatenation. An empty group is the zero-width `{ }`.
fn brace_group(parts: &[String]) -> String {
    if parts.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {} }}", parts.join(" "))
    }
}

/// Renders a constant as `<width>'<bits>`, most significant bit first.
pub fn render_const(c: &Const) -> String {
    format!("{}'{}", c.bits.width(), c.bits)
}

/// The RTLIL cell implementing a unary operator.
pub fn unary_cell_kind(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Not => "$not",
        UnaryOp::Neg => "$neg",
        UnaryOp::Bool => "$reduce_bool",
        UnaryOp::ReduceAnd => "$reduce_and",
        UnaryOp::ReduceOr => "$reduce_or",
        UnaryOp::ReduceXor => "$reduce_xor",
    }
}

/// The RTLIL cell implementing a binary operator.
pub fn binary_cell_kind(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "$add",
        BinaryOp::Sub => "$sub",
        BinaryOp::Mul => "$mul",
        BinaryOp::Div => "$div",
        BinaryOp::Mod => "$mod",
        BinaryOp::Pow => "$pow",
        BinaryOp::Shl => "$sshl",
        BinaryOp::Shr => "$sshr",
        BinaryOp::And => "$and",
        BinaryOp::Xor => "$xor",
        BinaryOp::Or => "$or",
        BinaryOp::Eq => "$eq",
        BinaryOp::Ne => "$ne",
        BinaryOp::Lt => "$lt",
        BinaryOp::Le => "$le",
        BinaryOp::Gt => "$gt",
        BinaryOp::Ge => "$ge",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use ferrum_hdl::{Signal, SrcLoc};
    use pretty_assertions::assert_eq;

    struct Fixture {
        design: Design,
        a: SignalId,
        b: SignalId,
        s: SignalId,
    }

    fn fixture() -> Fixture {
        let mut design = Design::new();
        let a = design.add_signal(Signal::new("a", Shape::unsigned(4)));
        let b = design.add_signal(Signal::new("b", Shape::signed(6)));
        let s = design.add_signal(Signal::new("s", Shape::unsigned(2)));
        Fixture { design, a, b, s }
    }

    /// Lowers `value` in a fresh module and returns the sigspec and module text.
    fn lower(design: &Design, value: &Value) -> (ConvertResult<String>, String) {
        let mut builder = Builder::new("Ferrum");
        let module = builder.begin_module("top", &[]);
        let mut state = ValueCompilerState::new(module, design);
        let result = state.rhs().compile(value);
        builder.end_module(state.into_module());
        (result, builder.finish())
    }

    #[test]
    fn constants_are_padded() {
        let f = fixture();
        let (res, _) = lower(&f.design, &Value::constant(5, Shape::unsigned(8)));
        assert_eq!(res.unwrap(), "8'00000101");
        let (res, _) = lower(&f.design, &Value::constant(-1, Shape::signed(3)));
        assert_eq!(res.unwrap(), "3'111");
    }

    #[test]
    fn signal_declares_wire_once() {
        let f = fixture();
        let v = Value::cat(vec![f.a.into(), f.a.into()]);
        let (res, text) = lower(&f.design, &v);
        assert_eq!(res.unwrap(), "{ \\a \\a }");
        assert_eq!(text.matches("wire width 4 \\a").count(), 1);
    }

    #[test]
    fn cat_is_reversed() {
        let f = fixture();
        let v = Value::cat(vec![f.a.into(), f.s.into()]);
        let (res, _) = lower(&f.design, &v);
        assert_eq!(res.unwrap(), "{ \\s \\a }");
    }

    #[test]
    fn empty_cat_and_repl() {
        let f = fixture();
        let (cat, _) = lower(&f.design, &Value::cat(vec![]));
        assert_eq!(cat.unwrap(), "{ }");
        let (repl, _) = lower(&f.design, &Value::repl(f.a.into(), 0));
        assert_eq!(repl.unwrap(), "{ }");
    }

    #[test]
    fn whole_slice_is_identity() {
        let f = fixture();
        let (direct, _) = lower(&f.design, &Value::signal(f.a));
        let (sliced, text) = lower(&f.design, &Value::slice(f.a.into(), 0, 4));
        assert_eq!(direct.unwrap(), sliced.unwrap());
        assert!(!text.contains("cell"));
    }

    #[test]
    fn slice_syntax() {
        let f = fixture();
        let (bit, _) = lower(&f.design, &Value::bit(f.a.into(), 3));
        assert_eq!(bit.unwrap(), "\\a [3]");
        let (range, _) = lower(&f.design, &Value::slice(f.a.into(), 1, 3));
        assert_eq!(range.unwrap(), "\\a [2:1]");
    }

    #[test]
    fn repl_lowers_operand_once() {
        let f = fixture();
        let inner = Value::unary(UnaryOp::Not, f.s.into(), Shape::unsigned(2));
        let (res, text) = lower(&f.design, &Value::repl(inner, 3));
        assert_eq!(res.unwrap(), "{ $1 $1 $1 }");
        assert_eq!(text.matches("cell $not").count(), 1);
    }

    #[test]
    fn unary_cell_parameters() {
        let f = fixture();
        let v = Value::unary(UnaryOp::Neg, f.b.into(), Shape::signed(7))
            .with_src(SrcLoc::new("alu.fe", 12));
        let (res, text) = lower(&f.design, &v);
        assert_eq!(res.unwrap(), "$1");
        let expected = "\
attribute \\generator \"Ferrum\"
module \\top
  wire width 6 \\b
  wire width 7 $1
  attribute \\src \"alu.fe:12\"
  cell $neg $2
    parameter \\A_SIGNED 1
    parameter \\A_WIDTH 6
    parameter \\Y_WIDTH 7
    connect \\A \\b
    connect \\Y $1
  end
end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn binary_same_sign_is_direct() {
        let f = fixture();
        let v = Value::binary(BinaryOp::Add, f.a.into(), f.s.into(), Shape::unsigned(5));
        let (_, text) = lower(&f.design, &v);
        assert!(text.contains("cell $add"));
        assert!(text.contains("    parameter \\A_WIDTH 4\n"));
        assert!(text.contains("    parameter \\B_WIDTH 2\n"));
        assert!(!text.contains("$pos"));
    }

    #[test]
    fn binary_mixed_sign_widens_both_operands() {
        let f = fixture();
        let v = Value::binary(BinaryOp::Lt, f.a.into(), f.b.into(), Shape::unsigned(1));
        let (_, text) = lower(&f.design, &v);
        // `a` is extended to 6 bits; `b` already has the common width.
        assert_eq!(text.matches("cell $pos").count(), 1);
        assert!(text.contains("    parameter \\A_SIGNED 1\n    parameter \\A_WIDTH 6\n    parameter \\B_SIGNED 1\n    parameter \\B_WIDTH 6\n"));
    }

    #[test]
    fn binary_mixed_sign_rerenders_constants() {
        let f = fixture();
        let v = Value::binary(
            BinaryOp::Add,
            Value::constant(-1, Shape::signed(2)),
            f.a.into(),
            Shape::signed(6),
        );
        let (_, text) = lower(&f.design, &v);
        assert!(text.contains("connect \\A 4'1111"));
    }

    #[test]
    fn mux_ports_and_width() {
        let f = fixture();
        let v = Value::mux(
            Value::bit(f.s.into(), 0),
            f.a.into(),
            Value::constant(0, Shape::unsigned(2)),
            Shape::unsigned(4),
        );
        let (res, text) = lower(&f.design, &v);
        let res = res.unwrap();
        assert!(text.contains("cell $mux"));
        assert!(text.contains("    parameter \\WIDTH 4\n"));
        assert!(text.contains("    connect \\A 4'0000\n"));
        assert!(text.contains("    connect \\B \\a\n"));
        assert!(text.contains("    connect \\S \\s [0]\n"));
        assert!(text.contains(&format!("    connect \\Y {res}\n")));
    }

    #[test]
    fn wide_mux_selector_is_reduced() {
        let f = fixture();
        let v = Value::mux(f.s.into(), f.a.into(), f.a.into(), Shape::unsigned(4));
        let (_, text) = lower(&f.design, &v);
        assert!(text.contains("cell $reduce_bool"));
        assert!(text.contains("    parameter \\Y_WIDTH 1\n"));
    }

    #[test]
    fn match_shape_truncates_and_extends() {
        let f = fixture();
        let mut builder = Builder::new("Ferrum");
        let module = builder.begin_module("top", &[]);
        let mut state = ValueCompilerState::new(module, &f.design);
        let a: Value = f.a.into();
        assert_eq!(state.rhs().match_shape(&a, Shape::unsigned(2)).unwrap(), "\\a [1:0]");
        assert_eq!(state.rhs().match_shape(&a, Shape::unsigned(1)).unwrap(), "\\a [0]");
        assert_eq!(state.rhs().match_shape(&a, Shape::unsigned(4)).unwrap(), "\\a");
        assert_eq!(state.rhs().match_shape(&a, Shape::unsigned(8)).unwrap(), "$1");
    }

    #[test]
    fn unsupported_values_fail() {
        let f = fixture();
        let part = Value::Part {
            value: Box::new(f.a.into()),
            offset: Box::new(f.s.into()),
            width: 2,
        };
        let (res, _) = lower(&f.design, &part);
        assert_eq!(res, Err(ConvertError::Unsupported("dynamic part-select")));
        let array = Value::ArrayProxy {
            elems: vec![f.a.into()],
            index: Box::new(f.s.into()),
            shape: Shape::unsigned(4),
        };
        let (res, _) = lower(&f.design, &array);
        assert_eq!(res, Err(ConvertError::Unsupported("array multiplexer")));
    }

    #[test]
    fn driven_signal_gets_next_wire() {
        let f = fixture();
        let mut builder = Builder::new("Ferrum");
        let module = builder.begin_module("top", &[]);
        let mut state = ValueCompilerState::new(module, &f.design);
        state.add_driven(f.a, false);
        assert_eq!(state.lhs().compile(&f.a.into()).unwrap(), "\\a$next");
        assert_eq!(state.rhs().compile(&f.a.into()).unwrap(), "\\a");
    }

    #[test]
    fn lhs_rejects_undriven_and_structural_targets() {
        let f = fixture();
        let mut builder = Builder::new("Ferrum");
        let module = builder.begin_module("top", &[]);
        let mut state = ValueCompilerState::new(module, &f.design);
        assert_eq!(
            state.lhs().compile(&f.a.into()),
            Err(ConvertError::UndrivenTarget { name: "a".into() })
        );
        state.add_driven(f.s, false);
        assert_eq!(
            state.lhs().compile(&Value::bit(f.s.into(), 0)),
            Err(ConvertError::InvalidTarget("a slice"))
        );
        assert_eq!(
            state.lhs().compile(&Value::cat(vec![f.s.into()])),
            Err(ConvertError::InvalidTarget("a concatenation"))
        );
    }

    #[test]
    fn ports_are_numbered_in_order() {
        let f = fixture();
        let mut builder = Builder::new("Ferrum");
        let module = builder.begin_module("top", &[]);
        let mut state = ValueCompilerState::new(module, &f.design);
        state.add_port(f.s, PortDirection::Input);
        state.add_port(f.a, PortDirection::Output);
        state.resolve_curr(f.a, None);
        state.resolve_curr(f.s, None);
        builder.end_module(state.into_module());
        let text = builder.finish();
        assert!(text.contains("  wire width 4 output 1 \\a\n"));
        assert!(text.contains("  wire width 2 input 0 \\s\n"));
    }

    #[test]
    fn hierarchy_prefixes_new_wires() {
        let f = fixture();
        let mut builder = Builder::new("Ferrum");
        let module = builder.begin_module("top", &[]);
        let mut state = ValueCompilerState::new(module, &f.design);
        state.resolve_curr(f.a, None);
        let (a, b) = state.hierarchy("\\sub", |s| {
            let a = s.rhs().compile(&f.a.into());
            let b = s.rhs().compile(&f.b.into());
            (a, b)
        });
        assert_eq!(a.unwrap(), "\\a");
        assert_eq!(b.unwrap(), "\\sub_b");
        assert_eq!(state.rhs().compile(&f.s.into()).unwrap(), "\\s");
    }

    #[test]
    fn signal_attributes_precede_wire() {
        let mut design = Design::new();
        let k = design.add_signal(
            Signal::new("k", Shape::unsigned(1))
                .with_attr("keep", 1i64)
                .with_src(SrcLoc::new("k.fe", 1)),
        );
        let (_, text) = lower(&design, &k.into());
        assert!(text.contains(
            "  attribute \\keep 1\n  attribute \\src \"k.fe:1\"\n  wire width 1 \\k\n"
        ));
    }
}
