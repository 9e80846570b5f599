//! The catalogue of primitive devices.
//!
//! Every device fixes its pin count and the role of each pin position.
//! Backends address device pins by index, so the layouts below are a stable
//! contract: the associated `const`s on each device name the positions and
//! [`Device::pin_specs`] produces the direction and diagnostic name of every
//! pin in order.

use crate::liveness::ExprRef;
use crate::pin::PinSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use weft_common::{Logic, LogicVec};

fn fatal_index(device: &str, what: &str, idx: u32, limit: u32) -> ! {
    log::error!("internal error: {device} {what} {idx} out of range ({limit})");
    panic!("internal error: {device} {what} {idx} out of range ({limit})");
}

/// Direction of a part select.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PartSelectDir {
    /// Vector to part: reads a slice of `Vect` and drives `Part`.
    VP,
    /// Part to vector: drives a slice of `Vect` from `Part`.
    PV,
}

/// Selects `width` bits of a vector starting at `base`, or at a run-time
/// offset given on the `Select` pin.
#[derive(Clone, Debug)]
pub struct NetPartSelect {
    base: u32,
    width: u32,
    dir: PartSelectDir,
    indexed: bool,
}

impl NetPartSelect {
    /// The slice.
    pub const PART: u32 = 0;
    /// The whole vector.
    pub const VECT: u32 = 1;
    /// Run-time offset, indexed form only.
    pub const SELECT: u32 = 2;

    /// A constant-offset select.
    pub fn new(base: u32, width: u32, dir: PartSelectDir) -> Self {
        Self {
            base,
            width,
            dir,
            indexed: false,
        }
    }

    /// A select whose offset comes from the `Select` pin. Always [`PartSelectDir::VP`].
    pub fn indexed(width: u32) -> Self {
        Self {
            base: 0,
            width,
            dir: PartSelectDir::VP,
            indexed: true,
        }
    }

    /// First selected bit (constant form).
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Number of selected bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Direction.
    pub fn dir(&self) -> PartSelectDir {
        self.dir
    }

    /// Returns `true` for the form with a `Select` pin.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    fn pin_specs(&self) -> Vec<PinSpec> {
        let mut pins = match self.dir {
            PartSelectDir::VP => vec![PinSpec::output("Part", 0), PinSpec::input("Vect", 0)],
            PartSelectDir::PV => vec![PinSpec::input("Part", 0), PinSpec::output("Vect", 0)],
        };
        if self.indexed {
            pins.push(PinSpec::input("Select", 0));
        }
        pins
    }
}

/// A D flip-flop with asynchronous and synchronous set/clear.
#[derive(Clone, Debug)]
pub struct NetFF {
    width: u32,
    aset_value: Option<LogicVec>,
    sset_value: Option<LogicVec>,
}

impl NetFF {
    /// Clock input.
    pub const CLOCK: u32 = 0;
    /// Clock enable.
    pub const ENABLE: u32 = 1;
    /// Asynchronous set.
    pub const ASET: u32 = 2;
    /// Asynchronous clear.
    pub const ACLR: u32 = 3;
    /// Synchronous set.
    pub const SSET: u32 = 4;
    /// Synchronous clear.
    pub const SCLR: u32 = 5;
    /// Data input.
    pub const DATA: u32 = 6;
    /// Registered output.
    pub const Q: u32 = 7;

    const PINS: [PinSpec; 8] = [
        PinSpec::input("Clock", 0),
        PinSpec::input("Enable", 0),
        PinSpec::input("Aset", 0),
        PinSpec::input("Aclr", 0),
        PinSpec::input("Sset", 0),
        PinSpec::input("Sclr", 0),
        PinSpec::input("Data", 0),
        PinSpec::output("Q", 0),
    ];

    /// Creates a flip-flop bank `width` bits wide.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            aset_value: None,
            sset_value: None,
        }
    }

    /// Bits stored.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Value loaded by `Aset`, when it is not all ones.
    pub fn aset_value(&self) -> Option<&LogicVec> {
        self.aset_value.as_ref()
    }

    /// Sets the `Aset` value.
    pub fn set_aset_value(&mut self, value: LogicVec) {
        self.aset_value = Some(value);
    }

    /// Value loaded by `Sset`, when it is not all ones.
    pub fn sset_value(&self) -> Option<&LogicVec> {
        self.sset_value.as_ref()
    }

    /// Sets the `Sset` value.
    pub fn set_sset_value(&mut self, value: LogicVec) {
        self.sset_value = Some(value);
    }
}

/// An adder/subtractor.
#[derive(Clone, Debug)]
pub struct NetAddSub {
    width: u32,
}

impl NetAddSub {
    /// High adds, low subtracts.
    pub const ADD_SUB: u32 = 0;
    /// Asynchronous clear.
    pub const ACLR: u32 = 1;
    /// Clock for the pipelined form.
    pub const CLOCK: u32 = 2;
    /// Carry in.
    pub const CIN: u32 = 3;
    /// Carry out.
    pub const COUT: u32 = 4;
    /// Signed overflow.
    pub const OVERFLOW: u32 = 5;
    /// First operand.
    pub const DATA_A: u32 = 6;
    /// Second operand.
    pub const DATA_B: u32 = 7;
    /// Sum or difference.
    pub const RESULT: u32 = 8;

    const PINS: [PinSpec; 9] = [
        PinSpec::input("Add_Sub", 0),
        PinSpec::input("Aclr", 0),
        PinSpec::input("Clock", 0),
        PinSpec::input("Cin", 0),
        PinSpec::output("Cout", 0),
        PinSpec::output("Overflow", 0),
        PinSpec::input("DataA", 0),
        PinSpec::input("DataB", 0),
        PinSpec::output("Result", 0),
    ];

    /// Creates an adder `width` bits wide.
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    /// Operand width.
    pub fn width(&self) -> u32 {
        self.width
    }
}

/// A magnitude comparator with all six relational outputs.
#[derive(Clone, Debug)]
pub struct NetCompare {
    width: u32,
    signed: bool,
}

impl NetCompare {
    /// Asynchronous clear.
    pub const ACLR: u32 = 0;
    /// Clock for the pipelined form.
    pub const CLOCK: u32 = 1;
    /// A > B.
    pub const AGB: u32 = 2;
    /// A >= B.
    pub const AGEB: u32 = 3;
    /// A == B.
    pub const AEB: u32 = 4;
    /// A != B.
    pub const ANEB: u32 = 5;
    /// A < B.
    pub const ALB: u32 = 6;
    /// A <= B.
    pub const ALEB: u32 = 7;
    /// First operand.
    pub const DATA_A: u32 = 8;
    /// Second operand.
    pub const DATA_B: u32 = 9;

    const PINS: [PinSpec; 10] = [
        PinSpec::input("Aclr", 0),
        PinSpec::input("Clock", 0),
        PinSpec::output("AGB", 0),
        PinSpec::output("AGEB", 0),
        PinSpec::output("AEB", 0),
        PinSpec::output("ANEB", 0),
        PinSpec::output("ALB", 0),
        PinSpec::output("ALEB", 0),
        PinSpec::input("DataA", 0),
        PinSpec::input("DataB", 0),
    ];

    /// Creates an unsigned comparator.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            signed: false,
        }
    }

    /// Operand width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Signed comparison.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Sets signed comparison.
    pub fn set_signed(&mut self, signed: bool) {
        self.signed = signed;
    }
}

/// Shape shared by the divider, multiplier and power devices.
#[derive(Clone, Debug)]
pub struct NetArith {
    width_r: u32,
    width_a: u32,
    width_b: u32,
    signed: bool,
}

impl NetArith {
    /// Result.
    pub const RESULT: u32 = 0;
    /// First operand.
    pub const DATA_A: u32 = 1;
    /// Second operand.
    pub const DATA_B: u32 = 2;

    const PINS: [PinSpec; 3] = [
        PinSpec::output("Result", 0),
        PinSpec::input("DataA", 0),
        PinSpec::input("DataB", 0),
    ];

    /// Creates an unsigned operator with result width `r` and operand widths `a`, `b`.
    pub fn new(width_r: u32, width_a: u32, width_b: u32) -> Self {
        Self {
            width_r,
            width_a,
            width_b,
            signed: false,
        }
    }

    /// Result width.
    pub fn width_r(&self) -> u32 {
        self.width_r
    }

    /// Width of `DataA`.
    pub fn width_a(&self) -> u32 {
        self.width_a
    }

    /// Width of `DataB`.
    pub fn width_b(&self) -> u32 {
        self.width_b
    }

    /// Signed arithmetic.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Sets signed arithmetic.
    pub fn set_signed(&mut self, signed: bool) {
        self.signed = signed;
    }
}

/// A combinational shifter.
#[derive(Clone, Debug)]
pub struct NetCLShift {
    width: u32,
    width_dist: u32,
    right: bool,
    signed: bool,
}

impl NetCLShift {
    /// Shifted value.
    pub const RESULT: u32 = 0;
    /// Value to shift.
    pub const DATA: u32 = 1;
    /// Shift distance.
    pub const DISTANCE: u32 = 2;

    const PINS: [PinSpec; 3] = [
        PinSpec::output("Result", 0),
        PinSpec::input("Data", 0),
        PinSpec::input("Distance", 0),
    ];

    /// Creates a shifter.
    pub fn new(width: u32, width_dist: u32, right: bool, signed: bool) -> Self {
        Self {
            width,
            width_dist,
            right,
            signed,
        }
    }

    /// Data width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Distance width.
    pub fn width_dist(&self) -> u32 {
        self.width_dist
    }

    /// Shifts right.
    pub fn is_right(&self) -> bool {
        self.right
    }

    /// Arithmetic (sign-filling) right shift.
    pub fn is_signed(&self) -> bool {
        self.signed
    }
}

/// A multiplexer: `Q = D[Sel]`.
#[derive(Clone, Debug)]
pub struct NetMux {
    width: u32,
    size: u32,
    sel_width: u32,
}

impl NetMux {
    /// Selected data.
    pub const RESULT: u32 = 0;
    /// Select input.
    pub const SEL: u32 = 1;

    /// Creates a mux of `size` inputs, each `width` bits, selected by a
    /// `sel_width`-bit select.
    pub fn new(width: u32, size: u32, sel_width: u32) -> Self {
        Self {
            width,
            size,
            sel_width,
        }
    }

    /// Data width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of data inputs.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Select width.
    pub fn sel_width(&self) -> u32 {
        self.sel_width
    }

    /// Pin index of data input `s`.
    ///
    /// # Panics
    ///
    /// Panics if `s >= size()`.
    pub fn data_pin(&self, s: u32) -> u32 {
        if s >= self.size {
            fatal_index("mux", "data select", s, self.size);
        }
        2 + s
    }

    fn pin_specs(&self) -> Vec<PinSpec> {
        let mut pins = vec![PinSpec::output("Q", 0), PinSpec::input("Sel", 0)];
        pins.extend((0..self.size).map(|s| PinSpec::input("D", s)));
        pins
    }
}

/// Reads one word of a memory at a run-time address.
#[derive(Clone, Debug)]
pub struct NetArrayDq {
    mem: ExprRef,
    width: u32,
    awidth: u32,
}

impl NetArrayDq {
    /// The word read.
    pub const RESULT: u32 = 0;
    /// Word address.
    pub const ADDRESS: u32 = 1;

    const PINS: [PinSpec; 2] = [PinSpec::output("Result", 0), PinSpec::input("Address", 0)];

    pub(crate) fn new(mem: ExprRef, width: u32, awidth: u32) -> Self {
        Self { mem, width, awidth }
    }

    /// The memory signal. Held as an expression reference, so the memory
    /// cannot be deleted while this device exists.
    pub fn mem(&self) -> crate::ids::NodeId {
        self.mem.signal()
    }

    /// Word width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Address width.
    pub fn awidth(&self) -> u32 {
        self.awidth
    }
}

/// A constant driver.
#[derive(Clone, Debug)]
pub struct NetConst {
    value: LogicVec,
}

impl NetConst {
    /// Creates a constant of the vector's width.
    pub fn new(value: LogicVec) -> Self {
        Self { value }
    }

    /// A one-bit constant.
    pub fn bit(value: Logic) -> Self {
        Self {
            value: LogicVec::filled(value, 1),
        }
    }

    /// Width.
    pub fn width(&self) -> u32 {
        self.value.width()
    }

    /// The whole value.
    pub fn value(&self) -> &LogicVec {
        &self.value
    }

    /// One bit of the value.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= width()`.
    pub fn bit_value(&self, idx: u32) -> Logic {
        if idx >= self.value.width() {
            fatal_index("constant", "bit", idx, self.value.width());
        }
        self.value.get(idx)
    }
}

/// Gate types for [`NetLogic`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum LogicKind {
    And,
    Buf,
    Bufif0,
    Bufif1,
    Nand,
    Nmos,
    Nor,
    Not,
    Notif0,
    Notif1,
    Or,
    Pulldown,
    Pullup,
    Rnmos,
    Rpmos,
    Pmos,
    Xnor,
    Xor,
}

/// A gate primitive: one output `O`, then the inputs `I0..`.
#[derive(Clone, Debug)]
pub struct NetLogic {
    kind: LogicKind,
    width: u32,
    inputs: u32,
}

impl NetLogic {
    /// Output.
    pub const OUTPUT: u32 = 0;

    /// Creates a gate with `inputs` input pins.
    pub fn new(kind: LogicKind, inputs: u32, width: u32) -> Self {
        Self {
            kind,
            width,
            inputs,
        }
    }

    /// Gate type.
    pub fn kind(&self) -> LogicKind {
        self.kind
    }

    /// Bit width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of inputs.
    pub fn inputs(&self) -> u32 {
        self.inputs
    }

    fn pin_specs(&self) -> Vec<PinSpec> {
        let mut pins = vec![PinSpec::output("O", 0)];
        pins.extend((0..self.inputs).map(|i| PinSpec::input("I", i)));
        pins
    }
}

/// Reduction types for [`NetUReduce`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum ReduceKind {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

/// Pin positions of the two-pin `O`/`I` devices (casts, sign extension,
/// buffer, replication, reduction).
pub mod unary_pins {
    /// Output.
    pub const O: u32 = 0;
    /// Input.
    pub const I: u32 = 1;
}

const UNARY_PINS: [PinSpec; 2] = [PinSpec::output("O", 0), PinSpec::input("I", 0)];

/// A primitive device. The variant decides the pin layout.
#[derive(Clone, Debug)]
pub enum Device {
    /// Part select.
    PartSelect(NetPartSelect),
    /// Converts real to integer.
    CastInt {
        /// Result width.
        width: u32,
    },
    /// Converts integer to real.
    CastReal {
        /// Treat the input as signed.
        signed: bool,
    },
    /// Concatenation: `O = {I[count-1], ..., I[0]}`.
    Concat {
        /// Output width.
        width: u32,
        /// Number of inputs.
        count: u32,
    },
    /// Replication: `O = {repeat{I}}`.
    Replicate {
        /// Output width.
        width: u32,
        /// Repeat count.
        repeat: u32,
    },
    /// Flip-flop.
    FF(NetFF),
    /// Absolute value: `Result = |DataA|`.
    Abs {
        /// Width.
        width: u32,
    },
    /// Adder/subtractor.
    AddSub(NetAddSub),
    /// Memory word read.
    ArrayDq(NetArrayDq),
    /// Shifter.
    CLShift(NetCLShift),
    /// Comparator.
    Compare(NetCompare),
    /// Divider.
    Divide(NetArith),
    /// Multiplier.
    Mult(NetArith),
    /// Power.
    Pow(NetArith),
    /// Multiplexer.
    Mux(NetMux),
    /// Sign extension to `width`.
    SignExtend {
        /// Output width.
        width: u32,
    },
    /// Continuous-assignment buffer.
    BufZ {
        /// Width.
        width: u32,
    },
    /// `===` (or `!==` when `eeq` is false) comparator: `O`, `I0`, `I1`.
    CaseCmp {
        /// Operand width.
        width: u32,
        /// `===` rather than `!==`.
        eeq: bool,
    },
    /// Constant bit-vector driver.
    Const(NetConst),
    /// Constant real driver.
    Literal {
        /// The value.
        value: f64,
    },
    /// Gate primitive.
    Logic(NetLogic),
    /// Reduction operator: `O = op(I)`.
    UReduce {
        /// Operator.
        kind: ReduceKind,
        /// Input width.
        width: u32,
    },
}

impl Device {
    /// Direction and name of every pin, in index order.
    pub fn pin_specs(&self) -> Vec<PinSpec> {
        match self {
            Device::PartSelect(ps) => ps.pin_specs(),
            Device::CastInt { .. }
            | Device::CastReal { .. }
            | Device::Replicate { .. }
            | Device::SignExtend { .. }
            | Device::BufZ { .. }
            | Device::UReduce { .. } => UNARY_PINS.to_vec(),
            Device::Concat { count, .. } => {
                let mut pins = vec![PinSpec::output("O", 0)];
                pins.extend((0..*count).map(|i| PinSpec::input("I", i)));
                pins
            }
            Device::FF(_) => NetFF::PINS.to_vec(),
            Device::Abs { .. } => vec![PinSpec::output("Result", 0), PinSpec::input("DataA", 0)],
            Device::AddSub(_) => NetAddSub::PINS.to_vec(),
            Device::ArrayDq(_) => NetArrayDq::PINS.to_vec(),
            Device::CLShift(_) => NetCLShift::PINS.to_vec(),
            Device::Compare(_) => NetCompare::PINS.to_vec(),
            Device::Divide(_) | Device::Mult(_) | Device::Pow(_) => NetArith::PINS.to_vec(),
            Device::Mux(mux) => mux.pin_specs(),
            Device::CaseCmp { .. } => vec![
                PinSpec::output("O", 0),
                PinSpec::input("I", 0),
                PinSpec::input("I", 1),
            ],
            Device::Const(_) | Device::Literal { .. } => vec![PinSpec::output("O", 0)],
            Device::Logic(gate) => gate.pin_specs(),
        }
    }

    /// Short name used in dumps and diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Device::PartSelect(_) => "part_select",
            Device::CastInt { .. } => "cast_int",
            Device::CastReal { .. } => "cast_real",
            Device::Concat { .. } => "concat",
            Device::Replicate { .. } => "replicate",
            Device::FF(_) => "ff",
            Device::Abs { .. } => "abs",
            Device::AddSub(_) => "add_sub",
            Device::ArrayDq(_) => "array_dq",
            Device::CLShift(_) => "clshift",
            Device::Compare(_) => "compare",
            Device::Divide(_) => "divide",
            Device::Mult(_) => "mult",
            Device::Pow(_) => "pow",
            Device::Mux(_) => "mux",
            Device::SignExtend { .. } => "sign_extend",
            Device::BufZ { .. } => "bufz",
            Device::CaseCmp { .. } => "case_cmp",
            Device::Const(_) => "const",
            Device::Literal { .. } => "literal",
            Device::Logic(_) => "logic",
            Device::UReduce { .. } => "ureduce",
        }
    }

    /// The principal width of the device, where it has one.
    pub fn width(&self) -> Option<u32> {
        match self {
            Device::PartSelect(ps) => Some(ps.width()),
            Device::CastInt { width }
            | Device::Concat { width, .. }
            | Device::Replicate { width, .. }
            | Device::Abs { width }
            | Device::SignExtend { width }
            | Device::BufZ { width }
            | Device::CaseCmp { width, .. }
            | Device::UReduce { width, .. } => Some(*width),
            Device::FF(ff) => Some(ff.width()),
            Device::AddSub(add) => Some(add.width()),
            Device::ArrayDq(dq) => Some(dq.width()),
            Device::CLShift(sh) => Some(sh.width()),
            Device::Compare(cmp) => Some(cmp.width()),
            Device::Divide(op) | Device::Mult(op) | Device::Pow(op) => Some(op.width_r()),
            Device::Mux(mux) => Some(mux.width()),
            Device::Const(c) => Some(c.width()),
            Device::Logic(gate) => Some(gate.width()),
            Device::CastReal { .. } | Device::Literal { .. } => None,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.width() {
            Some(w) => write!(f, "{} ({w} bits)", self.type_name()),
            None => f.write_str(self.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::PinDir;

    fn dirs(d: &Device) -> Vec<PinDir> {
        d.pin_specs().iter().map(|p| p.dir).collect()
    }

    fn names(d: &Device) -> Vec<&'static str> {
        d.pin_specs().iter().map(|p| p.name).collect()
    }

    #[test]
    fn ff_layout() {
        let ff = Device::FF(NetFF::new(4));
        assert_eq!(
            names(&ff),
            vec!["Clock", "Enable", "Aset", "Aclr", "Sset", "Sclr", "Data", "Q"]
        );
        let d = dirs(&ff);
        assert!(d[..7].iter().all(|&x| x == PinDir::Input));
        assert_eq!(d[NetFF::Q as usize], PinDir::Output);
    }

    #[test]
    fn add_sub_layout() {
        let add = Device::AddSub(NetAddSub::new(8));
        assert_eq!(
            names(&add),
            vec!["Add_Sub", "Aclr", "Clock", "Cin", "Cout", "Overflow", "DataA", "DataB", "Result"]
        );
        let d = dirs(&add);
        assert_eq!(d[NetAddSub::COUT as usize], PinDir::Output);
        assert_eq!(d[NetAddSub::OVERFLOW as usize], PinDir::Output);
        assert_eq!(d[NetAddSub::RESULT as usize], PinDir::Output);
        assert_eq!(d[NetAddSub::DATA_B as usize], PinDir::Input);
    }

    #[test]
    fn compare_layout() {
        let cmp = Device::Compare(NetCompare::new(8));
        let d = dirs(&cmp);
        assert_eq!(d.len(), 10);
        assert!(d[2..8].iter().all(|&x| x == PinDir::Output));
        assert_eq!(d[NetCompare::DATA_A as usize], PinDir::Input);
        assert_eq!(names(&cmp)[NetCompare::ANEB as usize], "ANEB");
    }

    #[test]
    fn mux_layout() {
        let mux = NetMux::new(8, 4, 2);
        assert_eq!(mux.data_pin(0), 2);
        assert_eq!(mux.data_pin(3), 5);
        let specs = Device::Mux(mux).pin_specs();
        assert_eq!(specs.len(), 6);
        assert_eq!(specs[0].name, "Q");
        assert_eq!(specs[1].name, "Sel");
        assert_eq!((specs[5].name, specs[5].inst), ("D", 3));
    }

    #[test]
    #[should_panic(expected = "mux data select 4 out of range")]
    fn mux_select_out_of_range() {
        NetMux::new(8, 4, 2).data_pin(4);
    }

    #[test]
    fn part_select_layouts() {
        let vp = Device::PartSelect(NetPartSelect::new(0, 4, PartSelectDir::VP));
        assert_eq!(dirs(&vp), vec![PinDir::Output, PinDir::Input]);
        let pv = Device::PartSelect(NetPartSelect::new(0, 4, PartSelectDir::PV));
        assert_eq!(dirs(&pv), vec![PinDir::Input, PinDir::Output]);
        let ix = Device::PartSelect(NetPartSelect::indexed(4));
        assert_eq!(names(&ix), vec!["Part", "Vect", "Select"]);
        assert_eq!(dirs(&ix)[2], PinDir::Input);
    }

    #[test]
    fn concat_and_logic_inputs() {
        let cat = Device::Concat { width: 12, count: 3 };
        let specs = cat.pin_specs();
        assert_eq!(specs.len(), 4);
        assert_eq!((specs[3].name, specs[3].inst), ("I", 2));

        let gate = Device::Logic(NetLogic::new(LogicKind::Nand, 2, 1));
        assert_eq!(dirs(&gate), vec![PinDir::Output, PinDir::Input, PinDir::Input]);
        let pull = Device::Logic(NetLogic::new(LogicKind::Pullup, 0, 1));
        assert_eq!(pull.pin_specs().len(), 1);
    }

    #[test]
    fn small_devices() {
        for d in [
            Device::CastInt { width: 32 },
            Device::CastReal { signed: true },
            Device::SignExtend { width: 16 },
            Device::BufZ { width: 1 },
            Device::Replicate { width: 8, repeat: 4 },
            Device::UReduce {
                kind: ReduceKind::Xor,
                width: 8,
            },
        ] {
            assert_eq!(names(&d), vec!["O", "I"]);
            assert_eq!(dirs(&d), vec![PinDir::Output, PinDir::Input]);
        }
        let arith = Device::Divide(NetArith::new(8, 8, 8));
        assert_eq!(names(&arith), vec!["Result", "DataA", "DataB"]);
        let shift = Device::CLShift(NetCLShift::new(8, 3, true, true));
        assert_eq!(names(&shift), vec!["Result", "Data", "Distance"]);
        let case = Device::CaseCmp { width: 4, eeq: true };
        assert_eq!(case.pin_specs()[2].inst, 1);
        assert_eq!(Device::Literal { value: 1.5 }.width(), None);
    }

    #[test]
    fn const_bits() {
        let c = NetConst::new(LogicVec::from_binary_str("10x").unwrap());
        assert_eq!(c.width(), 3);
        assert_eq!(c.bit_value(0), Logic::X);
        assert_eq!(c.bit_value(2), Logic::One);
        assert_eq!(NetConst::bit(Logic::Z).width(), 1);
    }

    #[test]
    fn display_shows_width() {
        assert_eq!(Device::FF(NetFF::new(4)).to_string(), "ff (4 bits)");
        assert_eq!(Device::Literal { value: 0.0 }.to_string(), "literal");
    }
}
