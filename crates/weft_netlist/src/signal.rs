//! Signals: declared nets and variables.
//!
//! A [`NetNet`] is the signal-specific payload of a netlist object. Its pins
//! live on the owning [`NetObj`](crate::node::NetObj); this type carries the
//! declaration (kind, ranges, signedness) and the live-reference counters.

use crate::data_type::DataType;
use crate::ids::NodeId;
use crate::liveness::RefCount;
use crate::pin::PinDir;
use serde::{Deserialize, Serialize};
use std::fmt;
use weft_common::Logic;

/// The declared kind of a signal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SignalKind {
    /// Placeholder before a kind is known.
    None,
    /// A net declared implicitly by use.
    ImplicitWire,
    /// A variable declared implicitly by use.
    ImplicitReg,
    /// `integer`.
    Integer,
    /// `reg`.
    Reg,
    /// `supply0`.
    Supply0,
    /// `supply1`.
    Supply1,
    /// `tri`.
    Tri,
    /// `tri0`.
    Tri0,
    /// `tri1`.
    Tri1,
    /// `triand`.
    TriAnd,
    /// `trior`.
    TriOr,
    /// `wand`.
    WAnd,
    /// `wor`.
    WOr,
    /// `wire`.
    Wire,
    /// `wone`.
    WOne,
}

impl SignalKind {
    /// Direction and initial value every pin of a signal of this kind gets.
    pub fn pin_defaults(self) -> (PinDir, Logic) {
        match self {
            SignalKind::Reg | SignalKind::Integer | SignalKind::ImplicitReg => {
                (PinDir::Output, Logic::X)
            }
            SignalKind::Supply0 => (PinDir::Output, Logic::Zero),
            SignalKind::Supply1 => (PinDir::Output, Logic::One),
            _ => (PinDir::Passive, Logic::Z),
        }
    }

    /// Returns `true` for kinds that legally resolve several drivers.
    pub fn is_resolved(self) -> bool {
        matches!(
            self,
            SignalKind::Tri
                | SignalKind::Tri0
                | SignalKind::Tri1
                | SignalKind::TriAnd
                | SignalKind::TriOr
                | SignalKind::WAnd
                | SignalKind::WOr
        )
    }

    /// Returns `true` for kinds with a built-in value when undriven.
    pub fn is_pulled(self) -> bool {
        matches!(
            self,
            SignalKind::Tri0 | SignalKind::Tri1 | SignalKind::Supply0 | SignalKind::Supply1
        )
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalKind::None => "net_none",
            SignalKind::ImplicitWire => "wire /*implicit*/",
            SignalKind::ImplicitReg => "reg /*implicit*/",
            SignalKind::Integer => "integer",
            SignalKind::Reg => "reg",
            SignalKind::Supply0 => "supply0",
            SignalKind::Supply1 => "supply1",
            SignalKind::Tri => "tri",
            SignalKind::Tri0 => "tri0",
            SignalKind::Tri1 => "tri1",
            SignalKind::TriAnd => "triand",
            SignalKind::TriOr => "trior",
            SignalKind::WAnd => "wand",
            SignalKind::WOr => "wor",
            SignalKind::Wire => "wire",
            SignalKind::WOne => "wone",
        };
        f.write_str(s)
    }
}

/// Whether and how a signal is a module port.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum PortKind {
    /// An internal signal.
    #[default]
    NotAPort,
    /// `input`.
    Input,
    /// `output`.
    Output,
    /// `inout`.
    Inout,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortKind::NotAPort => "",
            PortKind::Input => "input",
            PortKind::Output => "output",
            PortKind::Inout => "inout",
        };
        f.write_str(s)
    }
}

/// Number of entries in the inclusive range between two bounds given in
/// either order.
///
/// # Panics
///
/// Panics if the range holds more than `u32::MAX` entries.
pub(crate) fn range_count(a: i64, b: i64) -> u32 {
    let span = (i128::from(a) - i128::from(b)).unsigned_abs() + 1;
    match u32::try_from(span) {
        Ok(count) => count,
        Err(_) => {
            log::error!("internal error: range [{a}:{b}] has {span} entries");
            panic!("internal error: range [{a}:{b}] has {span} entries");
        }
    }
}

/// A declared signal.
#[derive(Debug)]
pub struct NetNet {
    kind: SignalKind,
    port: PortKind,
    data_type: DataType,
    signed: bool,
    is_int: bool,
    msb: i64,
    lsb: i64,
    array: Option<(i64, i64)>,
    local: bool,
    eref: RefCount,
    lref: RefCount,
    delay_paths: Vec<NodeId>,
}

impl NetNet {
    pub(crate) fn new(kind: SignalKind, msb: i64, lsb: i64, array: Option<(i64, i64)>) -> Self {
        Self {
            kind,
            port: PortKind::NotAPort,
            data_type: DataType::NoType,
            signed: false,
            is_int: false,
            msb,
            lsb,
            array,
            local: false,
            eref: RefCount::new(),
            lref: RefCount::new(),
            delay_paths: Vec::new(),
        }
    }

    /// Number of pins a signal with these array bounds owns.
    pub(crate) fn pin_count_for(array: Option<(i64, i64)>) -> u32 {
        array.map_or(1, |(s, e)| range_count(s, e))
    }

    /// The declared kind.
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: SignalKind) {
        self.kind = kind;
    }

    /// Port direction, if the signal is a port.
    pub fn port_kind(&self) -> PortKind {
        self.port
    }

    /// Marks the signal as a port.
    pub fn set_port_kind(&mut self, port: PortKind) {
        self.port = port;
    }

    /// Value type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Sets the value type.
    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type;
    }

    /// Returns `true` if declared `signed`.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Sets signedness.
    pub fn set_signed(&mut self, signed: bool) {
        self.signed = signed;
    }

    /// Returns `true` for `integer` declarations.
    pub fn is_int(&self) -> bool {
        self.is_int
    }

    /// Marks as an `integer`.
    pub fn set_int(&mut self, is_int: bool) {
        self.is_int = is_int;
    }

    /// Returns `true` for compiler-generated temporaries.
    pub fn is_local(&self) -> bool {
        self.local
    }

    /// Marks as a compiler-generated temporary.
    pub fn set_local(&mut self, local: bool) {
        self.local = local;
    }

    /// Declared most significant bit index.
    pub fn msb(&self) -> i64 {
        self.msb
    }

    /// Declared least significant bit index.
    pub fn lsb(&self) -> i64 {
        self.lsb
    }

    /// Number of bits.
    pub fn vector_width(&self) -> u32 {
        range_count(self.msb, self.lsb)
    }

    /// Returns `true` if `sb` lies inside the declared bit range.
    pub fn sb_is_valid(&self, sb: i64) -> bool {
        if self.msb >= self.lsb {
            sb <= self.msb && sb >= self.lsb
        } else {
            sb <= self.lsb && sb >= self.msb
        }
    }

    /// Maps a source-level bit select to a 0-based index, where index 0 is
    /// always the `lsb` end.
    pub fn sb_to_idx(&self, sb: i64) -> i64 {
        if self.msb >= self.lsb {
            sb - self.lsb
        } else {
            self.lsb - sb
        }
    }

    /// Inverse of [`sb_to_idx`](Self::sb_to_idx).
    pub fn idx_to_sb(&self, idx: i64) -> i64 {
        if self.msb >= self.lsb {
            self.lsb + idx
        } else {
            self.lsb - idx
        }
    }

    /// 0 for a plain vector, 1 for a memory.
    pub fn array_dimensions(&self) -> u32 {
        u32::from(self.array.is_some())
    }

    /// Declared `(start, end)` array bounds, if any.
    pub fn array_bounds(&self) -> Option<(i64, i64)> {
        self.array
    }

    /// The lower of the two array bounds.
    pub fn array_first(&self) -> i64 {
        let (s, e) = self.array.unwrap_or((0, 0));
        s.min(e)
    }

    /// Number of words.
    pub fn array_count(&self) -> u32 {
        Self::pin_count_for(self.array)
    }

    /// Returns `true` if `index` lies between the array bounds.
    pub fn array_index_is_valid(&self, index: i64) -> bool {
        let (s, e) = self.array.unwrap_or((0, 0));
        index >= s.min(e) && index <= s.max(e)
    }

    /// Word address of `index`: its distance from the declared start bound.
    pub fn array_index_to_address(&self, index: i64) -> u32 {
        let (s, _) = self.array.unwrap_or((0, 0));
        (index - s).unsigned_abs() as u32
    }

    /// Number of live expression reads.
    pub fn peek_eref(&self) -> u32 {
        self.eref.get()
    }

    /// Number of live procedural assignment targets.
    pub fn peek_lref(&self) -> u32 {
        self.lref.get()
    }

    /// `eref + lref`.
    pub fn refs(&self) -> u32 {
        self.peek_eref() + self.peek_lref()
    }

    pub(crate) fn eref_count(&self) -> &RefCount {
        &self.eref
    }

    pub(crate) fn lref_count(&self) -> &RefCount {
        &self.lref
    }

    /// Delay sources (specify paths) ending at this signal.
    pub fn delay_paths(&self) -> &[NodeId] {
        &self.delay_paths
    }

    pub(crate) fn add_delay_path(&mut self, path: NodeId) {
        self.delay_paths.push(path);
    }
}
