//! Per-transition propagation delays and specify-path delay sources.

use crate::error::NetlistError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// One of the twelve value transitions a delay can be specified for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Transition {
    /// 0 to 1.
    T01,
    /// 1 to 0.
    T10,
    /// 0 to Z.
    T0z,
    /// Z to 1.
    Tz1,
    /// 1 to Z.
    T1z,
    /// Z to 0.
    Tz0,
    /// 0 to X.
    T0x,
    /// X to 1.
    Tx1,
    /// 1 to X.
    T1x,
    /// X to 0.
    Tx0,
    /// X to Z.
    Txz,
    /// Z to X.
    Tzx,
}

impl Transition {
    /// All transitions in slot order.
    pub const ALL: [Transition; 12] = [
        Transition::T01,
        Transition::T10,
        Transition::T0z,
        Transition::Tz1,
        Transition::T1z,
        Transition::Tz0,
        Transition::T0x,
        Transition::Tx1,
        Transition::T1x,
        Transition::Tx0,
        Transition::Txz,
        Transition::Tzx,
    ];

    /// Slot index in a [`TransitionDelays`] table.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Transition::T01 => "01",
            Transition::T10 => "10",
            Transition::T0z => "0z",
            Transition::Tz1 => "z1",
            Transition::T1z => "1z",
            Transition::Tz0 => "z0",
            Transition::T0x => "0x",
            Transition::Tx1 => "x1",
            Transition::T1x => "1x",
            Transition::Tx0 => "x0",
            Transition::Txz => "xz",
            Transition::Tzx => "zx",
        };
        f.write_str(s)
    }
}

/// A full twelve-slot delay table.
///
/// Verilog allows 1, 2, 3, 6 or 12 delay values; the shorter forms derive
/// the unspecified transitions from the given ones.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct TransitionDelays([u64; 12]);

impl TransitionDelays {
    /// Every transition takes `delay`.
    pub fn uniform(delay: u64) -> Self {
        Self([delay; 12])
    }

    /// `#(rise, fall)`.
    pub fn rise_fall(rise: u64, fall: u64) -> Self {
        Self([
            rise,
            fall,
            rise,
            rise,
            fall,
            fall,
            rise,
            rise,
            fall,
            fall,
            rise.max(fall),
            rise.min(fall),
        ])
    }

    /// `#(rise, fall, turn-off)`.
    pub fn rise_fall_decay(rise: u64, fall: u64, decay: u64) -> Self {
        Self([
            rise,
            fall,
            decay,
            rise,
            decay,
            fall,
            rise.min(decay),
            rise,
            fall.min(decay),
            fall,
            decay,
            rise.min(fall),
        ])
    }

    /// `#(t01, t10, t0z, tz1, t1z, tz0)`; the X transitions are derived.
    pub fn six(t: [u64; 6]) -> Self {
        let [t01, t10, t0z, tz1, t1z, tz0] = t;
        Self([
            t01,
            t10,
            t0z,
            tz1,
            t1z,
            tz0,
            t01.min(t0z),
            t01.max(tz1),
            t10.min(t1z),
            t10.max(tz0),
            t1z.max(t0z),
            tz1.min(tz0),
        ])
    }

    /// All twelve transitions given explicitly, in [`Transition::ALL`] order.
    pub fn full(t: [u64; 12]) -> Self {
        Self(t)
    }

    /// Builds a table from however many values the source gave.
    pub fn from_values(values: &[u64]) -> Result<Self, NetlistError> {
        match *values {
            [d] => Ok(Self::uniform(d)),
            [r, f] => Ok(Self::rise_fall(r, f)),
            [r, f, z] => Ok(Self::rise_fall_decay(r, f, z)),
            [a, b, c, d, e, f] => Ok(Self::six([a, b, c, d, e, f])),
            _ => match <[u64; 12]>::try_from(values) {
                Ok(all) => Ok(Self::full(all)),
                Err(_) => Err(NetlistError::BadDelayCount(values.len())),
            },
        }
    }

    /// Delay of one transition.
    pub fn get(&self, transition: Transition) -> u64 {
        self.0[transition.index()]
    }

    /// Delay by raw slot index.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= 12`; callers index with [`Transition::index`].
    pub fn get_index(&self, idx: usize) -> u64 {
        if idx >= self.0.len() {
            log::error!("internal error: transition index {idx} out of range");
            panic!("internal error: transition index {idx} out of range");
        }
        self.0[idx]
    }

    /// The raw table.
    pub fn as_array(&self) -> &[u64; 12] {
        &self.0
    }
}

impl Index<Transition> for TransitionDelays {
    type Output = u64;

    fn index(&self, transition: Transition) -> &u64 {
        &self.0[transition.index()]
    }
}

/// Payload of a specify-path delay source.
///
/// Pins `0..src_count` are the path sources; a conditional path with a
/// condition signal has one more pin, `COND`, at the end.
#[derive(Clone, Debug, Default)]
pub struct NetDelaySrc {
    delays: TransitionDelays,
    src_count: u32,
    has_condit: bool,
    conditional: bool,
    posedge: bool,
    negedge: bool,
}

impl NetDelaySrc {
    /// Pin name of the path sources.
    pub const SOURCE_PIN_NAME: &'static str = "I";
    /// Pin name of the condition input.
    pub const CONDIT_PIN_NAME: &'static str = "COND";

    pub(crate) fn new(src_count: u32, has_condit: bool, conditional: bool) -> Self {
        Self {
            delays: TransitionDelays::default(),
            src_count,
            has_condit,
            conditional,
            posedge: false,
            negedge: false,
        }
    }

    pub(crate) fn pin_specs(&self) -> Vec<crate::pin::PinSpec> {
        use crate::pin::PinSpec;
        let mut pins: Vec<PinSpec> = (0..self.src_count)
            .map(|i| PinSpec::input(Self::SOURCE_PIN_NAME, i))
            .collect();
        if self.has_condit {
            pins.push(PinSpec::input(Self::CONDIT_PIN_NAME, 0));
        }
        pins
    }

    /// The delay table.
    pub fn delays(&self) -> &TransitionDelays {
        &self.delays
    }

    /// Replaces the delay table.
    pub fn set_delays(&mut self, delays: TransitionDelays) {
        self.delays = delays;
    }

    /// Number of source pins, excluding `COND`.
    pub fn src_count(&self) -> u32 {
        self.src_count
    }

    /// Pin index of source `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= src_count()`.
    pub fn src_pin(&self, idx: u32) -> u32 {
        if idx >= self.src_count {
            log::error!("internal error: delay source pin {idx} out of range");
            panic!("internal error: delay source pin {idx} out of range");
        }
        idx
    }

    /// Returns `true` if the path is guarded by an `if (...)`.
    pub fn is_condit(&self) -> bool {
        self.conditional
    }

    /// Returns `true` if the condition is wired to a `COND` pin.
    pub fn has_condit(&self) -> bool {
        self.has_condit
    }

    /// Pin index of `COND`, when there is one.
    pub fn condit_pin(&self) -> Option<u32> {
        self.has_condit.then_some(self.src_count)
    }

    /// Restricts the path to rising source edges.
    pub fn set_posedge(&mut self) {
        self.posedge = true;
    }

    /// Restricts the path to falling source edges.
    pub fn set_negedge(&mut self) {
        self.negedge = true;
    }

    /// `posedge` path.
    pub fn is_posedge(&self) -> bool {
        self.posedge
    }

    /// `negedge` path.
    pub fn is_negedge(&self) -> bool {
        self.negedge
    }
}
