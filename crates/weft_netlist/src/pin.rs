//! Pins: the directed connection points owned by netlist objects.

use crate::ids::{NexusId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use weft_common::Logic;

/// Signal flow direction of a pin, from the owning object's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PinDir {
    /// The object reads the nexus.
    Input,
    /// The object drives the nexus.
    Output,
    /// Neither; the pin only observes (e.g. a plain wire).
    Passive,
}

impl fmt::Display for PinDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinDir::Input => write!(f, "I"),
            PinDir::Output => write!(f, "O"),
            PinDir::Passive => write!(f, "-"),
        }
    }
}

/// Names a pin by its owner and position.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PinRef {
    /// The owning object.
    pub node: NodeId,
    /// Position in the owner's pin array.
    pub pin: u32,
}

impl PinRef {
    /// Creates a pin reference.
    pub fn new(node: NodeId, pin: u32) -> Self {
        Self { node, pin }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.pin)
    }
}

/// The role of one pin in a device's fixed layout.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PinSpec {
    /// Diagnostic name, e.g. `Clock` or `D`.
    pub name: &'static str,
    /// Instance number for repeated names (`D0`, `D1`, ...).
    pub inst: u32,
    /// Direction.
    pub dir: PinDir,
}

impl PinSpec {
    /// An input pin.
    pub const fn input(name: &'static str, inst: u32) -> Self {
        Self {
            name,
            inst,
            dir: PinDir::Input,
        }
    }

    /// An output pin.
    pub const fn output(name: &'static str, inst: u32) -> Self {
        Self {
            name,
            inst,
            dir: PinDir::Output,
        }
    }

    /// A passive pin.
    pub const fn passive(name: &'static str, inst: u32) -> Self {
        Self {
            name,
            inst,
            dir: PinDir::Passive,
        }
    }
}

/// A connection point. Always a member of exactly one nexus.
#[derive(Clone, Debug)]
pub struct Pin {
    owner: NodeId,
    index: u32,
    dir: PinDir,
    init: Logic,
    name: &'static str,
    inst: u32,
    nexus: NexusId,
}

impl Pin {
    pub(crate) fn new(owner: NodeId, index: u32, spec: PinSpec, init: Logic, nexus: NexusId) -> Self {
        Self {
            owner,
            index,
            dir: spec.dir,
            init,
            name: spec.name,
            inst: spec.inst,
            nexus,
        }
    }

    /// The object owning this pin.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Position within the owner's pin array.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// This pin as a [`PinRef`].
    pub fn pin_ref(&self) -> PinRef {
        PinRef::new(self.owner, self.index)
    }

    /// Direction.
    pub fn dir(&self) -> PinDir {
        self.dir
    }

    /// Changes the direction.
    pub fn set_dir(&mut self, dir: PinDir) {
        self.dir = dir;
    }

    /// Value the pin drives before simulation starts.
    pub fn init(&self) -> Logic {
        self.init
    }

    /// Changes the initial value.
    pub fn set_init(&mut self, init: Logic) {
        self.init = init;
    }

    /// Base name, e.g. `D` for every data pin of a mux.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Instance number under [`name`](Self::name).
    pub fn inst(&self) -> u32 {
        self.inst
    }

    /// The nexus this pin currently belongs to.
    pub fn nexus(&self) -> NexusId {
        self.nexus
    }

    pub(crate) fn set_nexus(&mut self, nexus: NexusId) {
        self.nexus = nexus;
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.inst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_from_spec() {
        let nexus = NexusId::from_raw(4);
        let mut pin = Pin::new(
            NodeId::from_raw(2),
            3,
            PinSpec::input("D", 1),
            Logic::Z,
            nexus,
        );
        assert_eq!(pin.dir(), PinDir::Input);
        assert_eq!(pin.pin_ref(), PinRef::new(NodeId::from_raw(2), 3));
        assert_eq!(pin.to_string(), "D1");
        pin.set_dir(PinDir::Output);
        pin.set_init(Logic::X);
        assert_eq!(pin.dir(), PinDir::Output);
        assert_eq!(pin.init(), Logic::X);
        assert_eq!(pin.nexus(), nexus);
    }

    #[test]
    fn pin_ref_display() {
        assert_eq!(PinRef::new(NodeId::from_raw(5), 0).to_string(), "n5.0");
    }
}
