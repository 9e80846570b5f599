//! Netlist objects: anything that owns a fixed array of pins.

use crate::delay::NetDelaySrc;
use crate::device::Device;
use crate::expr::NetExpr;
use crate::ids::{NodeId, ScopeId};
use crate::pin::Pin;
use crate::signal::NetNet;
use weft_common::Ident;
use weft_source::Span;

/// What a [`NetObj`] is.
#[derive(Debug)]
pub enum ObjKind {
    /// A declared signal.
    Signal(NetNet),
    /// A primitive device. Only devices are members of the design's node list.
    Node(Device),
    /// A bundle of passive pins used to join nets.
    Bus,
    /// A specify-path delay source.
    DelaySrc(NetDelaySrc),
}

/// Neighbours in the design's circular node list.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeLinks {
    pub(crate) prev: NodeId,
    pub(crate) next: NodeId,
}

/// An object with pins. The pin array is sized at construction and never
/// changes.
#[derive(Debug)]
pub struct NetObj {
    scope: ScopeId,
    name: Ident,
    span: Span,
    pins: Vec<Pin>,
    kind: ObjKind,
    rise_time: Option<NetExpr>,
    fall_time: Option<NetExpr>,
    decay_time: Option<NetExpr>,
    pub(crate) links: Option<NodeLinks>,
}

impl NetObj {
    pub(crate) fn new(scope: ScopeId, name: Ident, pins: Vec<Pin>, kind: ObjKind) -> Self {
        Self {
            scope,
            name,
            span: Span::DUMMY,
            pins,
            kind,
            rise_time: None,
            fall_time: None,
            decay_time: None,
            links: None,
        }
    }

    /// The enclosing scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// The object's name within its scope.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// Source location of the construct that created the object.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Sets the source location.
    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    /// What the object is.
    pub fn kind(&self) -> &ObjKind {
        &self.kind
    }

    /// Number of pins.
    pub fn pin_count(&self) -> u32 {
        self.pins.len() as u32
    }

    /// All pins in index order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Pin `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= pin_count()`. An out-of-range pin is a compiler bug;
    /// [`Design::pin`](crate::Design::pin) reports it with the object's
    /// location and a structural dump.
    pub fn pin(&self, idx: u32) -> &Pin {
        match self.pins.get(idx as usize) {
            Some(pin) => pin,
            None => self.pin_out_of_bounds(idx),
        }
    }

    /// Mutable pin `idx`. Panics like [`pin`](Self::pin).
    pub fn pin_mut(&mut self, idx: u32) -> &mut Pin {
        let count = self.pin_count();
        if idx >= count {
            self.pin_out_of_bounds(idx);
        }
        &mut self.pins[idx as usize]
    }

    pub(crate) fn pins_mut(&mut self) -> &mut [Pin] {
        &mut self.pins
    }

    fn pin_out_of_bounds(&self, idx: u32) -> ! {
        log::error!(
            "internal error: pin({idx}) out of bounds({}) on {}",
            self.pin_count(),
            self.type_name()
        );
        panic!(
            "internal error: pin({idx}) out of bounds({})",
            self.pin_count()
        );
    }

    /// The signal payload, if this is a signal.
    pub fn as_signal(&self) -> Option<&NetNet> {
        match &self.kind {
            ObjKind::Signal(sig) => Some(sig),
            _ => None,
        }
    }

    /// Mutable signal payload.
    pub fn as_signal_mut(&mut self) -> Option<&mut NetNet> {
        match &mut self.kind {
            ObjKind::Signal(sig) => Some(sig),
            _ => None,
        }
    }

    /// The device payload, if this is a device.
    pub fn as_device(&self) -> Option<&Device> {
        match &self.kind {
            ObjKind::Node(dev) => Some(dev),
            _ => None,
        }
    }

    /// Mutable device payload.
    pub fn as_device_mut(&mut self) -> Option<&mut Device> {
        match &mut self.kind {
            ObjKind::Node(dev) => Some(dev),
            _ => None,
        }
    }

    /// The delay-source payload, if this is a delay source.
    pub fn as_delay_src(&self) -> Option<&NetDelaySrc> {
        match &self.kind {
            ObjKind::DelaySrc(src) => Some(src),
            _ => None,
        }
    }

    /// Mutable delay-source payload.
    pub fn as_delay_src_mut(&mut self) -> Option<&mut NetDelaySrc> {
        match &mut self.kind {
            ObjKind::DelaySrc(src) => Some(src),
            _ => None,
        }
    }

    /// Returns `true` for signals.
    pub fn is_signal(&self) -> bool {
        matches!(self.kind, ObjKind::Signal(_))
    }

    /// Returns `true` while the object is in the design's node list.
    pub fn is_registered(&self) -> bool {
        self.links.is_some()
    }

    /// Kind name for dumps.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ObjKind::Signal(_) => "signal",
            ObjKind::Node(dev) => dev.type_name(),
            ObjKind::Bus => "bus",
            ObjKind::DelaySrc(_) => "delay_src",
        }
    }

    /// Gate-level `#(rise, fall, decay)` delay expressions.
    pub fn delays(&self) -> (Option<&NetExpr>, Option<&NetExpr>, Option<&NetExpr>) {
        (
            self.rise_time.as_ref(),
            self.fall_time.as_ref(),
            self.decay_time.as_ref(),
        )
    }

    /// Sets the gate-level delay expressions.
    pub fn set_delays(
        &mut self,
        rise: Option<NetExpr>,
        fall: Option<NetExpr>,
        decay: Option<NetExpr>,
    ) {
        self.rise_time = rise;
        self.fall_time = fall;
        self.decay_time = decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::NetFF;
    use crate::ids::NexusId;
    use crate::pin::{PinDir, PinSpec};
    use weft_common::Logic;

    fn make_ff() -> NetObj {
        let id = NodeId::from_raw(0);
        let pins = Device::FF(NetFF::new(1))
            .pin_specs()
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Pin::new(id, i as u32, spec, Logic::Z, NexusId::from_raw(i as u32)))
            .collect();
        NetObj::new(
            ScopeId::from_raw(0),
            Ident::from_raw(0),
            pins,
            ObjKind::Node(Device::FF(NetFF::new(1))),
        )
    }

    #[test]
    fn pin_access() {
        let mut obj = make_ff();
        assert_eq!(obj.pin_count(), 8);
        assert_eq!(obj.pin(NetFF::Q).dir(), PinDir::Output);
        obj.pin_mut(NetFF::DATA).set_init(Logic::Zero);
        assert_eq!(obj.pin(NetFF::DATA).init(), Logic::Zero);
        assert!(obj.as_device().is_some());
        assert!(obj.as_signal().is_none());
        assert!(!obj.is_registered());
        assert_eq!(obj.type_name(), "ff");
    }

    #[test]
    #[should_panic(expected = "pin(8) out of bounds(8)")]
    fn pin_out_of_range_is_fatal() {
        make_ff().pin(8);
    }

    #[test]
    fn bus_has_passive_pins() {
        let id = NodeId::from_raw(3);
        let pins = (0..2)
            .map(|i| Pin::new(id, i, PinSpec::passive("P", i), Logic::Z, NexusId::from_raw(i)))
            .collect();
        let obj = NetObj::new(ScopeId::from_raw(0), Ident::from_raw(0), pins, ObjKind::Bus);
        assert!(obj.pins().iter().all(|p| p.dir() == PinDir::Passive));
        assert_eq!(obj.type_name(), "bus");
    }
}
