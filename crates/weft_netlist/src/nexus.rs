//! Nexus groups: the sets of pins that are electrically the same point.
//!
//! Every pin belongs to exactly one nexus. A fresh pin starts in a nexus
//! of its own; [`Design::connect`] merges two groups. The relation is an
//! equivalence: linking is symmetric and transitive by construction, since
//! membership is a property of the group and not of pin pairs.

use crate::design::Design;
use crate::ids::{NexusId, NodeId};
use crate::pin::{PinDir, PinRef};
use serde::{Deserialize, Serialize};

/// A set of connected pins.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nexus {
    members: Vec<PinRef>,
}

impl Nexus {
    pub(crate) fn singleton(pin: PinRef) -> Self {
        Self { members: vec![pin] }
    }

    /// Member pins in the order they joined.
    pub fn members(&self) -> &[PinRef] {
        &self.members
    }

    /// Number of member pins.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members. Live groups never do.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Design {
    /// Looks up a nexus.
    pub fn nexus(&self, id: NexusId) -> &Nexus {
        &self.nexuses[id]
    }

    /// Every live nexus.
    pub fn nexuses(&self) -> impl Iterator<Item = (NexusId, &Nexus)> {
        self.nexuses.iter()
    }

    /// The nexus a pin belongs to.
    pub fn nexus_of(&self, pin: PinRef) -> NexusId {
        self.pin(pin).nexus()
    }

    /// All pins connected to `pin`, including `pin` itself.
    pub fn nexus_members(&self, pin: PinRef) -> &[PinRef] {
        self.nexuses[self.nexus_of(pin)].members()
    }

    /// Returns `true` if `a` and `b` are in the same nexus.
    pub fn is_linked(&self, a: PinRef, b: PinRef) -> bool {
        self.nexus_of(a) == self.nexus_of(b)
    }

    /// Joins the nexus groups of `a` and `b`. The smaller group is folded
    /// into the larger one. Connecting pins that are already linked is a
    /// no-op.
    pub fn connect(&mut self, a: PinRef, b: PinRef) {
        let na = self.nexus_of(a);
        let nb = self.nexus_of(b);
        if na == nb {
            return;
        }
        let (keep, gone) = if self.nexuses[na].len() >= self.nexuses[nb].len() {
            (na, nb)
        } else {
            (nb, na)
        };
        let moved = std::mem::take(&mut self.nexuses[gone].members);
        self.nexuses.remove(gone);
        for p in &moved {
            self.objs[p.node].pin_mut(p.pin).set_nexus(keep);
        }
        log::trace!("connect {a} {b}: {} pin(s) from {gone} into {keep}", moved.len());
        self.nexuses[keep].members.extend(moved);
    }

    /// Detaches `pin` from its group, leaving it in a nexus of its own.
    pub fn unlink(&mut self, pin: PinRef) {
        let nexus = self.nexus_of(pin);
        if self.nexuses[nexus].len() == 1 {
            return;
        }
        self.nexuses[nexus].members.retain(|&m| m != pin);
        let fresh = self.nexuses.alloc(Nexus::singleton(pin));
        self.pin_mut(pin).set_nexus(fresh);
    }

    /// Removes every pin of `node` from its group and frees groups left empty.
    pub(crate) fn unlink_pins(&mut self, node: NodeId) {
        let nexus_ids: Vec<NexusId> = self.obj(node).pins().iter().map(|p| p.nexus()).collect();
        for nexus in nexus_ids {
            let Some(group) = self.nexuses.try_get_mut(nexus) else {
                continue;
            };
            group.members.retain(|m| m.node != node);
            if group.members.is_empty() {
                self.nexuses.remove(nexus);
            }
        }
    }

    fn count_dir(&self, nexus: NexusId, dir: PinDir) -> u32 {
        self.nexuses[nexus]
            .members
            .iter()
            .filter(|m| self.objs[m.node].pin(m.pin).dir() == dir)
            .count() as u32
    }

    /// Number of input pins in a nexus.
    pub fn count_inputs(&self, nexus: NexusId) -> u32 {
        self.count_dir(nexus, PinDir::Input)
    }

    /// Number of output pins, i.e. drivers, in a nexus.
    pub fn count_outputs(&self, nexus: NexusId) -> u32 {
        self.count_dir(nexus, PinDir::Output)
    }

    /// Number of signal pins in a nexus.
    pub fn count_signals(&self, nexus: NexusId) -> u32 {
        self.nexuses[nexus]
            .members
            .iter()
            .filter(|m| self.objs[m.node].is_signal())
            .count() as u32
    }

    /// The next output pin after `pin` in its group, walking the group as a
    /// ring. `pin` itself is never returned.
    pub fn find_next_output(&self, pin: PinRef) -> Option<PinRef> {
        let members = self.nexus_members(pin);
        let Some(pos) = members.iter().position(|&m| m == pin) else {
            self.fatal(pin.node, format_args!("pin {pin} missing from its nexus"));
        };
        members[pos + 1..]
            .iter()
            .chain(&members[..pos])
            .copied()
            .find(|m| self.objs[m.node].pin(m.pin).dir() == PinDir::Output)
    }

    /// The first signal attached to `pin`'s group, as `(signal, pin index)`.
    pub fn find_link_signal(&self, pin: PinRef) -> Option<(NodeId, u32)> {
        self.nexus_members(pin)
            .iter()
            .find(|m| self.objs[m.node].is_signal())
            .map(|m| (m.node, m.pin))
    }
}

#[cfg(test)]
mod tests {
    use crate::design::Design;
    use crate::device::{Device, NetFF};
    use crate::ids::ScopeId;
    use crate::pin::PinRef;
    use crate::scope::ScopeKind;
    use crate::signal::SignalKind;

    fn setup() -> (Design, ScopeId) {
        let mut d = Design::new();
        let top = d.new_scope(None, "top", ScopeKind::Module);
        (d, top)
    }

    #[test]
    fn fresh_pins_are_alone() {
        let (mut d, top) = setup();
        let a = d.new_signal(top, "a", SignalKind::Wire, 1);
        let b = d.new_signal(top, "b", SignalKind::Wire, 1);
        let pa = PinRef::new(a, 0);
        let pb = PinRef::new(b, 0);
        assert!(!d.is_linked(pa, pb));
        assert_eq!(d.nexus_members(pa), &[pa]);
    }

    #[test]
    fn connect_is_transitive() {
        let (mut d, top) = setup();
        let pins: Vec<PinRef> = (0..4)
            .map(|i| PinRef::new(d.new_signal(top, &format!("s{i}"), SignalKind::Wire, 1), 0))
            .collect();
        d.connect(pins[0], pins[1]);
        d.connect(pins[2], pins[3]);
        assert!(!d.is_linked(pins[0], pins[3]));
        d.connect(pins[1], pins[2]);
        assert!(d.is_linked(pins[0], pins[3]));
        assert!(d.is_linked(pins[3], pins[0]));
        assert_eq!(d.nexus_members(pins[0]).len(), 4);
        assert_eq!(d.nexuses().count(), 1);
    }

    #[test]
    fn connect_twice_is_noop() {
        let (mut d, top) = setup();
        let a = PinRef::new(d.new_signal(top, "a", SignalKind::Wire, 1), 0);
        let b = PinRef::new(d.new_signal(top, "b", SignalKind::Wire, 1), 0);
        d.connect(a, b);
        d.connect(b, a);
        assert_eq!(d.nexus_members(a).len(), 2);
    }

    #[test]
    fn counts_by_direction() {
        let (mut d, top) = setup();
        let w = d.new_signal(top, "w", SignalKind::Wire, 1);
        let ff = d.new_device(top, "ff", Device::FF(NetFF::new(1)));
        let q = PinRef::new(ff, NetFF::Q);
        let data = PinRef::new(ff, NetFF::DATA);
        d.connect(PinRef::new(w, 0), q);
        d.connect(PinRef::new(w, 0), data);
        let x = d.nexus_of(q);
        assert_eq!(d.count_outputs(x), 1);
        assert_eq!(d.count_inputs(x), 1);
        assert_eq!(d.count_signals(x), 1);
        assert_eq!(d.find_link_signal(data), Some((w, 0)));
    }

    #[test]
    fn next_output_skips_self() {
        let (mut d, top) = setup();
        let r1 = PinRef::new(d.new_signal(top, "r1", SignalKind::Reg, 1), 0);
        let w = PinRef::new(d.new_signal(top, "w", SignalKind::Wire, 1), 0);
        assert_eq!(d.find_next_output(r1), None);
        d.connect(r1, w);
        assert_eq!(d.find_next_output(r1), None);
        assert_eq!(d.find_next_output(w), Some(r1));
        let r2 = PinRef::new(d.new_signal(top, "r2", SignalKind::Reg, 1), 0);
        d.connect(w, r2);
        assert_eq!(d.find_next_output(r1), Some(r2));
        assert_eq!(d.find_next_output(r2), Some(r1));
    }

    #[test]
    fn unlink_leaves_pin_alone() {
        let (mut d, top) = setup();
        let a = PinRef::new(d.new_signal(top, "a", SignalKind::Wire, 1), 0);
        let b = PinRef::new(d.new_signal(top, "b", SignalKind::Wire, 1), 0);
        let c = PinRef::new(d.new_signal(top, "c", SignalKind::Wire, 1), 0);
        d.connect(a, b);
        d.connect(b, c);
        d.unlink(b);
        assert!(d.is_linked(a, c));
        assert!(!d.is_linked(a, b));
        assert_eq!(d.nexus_members(b), &[b]);
    }

    #[test]
    fn deleting_frees_empty_groups() {
        let (mut d, top) = setup();
        let a = d.new_signal(top, "a", SignalKind::Wire, 1);
        let b = d.new_signal(top, "b", SignalKind::Wire, 1);
        d.connect(PinRef::new(a, 0), PinRef::new(b, 0));
        d.delete_signal(a).unwrap();
        assert_eq!(d.nexus_members(PinRef::new(b, 0)), &[PinRef::new(b, 0)]);
        d.delete_signal(b).unwrap();
        assert_eq!(d.nexuses().count(), 0);
    }
}
