//! The whole-design container.
//!
//! A [`Design`] owns every object of the netlist in slot arenas and hands
//! out IDs. It is the single writer during elaboration: signals, devices,
//! nexus groups and processes are created and deleted only through it.

use crate::arena::Arena;
use crate::delay::NetDelaySrc;
use crate::device::{Device, NetArrayDq, NetPartSelect, PartSelectDir};
use crate::error::NetlistError;
use crate::expr::NetExpr;
use crate::ids::{EventId, FuncId, NexusId, NodeId, ProcessId, ScopeId, TaskId};
use crate::liveness::{AssignRef, EventRef, ExprRef};
use crate::nexus::Nexus;
use crate::node::{NetObj, NodeLinks, ObjKind};
use crate::pin::{Pin, PinRef, PinSpec};
use crate::proc::{NetFuncDef, NetProc, NetProcTop, NetTaskDef};
use crate::scope::{NetEvent, NetScope, ScopeKind, SignalScope};
use crate::signal::{NetNet, SignalKind};
use std::fmt::Write;
use weft_common::{Ident, InternalError, Interner, Logic};
use weft_source::{SourceDb, Span};

/// A netlist under construction.
#[derive(Debug, Default)]
pub struct Design {
    interner: Interner,
    sources: SourceDb,
    pub(crate) objs: Arena<NodeId, NetObj>,
    pub(crate) nexuses: Arena<NexusId, Nexus>,
    scopes: Arena<ScopeId, NetScope>,
    events: Arena<EventId, NetEvent>,
    tasks: Arena<TaskId, NetTaskDef>,
    funcs: Arena<FuncId, NetFuncDef>,
    processes: Arena<ProcessId, NetProcTop>,
    node_head: Option<NodeId>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty design whose spans refer to files in `sources`.
    pub fn with_sources(sources: SourceDb) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    /// The identifier interner.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Interns `s`.
    pub fn intern(&self, s: &str) -> Ident {
        self.interner.get_or_intern(s)
    }

    /// Resolves an identifier.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Source files the spans refer to.
    pub fn sources(&self) -> &SourceDb {
        &self.sources
    }

    /// Mutable source files.
    pub fn sources_mut(&mut self) -> &mut SourceDb {
        &mut self.sources
    }

    // ---- scopes -------------------------------------------------------------

    /// Creates a scope.
    pub fn new_scope(&mut self, parent: Option<ScopeId>, name: &str, kind: ScopeKind) -> ScopeId {
        let name = self.intern(name);
        self.scopes.alloc(NetScope::new(name, kind, parent))
    }

    /// Looks up a scope.
    pub fn scope(&self, id: ScopeId) -> &NetScope {
        &self.scopes[id]
    }

    /// Hierarchical name of a scope, e.g. `top.u1.blk`.
    pub fn scope_path(&self, id: ScopeId) -> String {
        let mut parts = Vec::new();
        let mut cur = Some(id);
        while let Some(s) = cur {
            let scope = &self.scopes[s];
            parts.push(self.resolve(scope.name()));
            cur = scope.parent();
        }
        parts.reverse();
        parts.join(".")
    }

    /// Returns a fresh compiler-generated name in `scope`.
    pub fn local_symbol(&mut self, scope: ScopeId) -> Ident {
        self.scopes[scope].local_symbol(&self.interner)
    }

    // ---- objects ------------------------------------------------------------

    fn alloc_obj(
        &mut self,
        scope: ScopeId,
        name: Ident,
        kind: ObjKind,
        specs: Vec<PinSpec>,
        init: Logic,
    ) -> NodeId {
        let id = self.objs.next_id();
        let pins: Vec<Pin> = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| {
                let pref = PinRef::new(id, i as u32);
                let nexus = self.nexuses.alloc(Nexus::singleton(pref));
                Pin::new(id, i as u32, spec, init, nexus)
            })
            .collect();
        let allocated = self.objs.alloc(NetObj::new(scope, name, pins, kind));
        debug_assert_eq!(allocated, id);
        id
    }

    /// Looks up an object.
    ///
    /// # Panics
    ///
    /// Panics on a stale handle. Use [`try_obj`](Self::try_obj) when the
    /// handle may have been deleted.
    pub fn obj(&self, id: NodeId) -> &NetObj {
        match self.objs.try_get(id) {
            Some(obj) => obj,
            None => fatal_stale(id),
        }
    }

    /// Mutable variant of [`obj`](Self::obj).
    pub fn obj_mut(&mut self, id: NodeId) -> &mut NetObj {
        match self.objs.try_get_mut(id) {
            Some(obj) => obj,
            None => fatal_stale(id),
        }
    }

    /// Looks up an object that may have been deleted.
    pub fn try_obj(&self, id: NodeId) -> Result<&NetObj, NetlistError> {
        self.objs.try_get(id).ok_or(NetlistError::StaleNode(id))
    }

    /// Every live object in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (NodeId, &NetObj)> {
        self.objs.iter()
    }

    /// Every live signal in creation order.
    pub fn signals(&self) -> impl Iterator<Item = (NodeId, &NetNet)> {
        self.objs
            .iter()
            .filter_map(|(id, obj)| obj.as_signal().map(|sig| (id, sig)))
    }

    /// The name of an object.
    pub fn name_of(&self, id: NodeId) -> &str {
        self.resolve(self.obj(id).name())
    }

    /// Renders the object's source location as `path:line`.
    pub fn fileline(&self, id: NodeId) -> String {
        self.sources.fileline(self.obj(id).span())
    }

    /// Sets the source location of an object.
    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.obj_mut(id).set_span(span);
    }

    /// Looks up a pin, reporting an out-of-range index with the owner's
    /// location and dump before panicking.
    pub fn pin(&self, pin: PinRef) -> &Pin {
        let obj = self.obj(pin.node);
        if pin.pin >= obj.pin_count() {
            self.fatal(
                pin.node,
                format_args!("pin({}) out of bounds({})", pin.pin, obj.pin_count()),
            );
        }
        obj.pin(pin.pin)
    }

    /// Mutable variant of [`pin`](Self::pin).
    pub fn pin_mut(&mut self, pin: PinRef) -> &mut Pin {
        let count = self.obj(pin.node).pin_count();
        if pin.pin >= count {
            self.fatal(
                pin.node,
                format_args!("pin({}) out of bounds({count})", pin.pin),
            );
        }
        self.obj_mut(pin.node).pin_mut(pin.pin)
    }

    /// Logs an internal error with the object's location and dump, then panics.
    pub(crate) fn fatal(&self, id: NodeId, message: std::fmt::Arguments<'_>) -> ! {
        let at = self.fileline(id);
        log::error!("{at}: internal error: {message}");
        log::error!("{at}:               : {}", self.dump_node(id).trim_end());
        panic!("{at}: internal error: {message}");
    }

    // ---- signals ------------------------------------------------------------

    /// Declares a `width`-bit signal `[width-1:0]`.
    pub fn new_signal(&mut self, scope: ScopeId, name: &str, kind: SignalKind, width: u32) -> NodeId {
        if width == 0 {
            log::error!("internal error: signal `{name}` declared with zero width");
            panic!("internal error: signal `{name}` declared with zero width");
        }
        self.make_signal(scope, name, kind, i64::from(width) - 1, 0, None)
    }

    /// Declares a signal `[msb:lsb]`; the bounds may run either way.
    pub fn new_vector_signal(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SignalKind,
        msb: i64,
        lsb: i64,
    ) -> NodeId {
        self.make_signal(scope, name, kind, msb, lsb, None)
    }

    /// Declares a memory `[msb:lsb] name [start:end]`, one pin per word.
    #[allow(clippy::too_many_arguments)]
    pub fn new_array_signal(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SignalKind,
        msb: i64,
        lsb: i64,
        start: i64,
        end: i64,
    ) -> NodeId {
        self.make_signal(scope, name, kind, msb, lsb, Some((start, end)))
    }

    fn make_signal(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SignalKind,
        msb: i64,
        lsb: i64,
        array: Option<(i64, i64)>,
    ) -> NodeId {
        let (dir, init) = kind.pin_defaults();
        let specs = (0..NetNet::pin_count_for(array))
            .map(|i| PinSpec {
                name: "P",
                inst: i,
                dir,
            })
            .collect();
        let name = self.intern(name);
        let net = NetNet::new(kind, msb, lsb, array);
        let id = self.alloc_obj(scope, name, ObjKind::Signal(net), specs, init);
        self.scopes[scope].register_signal(id);
        id
    }

    /// The signal payload of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or not a signal.
    pub fn signal(&self, id: NodeId) -> &NetNet {
        match self.obj(id).as_signal() {
            Some(sig) => sig,
            None => self.fatal(id, format_args!("{id} is not a signal")),
        }
    }

    /// Mutable variant of [`signal`](Self::signal).
    pub fn signal_mut(&mut self, id: NodeId) -> &mut NetNet {
        if !self.obj(id).is_signal() {
            self.fatal(id, format_args!("{id} is not a signal"));
        }
        match self.obj_mut(id).as_signal_mut() {
            Some(sig) => sig,
            None => unreachable!(),
        }
    }

    /// Changes a signal's kind, re-deriving the direction and initial value
    /// of every pin.
    pub fn set_signal_kind(&mut self, id: NodeId, kind: SignalKind) {
        let old = self.signal(id).kind();
        if old == kind {
            return;
        }
        log::debug!("signal {} kind {old} -> {kind}", self.name_of(id));
        self.signal_mut(id).set_kind(kind);
        let (dir, init) = kind.pin_defaults();
        for pin in self.obj_mut(id).pins_mut() {
            pin.set_dir(dir);
            pin.set_init(init);
        }
    }

    /// Deletes a signal.
    ///
    /// Fails with [`NetlistError::SignalInUse`] while any expression or
    /// assignment still refers to it; the signal is left intact.
    pub fn delete_signal(&mut self, id: NodeId) -> Result<(), NetlistError> {
        let obj = self.try_obj(id)?;
        let Some(sig) = obj.as_signal() else {
            return Err(InternalError::at(
                &self.fileline(id),
                format_args!("delete_signal on {}", obj.type_name()),
            )
            .into());
        };
        if sig.refs() > 0 {
            let err = NetlistError::SignalInUse {
                fileline: self.fileline(id),
                name: self.name_of(id).to_string(),
                eref: sig.peek_eref(),
                lref: sig.peek_lref(),
                dump: self.dump_node(id),
            };
            log::error!("{err}");
            return Err(err);
        }
        let scope = obj.scope();
        self.scopes[scope].unregister_signal(id);
        self.unlink_pins(id);
        self.objs.remove(id);
        log::trace!("deleted signal {id}");
        Ok(())
    }

    /// Takes an expression reference on a signal.
    pub fn expr_ref(&self, sig: NodeId) -> ExprRef {
        ExprRef::new(sig, self.signal(sig).eref_count())
    }

    /// Takes an assignment reference on a signal.
    pub fn assign_ref(&self, sig: NodeId) -> AssignRef {
        AssignRef::new(sig, self.signal(sig).lref_count())
    }

    /// An expression reading the whole of `sig`.
    pub fn expr_signal(&self, sig: NodeId) -> NetExpr {
        self.make_signal_expr(sig, None)
    }

    /// An expression reading word `word` of memory `sig`.
    pub fn expr_signal_word(&self, sig: NodeId, word: NetExpr) -> NetExpr {
        self.make_signal_expr(sig, Some(word))
    }

    fn make_signal_expr(&self, sig: NodeId, word: Option<NetExpr>) -> NetExpr {
        let net = self.signal(sig);
        NetExpr::signal(
            self.expr_ref(sig),
            word,
            net.vector_width(),
            net.is_signed(),
            net.data_type(),
        )
        .with_span(self.obj(sig).span())
    }

    /// Records a specify path ending at `sig`.
    pub fn add_delay_path(&mut self, sig: NodeId, src: NodeId) {
        self.signal_mut(sig).add_delay_path(src);
    }

    // ---- events -------------------------------------------------------------

    /// Declares a named event.
    pub fn new_event(&mut self, scope: ScopeId, name: &str) -> EventId {
        let name = self.intern(name);
        self.events.alloc(NetEvent::new(name, scope))
    }

    /// Looks up an event.
    pub fn event(&self, id: EventId) -> &NetEvent {
        &self.events[id]
    }

    /// An expression naming `event`.
    pub fn expr_event(&self, event: EventId) -> NetExpr {
        NetExpr::event(EventRef::new(event, self.events[event].exprref_count()))
    }

    // ---- devices and the node list ------------------------------------------

    /// Creates a device and adds it to the design's node list.
    pub fn new_device(&mut self, scope: ScopeId, name: &str, device: Device) -> NodeId {
        let name = self.intern(name);
        self.make_device(scope, name, device)
    }

    fn make_device(&mut self, scope: ScopeId, name: Ident, device: Device) -> NodeId {
        let specs = device.pin_specs();
        let id = self.alloc_obj(scope, name, ObjKind::Node(device), specs, Logic::Z);
        self.add_node(id);
        id
    }

    /// Selects `width` bits of `sig` at `base`. The `Vect` pin is connected
    /// to the signal; the device takes a local name in the signal's scope.
    pub fn new_part_select(
        &mut self,
        sig: NodeId,
        base: u32,
        width: u32,
        dir: PartSelectDir,
    ) -> NodeId {
        let (scope, span) = {
            let obj = self.obj(sig);
            (obj.scope(), obj.span())
        };
        let name = self.local_symbol(scope);
        let id = self.make_device(
            scope,
            name,
            Device::PartSelect(NetPartSelect::new(base, width, dir)),
        );
        self.connect(PinRef::new(id, NetPartSelect::VECT), PinRef::new(sig, 0));
        self.set_span(id, span);
        id
    }

    /// Selects `width` bits of `sig` at the offset carried by `sel`.
    pub fn new_indexed_part_select(&mut self, sig: NodeId, sel: NodeId, width: u32) -> NodeId {
        let (scope, span) = {
            let obj = self.obj(sig);
            (obj.scope(), obj.span())
        };
        let name = self.local_symbol(scope);
        let id = self.make_device(scope, name, Device::PartSelect(NetPartSelect::indexed(width)));
        self.connect(PinRef::new(id, NetPartSelect::VECT), PinRef::new(sig, 0));
        self.connect(PinRef::new(id, NetPartSelect::SELECT), PinRef::new(sel, 0));
        self.set_span(id, span);
        id
    }

    /// Reads a word of memory `mem`. The device holds an expression
    /// reference on the memory for as long as it exists.
    pub fn new_array_dq(&mut self, scope: ScopeId, name: &str, mem: NodeId, awidth: u32) -> NodeId {
        let width = self.signal(mem).vector_width();
        let dq = NetArrayDq::new(self.expr_ref(mem), width, awidth);
        self.new_device(scope, name, Device::ArrayDq(dq))
    }

    /// Creates a bus of `pins` passive pins.
    pub fn new_bus(&mut self, scope: ScopeId, pins: u32) -> NodeId {
        let name = self.intern("");
        let specs = (0..pins).map(|i| PinSpec::passive("P", i)).collect();
        self.alloc_obj(scope, name, ObjKind::Bus, specs, Logic::Z)
    }

    /// Creates a specify-path delay source with `npins` source pins, plus a
    /// `COND` pin when `condit_src` is set.
    pub fn new_delay_src(
        &mut self,
        scope: ScopeId,
        name: &str,
        npins: u32,
        condit_src: bool,
        conditional: bool,
    ) -> NodeId {
        let name = self.intern(name);
        let src = NetDelaySrc::new(npins, condit_src, conditional);
        let specs = src.pin_specs();
        self.alloc_obj(scope, name, ObjKind::DelaySrc(src), specs, Logic::Z)
    }

    /// Adds a device to the node list. Already-listed devices are left alone.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a device.
    pub fn add_node(&mut self, id: NodeId) {
        if self.obj(id).as_device().is_none() {
            self.fatal(id, format_args!("only devices join the node list"));
        }
        if self.obj(id).is_registered() {
            return;
        }
        let links = match self.node_head {
            None => {
                self.node_head = Some(id);
                NodeLinks { prev: id, next: id }
            }
            Some(head) => {
                let tail = self.links_of(head).prev;
                self.set_next(tail, id);
                self.set_prev(head, id);
                NodeLinks {
                    prev: tail,
                    next: head,
                }
            }
        };
        self.obj_mut(id).links = Some(links);
    }

    /// Removes a device from the node list without deleting it.
    pub fn forget_node(&mut self, id: NodeId) {
        let Some(links) = self.objs.try_get(id).and_then(|o| o.links) else {
            return;
        };
        if links.next == id {
            self.node_head = None;
        } else {
            self.set_next(links.prev, links.next);
            self.set_prev(links.next, links.prev);
            if self.node_head == Some(id) {
                self.node_head = Some(links.next);
            }
        }
        self.obj_mut(id).links = None;
    }

    fn links_of(&self, id: NodeId) -> NodeLinks {
        match self.obj(id).links {
            Some(links) => links,
            None => self.fatal(id, format_args!("node list is corrupt")),
        }
    }

    fn set_next(&mut self, id: NodeId, next: NodeId) {
        let mut links = self.links_of(id);
        links.next = next;
        self.obj_mut(id).links = Some(links);
    }

    fn set_prev(&mut self, id: NodeId, prev: NodeId) {
        let mut links = self.links_of(id);
        links.prev = prev;
        self.obj_mut(id).links = Some(links);
    }

    /// Iterates the node list in insertion order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            design: self,
            cur: self.node_head,
        }
    }

    /// Number of devices in the node list.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Deletes a device, bus or delay source.
    ///
    /// The object first leaves the node list, then its pins leave their
    /// nexus groups, then it is freed. Signals go through
    /// [`delete_signal`](Self::delete_signal) instead.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), NetlistError> {
        let obj = self.try_obj(id)?;
        if obj.is_signal() {
            return Err(InternalError::at(
                &self.fileline(id),
                format_args!("delete_node on signal `{}`", self.name_of(id)),
            )
            .into());
        }
        self.forget_node(id);
        self.unlink_pins(id);
        self.objs.remove(id);
        log::trace!("released node {id}");
        Ok(())
    }

    // ---- tasks, functions, processes ----------------------------------------

    /// Declares a task; its body is attached later with
    /// [`set_task_proc`](Self::set_task_proc).
    pub fn new_task(&mut self, scope: ScopeId, ports: Vec<NodeId>) -> TaskId {
        self.tasks.alloc(NetTaskDef::new(scope, ports))
    }

    /// Looks up a task.
    pub fn task(&self, id: TaskId) -> &NetTaskDef {
        &self.tasks[id]
    }

    /// Attaches a task body.
    pub fn set_task_proc(&mut self, id: TaskId, proc: NetProc) -> Result<(), NetlistError> {
        self.tasks[id].set_proc(proc)
    }

    /// Declares a function.
    pub fn new_function(
        &mut self,
        scope: ScopeId,
        result: Option<NodeId>,
        ports: Vec<NodeId>,
    ) -> FuncId {
        self.funcs.alloc(NetFuncDef::new(scope, result, ports))
    }

    /// Looks up a function.
    pub fn function(&self, id: FuncId) -> &NetFuncDef {
        &self.funcs[id]
    }

    /// Attaches a function body.
    pub fn set_function_proc(&mut self, id: FuncId, proc: NetProc) -> Result<(), NetlistError> {
        self.funcs[id].set_proc(proc)
    }

    /// Adds a top-level process.
    pub fn add_process(&mut self, top: NetProcTop) -> ProcessId {
        self.processes.alloc(top)
    }

    /// Looks up a process.
    pub fn process(&self, id: ProcessId) -> &NetProcTop {
        &self.processes[id]
    }

    /// Removes a process, releasing every reference its statements hold.
    pub fn delete_process(&mut self, id: ProcessId) -> Option<NetProcTop> {
        self.processes.remove(id)
    }

    /// Every process in creation order.
    pub fn processes(&self) -> impl Iterator<Item = (ProcessId, &NetProcTop)> {
        self.processes.iter()
    }

    // ---- dumps --------------------------------------------------------------

    /// Structural dump of an object: kind, name, ranges, reference counts,
    /// and each pin with its direction, initial value and nexus.
    pub fn dump_node(&self, id: NodeId) -> String {
        let Some(obj) = self.objs.try_get(id) else {
            return format!("{id}: <deleted>\n");
        };
        let path = format!(
            "{}.{}",
            self.scope_path(obj.scope()),
            self.resolve(obj.name())
        );
        let mut out = String::new();
        match obj.kind() {
            ObjKind::Signal(sig) => {
                let _ = write!(out, "{} ", sig.kind());
                if sig.port_kind() != crate::signal::PortKind::NotAPort {
                    let _ = write!(out, "{} ", sig.port_kind());
                }
                if sig.is_signed() {
                    out.push_str("signed ");
                }
                let _ = write!(out, "[{}:{}] {path}", sig.msb(), sig.lsb());
                if let Some((s, e)) = sig.array_bounds() {
                    let _ = write!(out, "[{s}:{e}]");
                }
                let _ = write!(out, " // eref={}, lref={}", sig.peek_eref(), sig.peek_lref());
                if sig.is_local() {
                    out.push_str(", local");
                }
            }
            ObjKind::Node(dev) => {
                let _ = write!(out, "{dev} {path}");
            }
            ObjKind::Bus => {
                let _ = write!(out, "bus {path}");
            }
            ObjKind::DelaySrc(src) => {
                let _ = write!(out, "delay_src {path} // {} source(s)", src.src_count());
            }
        }
        out.push('\n');
        for pin in obj.pins() {
            let members = self.nexuses.try_get(pin.nexus()).map_or(0, |n| n.len());
            let _ = writeln!(
                out,
                "    {} {pin}: dir={} init={} nexus={} ({members} member(s))",
                pin.index(),
                pin.dir(),
                pin.init(),
                pin.nexus(),
            );
        }
        out
    }
}

fn fatal_stale(id: NodeId) -> ! {
    log::error!("internal error: stale netlist handle {id}");
    panic!("internal error: stale netlist handle {id}");
}

/// Iterator over the design's node list.
pub struct Nodes<'a> {
    design: &'a Design,
    cur: Option<NodeId>,
}

impl Iterator for Nodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cur?;
        let next = self.design.obj(id).links.map(|l| l.next);
        self.cur = next.filter(|&n| Some(n) != self.design.node_head);
        Some(id)
    }
}
