//! Signal liveness: references held by expressions and assignments keep a
//! signal from being deleted, and releasing them makes deletion legal.

use weft_common::LogicVec;
use weft_netlist::{
    DataType, Design, NetAssign, NetExpr, NetProc, NetProcTop, NetlistError, PinRef, PortKind,
    ProcKind, ScopeKind, SignalKind,
};

fn setup() -> (Design, weft_netlist::ScopeId) {
    let mut d = Design::new();
    let top = d.new_scope(None, "top", ScopeKind::Module);
    (d, top)
}

#[test]
fn expression_blocks_deletion() {
    let (mut d, top) = setup();
    let a = d.new_signal(top, "a", SignalKind::Wire, 4);
    let e = d.expr_signal(a);
    assert_eq!(d.signal(a).peek_eref(), 1);

    match d.delete_signal(a) {
        Err(NetlistError::SignalInUse {
            name, eref, lref, dump, ..
        }) => {
            assert_eq!(name, "a");
            assert_eq!((eref, lref), (1, 0));
            assert!(dump.contains("top.a"));
        }
        other => panic!("expected SignalInUse, got {other:?}"),
    }
    assert!(d.try_obj(a).is_ok());

    drop(e);
    assert_eq!(d.signal(a).peek_eref(), 0);
    d.delete_signal(a).unwrap();
    assert!(d.try_obj(a).is_err());
    assert!(d.scope(top).signals().is_empty());
}

#[test]
fn cloned_expressions_hold_their_own_refs() {
    let (mut d, top) = setup();
    let a = d.new_signal(top, "a", SignalKind::Wire, 4);
    let e = d.expr_signal(a);
    let sum = NetExpr::binary(weft_netlist::BinaryOp::Add, e.clone(), e.clone()).unwrap();
    assert_eq!(d.signal(a).peek_eref(), 3);
    drop(e);
    assert_eq!(d.signal(a).peek_eref(), 2);
    drop(sum);
    assert_eq!(d.signal(a).peek_eref(), 0);
}

#[test]
fn deleting_a_process_releases_its_references() {
    let (mut d, top) = setup();
    let q = d.new_signal(top, "q", SignalKind::Reg, 1);
    let dsig = d.new_signal(top, "d", SignalKind::Wire, 1);
    let assign = NetProc::Assign(NetAssign {
        lval: d.assign_ref(q),
        word: None,
        rval: d.expr_signal(dsig),
        blocking: false,
    });
    let p = d.add_process(NetProcTop::new(
        ProcKind::Always,
        top,
        NetProc::delay(1, Some(assign)),
    ));
    assert_eq!(d.signal(q).peek_lref(), 1);
    assert_eq!(d.signal(dsig).peek_eref(), 1);
    assert!(d.delete_signal(q).is_err());

    drop(d.delete_process(p));
    assert_eq!(d.signal(q).refs(), 0);
    d.delete_signal(q).unwrap();
    d.delete_signal(dsig).unwrap();
}

#[test]
fn memory_read_holds_the_memory() {
    let (mut d, top) = setup();
    let mem = d.new_array_signal(top, "mem", SignalKind::Reg, 7, 0, 0, 15);
    let dq = d.new_array_dq(top, "rd", mem, 4);
    assert_eq!(d.signal(mem).peek_eref(), 1);
    assert_eq!(d.obj(dq).as_device().and_then(|dev| dev.width()), Some(8));
    assert!(d.delete_signal(mem).is_err());
    d.delete_node(dq).unwrap();
    d.delete_signal(mem).unwrap();
}

#[test]
fn word_index_expression_counts_both_signals() {
    let (mut d, top) = setup();
    let mem = d.new_array_signal(top, "mem", SignalKind::Reg, 3, 0, 0, 7);
    let addr = d.new_signal(top, "addr", SignalKind::Wire, 3);
    let word = d.expr_signal_word(mem, d.expr_signal(addr));
    assert_eq!(word.width(), 4);
    assert_eq!(d.signal(mem).peek_eref(), 1);
    assert_eq!(d.signal(addr).peek_eref(), 1);
}

#[test]
fn deleting_connected_signal_keeps_neighbours_linked() {
    let (mut d, top) = setup();
    let a = d.new_signal(top, "a", SignalKind::Wire, 1);
    let b = d.new_signal(top, "b", SignalKind::Wire, 1);
    let c = d.new_signal(top, "c", SignalKind::Wire, 1);
    d.connect(PinRef::new(a, 0), PinRef::new(b, 0));
    d.connect(PinRef::new(b, 0), PinRef::new(c, 0));
    d.delete_signal(b).unwrap();
    assert!(d.is_linked(PinRef::new(a, 0), PinRef::new(c, 0)));
    assert_eq!(d.nexus_members(PinRef::new(a, 0)).len(), 2);
}

#[test]
fn task_bodies_are_set_once() {
    let (mut d, top) = setup();
    let t = d.new_task(top, vec![]);
    d.set_task_proc(t, NetProc::block(vec![])).unwrap();
    let again = d.set_task_proc(t, NetProc::block(vec![]));
    assert!(matches!(again, Err(NetlistError::BodyAlreadySet { what: "task" })));

    let f = d.new_function(top, None, vec![]);
    d.set_function_proc(f, NetProc::block(vec![])).unwrap();
    assert!(d.set_function_proc(f, NetProc::block(vec![])).is_err());
    assert!(d.function(f).proc().is_some());
}

#[test]
fn constants_hold_no_references() {
    let (mut d, top) = setup();
    let a = d.new_signal(top, "a", SignalKind::Wire, 4);
    let _k = NetExpr::constant(LogicVec::from_u64(3, 4), false);
    d.delete_signal(a).unwrap();
}

#[test]
fn port_attributes_show_in_dump() {
    let (mut d, top) = setup();
    let a = d.new_signal(top, "a", SignalKind::Wire, 8);
    let sig = d.signal_mut(a);
    sig.set_port_kind(PortKind::Input);
    sig.set_local(true);
    sig.set_int(true);
    sig.set_data_type(DataType::Bool);

    let sig = d.signal(a);
    assert!(sig.is_int());
    assert_eq!(sig.data_type(), DataType::Bool);
    let dump = d.dump_node(a);
    assert!(
        dump.starts_with("wire input [7:0] top.a // eref=0, lref=0, local\n"),
        "{dump}"
    );
}
