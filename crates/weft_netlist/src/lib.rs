//! The elaboration-time netlist of the weft HDL compiler.
//!
//! A [`Design`] holds signals, devices and the nexus groups that connect
//! their pins, plus the procedural code of `initial`/`always` processes.
//! The elaborator builds it through `Design`'s constructors; code
//! generators receive it only through [`Design::handoff`], after the
//! construction-time checks have run.
//!
//! Signals track how many expressions and assignments still refer to
//! them, and refuse deletion while any do. Procedural code can be
//! classified by whether it consumes simulation time with
//! [`Design::delay_type`].
//!
//! # Usage
//!
//! ```ignore
//! let mut design = Design::new();
//! let top = design.new_scope(None, "top", ScopeKind::Module);
//! let q = design.new_signal(top, "q", SignalKind::Reg, 8);
//! let ff = design.new_device(top, "q_ff", Device::FF(NetFF::new(8)));
//! design.connect(PinRef::new(ff, NetFF::Q), PinRef::new(q, 0));
//! ```

#![warn(missing_docs)]

pub mod arena;
pub mod check;
pub mod data_type;
pub mod delay;
pub mod delay_type;
pub mod design;
pub mod device;
pub mod error;
pub mod errors;
pub mod expr;
pub mod ids;
pub mod liveness;
pub mod nexus;
pub mod node;
pub mod pin;
pub mod proc;
pub mod scope;
pub mod signal;

pub use arena::{Arena, ArenaId};
pub use check::sink_for;
pub use data_type::DataType;
pub use delay::{NetDelaySrc, Transition, TransitionDelays};
pub use delay_type::{delay_type_from_expr, DelayType};
pub use design::{Design, Nodes};
pub use device::{
    Device, LogicKind, NetAddSub, NetArith, NetArrayDq, NetCLShift, NetCompare, NetConst, NetFF,
    NetLogic, NetMux, NetPartSelect, PartSelectDir, ReduceKind,
};
pub use error::NetlistError;
pub use expr::{BinaryClass, BinaryOp, ExprKind, NetExpr, UnaryOp};
pub use ids::{EventId, FuncId, NexusId, NodeId, ProcessId, ScopeId, TaskId};
pub use liveness::{AssignRef, EventRef, ExprRef};
pub use nexus::Nexus;
pub use node::{NetObj, ObjKind};
pub use pin::{Pin, PinDir, PinRef, PinSpec};
pub use proc::{
    BlockKind, CaseItem, CaseKind, NetAssign, NetFuncDef, NetProc, NetProcTop, NetSTask,
    NetTaskDef, ProcKind,
};
pub use scope::{NetEvent, NetScope, ScopeKind, SignalScope};
pub use signal::{NetNet, PortKind, SignalKind};
