//! Procedural statements, processes, tasks and functions.
//!
//! Statements own their children; dropping a process drops its whole tree
//! and with it every signal reference held by the expressions inside.

use crate::error::NetlistError;
use crate::expr::NetExpr;
use crate::ids::{EventId, NodeId, ScopeId, TaskId};
use crate::liveness::AssignRef;
use serde::{Deserialize, Serialize};
use weft_source::Span;

/// Sequential or concurrent block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BlockKind {
    /// `begin`/`end`.
    Sequential,
    /// `fork`/`join`.
    Parallel,
}

/// Which matching rule a case statement uses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CaseKind {
    /// `case`.
    Case,
    /// `casex`.
    CaseX,
    /// `casez`.
    CaseZ,
}

/// One arm of a case statement.
#[derive(Clone, Debug)]
pub struct CaseItem {
    /// The label; `None` marks the `default` arm.
    pub guard: Option<NetExpr>,
    /// The arm body; `None` for an empty statement.
    pub stmt: Option<NetProc>,
}

/// A procedural assignment.
#[derive(Clone, Debug)]
pub struct NetAssign {
    /// The target, holding one `lref` on it.
    pub lval: AssignRef,
    /// Word index when the target is a memory.
    pub word: Option<NetExpr>,
    /// Value assigned.
    pub rval: NetExpr,
    /// `=` rather than `<=`.
    pub blocking: bool,
}

/// A system task call such as `$display(...)`.
#[derive(Clone, Debug)]
pub struct NetSTask {
    name: String,
    args: Vec<NetExpr>,
}

impl NetSTask {
    /// Creates a call. `name` must include the leading `$`.
    pub fn new(name: impl Into<String>, args: Vec<NetExpr>) -> Result<Self, NetlistError> {
        let name = name.into();
        if !name.starts_with('$') {
            return Err(NetlistError::BadSystemTaskName(name));
        }
        Ok(Self { name, args })
    }

    /// Task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments.
    pub fn args(&self) -> &[NetExpr] {
        &self.args
    }
}

/// A procedural statement.
#[derive(Clone, Debug)]
pub enum NetProc {
    /// A block of statements.
    Block {
        /// Sequential or parallel.
        kind: BlockKind,
        /// Scope of a named block.
        scope: Option<ScopeId>,
        /// Statements in source order.
        stmts: Vec<NetProc>,
    },
    /// An assignment.
    Assign(NetAssign),
    /// `if (cond) if_clause else else_clause`.
    Condit {
        /// Condition.
        cond: NetExpr,
        /// Taken when true; `None` for an empty statement.
        if_clause: Option<Box<NetProc>>,
        /// Taken when false, if there is an `else`.
        else_clause: Option<Box<NetProc>>,
    },
    /// A case statement.
    Case {
        /// Matching rule.
        kind: CaseKind,
        /// Selector.
        expr: NetExpr,
        /// Arms in source order.
        items: Vec<CaseItem>,
    },
    /// `forever body`.
    Forever(Box<NetProc>),
    /// `repeat (count) body`.
    Repeat {
        /// Iteration count.
        count: NetExpr,
        /// Loop body.
        body: Box<NetProc>,
    },
    /// `while (cond) body`.
    While {
        /// Loop condition.
        cond: NetExpr,
        /// Loop body.
        body: Box<NetProc>,
    },
    /// `#delay stmt`.
    PDelay {
        /// Constant delay in simulation ticks, used when `expr` is `None`.
        delay: u64,
        /// Delay expression not reducible to a constant at elaboration.
        expr: Option<NetExpr>,
        /// The delayed statement.
        stmt: Option<Box<NetProc>>,
    },
    /// `@(events) stmt`.
    EvWait {
        /// Events waited on.
        events: Vec<EventId>,
        /// The guarded statement.
        stmt: Option<Box<NetProc>>,
    },
    /// A system task call.
    STask(NetSTask),
    /// A user task call.
    UTask(TaskId),
    /// `disable scope`.
    Disable(ScopeId),
}

impl NetProc {
    /// Sequential block of `stmts`.
    pub fn block(stmts: Vec<NetProc>) -> Self {
        NetProc::Block {
            kind: BlockKind::Sequential,
            scope: None,
            stmts,
        }
    }

    /// `if` without `else`.
    pub fn condit(cond: NetExpr, if_clause: NetProc) -> Self {
        NetProc::Condit {
            cond,
            if_clause: Some(Box::new(if_clause)),
            else_clause: None,
        }
    }

    /// `if`/`else`.
    pub fn condit_else(cond: NetExpr, if_clause: NetProc, else_clause: NetProc) -> Self {
        NetProc::Condit {
            cond,
            if_clause: Some(Box::new(if_clause)),
            else_clause: Some(Box::new(else_clause)),
        }
    }

    /// `#delay stmt` with a constant delay.
    pub fn delay(delay: u64, stmt: Option<NetProc>) -> Self {
        NetProc::PDelay {
            delay,
            expr: None,
            stmt: stmt.map(Box::new),
        }
    }

    /// `#(expr) stmt`.
    pub fn delay_expr(expr: NetExpr, stmt: Option<NetProc>) -> Self {
        NetProc::PDelay {
            delay: 0,
            expr: Some(expr),
            stmt: stmt.map(Box::new),
        }
    }

    /// `@(events) stmt`.
    pub fn wait(events: Vec<EventId>, stmt: Option<NetProc>) -> Self {
        NetProc::EvWait {
            events,
            stmt: stmt.map(Box::new),
        }
    }
}

/// `initial` or `always`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ProcKind {
    /// Runs once.
    Initial,
    /// Runs forever.
    Always,
}

/// A top-level process.
#[derive(Debug)]
pub struct NetProcTop {
    kind: ProcKind,
    scope: ScopeId,
    statement: NetProc,
    span: Span,
}

impl NetProcTop {
    /// Creates a process.
    pub fn new(kind: ProcKind, scope: ScopeId, statement: NetProc) -> Self {
        Self {
            kind,
            scope,
            statement,
            span: Span::DUMMY,
        }
    }

    /// Attaches a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// `initial` or `always`.
    pub fn kind(&self) -> ProcKind {
        self.kind
    }

    /// Enclosing scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// The body.
    pub fn statement(&self) -> &NetProc {
        &self.statement
    }

    /// Source location.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A task definition. The body is attached once, after the ports exist.
#[derive(Debug)]
pub struct NetTaskDef {
    scope: ScopeId,
    ports: Vec<NodeId>,
    proc: Option<NetProc>,
}

impl NetTaskDef {
    pub(crate) fn new(scope: ScopeId, ports: Vec<NodeId>) -> Self {
        Self {
            scope,
            ports,
            proc: None,
        }
    }

    /// The task's scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Port signals in declaration order.
    pub fn ports(&self) -> &[NodeId] {
        &self.ports
    }

    /// The body, once set.
    pub fn proc(&self) -> Option<&NetProc> {
        self.proc.as_ref()
    }

    /// Attaches the body.
    pub fn set_proc(&mut self, proc: NetProc) -> Result<(), NetlistError> {
        if self.proc.is_some() {
            return Err(NetlistError::BodyAlreadySet { what: "task" });
        }
        self.proc = Some(proc);
        Ok(())
    }
}

/// A function definition.
#[derive(Debug)]
pub struct NetFuncDef {
    scope: ScopeId,
    result: Option<NodeId>,
    ports: Vec<NodeId>,
    proc: Option<NetProc>,
}

impl NetFuncDef {
    pub(crate) fn new(scope: ScopeId, result: Option<NodeId>, ports: Vec<NodeId>) -> Self {
        Self {
            scope,
            result,
            ports,
            proc: None,
        }
    }

    /// The function's scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// The result variable.
    pub fn result(&self) -> Option<NodeId> {
        self.result
    }

    /// Input port signals.
    pub fn ports(&self) -> &[NodeId] {
        &self.ports
    }

    /// The body, once set.
    pub fn proc(&self) -> Option<&NetProc> {
        self.proc.as_ref()
    }

    /// Attaches the body.
    pub fn set_proc(&mut self, proc: NetProc) -> Result<(), NetlistError> {
        if self.proc.is_some() {
            return Err(NetlistError::BodyAlreadySet { what: "function" });
        }
        self.proc = Some(proc);
        Ok(())
    }
}
