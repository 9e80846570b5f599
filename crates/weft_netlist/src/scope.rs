//! Scopes and the narrow interface signals use to talk to them.

use crate::ids::{NodeId, ScopeId};
use crate::liveness::RefCount;
use serde::{Deserialize, Serialize};
use weft_common::{Ident, Interner};

/// What a signal needs from its owning scope.
///
/// Signals register at construction and unregister at deletion; devices
/// created without a source-level name ask for a fresh local one.
pub trait SignalScope {
    /// Records `sig` as declared in this scope.
    fn register_signal(&mut self, sig: NodeId);

    /// Forgets `sig`.
    fn unregister_signal(&mut self, sig: NodeId);

    /// Returns a name not used by anything declared in the scope.
    fn local_symbol(&mut self, interner: &Interner) -> Ident;
}

/// The kind of construct that opened a scope.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ScopeKind {
    /// A module instance.
    Module,
    /// A task body.
    Task,
    /// A function body.
    Function,
    /// A named `begin`/`end` block.
    BeginEnd,
    /// A named `fork`/`join` block.
    ForkJoin,
    /// A generate block.
    Generate,
}

/// A named scope.
#[derive(Debug)]
pub struct NetScope {
    name: Ident,
    kind: ScopeKind,
    parent: Option<ScopeId>,
    signals: Vec<NodeId>,
    lcounter: u32,
}

impl NetScope {
    pub(crate) fn new(name: Ident, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            kind,
            parent,
            signals: Vec::new(),
            lcounter: 0,
        }
    }

    /// Base name.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// Scope kind.
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Enclosing scope; `None` for a root.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Signals declared here, in declaration order.
    pub fn signals(&self) -> &[NodeId] {
        &self.signals
    }
}

impl SignalScope for NetScope {
    fn register_signal(&mut self, sig: NodeId) {
        self.signals.push(sig);
    }

    fn unregister_signal(&mut self, sig: NodeId) {
        self.signals.retain(|&s| s != sig);
    }

    fn local_symbol(&mut self, interner: &Interner) -> Ident {
        let name = format!("_s{}", self.lcounter);
        self.lcounter += 1;
        interner.get_or_intern(&name)
    }
}

/// A named event (`event e;`), the target of `->e` and `@e`.
#[derive(Debug)]
pub struct NetEvent {
    name: Ident,
    scope: ScopeId,
    exprref: RefCount,
}

impl NetEvent {
    pub(crate) fn new(name: Ident, scope: ScopeId) -> Self {
        Self {
            name,
            scope,
            exprref: RefCount::new(),
        }
    }

    /// Event name.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// Declaring scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Number of expressions referring to the event.
    pub fn exprref(&self) -> u32 {
        self.exprref.get()
    }

    pub(crate) fn exprref_count(&self) -> &RefCount {
        &self.exprref
    }
}
