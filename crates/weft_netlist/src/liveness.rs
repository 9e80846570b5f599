//! Scope-bound reference counting for signals and events.
//!
//! A signal may not be deleted while an expression reads it (`eref`) or a
//! procedural assignment targets it (`lref`). Instead of paired
//! increment/decrement calls, every reader holds a guard: acquiring the guard
//! bumps the counter, dropping it releases the count, and cloning it takes a
//! fresh count. A forgotten decrement is therefore impossible.

use crate::ids::{EventId, NodeId};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A live-reference counter owned by a signal or event.
#[derive(Default)]
pub struct RefCount(Arc<AtomicU32>);

impl RefCount {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of outstanding guards.
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Takes one reference.
    pub fn acquire(&self) -> RefGuard {
        self.0.fetch_add(1, Ordering::Relaxed);
        RefGuard {
            count: Arc::clone(&self.0),
        }
    }
}

impl fmt::Debug for RefCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefCount({})", self.get())
    }
}

/// One reference on a [`RefCount`], released on drop.
pub struct RefGuard {
    count: Arc<AtomicU32>,
}

impl Clone for RefGuard {
    fn clone(&self) -> Self {
        self.count.fetch_add(1, Ordering::Relaxed);
        Self {
            count: Arc::clone(&self.count),
        }
    }
}

impl Drop for RefGuard {
    fn drop(&mut self) {
        let previous = self.count.fetch_sub(1, Ordering::Relaxed);
        if previous == 0 {
            log::error!("internal error: reference count underflow");
            panic!("internal error: reference count underflow");
        }
    }
}

impl fmt::Debug for RefGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefGuard({})", self.count.load(Ordering::Relaxed))
    }
}

/// An expression read of a signal; holds one `eref`.
#[derive(Clone, Debug)]
pub struct ExprRef {
    signal: NodeId,
    _guard: RefGuard,
}

impl ExprRef {
    pub(crate) fn new(signal: NodeId, count: &RefCount) -> Self {
        Self {
            signal,
            _guard: count.acquire(),
        }
    }

    /// The signal being read.
    pub fn signal(&self) -> NodeId {
        self.signal
    }
}

/// A procedural assignment target; holds one `lref`.
#[derive(Clone, Debug)]
pub struct AssignRef {
    signal: NodeId,
    _guard: RefGuard,
}

impl AssignRef {
    pub(crate) fn new(signal: NodeId, count: &RefCount) -> Self {
        Self {
            signal,
            _guard: count.acquire(),
        }
    }

    /// The signal being assigned.
    pub fn signal(&self) -> NodeId {
        self.signal
    }
}

/// An expression reference to a named event.
#[derive(Clone, Debug)]
pub struct EventRef {
    event: EventId,
    _guard: RefGuard,
}

impl EventRef {
    pub(crate) fn new(event: EventId, count: &RefCount) -> Self {
        Self {
            event,
            _guard: count.acquire(),
        }
    }

    /// The referenced event.
    pub fn event(&self) -> EventId {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_lifecycle() {
        let count = RefCount::new();
        assert_eq!(count.get(), 0);
        let a = count.acquire();
        let b = count.acquire();
        assert_eq!(count.get(), 2);
        drop(a);
        assert_eq!(count.get(), 1);
        drop(b);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn clone_takes_fresh_reference() {
        let count = RefCount::new();
        let r = ExprRef::new(NodeId::from_raw(1), &count);
        let copy = r.clone();
        assert_eq!(count.get(), 2);
        assert_eq!(copy.signal(), NodeId::from_raw(1));
        drop(r);
        drop(copy);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn assign_and_event_refs_count_separately() {
        let lref = RefCount::new();
        let exprref = RefCount::new();
        let a = AssignRef::new(NodeId::from_raw(0), &lref);
        let e = EventRef::new(EventId::from_raw(0), &exprref);
        assert_eq!(lref.get(), 1);
        assert_eq!(exprref.get(), 1);
        assert_eq!(a.signal(), NodeId::from_raw(0));
        assert_eq!(e.event(), EventId::from_raw(0));
    }
}
