//! Opaque ID types for netlist entities.
//!
//! Each ID is a `u32` newtype usable as a key in an [`Arena`](crate::arena::Arena).
//! Pins, nexus groups and procedural constructs refer to each other through
//! these handles rather than through pointers.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines an opaque, copyable ID type backed by `u32`.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// A pin-owning object: signal, device, bus or delay source.
    NodeId,
    "n"
);

define_id!(
    /// A connectivity group of electrically identical pins.
    NexusId,
    "x"
);

define_id!(
    /// A scope (module instance, task, function, named block).
    ScopeId,
    "s"
);

define_id!(
    /// A named event.
    EventId,
    "e"
);

define_id!(
    /// A task definition.
    TaskId,
    "t"
);

define_id!(
    /// A function definition.
    FuncId,
    "f"
);

define_id!(
    /// A top-level `initial` or `always` process.
    ProcessId,
    "p"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roundtrip() {
        let id = NodeId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(<NexusId as ArenaId>::from_raw(7).as_raw(), 7);
    }

    #[test]
    fn display_prefix() {
        assert_eq!(NodeId::from_raw(3).to_string(), "n3");
        assert_eq!(NexusId::from_raw(0).to_string(), "x0");
        assert_eq!(ProcessId::from_raw(12).to_string(), "p12");
    }

    #[test]
    fn serde_roundtrip() {
        let id = ScopeId::from_raw(9);
        let json = serde_json::to_string(&id).unwrap();
        let restored: ScopeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
