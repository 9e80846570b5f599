//! Foundational types shared by every weft crate.
//!
//! Interned identifiers, 4-state logic values and vectors of them, and the
//! internal-error result type used to surface compiler bugs.

#![warn(missing_docs)]

pub mod ident;
pub mod logic;
pub mod logic_vec;
pub mod result;

pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use logic_vec::LogicVec;
pub use result::{InternalError, WeftResult};
