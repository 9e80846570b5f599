//! Coarse classification of whether procedural code can consume
//! simulation time.
//!
//! The result is conservative: a construct is never reported as taking
//! less time than some execution of it might. `PossibleDelay` is the
//! answer whenever branches disagree or a value is only known at run time.

use crate::design::Design;
use crate::expr::NetExpr;
use crate::ids::TaskId;
use crate::proc::NetProc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-consumption class of a statement, ordered from least to most delay.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum DelayType {
    /// Never waits.
    NoDelay,
    /// Waits only for zero time.
    ZeroDelay,
    /// May or may not wait.
    PossibleDelay,
    /// Always waits a non-zero time.
    DefiniteDelay,
}

impl DelayType {
    /// Merges the classes of two alternative paths.
    pub fn combine(self, other: DelayType) -> DelayType {
        use DelayType::*;
        match (self, other) {
            (NoDelay, NoDelay) => NoDelay,
            (NoDelay | ZeroDelay, NoDelay | ZeroDelay) => ZeroDelay,
            (DefiniteDelay, DefiniteDelay) => DefiniteDelay,
            _ => PossibleDelay,
        }
    }
}

impl fmt::Display for DelayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DelayType::NoDelay => "NO_DELAY",
            DelayType::ZeroDelay => "ZERO_DELAY",
            DelayType::PossibleDelay => "POSSIBLE_DELAY",
            DelayType::DefiniteDelay => "DEFINITE_DELAY",
        };
        f.write_str(s)
    }
}

/// Classifies a delay value. Constants are `ZeroDelay` when zero and
/// `DefiniteDelay` otherwise; anything computed at run time is
/// `PossibleDelay`.
pub fn delay_type_from_expr(expr: &NetExpr) -> DelayType {
    if let Some(value) = expr.const_value() {
        return if value.is_all_zero() {
            DelayType::ZeroDelay
        } else {
            DelayType::DefiniteDelay
        };
    }
    if let Some(value) = expr.real_value() {
        return if value == 0.0 {
            DelayType::ZeroDelay
        } else {
            DelayType::DefiniteDelay
        };
    }
    DelayType::PossibleDelay
}

impl Design {
    /// Classifies a statement.
    pub fn delay_type(&self, proc: &NetProc) -> DelayType {
        Classifier::new(self).proc(proc)
    }

    /// Classifies the body of a task.
    pub fn task_delay_type(&self, task: TaskId) -> DelayType {
        Classifier::new(self).task(task)
    }
}

struct Classifier<'a> {
    design: &'a Design,
    active: Vec<TaskId>,
}

impl<'a> Classifier<'a> {
    fn new(design: &'a Design) -> Self {
        Self {
            design,
            active: Vec::new(),
        }
    }

    fn opt(&mut self, proc: Option<&NetProc>) -> DelayType {
        proc.map_or(DelayType::NoDelay, |p| self.proc(p))
    }

    fn proc(&mut self, proc: &NetProc) -> DelayType {
        match proc {
            NetProc::Block { stmts, .. } => {
                let mut result = DelayType::NoDelay;
                for stmt in stmts {
                    result = result.max(self.proc(stmt));
                    if result == DelayType::DefiniteDelay {
                        break;
                    }
                }
                result
            }
            NetProc::Condit {
                if_clause,
                else_clause,
                ..
            } => {
                let taken = self.opt(if_clause.as_deref());
                let other = self.opt(else_clause.as_deref());
                taken.combine(other)
            }
            NetProc::Case { items, .. } => {
                let mut arms = items.iter().map(|item| item.stmt.as_ref());
                let Some(first) = arms.next() else {
                    return DelayType::NoDelay;
                };
                let mut result = self.opt(first);
                for arm in arms {
                    result = result.combine(self.opt(arm));
                }
                if items.iter().all(|item| item.guard.is_some()) {
                    // No arm may match; that path takes no time.
                    result = DelayType::NoDelay.combine(result);
                }
                result
            }
            NetProc::Forever(body) => self.proc(body),
            NetProc::Repeat { count, body } => self.looped(count, body),
            NetProc::While { cond, body } => self.looped(cond, body),
            NetProc::PDelay { delay, expr, stmt } => match expr {
                Some(expr) => delay_type_from_expr(expr),
                None if *delay > 0 => DelayType::DefiniteDelay,
                None => self.opt(stmt.as_deref()),
            },
            NetProc::EvWait { .. } => DelayType::DefiniteDelay,
            NetProc::UTask(task) => self.task(*task),
            NetProc::Assign(_) | NetProc::STask(_) | NetProc::Disable(_) => DelayType::NoDelay,
        }
    }

    fn looped(&mut self, cond: &NetExpr, body: &NetProc) -> DelayType {
        match delay_type_from_expr(cond) {
            DelayType::ZeroDelay => DelayType::NoDelay,
            DelayType::DefiniteDelay => self.proc(body),
            _ => DelayType::NoDelay.combine(self.proc(body)),
        }
    }

    fn task(&mut self, task: TaskId) -> DelayType {
        if self.active.contains(&task) {
            log::debug!("recursive call of task {task} classified as possible delay");
            return DelayType::PossibleDelay;
        }
        let Some(body) = self.design.task(task).proc() else {
            log::debug!("task {task} has no body yet; classified as possible delay");
            return DelayType::PossibleDelay;
        };
        self.active.push(task);
        let result = self.proc(body);
        self.active.pop();
        result
    }
}
