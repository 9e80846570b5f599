//! Construction-time checks and the handoff gate to backends.
//!
//! Checks report into a [`DiagnosticSink`] and never stop early on their
//! own, so one run surfaces as many problems as possible. A backend only
//! receives the design through [`Design::handoff`], which refuses when any
//! error was recorded.

use crate::delay_type::DelayType;
use crate::design::Design;
use crate::error::NetlistError;
use crate::errors;
use crate::pin::{PinDir, PinRef};
use crate::proc::ProcKind;
use crate::signal::PortKind;
use weft_config::{CheckConfig, NetlistConfig};
use weft_diagnostics::DiagnosticSink;

/// Creates a sink honouring the configured error limit.
pub fn sink_for(config: &NetlistConfig) -> DiagnosticSink {
    match config.error_limit {
        Some(limit) => DiagnosticSink::with_error_limit(limit),
        None => DiagnosticSink::new(),
    }
}

impl Design {
    /// Reports every nexus with several drivers and no resolving net kind.
    pub fn check_drivers(&self, sink: &DiagnosticSink, checks: &CheckConfig) {
        let level = checks.multi_driver;
        if !level.is_enabled() {
            return;
        }
        for (nexus, group) in self.nexuses() {
            let drivers = self.count_outputs(nexus);
            if drivers <= 1 {
                continue;
            }
            let resolved = group.members().iter().any(|m| {
                self.obj(m.node)
                    .as_signal()
                    .is_some_and(|sig| sig.kind().is_resolved())
            });
            if resolved {
                continue;
            }
            let at = group
                .members()
                .iter()
                .find(|m| self.obj(m.node).is_signal())
                .or_else(|| {
                    group
                        .members()
                        .iter()
                        .find(|m| self.pin(**m).dir() == PinDir::Output)
                });
            let Some(&at) = at else { continue };
            let other = self.find_next_output(at).unwrap_or(at).node;
            log::debug!("nexus {nexus} has {drivers} drivers");
            sink.emit(errors::multi_driver(
                level,
                self.name_of(at.node),
                drivers,
                self.obj(at.node).span(),
                self.obj(other).span(),
            ));
        }
    }

    /// Reports passive nets whose nexus has loads but nothing driving it.
    /// Pulled nets are exempt, as are input and inout ports, which are
    /// driven from outside the module.
    pub fn check_floating_nets(&self, sink: &DiagnosticSink, checks: &CheckConfig) {
        let level = checks.floating_net;
        if !level.is_enabled() {
            return;
        }
        for (id, sig) in self.signals() {
            if sig.kind().is_pulled()
                || matches!(sig.port_kind(), PortKind::Input | PortKind::Inout)
            {
                continue;
            }
            let obj = self.obj(id);
            let floating = obj
                .pins()
                .iter()
                .filter(|pin| pin.dir() == PinDir::Passive)
                .map(|pin| pin.nexus())
                .find(|&x| self.count_outputs(x) == 0 && self.count_inputs(x) > 0);
            if let Some(nexus) = floating {
                sink.emit(errors::floating_net(
                    level,
                    self.name_of(id),
                    self.count_inputs(nexus),
                    obj.span(),
                ));
            }
        }
    }

    /// Reports `always` processes that can loop without advancing time.
    pub fn check_process_delays(&self, sink: &DiagnosticSink, checks: &CheckConfig) {
        let level = checks.always_delay;
        if !level.is_enabled() {
            return;
        }
        for (id, top) in self.processes() {
            if top.kind() != ProcKind::Always {
                continue;
            }
            let class = self.delay_type(top.statement());
            log::trace!("process {id} classified {class}");
            match class {
                DelayType::NoDelay | DelayType::ZeroDelay => {
                    sink.emit(errors::always_without_delay(level, top.span()));
                }
                DelayType::PossibleDelay => sink.emit(errors::always_may_not_delay(top.span())),
                DelayType::DefiniteDelay => {}
            }
        }
    }

    /// Runs every construction-time check.
    pub fn validate(&self, sink: &DiagnosticSink, config: &NetlistConfig) {
        self.check_drivers(sink, &config.checks);
        self.check_floating_nets(sink, &config.checks);
        self.check_process_delays(sink, &config.checks);
    }

    /// Releases the design to a backend, unless `sink` holds errors.
    pub fn handoff(&self, sink: &DiagnosticSink) -> Result<&Design, NetlistError> {
        if sink.has_errors() {
            let errors = sink.error_count();
            log::error!("{errors} error(s) during netlist construction; skipping code generation");
            return Err(NetlistError::ElaborationFailed { errors });
        }
        Ok(self)
    }

    /// Returns `true` if `pin` shares its nexus with a driver other than itself.
    pub fn is_driven(&self, pin: PinRef) -> bool {
        self.find_next_output(pin).is_some()
    }
}
