//! Strongly-typed configuration structures.

use serde::Deserialize;

/// Top-level `weft.toml` contents relevant to netlist construction.
#[derive(Debug, Default, Deserialize)]
pub struct WeftConfig {
    /// The `[netlist]` table.
    #[serde(default)]
    pub netlist: NetlistConfig,
}

/// The `[netlist]` table.
#[derive(Debug, Default, Deserialize)]
pub struct NetlistConfig {
    /// Stop recording errors after this many. `None` records all of them.
    #[serde(default)]
    pub error_limit: Option<usize>,
    /// Levels for the construction-time checks.
    #[serde(default)]
    pub checks: CheckConfig,
}

/// How a finding of a particular check is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    /// The check does not run.
    Allow,
    /// Findings are reported as warnings.
    Warn,
    /// Findings are reported as errors and block code generation.
    Deny,
}

impl CheckLevel {
    /// Returns `true` unless the check is disabled.
    pub fn is_enabled(self) -> bool {
        self != CheckLevel::Allow
    }
}

/// The `[netlist.checks]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CheckConfig {
    /// A nexus driven by more than one output with no resolving net kind.
    #[serde(default = "deny")]
    pub multi_driver: CheckLevel,
    /// An `always` process that can run without advancing time.
    #[serde(default = "deny")]
    pub always_delay: CheckLevel,
    /// A passive net with loads but no driver.
    #[serde(default = "warn")]
    pub floating_net: CheckLevel,
}

fn deny() -> CheckLevel {
    CheckLevel::Deny
}

fn warn() -> CheckLevel {
    CheckLevel::Warn
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            multi_driver: deny(),
            always_delay: deny(),
            floating_net: warn(),
        }
    }
}
