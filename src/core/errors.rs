/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Band;

/// Configuration errors with serialization support
///
/// Raised synchronously at load/configure time, never mid-step.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Process set is empty")]
    #[diagnostic(
        code(config::empty_process_set),
        help("Load at least one process before stepping the simulation.")
    )]
    EmptyProcessSet,

    #[error("Duplicate process name: {0}")]
    #[diagnostic(
        code(config::duplicate_name),
        help("Process names identify processes for the simulation's lifetime and must be unique.")
    )]
    DuplicateName(String),

    #[error("Process {0} has a zero burst time")]
    #[diagnostic(code(config::zero_burst), help("Burst time must be at least one tick."))]
    ZeroBurst(String),

    #[error("Process {name} has priority {priority}, outside the configured range 1..={bands}")]
    #[diagnostic(
        code(config::priority_out_of_range),
        help("Priorities are band indices: 1 is the highest band, the band count the lowest.")
    )]
    PriorityOutOfRange {
        name: String,
        priority: Band,
        bands: usize,
    },

    #[error("Configuration has no priority bands")]
    #[diagnostic(
        code(config::no_bands),
        help("Configure at least one band with a positive quantum.")
    )]
    NoBands,

    #[error("Band {band} has a zero quantum")]
    #[diagnostic(
        code(config::zero_quantum),
        help("Every band needs a positive time slice.")
    )]
    ZeroQuantum { band: Band },

    #[error("Aging threshold must be positive")]
    #[diagnostic(
        code(config::zero_aging_threshold),
        help("The aging threshold is the consecutive-waiting tick count that triggers promotion.")
    )]
    ZeroAgingThreshold,

    #[error("Demotion threshold must be positive")]
    #[diagnostic(
        code(config::zero_demotion_threshold),
        help("The demotion threshold is the accumulated-processing tick count that triggers demotion.")
    )]
    ZeroDemotionThreshold,
}

/// Lifecycle errors: commands issued in a state that cannot honor them
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum StateError {
    #[error("Simulation already finished")]
    #[diagnostic(
        code(state::finished),
        help("Reset or load a new process set to run again.")
    )]
    Finished,

    #[error("No process set loaded")]
    #[diagnostic(code(state::no_process_set), help("Load a process set before stepping."))]
    NoProcessSet,

    #[error("Metrics are undefined while processes are still incomplete")]
    #[diagnostic(
        code(state::incomplete),
        help("Step the simulation to completion before computing statistics.")
    )]
    Incomplete,

    #[error("Configuration cannot change mid-run")]
    #[diagnostic(
        code(state::mid_run),
        help("Reset the simulation first; new parameters take effect from tick zero.")
    )]
    MidRun,
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("State error: {0}")]
    #[diagnostic(transparent)]
    State(#[from] StateError),
}
