/*!
 * MLFQ Simulator Library
 * Discrete-time multi-level feedback queue scheduling core
 */

pub mod control;
pub mod core;
pub mod sched;

// Re-exports
pub use crate::control::{SimCommand, SimulationController, SimulationTask};
pub use crate::core::errors::{ConfigError, SimError, StateError};
pub use crate::core::types::{Band, Tick};
pub use crate::sched::{
    LevelView, ProcessMetrics, ProcessSet, ProcessSpec, ProcessView, Scheduler, SchedulerConfig,
    SimMetrics, Snapshot, TraceSegment,
};
