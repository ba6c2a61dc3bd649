/*!
 * Simulation Controller
 * Lifecycle orchestration: load, reset, configure, stepping
 */

mod task;

pub use task::{SimCommand, SimulationTask};

use crate::core::errors::{ConfigError, SimError, StateError};
use crate::core::types::Tick;
use crate::sched::{
    ProcessSet, Scheduler, SchedulerConfig, SimMetrics, Snapshot, TraceSegment,
};

/// Single owner of the scheduler and its process set.
///
/// All mutation goes through this value; observers read snapshots between
/// ticks. Stepping cadence, manual or timed, never changes outcomes.
pub struct SimulationController {
    scheduler: Scheduler,
    set: ProcessSet,
}

impl SimulationController {
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
            set: ProcessSet::new(),
        }
    }

    pub fn with_config(config: SchedulerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            scheduler: Scheduler::with_config(config)?,
            set: ProcessSet::new(),
        })
    }

    /// Replace the working process set and start over from tick zero.
    pub fn load(&mut self, set: ProcessSet) -> Result<(), ConfigError> {
        self.scheduler.load(&set)?;
        self.set = set;
        Ok(())
    }

    /// Rewind to tick zero with the same set and configuration.
    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    /// Swap scheduler parameters.
    ///
    /// Rejected while a run is underway; reset first. The swap itself resets
    /// the engine so the parameters apply from tick zero.
    pub fn configure(&mut self, config: SchedulerConfig) -> Result<(), SimError> {
        if self.mid_run() {
            return Err(StateError::MidRun.into());
        }
        self.scheduler.set_config(config)?;
        Ok(())
    }

    /// Advance one tick.
    pub fn step(&mut self) -> Result<Snapshot, StateError> {
        self.scheduler.step()
    }

    /// Step until every process completes and return the final metrics.
    ///
    /// The bound is the latest arrival plus total burst plus one dispatch
    /// tick per process; a valid set always finishes within it.
    pub fn run_to_completion(&mut self) -> Result<SimMetrics, SimError> {
        let bound = self.step_bound();
        for _ in 0..bound {
            if self.scheduler.is_finished() {
                break;
            }
            self.scheduler.step()?;
        }
        Ok(self.scheduler.metrics()?)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.scheduler.snapshot()
    }

    /// Completion statistics; defined only once the run has finished.
    pub fn stats(&self) -> Result<SimMetrics, StateError> {
        self.scheduler.metrics()
    }

    /// Dispatch history since the last reset.
    pub fn trace(&self) -> &[TraceSegment] {
        self.scheduler.trace()
    }

    pub fn is_finished(&self) -> bool {
        self.scheduler.is_finished()
    }

    pub fn clock(&self) -> Tick {
        self.scheduler.clock()
    }

    pub fn process_set(&self) -> &ProcessSet {
        &self.set
    }

    pub fn config(&self) -> &SchedulerConfig {
        self.scheduler.config()
    }

    fn mid_run(&self) -> bool {
        self.scheduler.clock() > 0 && !self.scheduler.is_finished()
    }

    fn step_bound(&self) -> u64 {
        let last_arrival = self.set.specs().iter().map(|s| s.arrival).max().unwrap_or(0);
        let total_burst: u64 = self.set.specs().iter().map(|s| s.burst).sum();
        last_arrival + total_burst + self.set.len() as u64 + 2
    }
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new()
    }
}
