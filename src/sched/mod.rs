/*!
 * MLFQ Scheduler
 * Tick-driven multi-level feedback queue engine with aging and demotion
 */

use log::info;

use crate::core::errors::ConfigError;
use crate::core::types::Tick;

mod config;
mod operations;
mod process;
mod queue;
mod snapshot;
mod stats;

pub use config::{
    SchedulerConfig, DEFAULT_AGING_THRESHOLD, DEFAULT_BANDS, DEFAULT_DEMOTION_THRESHOLD,
    DEFAULT_QUANTUM,
};
pub use process::{Process, ProcessSet, ProcessSpec};
pub use queue::QueueLevel;
pub use snapshot::{LevelView, ProcessView, Snapshot, TraceSegment};
pub use stats::{ProcessMetrics, SimMetrics};

/// The process currently on the CPU and the tick its slice began.
#[derive(Debug, Clone, Copy)]
struct RunSlice {
    slot: usize,
    since: Tick,
}

/// MLFQ scheduling engine.
///
/// Owns the priority bands, the loaded process table, the running slot and
/// the simulation clock. One `step()` advances the clock by exactly one tick.
/// All state is plain data, so a simulation paused between ticks resumes with
/// identical future behavior; between ticks, `snapshot()` describes the tick
/// about to run.
pub struct Scheduler {
    config: SchedulerConfig,
    processes: Vec<Process>,
    levels: Vec<QueueLevel>,
    current: Option<RunSlice>,
    clock: Tick,
    finished: bool,
    trace: Vec<TraceSegment>,
}

impl Scheduler {
    /// Create an engine with the default four-band configuration.
    pub fn new() -> Self {
        Self::assemble(SchedulerConfig::default())
    }

    /// Create an engine with a validated configuration.
    pub fn with_config(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: SchedulerConfig) -> Self {
        info!(
            "scheduler initialized: {} bands, aging={}, demotion={}",
            config.bands(),
            config.aging_threshold,
            config.demotion_threshold
        );
        let levels = Self::build_levels(&config);
        Self {
            config,
            processes: Vec::new(),
            levels,
            current: None,
            clock: 0,
            finished: false,
            trace: Vec::new(),
        }
    }

    fn build_levels(config: &SchedulerConfig) -> Vec<QueueLevel> {
        config
            .quanta
            .iter()
            .enumerate()
            .map(|(i, &quantum)| QueueLevel::new(i + 1, quantum))
            .collect()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Name of the process currently on the CPU, if any.
    pub fn running(&self) -> Option<&str> {
        self.current.map(|run| self.processes[run.slot].name())
    }

    /// The loaded process table, in (arrival, input) order after reset.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Dispatch history since the last reset.
    pub fn trace(&self) -> &[TraceSegment] {
        &self.trace
    }

    /// Observable state: clock, running process, per-band queue contents.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            clock: self.clock,
            finished: self.finished,
            running: self
                .current
                .map(|run| ProcessView::from(&self.processes[run.slot])),
            levels: self
                .levels
                .iter()
                .map(|level| LevelView {
                    band: level.band(),
                    quantum: level.quantum(),
                    queue: level
                        .iter()
                        .map(|slot| ProcessView::from(&self.processes[slot]))
                        .collect(),
                })
                .collect(),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_engine_has_a_clean_snapshot() {
        let scheduler = Scheduler::new();
        let snapshot = scheduler.snapshot();

        assert_eq!(snapshot.clock, 0);
        assert!(!snapshot.finished);
        assert!(snapshot.running.is_none());
        assert_eq!(snapshot.levels.len(), DEFAULT_BANDS);
        assert!(snapshot.levels.iter().all(|level| level.queue.is_empty()));
    }

    #[test]
    fn single_process_runs_to_completion() {
        let mut scheduler =
            Scheduler::with_config(SchedulerConfig::uniform(1, 10, 5, 6)).unwrap();
        scheduler
            .load(&ProcessSet::from_specs(vec![ProcessSpec::new("P1", 0, 5, 1)]))
            .unwrap();

        while !scheduler.is_finished() {
            scheduler.step().unwrap();
        }

        assert_eq!(scheduler.clock(), 5);
        let p = &scheduler.processes()[0];
        assert_eq!(p.completion(), Some(5));
        assert_eq!(p.first_response(), Some(0));
        assert_eq!(p.turnaround(), Some(5));
    }

    #[test]
    fn dispatch_is_fifo_within_a_band() {
        let mut scheduler = Scheduler::new();
        scheduler
            .load(&ProcessSet::from_specs(vec![
                ProcessSpec::new("A", 0, 3, 1),
                ProcessSpec::new("B", 0, 3, 1),
            ]))
            .unwrap();

        scheduler.step().unwrap();
        assert_eq!(scheduler.running(), Some("A"));
    }

    #[test]
    fn stepping_without_a_set_is_rejected() {
        let mut scheduler = Scheduler::new();
        assert_eq!(
            scheduler.step().unwrap_err(),
            crate::core::errors::StateError::NoProcessSet
        );
    }
}
