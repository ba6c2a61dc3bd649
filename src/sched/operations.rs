/*!
 * Scheduler Core Operations
 * Load, reset and the per-tick aging/arrival/execution passes
 */

use log::{debug, info};

use super::process::{Process, ProcessSet};
use super::snapshot::{Snapshot, TraceSegment};
use super::{RunSlice, Scheduler, SchedulerConfig};
use crate::core::errors::{ConfigError, StateError};

impl Scheduler {
    /// Replace the working process set.
    ///
    /// The set is validated against the configured band range; on success the
    /// engine is reset so the new set starts from tick zero.
    pub fn load(&mut self, set: &ProcessSet) -> Result<(), ConfigError> {
        set.validate(self.config.bands())?;
        self.processes = set.specs().iter().map(Process::from_spec).collect();
        info!("loaded {} processes", self.processes.len());
        self.reset();
        Ok(())
    }

    /// Replace scheduler parameters.
    ///
    /// Any loaded set must still fit the new band range; the engine is reset
    /// so the change takes effect from tick zero.
    pub fn set_config(&mut self, config: SchedulerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        for p in &self.processes {
            if p.original_priority > config.bands() {
                return Err(ConfigError::PriorityOutOfRange {
                    name: p.name.clone(),
                    priority: p.original_priority,
                    bands: config.bands(),
                });
            }
        }
        self.levels = Self::build_levels(&config);
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Return every process to its pre-simulation state and rewind the clock.
    pub fn reset(&mut self) {
        for level in &mut self.levels {
            level.clear();
        }
        for p in &mut self.processes {
            p.restore();
        }
        // Stable sort keeps input order among same-tick arrivals.
        self.processes.sort_by_key(|p| p.arrival);
        self.current = None;
        self.clock = 0;
        self.finished = false;
        self.trace.clear();
        debug!("scheduler reset");
    }

    /// Advance the simulation by exactly one tick.
    ///
    /// Pass order is fixed: age waiting processes, admit arrivals, run the
    /// CPU, then check for termination. The returned snapshot describes the
    /// tick that just ran. Stepping a finished simulation is an error and
    /// leaves the state untouched.
    pub fn step(&mut self) -> Result<Snapshot, StateError> {
        if self.processes.is_empty() {
            return Err(StateError::NoProcessSet);
        }
        if self.finished {
            return Err(StateError::Finished);
        }

        self.age_waiting();
        self.admit_arrivals();
        self.run_cpu();

        if self.processes.iter().all(Process::is_completed) {
            self.finished = true;
            info!("simulation finished at tick {}", self.clock);
        }

        let snapshot = self.snapshot();
        if !self.finished {
            self.clock += 1;
        }
        Ok(snapshot)
    }

    /// Count a waiting tick for every queued process and promote the ones
    /// that crossed the aging threshold into the next-higher band.
    fn age_waiting(&mut self) {
        for idx in 0..self.levels.len() {
            let waiting: Vec<usize> = self.levels[idx].iter().collect();
            for slot in waiting {
                self.processes[slot].wait();
                if idx > 0 && self.processes[slot].sub_wait_time >= self.config.aging_threshold {
                    self.levels[idx].remove_slot(slot);
                    self.levels[idx - 1].push_back(slot);
                    self.processes[slot].promote();
                    info!(
                        "process {} promoted to band {} by aging",
                        self.processes[slot].name, self.processes[slot].priority
                    );
                }
            }
        }
    }

    /// Append processes whose arrival tick is now to the band matching their
    /// current priority.
    fn admit_arrivals(&mut self) {
        for slot in 0..self.processes.len() {
            if self.processes[slot].arrival == self.clock {
                let band = self.processes[slot].priority;
                self.levels[band - 1].push_back(slot);
                debug!(
                    "process {} arrived into band {}",
                    self.processes[slot].name, band
                );
            }
        }
    }

    /// Charge the running process, settle quantum expiry or completion, and
    /// dispatch a successor once the CPU frees up.
    fn run_cpu(&mut self) {
        let Some(run) = self.current else {
            self.dispatch();
            return;
        };

        let slot = run.slot;
        self.processes[slot].charge();

        let band = self.processes[slot].priority;
        let expired = self.clock - run.since >= self.config.quantum(band);
        if !expired && !self.processes[slot].is_completed() {
            return;
        }

        if self.processes[slot].is_completed() {
            self.processes[slot].complete(self.clock);
            info!(
                "process {} completed at tick {}",
                self.processes[slot].name, self.clock
            );
        } else {
            if self.processes[slot].processed_time >= self.config.demotion_threshold
                && band < self.levels.len()
            {
                self.processes[slot].demote();
                info!(
                    "process {} demoted to band {}",
                    self.processes[slot].name, self.processes[slot].priority
                );
            }
            let band = self.processes[slot].priority;
            self.levels[band - 1].push_back(slot);
        }

        self.close_trace();
        self.current = None;
        self.dispatch();
    }

    /// Strict priority, FIFO within a band: the head of the first non-empty
    /// level becomes the running process.
    fn dispatch(&mut self) {
        for idx in 0..self.levels.len() {
            if let Some(slot) = self.levels[idx].pop_front() {
                let p = &mut self.processes[slot];
                p.sub_wait_time = 0;
                if p.first_response.is_none() {
                    p.first_response = Some(self.clock);
                }
                self.trace.push(TraceSegment {
                    name: p.name.clone(),
                    band: p.priority,
                    start: self.clock,
                    end: None,
                });
                debug!("dispatched {} from band {}", p.name, p.priority);
                self.current = Some(RunSlice {
                    slot,
                    since: self.clock,
                });
                return;
            }
        }
    }

    fn close_trace(&mut self) {
        if let Some(segment) = self.trace.last_mut() {
            if segment.end.is_none() {
                segment.end = Some(self.clock);
            }
        }
    }
}
