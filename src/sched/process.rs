/*!
 * Process Records
 * Schedulable units and the validated set they live in
 */

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigError;
use crate::core::types::{Band, Tick};

/// Input form of one process: the fields a user (or the randomizer) supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: Band,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival: Tick, burst: Tick, priority: Band) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority,
        }
    }
}

/// Live record of one schedulable unit.
///
/// Static fields are fixed at load; dynamic fields churn every tick and are
/// restored from their `original_*` counterparts on reset. First response and
/// completion stay unset until the corresponding event happens, so a tick-0
/// dispatch is distinguishable from "never ran".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pub(crate) name: String,
    pub(crate) arrival: Tick,
    pub(crate) original_burst: Tick,
    pub(crate) burst: Tick,
    pub(crate) original_priority: Band,
    pub(crate) priority: Band,
    pub(crate) processed_time: Tick,
    pub(crate) sub_wait_time: Tick,
    pub(crate) first_response: Option<Tick>,
    pub(crate) completion: Option<Tick>,
}

impl Process {
    pub(crate) fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            name: spec.name.clone(),
            arrival: spec.arrival,
            original_burst: spec.burst,
            burst: spec.burst,
            original_priority: spec.priority,
            priority: spec.priority,
            processed_time: 0,
            sub_wait_time: 0,
            first_response: None,
            completion: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    /// Remaining CPU ticks.
    pub fn burst(&self) -> Tick {
        self.burst
    }

    /// Current band (1 = highest priority).
    pub fn priority(&self) -> Band {
        self.priority
    }

    pub fn first_response(&self) -> Option<Tick> {
        self.first_response
    }

    pub fn completion(&self) -> Option<Tick> {
        self.completion
    }

    /// Turnaround is only meaningful once the process has completed.
    pub fn turnaround(&self) -> Option<Tick> {
        self.completion.map(|c| c - self.arrival)
    }

    pub fn is_completed(&self) -> bool {
        self.burst == 0
    }

    /// Charge one tick of CPU time.
    pub(crate) fn charge(&mut self) {
        self.processed_time += 1;
        self.burst -= 1;
    }

    /// Count one tick spent waiting in a queue.
    pub(crate) fn wait(&mut self) {
        self.sub_wait_time += 1;
    }

    /// Move up one band; the consecutive-wait credit is consumed.
    pub(crate) fn promote(&mut self) {
        self.priority -= 1;
        self.sub_wait_time = 0;
    }

    /// Move down one band; the processed-time budget starts over.
    pub(crate) fn demote(&mut self) {
        self.priority += 1;
        self.processed_time = 0;
    }

    pub(crate) fn complete(&mut self, now: Tick) {
        self.completion = Some(now);
    }

    pub(crate) fn restore(&mut self) {
        self.burst = self.original_burst;
        self.priority = self.original_priority;
        self.processed_time = 0;
        self.sub_wait_time = 0;
        self.first_response = None;
        self.completion = None;
    }
}

/// Ordered, name-unique collection of process specs.
///
/// The editing surface behind load: add, remove, clear, bulk replace, seeded
/// random generation. Band-range validation happens against a concrete
/// scheduler configuration at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSet {
    specs: Vec<ProcessSpec>,
}

impl ProcessSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: Vec<ProcessSpec>) -> Self {
        Self { specs }
    }

    /// The seven-process workload the simulator ships as its demo input.
    pub fn demo() -> Self {
        Self::from_specs(vec![
            ProcessSpec::new("P1", 1, 20, 3),
            ProcessSpec::new("P2", 3, 10, 2),
            ProcessSpec::new("P3", 5, 2, 1),
            ProcessSpec::new("P4", 8, 7, 2),
            ProcessSpec::new("P5", 11, 15, 3),
            ProcessSpec::new("P6", 15, 8, 2),
            ProcessSpec::new("P7", 20, 4, 1),
        ])
    }

    /// Generate `n` processes with arrival in 0..=10, burst in 1..=10 and a
    /// priority drawn from the configured bands. Same seed, same set.
    pub fn randomize(n: usize, bands: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let specs = (1..=n)
            .map(|i| {
                ProcessSpec::new(
                    format!("P{i}"),
                    rng.gen_range(0..=10),
                    rng.gen_range(1..=10),
                    rng.gen_range(1..=bands),
                )
            })
            .collect();
        Self { specs }
    }

    pub fn add(&mut self, spec: ProcessSpec) -> Result<(), ConfigError> {
        if self.specs.iter().any(|s| s.name == spec.name) {
            return Err(ConfigError::DuplicateName(spec.name));
        }
        self.specs.push(spec);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.specs.len();
        self.specs.retain(|s| s.name != name);
        self.specs.len() < before
    }

    pub fn clear(&mut self) {
        self.specs.clear();
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn specs(&self) -> &[ProcessSpec] {
        &self.specs
    }

    /// Check the whole set against a band count: unique names, positive
    /// bursts, priorities inside [1, bands]. Empty sets are rejected.
    pub fn validate(&self, bands: usize) -> Result<(), ConfigError> {
        if self.specs.is_empty() {
            return Err(ConfigError::EmptyProcessSet);
        }
        for (i, spec) in self.specs.iter().enumerate() {
            if self.specs[..i].iter().any(|s| s.name == spec.name) {
                return Err(ConfigError::DuplicateName(spec.name.clone()));
            }
            if spec.burst == 0 {
                return Err(ConfigError::ZeroBurst(spec.name.clone()));
            }
            if spec.priority < 1 || spec.priority > bands {
                return Err(ConfigError::PriorityOutOfRange {
                    name: spec.name.clone(),
                    priority: spec.priority,
                    bands,
                });
            }
        }
        Ok(())
    }
}
