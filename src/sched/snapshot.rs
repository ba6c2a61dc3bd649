/*!
 * Simulation Snapshot
 * Pure observable state emitted each tick for presentation layers
 */

use serde::Serialize;

use super::process::Process;
use crate::core::types::{Band, Tick};

/// Live view of one process, as shown in queue and running displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessView {
    pub name: String,
    pub arrival: Tick,
    pub burst: Tick,
    pub processed_time: Tick,
    pub sub_wait_time: Tick,
    pub priority: Band,
}

impl From<&Process> for ProcessView {
    fn from(p: &Process) -> Self {
        Self {
            name: p.name.clone(),
            arrival: p.arrival,
            burst: p.burst,
            processed_time: p.processed_time,
            sub_wait_time: p.sub_wait_time,
            priority: p.priority,
        }
    }
}

/// Ordered contents of one band at a given tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelView {
    pub band: Band,
    pub quantum: Tick,
    pub queue: Vec<ProcessView>,
}

/// Everything an observer may read between ticks.
///
/// `clock` is the tick this snapshot describes. Consumers own their widget
/// lifecycle entirely; the simulator only hands out these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub clock: Tick,
    pub finished: bool,
    pub running: Option<ProcessView>,
    pub levels: Vec<LevelView>,
}

/// One contiguous stretch of CPU given to a process.
///
/// `end` stays open while the process is on the CPU; segments cover
/// `[start, end)` and are what a Gantt-style consumer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceSegment {
    pub name: String,
    pub band: Band,
    pub start: Tick,
    pub end: Option<Tick>,
}
