/*!
 * Completion Statistics
 * Aggregate waiting/turnaround/response metrics over a finished run
 */

use serde::Serialize;

use super::process::Process;
use super::Scheduler;
use crate::core::errors::StateError;
use crate::core::types::Tick;

/// Final metrics of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub name: String,
    pub completion: Tick,
    pub turnaround: Tick,
    pub waiting: Tick,
    pub response: Tick,
}

/// Averages over every process of a finished run, with the per-process rows
/// they are derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimMetrics {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    pub per_process: Vec<ProcessMetrics>,
}

impl SimMetrics {
    /// Derive metrics from completed process records. Any incomplete record
    /// means the run is still in progress and the metrics are undefined.
    pub(crate) fn from_processes(processes: &[Process]) -> Result<Self, StateError> {
        if processes.is_empty() {
            return Err(StateError::Incomplete);
        }

        let mut per_process = Vec::with_capacity(processes.len());
        for p in processes {
            let (completion, first_response) = match (p.completion, p.first_response) {
                (Some(completion), Some(first_response)) => (completion, first_response),
                _ => return Err(StateError::Incomplete),
            };
            let turnaround = completion - p.arrival;
            per_process.push(ProcessMetrics {
                name: p.name.clone(),
                completion,
                turnaround,
                waiting: turnaround - p.original_burst,
                response: first_response - p.arrival,
            });
        }

        let n = per_process.len() as f64;
        Ok(Self {
            avg_waiting: per_process.iter().map(|m| m.waiting as f64).sum::<f64>() / n,
            avg_turnaround: per_process.iter().map(|m| m.turnaround as f64).sum::<f64>() / n,
            avg_response: per_process.iter().map(|m| m.response as f64).sum::<f64>() / n,
            per_process,
        })
    }
}

impl Scheduler {
    /// Metrics for the loaded set; defined only once every process completed.
    pub fn metrics(&self) -> Result<SimMetrics, StateError> {
        SimMetrics::from_processes(self.processes())
    }
}
