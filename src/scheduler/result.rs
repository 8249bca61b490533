//! Simulation output: timeline, per-process metrics and averages.

use serde::{Deserialize, Serialize};

use crate::models::{ProcessSet, Timeline};

/// Timing outcome of one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Input position of the process.
    pub index: usize,
    /// Arrival time.
    pub arrival_time: f64,
    /// Burst time.
    pub burst_time: f64,
    /// Priority (as given).
    pub priority: i32,
    /// Instant the process first ran.
    pub first_start_time: f64,
    /// Instant the process finished.
    pub completion_time: f64,
    /// `completion - arrival`.
    pub turnaround_time: f64,
    /// `turnaround - burst`.
    pub waiting_time: f64,
    /// `first_start - arrival`.
    pub response_time: f64,
}

/// Result of simulating one policy over a process set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Policy that produced this result.
    pub policy: String,
    /// Execution timeline.
    pub timeline: Timeline,
    /// Per-process metrics in input order.
    pub processes: Vec<ProcessMetrics>,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
}

impl SimulationResult {
    /// Builds a result from a finished timeline and per-process
    /// `(first_start, completion)` instants.
    pub(crate) fn new(
        policy: &str,
        processes: &ProcessSet,
        timeline: Timeline,
        instants: &[(f64, f64)],
    ) -> Self {
        let metrics: Vec<ProcessMetrics> = processes
            .iter()
            .zip(instants)
            .enumerate()
            .map(|(index, (p, &(first_start, completion)))| {
                let turnaround = completion - p.arrival_time;
                ProcessMetrics {
                    index,
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    priority: p.priority,
                    first_start_time: first_start,
                    completion_time: completion,
                    turnaround_time: turnaround,
                    waiting_time: turnaround - p.burst_time,
                    response_time: first_start - p.arrival_time,
                }
            })
            .collect();

        let n = metrics.len().max(1) as f64;
        let avg_turnaround = metrics.iter().map(|m| m.turnaround_time).sum::<f64>() / n;
        let avg_waiting = metrics.iter().map(|m| m.waiting_time).sum::<f64>() / n;

        Self {
            policy: policy.to_string(),
            timeline,
            processes: metrics,
            avg_turnaround,
            avg_waiting,
        }
    }

    /// Mean response time (first run - arrival).
    pub fn avg_response(&self) -> f64 {
        let n = self.processes.len().max(1) as f64;
        self.processes.iter().map(|m| m.response_time).sum::<f64>() / n
    }

    /// Metrics for one process.
    pub fn metrics_for(&self, index: usize) -> Option<&ProcessMetrics> {
        self.processes.get(index)
    }

    /// `(timeline, avg_turnaround, avg_waiting)`.
    pub fn into_parts(self) -> (Vec<(usize, f64, f64)>, f64, f64) {
        (self.timeline.to_tuples(), self.avg_turnaround, self.avg_waiting)
    }
}
