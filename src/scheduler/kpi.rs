//! Schedule quality metrics (KPIs).
//!
//! Computes standard single-processor performance indicators from a
//! finished simulation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion time |
//! | Utilization | Busy time / (makespan - first arrival) |
//! | Throughput | Processes / (makespan - first arrival) |
//! | Avg Turnaround | Mean(completion - arrival) |
//! | Avg Waiting | Mean(turnaround - burst) |
//! | Avg Response | Mean(first run - arrival) |
//! | Max Waiting | Largest single waiting time |
//! | Context Switches | Hand-overs between different processes |

use serde::{Deserialize, Serialize};

use super::SimulationResult;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Latest completion time.
    pub makespan: f64,
    /// Total time the CPU was busy.
    pub busy_time: f64,
    /// Fraction of the observed span the CPU was busy (0.0..=1.0).
    pub utilization: f64,
    /// Completed processes per time unit over the observed span.
    pub throughput: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Largest waiting time of any process.
    pub max_waiting: f64,
    /// Number of context switches.
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a simulation result.
    pub fn calculate(result: &SimulationResult) -> Self {
        let makespan = result
            .processes
            .iter()
            .map(|m| m.completion_time)
            .fold(0.0, f64::max);
        let first_arrival = result
            .processes
            .iter()
            .map(|m| m.arrival_time)
            .fold(f64::INFINITY, f64::min);
        let busy_time = result.timeline.total_busy_time();

        // Observed span: from the first arrival to the last completion.
        let span = if first_arrival.is_finite() {
            makespan - first_arrival
        } else {
            0.0
        };
        let (utilization, throughput) = if span > 0.0 {
            (busy_time / span, result.processes.len() as f64 / span)
        } else {
            (0.0, 0.0)
        };

        let max_waiting = result
            .processes
            .iter()
            .map(|m| m.waiting_time)
            .fold(0.0, f64::max);

        Self {
            makespan,
            busy_time,
            utilization,
            throughput,
            avg_turnaround: result.avg_turnaround,
            avg_waiting: result.avg_waiting,
            avg_response: result.avg_response(),
            max_waiting,
            context_switches: result.timeline.context_switches(),
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_avg_waiting: f64, min_utilization: f64) -> bool {
        self.avg_waiting <= max_avg_waiting && self.utilization >= min_utilization
    }
}
