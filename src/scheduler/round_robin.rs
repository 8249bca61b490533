//! Round-robin with a fixed time quantum.
//!
//! # Algorithm
//!
//! 1. Admit, in arrival order, every process that has arrived by the clock.
//! 2. If the ready queue is empty, jump to the next arrival.
//! 3. Run the head for `min(quantum, remaining)` and emit one interval.
//! 4. Admit arrivals that occurred during the slice.
//! 5. Re-enqueue the process at the tail if it still has work.
//!
//! Arrivals during a slice are queued ahead of the preempted process.
//! One interval is emitted per slice; use [`Timeline::merged`] for the
//! per-run view.
//!
//! [`Timeline::merged`]: crate::models::Timeline::merged

use std::collections::VecDeque;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::state::Simulation;
use super::{SchedulingPolicy, SimulationResult};
use crate::models::{ProcessSet, TIME_EPSILON};
use crate::validation::{validate_quantum, ValidationError};

/// Default round-robin quantum.
pub const DEFAULT_QUANTUM: f64 = 2.0;

/// Round-robin (preemptive, fixed quantum).
///
/// The quantum is validated on construction and on deserialization, so a
/// `RoundRobin` always has a positive finite quantum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuantumConfig", into = "QuantumConfig")]
pub struct RoundRobin {
    quantum: f64,
}

/// Serialized form of [`RoundRobin`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct QuantumConfig {
    quantum: f64,
}

impl TryFrom<QuantumConfig> for RoundRobin {
    type Error = ValidationError;

    fn try_from(config: QuantumConfig) -> Result<Self, Self::Error> {
        Self::new(config.quantum)
    }
}

impl From<RoundRobin> for QuantumConfig {
    fn from(rr: RoundRobin) -> Self {
        Self {
            quantum: rr.quantum,
        }
    }
}

impl RoundRobin {
    /// Creates a round-robin policy; the quantum must be positive.
    pub fn new(quantum: f64) -> Result<Self, ValidationError> {
        validate_quantum(quantum)?;
        Ok(Self { quantum })
    }

    /// The time quantum.
    pub fn quantum(&self) -> f64 {
        self.quantum
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn simulate(&self, processes: &ProcessSet) -> SimulationResult {
        let mut sim = Simulation::new(processes);
        let order = processes.arrival_order();
        let mut admitted = 0;
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(processes.len());
        let mut clock = processes.earliest_arrival();

        while !sim.all_complete() {
            admit(&sim, &order, &mut admitted, clock, &mut queue);

            let Some(index) = queue.pop_front() else {
                match order.get(admitted) {
                    Some(&next) => {
                        trace!("idle [{clock:.3}, {:.3})", sim.arrival(next));
                        clock = sim.arrival(next);
                        continue;
                    }
                    None => break,
                }
            };

            let slice = self.quantum.min(sim.remaining(index));
            let outcome = sim.execute(index, clock, slice, false);
            clock = outcome.end;

            admit(&sim, &order, &mut admitted, clock, &mut queue);
            if !outcome.finished {
                queue.push_back(index);
            }
        }

        let result = sim.finish(self.name());
        debug!(
            "RR(q={}) over {} processes: {} slices, avg turnaround {:.3}, avg waiting {:.3}",
            self.quantum,
            processes.len(),
            result.timeline.len(),
            result.avg_turnaround,
            result.avg_waiting
        );
        result
    }
}

/// Enqueues every not-yet-admitted process that has arrived by `clock`.
fn admit(
    sim: &Simulation<'_>,
    order: &[usize],
    admitted: &mut usize,
    clock: f64,
    queue: &mut VecDeque<usize>,
) {
    while let Some(&index) = order.get(*admitted) {
        if sim.arrival(index) > clock + TIME_EPSILON {
            break;
        }
        queue.push_back(index);
        *admitted += 1;
    }
}

/// Simulates round-robin over parallel arrival/burst arrays.
pub fn round_robin(
    arrival: &[f64],
    burst: &[f64],
    quantum: f64,
) -> Result<SimulationResult, ValidationError> {
    let policy = RoundRobin::new(quantum)?;
    let processes = ProcessSet::from_arrays(arrival, burst)?;
    Ok(policy.simulate(&processes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rr_alternates_equal_jobs() {
        let result = round_robin(&[0.0, 0.0], &[4.0, 4.0], 2.0).unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 0.0, 2.0), (1, 2.0, 4.0), (0, 4.0, 6.0), (1, 6.0, 8.0)]
        );
        assert!((result.avg_turnaround - 7.0).abs() < 1e-12);
        assert!((result.avg_waiting - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rr_arrival_during_slice_goes_ahead() {
        // P1 arrives at 1 while P0 runs [0, 2); P1 is queued before P0 returns.
        let result = round_robin(&[0.0, 1.0], &[3.0, 2.0], 2.0).unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 0.0, 2.0), (1, 2.0, 4.0), (0, 4.0, 5.0)]
        );
    }

    #[test]
    fn test_rr_arrival_at_slice_end_goes_ahead() {
        let result = round_robin(&[0.0, 2.0], &[4.0, 1.0], 2.0).unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 0.0, 2.0), (1, 2.0, 3.0), (0, 3.0, 5.0)]
        );
    }

    #[test]
    fn test_rr_short_last_slice() {
        let result = round_robin(&[0.0], &[5.0], 2.0).unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 0.0, 2.0), (0, 2.0, 4.0), (0, 4.0, 5.0)]
        );
        assert_eq!(result.timeline.merged().to_tuples(), vec![(0, 0.0, 5.0)]);
    }

    #[test]
    fn test_rr_idle_jumps_to_next_arrival() {
        let result = round_robin(&[1.0, 7.5], &[1.0, 3.0], 2.0).unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 1.0, 2.0), (1, 7.5, 9.5), (1, 9.5, 10.5)]
        );
        assert!(result.avg_waiting.abs() < 1e-12);
    }

    #[test]
    fn test_rr_fractional_quantum() {
        let result = round_robin(&[0.0, 0.0], &[1.0, 0.5], 0.5).unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 0.0, 0.5), (1, 0.5, 1.0), (0, 1.0, 1.5)]
        );
    }

    #[test]
    fn test_rr_rejects_bad_quantum() {
        let err = round_robin(&[0.0], &[1.0], 0.0).unwrap_err();
        assert!(err.is_configuration());
        assert!(RoundRobin::new(-2.0).is_err());
        assert_eq!(RoundRobin::default().quantum(), DEFAULT_QUANTUM);
    }

    #[test]
    fn test_rr_serde_validates_quantum() {
        let rr: RoundRobin = serde_json::from_str(r#"{"quantum":0.5}"#).unwrap();
        assert_eq!(rr.quantum(), 0.5);
        assert_eq!(serde_json::to_string(&rr).unwrap(), r#"{"quantum":0.5}"#);

        assert!(serde_json::from_str::<RoundRobin>(r#"{"quantum":-1.0}"#).is_err());
        assert!(serde_json::from_str::<RoundRobin>(r#"{"quantum":0.0}"#).is_err());
    }
}
