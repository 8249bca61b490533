//! Non-preemptive fixed-priority scheduling.
//!
//! Whenever the CPU is free, the ready process with the winning priority
//! value runs to completion. Which end of the integer range wins is an
//! explicit [`PriorityOrder`]; the default favors numerically larger
//! values. Ties go to the earliest arrival, then the lowest index.
//! When nothing is ready the clock jumps to the next arrival.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::state::Simulation;
use super::{SchedulingPolicy, SimulationResult};
use crate::models::{ProcessSet, TIME_EPSILON};
use crate::validation::ValidationError;

/// Direction of the priority comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityOrder {
    /// Numerically largest priority runs first.
    #[default]
    HighestFirst,
    /// Numerically smallest priority runs first (Unix `nice` convention).
    LowestFirst,
}

impl PriorityOrder {
    /// Whether priority `a` strictly outranks priority `b`.
    #[inline]
    pub fn outranks(self, a: i32, b: i32) -> bool {
        match self {
            Self::HighestFirst => a > b,
            Self::LowestFirst => a < b,
        }
    }
}

/// Fixed-priority (non-preemptive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityScheduling {
    order: PriorityOrder,
}

impl PriorityScheduling {
    /// Creates a priority policy with the given comparison direction.
    pub fn new(order: PriorityOrder) -> Self {
        Self { order }
    }

    /// The comparison direction.
    pub fn order(&self) -> PriorityOrder {
        self.order
    }

    fn select(&self, sim: &Simulation<'_>, clock: f64) -> Option<usize> {
        sim.ready_at(clock).fold(None, |best, index| match best {
            Some(b) if !self.beats(sim, index, b) => Some(b),
            _ => Some(index),
        })
    }

    /// Whether `a` should run before `b`. Indices arrive in ascending order,
    /// so an exact tie keeps the earlier candidate.
    fn beats(&self, sim: &Simulation<'_>, a: usize, b: usize) -> bool {
        let (pa, pb) = (sim.priority(a), sim.priority(b));
        if pa != pb {
            return self.order.outranks(pa, pb);
        }
        sim.arrival(a) < sim.arrival(b) - TIME_EPSILON
    }
}

impl SchedulingPolicy for PriorityScheduling {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn description(&self) -> &'static str {
        match self.order {
            PriorityOrder::HighestFirst => "Non-Preemptive Highest Priority First",
            PriorityOrder::LowestFirst => "Non-Preemptive Lowest Priority Value First",
        }
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn simulate(&self, processes: &ProcessSet) -> SimulationResult {
        let mut sim = Simulation::new(processes);
        let mut clock = processes.earliest_arrival();

        while !sim.all_complete() {
            let Some(index) = self.select(&sim, clock) else {
                match sim.next_arrival_after(clock) {
                    Some(next) => {
                        trace!("idle [{clock:.3}, {next:.3})");
                        clock = next;
                        continue;
                    }
                    None => break,
                }
            };

            trace!(
                "P{index} (priority {}) dispatched at {clock:.3}",
                sim.priority(index)
            );
            clock = sim.execute(index, clock, sim.remaining(index), false).end;
        }

        let result = sim.finish(self.name());
        debug!(
            "Priority({:?}) over {} processes: avg turnaround {:.3}, avg waiting {:.3}",
            self.order,
            processes.len(),
            result.avg_turnaround,
            result.avg_waiting
        );
        result
    }
}

/// Simulates priority scheduling over parallel arrival/burst/priority arrays.
pub fn priority(
    arrival: &[f64],
    burst: &[f64],
    priorities: &[i32],
    order: PriorityOrder,
) -> Result<SimulationResult, ValidationError> {
    let processes = ProcessSet::from_arrays_with_priority(arrival, burst, priorities)?;
    Ok(PriorityScheduling::new(order).simulate(&processes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_order(result: &SimulationResult) -> Vec<usize> {
        result.timeline.iter().map(|iv| iv.process).collect()
    }

    #[test]
    fn test_priority_highest_value_first() {
        let result = priority(
            &[0.0, 0.0, 0.0],
            &[3.0, 1.0, 2.0],
            &[1, 5, 3],
            PriorityOrder::HighestFirst,
        )
        .unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(1, 0.0, 1.0), (2, 1.0, 3.0), (0, 3.0, 6.0)]
        );
        // turnaround 6, 1, 3
        assert!((result.avg_turnaround - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_lowest_value_first() {
        let result = priority(
            &[0.0, 0.0, 0.0],
            &[3.0, 1.0, 2.0],
            &[1, 5, 3],
            PriorityOrder::LowestFirst,
        )
        .unwrap();
        assert_eq!(run_order(&result), vec![0, 2, 1]);
    }

    #[test]
    fn test_priority_is_non_preemptive() {
        // P1 has higher priority but arrives while P0 runs; P0 finishes first.
        let result = priority(
            &[0.0, 1.0],
            &[4.0, 1.0],
            &[1, 9],
            PriorityOrder::HighestFirst,
        )
        .unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 0.0, 4.0), (1, 4.0, 5.0)]
        );
    }

    #[test]
    fn test_priority_tie_breaks_by_arrival_then_index() {
        let result = priority(
            &[1.0, 0.5, 0.5, 0.0],
            &[1.0, 1.0, 1.0, 1.0],
            &[2, 2, 2, 0],
            PriorityOrder::HighestFirst,
        )
        .unwrap();
        // P3 alone at 0; at 1.0 all of P0, P1, P2 ready with equal priority.
        assert_eq!(run_order(&result), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_priority_idle_jumps_to_next_arrival() {
        let result = priority(&[0.0, 3.5], &[1.0, 1.0], &[0, 0], PriorityOrder::default())
            .unwrap();
        assert_eq!(
            result.timeline.to_tuples(),
            vec![(0, 0.0, 1.0), (1, 3.5, 4.5)]
        );
    }

    #[test]
    fn test_priority_requires_matching_priorities() {
        let err = priority(&[0.0, 1.0], &[1.0, 1.0], &[1], PriorityOrder::default()).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field, Some("priority"));
    }

    #[test]
    fn test_outranks() {
        assert!(PriorityOrder::HighestFirst.outranks(5, 1));
        assert!(!PriorityOrder::HighestFirst.outranks(1, 1));
        assert!(PriorityOrder::LowestFirst.outranks(1, 5));
    }
}
