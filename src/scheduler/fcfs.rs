//! First-come-first-served.
//!
//! Processes run to completion in ascending arrival order; equal arrivals
//! keep their input order. The clock starts at 0 and jumps forward over
//! idle gaps.
//!
//! # Complexity
//! O(n log n) for the stable sort, O(n) for the dispatch loop.

use log::{debug, trace};

use super::state::Simulation;
use super::{SchedulingPolicy, SimulationResult};
use crate::models::ProcessSet;
use crate::validation::ValidationError;

/// First-come-first-served (non-preemptive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn description(&self) -> &'static str {
        "First Come First Serve"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn simulate(&self, processes: &ProcessSet) -> SimulationResult {
        let mut sim = Simulation::new(processes);
        let mut clock = 0.0;

        for index in processes.arrival_order() {
            let arrival = sim.arrival(index);
            if arrival > clock {
                trace!("idle [{clock:.3}, {arrival:.3})");
                clock = arrival;
            }
            clock = sim.execute(index, clock, sim.remaining(index), false).end;
        }

        let result = sim.finish(self.name());
        debug!(
            "FCFS over {} processes: avg turnaround {:.3}, avg waiting {:.3}",
            processes.len(),
            result.avg_turnaround,
            result.avg_waiting
        );
        result
    }
}

/// Simulates FCFS over parallel arrival/burst arrays.
pub fn fcfs(arrival: &[f64], burst: &[f64]) -> Result<SimulationResult, ValidationError> {
    let processes = ProcessSet::from_arrays(arrival, burst)?;
    Ok(Fcfs.simulate(&processes))
}
