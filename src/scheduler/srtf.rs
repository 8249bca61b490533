//! Preemptive shortest-remaining-time-first.
//!
//! Event-driven: the ready set is re-examined only at arrivals and
//! completions, so the timeline is exact rather than quantized. The ready
//! process with the least remaining time runs until it finishes or the
//! next arrival, whichever comes first. Ties go to the lowest index.
//!
//! A process selected at consecutive events keeps a single interval; a new
//! interval opens only on a context switch.

use log::{debug, trace};

use super::state::Simulation;
use super::{SchedulingPolicy, SimulationResult};
use crate::models::{ProcessSet, TIME_EPSILON};
use crate::validation::ValidationError;

/// Shortest-remaining-time-first (preemptive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Srtf;

impl Srtf {
    /// Ready process with minimum remaining time; lowest index on ties.
    fn select(sim: &Simulation<'_>, clock: f64) -> Option<usize> {
        sim.ready_at(clock).fold(None, |best, index| match best {
            Some(b) if sim.remaining(index) >= sim.remaining(b) - TIME_EPSILON => Some(b),
            _ => Some(index),
        })
    }
}

impl SchedulingPolicy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn description(&self) -> &'static str {
        "Preemptive Shortest Remaining Time First"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn simulate(&self, processes: &ProcessSet) -> SimulationResult {
        let mut sim = Simulation::new(processes);
        let mut clock = processes.earliest_arrival();
        let mut running: Option<usize> = None;

        while !sim.all_complete() {
            let Some(index) = Self::select(&sim, clock) else {
                match sim.next_arrival_after(clock) {
                    Some(next) => {
                        trace!("idle [{clock:.3}, {next:.3})");
                        clock = next;
                        running = None;
                        continue;
                    }
                    None => break,
                }
            };

            if let Some(prev) = running.filter(|&prev| prev != index) {
                trace!("P{index} preempts P{prev} at {clock:.3}");
            }

            let remaining = sim.remaining(index);
            let slice = match sim.next_arrival_after(clock) {
                Some(next) if next - clock < remaining - TIME_EPSILON => next - clock,
                _ => remaining,
            };

            let outcome = sim.execute(index, clock, slice, true);
            running = if outcome.finished { None } else { Some(index) };
            clock = outcome.end;
        }

        let result = sim.finish(self.name());
        debug!(
            "SRTF over {} processes: {} runs, avg turnaround {:.3}, avg waiting {:.3}",
            processes.len(),
            result.timeline.len(),
            result.avg_turnaround,
            result.avg_waiting
        );
        result
    }
}

/// Simulates SRTF over parallel arrival/burst arrays.
pub fn srtf(arrival: &[f64], burst: &[f64]) -> Result<SimulationResult, ValidationError> {
    let processes = ProcessSet::from_arrays(arrival, burst)?;
    Ok(Srtf.simulate(&processes))
}
