//! Per-call simulation state.
//!
//! Each policy invocation owns one [`Simulation`]: a mutable run record
//! per process plus the timeline being built. Nothing outlives the call.

use log::trace;

use super::SimulationResult;
use crate::models::{ExecutionInterval, ProcessSet, Timeline, TIME_EPSILON};

#[derive(Debug, Clone, Copy)]
struct RunState {
    /// `0 <= remaining <= burst`.
    remaining: f64,
    first_start: Option<f64>,
    completion: Option<f64>,
}

/// Where a dispatched slice ended and whether it completed the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SliceOutcome {
    pub(crate) end: f64,
    pub(crate) finished: bool,
}

#[derive(Debug)]
pub(crate) struct Simulation<'a> {
    processes: &'a ProcessSet,
    runs: Vec<RunState>,
    timeline: Timeline,
    completed: usize,
}

impl<'a> Simulation<'a> {
    pub(crate) fn new(processes: &'a ProcessSet) -> Self {
        let runs = processes
            .iter()
            .map(|p| RunState {
                remaining: p.burst_time,
                first_start: None,
                completion: None,
            })
            .collect();
        Self {
            processes,
            runs,
            timeline: Timeline::new(),
            completed: 0,
        }
    }

    pub(crate) fn arrival(&self, index: usize) -> f64 {
        self.processes.as_slice()[index].arrival_time
    }

    pub(crate) fn priority(&self, index: usize) -> i32 {
        self.processes.as_slice()[index].priority
    }

    pub(crate) fn remaining(&self, index: usize) -> f64 {
        self.runs[index].remaining
    }

    pub(crate) fn is_complete(&self, index: usize) -> bool {
        self.runs[index].completion.is_some()
    }

    pub(crate) fn all_complete(&self) -> bool {
        self.completed == self.runs.len()
    }

    /// Arrived by `clock` and not yet finished.
    pub(crate) fn is_ready(&self, index: usize, clock: f64) -> bool {
        !self.is_complete(index) && self.arrival(index) <= clock + TIME_EPSILON
    }

    /// Indices of the ready set at `clock`, in input order.
    pub(crate) fn ready_at(&self, clock: f64) -> impl Iterator<Item = usize> + '_ {
        (0..self.runs.len()).filter(move |&i| self.is_ready(i, clock))
    }

    /// Earliest arrival strictly after `clock`.
    pub(crate) fn next_arrival_after(&self, clock: f64) -> Option<f64> {
        self.processes
            .iter()
            .map(|p| p.arrival_time)
            .filter(|&a| a > clock + TIME_EPSILON)
            .min_by(f64::total_cmp)
    }

    /// Runs `index` for `slice` time units starting at `start`.
    ///
    /// The process is charged the requested `slice`, not the rounded
    /// `end - start`, so a slice covering its remaining time always
    /// completes it. When `start + slice` rounds back to `start` the interval
    /// is widened to the next representable instant.
    ///
    /// With `coalesce`, a run that continues the previous interval of the
    /// same process extends it instead of opening a new one.
    pub(crate) fn execute(
        &mut self,
        index: usize,
        start: f64,
        slice: f64,
        coalesce: bool,
    ) -> SliceOutcome {
        let mut end = start + slice;
        if end <= start {
            end = next_instant(start);
        }
        trace!("P{index} runs [{start:.3}, {end:.3})");

        let interval = ExecutionInterval::new(index, start, end);
        if coalesce {
            self.timeline.push_or_extend(interval);
        } else {
            self.timeline.push(interval);
        }

        let run = &mut self.runs[index];
        run.first_start.get_or_insert(start);
        run.remaining -= slice;
        let finished = run.remaining <= TIME_EPSILON;
        if finished {
            run.remaining = 0.0;
            run.completion = Some(end);
            self.completed += 1;
            trace!("P{index} completes at {end:.3}");
        }
        SliceOutcome { end, finished }
    }

    pub(crate) fn finish(self, policy: &str) -> SimulationResult {
        debug_assert!(self.all_complete(), "{policy} left processes unfinished");
        let instants: Vec<(f64, f64)> = self
            .runs
            .iter()
            .map(|r| {
                let completion = r.completion.unwrap_or(f64::NAN);
                (r.first_start.unwrap_or(completion), completion)
            })
            .collect();
        SimulationResult::new(policy, self.processes, self.timeline, &instants)
    }
}

/// Smallest representable instant after a non-negative finite `t`.
fn next_instant(t: f64) -> f64 {
    if t > 0.0 {
        f64::from_bits(t.to_bits() + 1)
    } else {
        f64::from_bits(1)
    }
}
