//! Execution timeline model.
//!
//! A timeline is the chronological record of which process held the
//! processor when. Idle periods are implicit: no interval is emitted
//! while nothing is ready.

use serde::{Deserialize, Serialize};

/// Tolerance for comparing simulation instants.
pub const TIME_EPSILON: f64 = 1e-9;

/// A contiguous span during which one process occupies the processor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionInterval {
    /// Index of the running process (input position).
    pub process: usize,
    /// Start instant.
    pub start: f64,
    /// End instant (> start).
    pub end: f64,
}

impl ExecutionInterval {
    /// Creates a new interval.
    pub fn new(process: usize, start: f64, end: f64) -> Self {
        Self {
            process,
            start,
            end,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the two intervals share any instant beyond a shared endpoint.
    pub fn overlaps(&self, other: &ExecutionInterval) -> bool {
        self.start < other.end - TIME_EPSILON && other.start < self.end - TIME_EPSILON
    }

    /// `(process, start, end)` triple.
    pub fn as_tuple(&self) -> (usize, f64, f64) {
        (self.process, self.start, self.end)
    }
}

impl From<(usize, f64, f64)> for ExecutionInterval {
    fn from((process, start, end): (usize, f64, f64)) -> Self {
        Self::new(process, start, end)
    }
}

/// Ordered, non-overlapping sequence of execution intervals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Intervals in non-decreasing start order.
    pub intervals: Vec<ExecutionInterval>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval.
    pub fn push(&mut self, interval: ExecutionInterval) {
        self.intervals.push(interval);
    }

    /// Appends an interval, or extends the last one when it belongs to the
    /// same process and ends where the new one starts.
    pub fn push_or_extend(&mut self, interval: ExecutionInterval) {
        if let Some(last) = self.intervals.last_mut() {
            if last.process == interval.process && (last.end - interval.start).abs() <= TIME_EPSILON
            {
                last.end = interval.end;
                return;
            }
        }
        self.intervals.push(interval);
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the timeline has no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates intervals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionInterval> {
        self.intervals.iter()
    }

    /// Total time a process held the processor.
    pub fn busy_time_for(&self, process: usize) -> f64 {
        self.intervals
            .iter()
            .filter(|iv| iv.process == process)
            .map(|iv| iv.duration())
            .sum()
    }

    /// Total time any process held the processor.
    pub fn total_busy_time(&self) -> f64 {
        self.intervals.iter().map(|iv| iv.duration()).sum()
    }

    /// First instant the process ran.
    pub fn first_start_of(&self, process: usize) -> Option<f64> {
        self.intervals
            .iter()
            .find(|iv| iv.process == process)
            .map(|iv| iv.start)
    }

    /// Last instant the process ran (its completion time).
    pub fn completion_of(&self, process: usize) -> Option<f64> {
        self.intervals
            .iter()
            .rev()
            .find(|iv| iv.process == process)
            .map(|iv| iv.end)
    }

    /// Start of the first interval.
    pub fn start(&self) -> Option<f64> {
        self.intervals.first().map(|iv| iv.start)
    }

    /// End of the last interval.
    pub fn makespan(&self) -> f64 {
        self.intervals.last().map_or(0.0, |iv| iv.end)
    }

    /// Number of hand-overs between different processes.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|w| w[0].process != w[1].process)
            .count()
    }

    /// Coalesces time-adjacent intervals of the same process.
    ///
    /// Round-robin emits one interval per quantum; this produces the
    /// per-run view used for presentation.
    pub fn merged(&self) -> Timeline {
        let mut merged = Timeline::new();
        for &iv in &self.intervals {
            merged.push_or_extend(iv);
        }
        merged
    }

    /// Whether intervals are ordered and mutually disjoint.
    pub fn is_well_formed(&self) -> bool {
        self.intervals.iter().all(|iv| iv.start < iv.end)
            && self
                .intervals
                .windows(2)
                .all(|w| w[0].end <= w[1].start + TIME_EPSILON)
    }

    /// Intervals as `(process, start, end)` triples.
    pub fn to_tuples(&self) -> Vec<(usize, f64, f64)> {
        self.intervals.iter().map(ExecutionInterval::as_tuple).collect()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ExecutionInterval;
    type IntoIter = std::slice::Iter<'a, ExecutionInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

impl FromIterator<ExecutionInterval> for Timeline {
    fn from_iter<I: IntoIterator<Item = ExecutionInterval>>(iter: I) -> Self {
        Self {
            intervals: iter.into_iter().collect(),
        }
    }
}
