//! Process model.
//!
//! A process is a unit of CPU work identified by its position in the
//! input. Process records are immutable; per-run bookkeeping
//! (remaining time, completion) lives inside each simulation call.

use serde::{Deserialize, Serialize};

use crate::validation::{validate_arrays, validate_processes, ValidationError};

/// A process to be scheduled.
///
/// # Time Representation
/// Times are dimensionless simulation units relative to t=0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Instant the process becomes eligible to run (>= 0).
    pub arrival_time: f64,
    /// Total CPU time required (> 0).
    pub burst_time: f64,
    /// Scheduling priority. Only consulted by the priority policy.
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(arrival_time: f64, burst_time: f64) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A validated, non-empty set of processes.
///
/// Construction checks every precondition the policies rely on, so
/// simulations over a `ProcessSet` cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Process>", into = "Vec<Process>")]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Creates a set from process records.
    pub fn new(processes: Vec<Process>) -> Result<Self, ValidationError> {
        validate_processes(&processes)?;
        Ok(Self { processes })
    }

    /// Creates a set from parallel arrival/burst arrays (priority 0).
    pub fn from_arrays(arrival: &[f64], burst: &[f64]) -> Result<Self, ValidationError> {
        validate_arrays(arrival, burst, None)?;
        Ok(Self {
            processes: arrival
                .iter()
                .zip(burst)
                .map(|(&a, &b)| Process::new(a, b))
                .collect(),
        })
    }

    /// Creates a set from parallel arrival/burst/priority arrays.
    pub fn from_arrays_with_priority(
        arrival: &[f64],
        burst: &[f64],
        priority: &[i32],
    ) -> Result<Self, ValidationError> {
        validate_arrays(arrival, burst, Some(priority))?;
        Ok(Self {
            processes: arrival
                .iter()
                .zip(burst)
                .zip(priority)
                .map(|((&a, &b), &p)| Process::new(a, b).with_priority(p))
                .collect(),
        })
    }

    /// Number of processes (always >= 1).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Process at `index`.
    pub fn get(&self, index: usize) -> Option<&Process> {
        self.processes.get(index)
    }

    /// All processes in input order.
    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Iterates processes in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    /// Indices sorted by ascending arrival; ties keep input order.
    pub fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        order.sort_by(|&a, &b| {
            self.processes[a]
                .arrival_time
                .total_cmp(&self.processes[b].arrival_time)
        });
        order
    }

    /// Earliest arrival time.
    pub fn earliest_arrival(&self) -> f64 {
        self.processes
            .iter()
            .map(|p| p.arrival_time)
            .fold(f64::INFINITY, f64::min)
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> f64 {
        self.processes.iter().map(|p| p.burst_time).sum()
    }

    /// Mean burst time.
    pub fn mean_burst(&self) -> f64 {
        self.total_burst() / self.processes.len() as f64
    }
}

impl TryFrom<Vec<Process>> for ProcessSet {
    type Error = ValidationError;

    fn try_from(processes: Vec<Process>) -> Result<Self, Self::Error> {
        Self::new(processes)
    }
}

impl From<ProcessSet> for Vec<Process> {
    fn from(set: ProcessSet) -> Self {
        set.processes
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}
