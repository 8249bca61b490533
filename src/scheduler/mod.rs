//! Single-processor scheduling policies and KPI evaluation.
//!
//! Each policy is a pure simulation over a [`ProcessSet`]: it owns fresh
//! per-process run state for the duration of one call and returns a
//! [`SimulationResult`] (timeline, per-process metrics, averages).
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | no | Earliest arrival, input order on ties |
//! | RR | yes | FIFO queue, fixed quantum |
//! | SRTF | yes | Least remaining time, lowest index on ties |
//! | Priority | no | Extreme priority value, earliest arrival on ties |
//!
//! All policies are event-driven: the clock jumps between arrivals and
//! completions, so timelines are exact.
//!
//! # Usage
//!
//! ```
//! use u_procsched::scheduler::{fcfs, Policy, SchedulingPolicy};
//! use u_procsched::models::ProcessSet;
//!
//! let result = fcfs(&[0.0, 1.0, 2.0], &[5.0, 3.0, 2.0]).unwrap();
//! assert_eq!(result.timeline.len(), 3);
//!
//! let set = ProcessSet::from_arrays(&[0.0, 0.0], &[4.0, 4.0]).unwrap();
//! let rr = Policy::round_robin(2.0).unwrap().simulate(&set);
//! assert!(Policy::round_robin(0.0).is_err());
//! assert!((rr.avg_waiting - 3.0).abs() < 1e-9);
//! ```

mod fcfs;
mod kpi;
mod priority;
mod result;
mod round_robin;
mod srtf;
mod state;

pub use fcfs::{fcfs, Fcfs};
pub use kpi::ScheduleKpi;
pub use priority::{priority, PriorityOrder, PriorityScheduling};
pub use result::{ProcessMetrics, SimulationResult};
pub use round_robin::{round_robin, RoundRobin, DEFAULT_QUANTUM};
pub use srtf::{srtf, Srtf};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::ProcessSet;
use crate::validation::ValidationError;

/// A CPU scheduling policy.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Runs the policy over a validated process set.
    fn simulate(&self, processes: &ProcessSet) -> SimulationResult;

    /// Whether a running process can be interrupted.
    fn is_preemptive(&self) -> bool;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Any of the built-in policies with its parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Policy {
    /// First-come-first-served.
    #[default]
    Fcfs,
    /// Round-robin; the quantum is validated by [`RoundRobin`].
    RoundRobin(RoundRobin),
    /// Shortest-remaining-time-first.
    Srtf,
    /// Non-preemptive fixed priority.
    Priority {
        #[serde(default)]
        order: PriorityOrder,
    },
}

impl Policy {
    /// Round-robin with a validated quantum.
    pub fn round_robin(quantum: f64) -> Result<Self, ValidationError> {
        Ok(Self::RoundRobin(RoundRobin::new(quantum)?))
    }

    /// Priority scheduling with the given comparison direction.
    pub fn priority(order: PriorityOrder) -> Self {
        Self::Priority { order }
    }

    /// The four policies with default parameters.
    pub fn all() -> [Policy; 4] {
        [
            Policy::Fcfs,
            Policy::Priority {
                order: PriorityOrder::HighestFirst,
            },
            Policy::RoundRobin(RoundRobin::default()),
            Policy::Srtf,
        ]
    }

    fn with_policy<R>(&self, f: impl FnOnce(&dyn SchedulingPolicy) -> R) -> R {
        match *self {
            Self::Fcfs => f(&Fcfs),
            Self::RoundRobin(rr) => f(&rr),
            Self::Srtf => f(&Srtf),
            Self::Priority { order } => f(&PriorityScheduling::new(order)),
        }
    }
}

impl SchedulingPolicy for Policy {
    fn name(&self) -> &'static str {
        self.with_policy(|p| p.name())
    }

    fn simulate(&self, processes: &ProcessSet) -> SimulationResult {
        self.with_policy(|p| p.simulate(processes))
    }

    fn is_preemptive(&self) -> bool {
        self.with_policy(|p| p.is_preemptive())
    }

    fn description(&self) -> &'static str {
        self.with_policy(|p| p.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TIME_EPSILON;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOLERANCE: f64 = 1e-6;

    fn random_set(rng: &mut StdRng, n: usize) -> ProcessSet {
        let arrival: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..20.0)).collect();
        let burst: Vec<f64> = (0..n).map(|_| rng.random_range(0.1..6.0)).collect();
        let priority: Vec<i32> = (0..n).map(|_| rng.random_range(0..6)).collect();
        ProcessSet::from_arrays_with_priority(&arrival, &burst, &priority).unwrap()
    }

    fn integer_set(rng: &mut StdRng, n: usize) -> ProcessSet {
        let arrival: Vec<f64> = (0..n).map(|_| rng.random_range(0..10) as f64).collect();
        let burst: Vec<f64> = (0..n).map(|_| rng.random_range(1..6) as f64).collect();
        ProcessSet::from_arrays(&arrival, &burst).unwrap()
    }

    fn policies() -> Vec<Policy> {
        let mut all = Policy::all().to_vec();
        all.push(Policy::round_robin(0.75).unwrap());
        all.push(Policy::priority(PriorityOrder::LowestFirst));
        all
    }

    fn check_invariants(set: &ProcessSet, policy: &Policy) {
        let result = policy.simulate(set);
        let name = policy.name();

        // Conservation
        for (i, p) in set.iter().enumerate() {
            let busy = result.timeline.busy_time_for(i);
            assert!(
                (busy - p.burst_time).abs() < TOLERANCE,
                "{name}: P{i} ran {busy}, burst {}",
                p.burst_time
            );
        }

        // Non-overlap and ordering
        assert!(result.timeline.is_well_formed(), "{name}: malformed timeline");
        for a in &result.timeline {
            for b in &result.timeline {
                if a.process != b.process {
                    assert!(!a.overlaps(b), "{name}: {a:?} overlaps {b:?}");
                }
            }
        }

        // No process runs before it arrives
        for iv in &result.timeline {
            let arrival = set.as_slice()[iv.process].arrival_time;
            assert!(iv.start >= arrival - TIME_EPSILON, "{name}: early start {iv:?}");
        }

        // Non-preemption
        if !policy.is_preemptive() {
            assert_eq!(result.timeline.len(), set.len(), "{name}: split a process");
        }

        // Metric consistency
        let diff = result.avg_turnaround - result.avg_waiting;
        assert!(
            (diff - set.mean_burst()).abs() < TOLERANCE,
            "{name}: turnaround - waiting = {diff}, mean burst {}",
            set.mean_burst()
        );
        assert!(result.processes.iter().all(|m| m.waiting_time >= -TOLERANCE));
    }

    #[test]
    fn test_invariants_hold_on_random_workloads() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1, 2, 5, 12, 30] {
            for _ in 0..20 {
                let set = random_set(&mut rng, n);
                for policy in policies() {
                    check_invariants(&set, &policy);
                }
            }
        }
    }

    #[test]
    fn test_invariants_hold_with_simultaneous_events() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let set = integer_set(&mut rng, 8);
            for policy in policies() {
                check_invariants(&set, &policy);
            }
        }
    }

    #[test]
    fn test_single_process_boundary() {
        let set = ProcessSet::from_arrays_with_priority(&[2.0], &[3.0], &[4]).unwrap();
        for policy in policies() {
            let result = policy.simulate(&set);
            assert_eq!(result.timeline.to_tuples(), vec![(0, 2.0, 5.0)]);
            assert!(result.avg_waiting.abs() < 1e-12);
            assert!((result.avg_turnaround - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_srtf_never_worse_than_fcfs_on_average_waiting() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..30 {
            let set = integer_set(&mut rng, 6);
            let srtf = Policy::Srtf.simulate(&set);
            let fcfs = Policy::Fcfs.simulate(&set);
            assert!(srtf.avg_waiting <= fcfs.avg_waiting + TOLERANCE);
        }
    }

    #[test]
    fn test_fcfs_intervals_follow_arrival_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let set = integer_set(&mut rng, 15);
        let result = Policy::Fcfs.simulate(&set);
        let order: Vec<usize> = result.timeline.iter().map(|iv| iv.process).collect();
        assert_eq!(order, set.arrival_order());
    }

    #[test]
    fn test_policy_names_and_serde() {
        let names: Vec<&str> = Policy::all().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["FCFS", "Priority", "RR", "SRTF"]);

        let json = serde_json::to_string(&Policy::round_robin(3.0).unwrap()).unwrap();
        assert_eq!(json, r#"{"policy":"round_robin","quantum":3.0}"#);
        let back: Policy = serde_json::from_str(r#"{"policy":"priority"}"#).unwrap();
        assert_eq!(back, Policy::priority(PriorityOrder::HighestFirst));
    }

    #[test]
    fn test_policy_rejects_bad_quantum() {
        for json in [
            r#"{"policy":"round_robin","quantum":-1.0}"#,
            r#"{"policy":"round_robin","quantum":0.0}"#,
            r#"{"policy":"round_robin"}"#,
        ] {
            assert!(serde_json::from_str::<Policy>(json).is_err(), "{json}");
        }
        assert!(Policy::round_robin(-1.0).unwrap_err().is_configuration());

        let rr: Policy = serde_json::from_str(r#"{"policy":"round_robin","quantum":3.0}"#).unwrap();
        let set = ProcessSet::from_arrays(&[0.0], &[5.0]).unwrap();
        assert_eq!(
            rr.simulate(&set).timeline.to_tuples(),
            vec![(0, 0.0, 3.0), (0, 3.0, 5.0)]
        );
    }

    #[test]
    fn test_slices_below_clock_resolution_terminate() {
        use std::sync::mpsc;
        use std::time::Duration;

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let cases = [
                ProcessSet::from_arrays(&[1e9], &[1e-8]).unwrap(),
                ProcessSet::from_arrays_with_priority(&[1e9, 1e9], &[3e-8, 1e-8], &[1, 2]).unwrap(),
                ProcessSet::from_arrays(&[1e9, 1e9 + 1.0], &[1.5e-7, 1e-8]).unwrap(),
            ];
            let mut policies = policies();
            policies.push(Policy::round_robin(1e-8).unwrap());
            for set in &cases {
                for policy in &policies {
                    let result = policy.simulate(set);
                    tx.send((policy.name(), set.len(), result)).unwrap();
                }
            }
        });

        let expected = 3 * (policies().len() + 1);
        for _ in 0..expected {
            let (name, n, result) = rx
                .recv_timeout(Duration::from_secs(10))
                .expect("simulation did not terminate");
            assert!(result.timeline.is_well_formed(), "{name}: malformed timeline");
            assert_eq!(result.processes.len(), n);
            for m in &result.processes {
                assert!(m.completion_time.is_finite(), "{name}: P{} unfinished", m.index);
                assert!(m.completion_time > m.arrival_time, "{name}: {m:?}");
            }
        }
    }
}
