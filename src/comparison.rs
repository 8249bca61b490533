//! Side-by-side policy comparison.
//!
//! Runs several policies on the same process set and tabulates their
//! averages and KPIs.

use std::fmt;

use log::debug;

use crate::models::ProcessSet;
use crate::scheduler::{Policy, ScheduleKpi, SchedulingPolicy, SimulationResult};

/// One policy's outcome within a comparison.
#[derive(Debug, Clone)]
pub struct ComparisonEntry {
    /// The policy that was run.
    pub policy: Policy,
    /// Full simulation result.
    pub result: SimulationResult,
    /// Derived KPIs.
    pub kpi: ScheduleKpi,
}

/// Results of several policies over one process set.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    /// Entries in the order the policies were given.
    pub entries: Vec<ComparisonEntry>,
}

impl Comparison {
    /// Entry with the lowest mean turnaround (first on ties).
    pub fn best_by_turnaround(&self) -> Option<&ComparisonEntry> {
        self.best_by(|e| e.result.avg_turnaround)
    }

    /// Entry with the lowest mean waiting time (first on ties).
    pub fn best_by_waiting(&self) -> Option<&ComparisonEntry> {
        self.best_by(|e| e.result.avg_waiting)
    }

    /// Entry for a policy name (e.g. "RR").
    pub fn get(&self, name: &str) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.policy.name() == name)
    }

    fn best_by(&self, key: impl Fn(&ComparisonEntry) -> f64) -> Option<&ComparisonEntry> {
        self.entries
            .iter()
            .fold(None, |best: Option<&ComparisonEntry>, e| match best {
                Some(b) if key(b) <= key(e) => Some(b),
                _ => Some(e),
            })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10}{:>12}{:>12}{:>12}{:>12}{:>10}",
            "Policy", "Turnaround", "Waiting", "Response", "Util", "Switches"
        )?;
        for e in &self.entries {
            writeln!(
                f,
                "{:<10}{:>12.2}{:>12.2}{:>12.2}{:>11.1}%{:>10}",
                e.policy.name(),
                e.kpi.avg_turnaround,
                e.kpi.avg_waiting,
                e.kpi.avg_response,
                e.kpi.utilization * 100.0,
                e.kpi.context_switches
            )?;
        }
        Ok(())
    }
}

/// Runs every policy on `processes`.
pub fn compare(processes: &ProcessSet, policies: &[Policy]) -> Comparison {
    let entries = policies
        .iter()
        .map(|&policy| {
            let result = policy.simulate(processes);
            let kpi = ScheduleKpi::calculate(&result);
            ComparisonEntry {
                policy,
                result,
                kpi,
            }
        })
        .collect();

    let comparison = Comparison { entries };
    if let Some(best) = comparison.best_by_waiting() {
        debug!(
            "compared {} policies over {} processes; best waiting: {} ({:.3})",
            policies.len(),
            processes.len(),
            best.policy.name(),
            best.result.avg_waiting
        );
    }
    comparison
}

/// Runs the four default policies on `processes`.
pub fn compare_all(processes: &ProcessSet) -> Comparison {
    compare(processes, &Policy::all())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProcessSet {
        ProcessSet::from_arrays_with_priority(&[0.0, 1.0, 2.0], &[8.0, 1.0, 2.0], &[3, 1, 2])
            .unwrap()
    }

    #[test]
    fn test_compare_all_runs_four_policies() {
        let comparison = compare_all(&sample());
        let names: Vec<&str> = comparison.entries.iter().map(|e| e.policy.name()).collect();
        assert_eq!(names, vec!["FCFS", "Priority", "RR", "SRTF"]);
    }

    #[test]
    fn test_best_policy_is_srtf() {
        let comparison = compare_all(&sample());
        // SRTF: P0 [0,1) P1 [1,2) P2 [2,4) P0 [4,11); waiting 3, 0, 0
        let best = comparison.best_by_waiting().unwrap();
        assert_eq!(best.policy, Policy::Srtf);
        assert!((best.result.avg_waiting - 1.0).abs() < 1e-10);
        assert_eq!(
            comparison.best_by_turnaround().unwrap().policy,
            Policy::Srtf
        );
    }

    #[test]
    fn test_lookup_and_display() {
        let comparison = compare_all(&sample());
        let fcfs = comparison.get("FCFS").unwrap();
        // FCFS waiting: 0, 7, 7
        assert!((fcfs.result.avg_waiting - 14.0 / 3.0).abs() < 1e-10);
        assert!(comparison.get("MLFQ").is_none());

        let table = comparison.to_string();
        assert_eq!(table.lines().count(), 5);
        assert!(table.lines().nth(4).unwrap().starts_with("SRTF"));
    }

    #[test]
    fn test_compare_keeps_given_order() {
        let rr = Policy::round_robin(1.0).unwrap();
        let comparison = compare(&sample(), &[rr, Policy::Srtf]);
        assert_eq!(comparison.entries.len(), 2);
        assert_eq!(comparison.entries[0].policy, rr);
        assert_eq!(comparison.get("SRTF").unwrap().policy, Policy::Srtf);
    }

    #[test]
    fn test_empty_comparison() {
        let comparison = Comparison::default();
        assert!(comparison.best_by_waiting().is_none());
    }
}
