//! Single-processor CPU scheduling simulation.
//!
//! Simulates how a set of processes shares one CPU under a chosen policy and
//! reports the execution timeline together with mean turnaround and mean
//! waiting time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessSet`, `ExecutionInterval`,
//!   `Timeline`
//! - **`validation`**: Input checks (empty input, length mismatches, bad
//!   burst/arrival values, bad quanta)
//! - **`scheduler`**: FCFS, round-robin, SRTF and fixed-priority policies,
//!   `SimulationResult`, `ScheduleKpi`
//! - **`workload`**: Seeded random process generation from a `WorkloadConfig`
//! - **`report`**: Plain-text result sections
//! - **`comparison`**: All policies over one input, side by side
//!
//! # Example
//!
//! ```
//! use u_procsched::scheduler::srtf;
//!
//! let result = srtf(&[0.0, 1.0], &[5.0, 1.0]).unwrap();
//! assert_eq!(
//!     result.timeline.to_tuples(),
//!     vec![(0, 0.0, 1.0), (1, 1.0, 2.0), (0, 2.0, 6.0)]
//! );
//! ```
//!
//! # Logging
//!
//! Policies log through the `log` facade: `debug` for per-run summaries,
//! `trace` for every dispatch decision. No logger is installed by this crate.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod comparison;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use models::{ExecutionInterval, Process, ProcessSet, Timeline};
pub use scheduler::{
    fcfs, priority, round_robin, srtf, Policy, PriorityOrder, SchedulingPolicy, SimulationResult,
};
pub use validation::{ValidationError, ValidationErrorKind};
