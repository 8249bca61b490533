//! Synthetic workload generation.
//!
//! Produces process sets whose arrival and burst times are drawn from
//! normal distributions and whose priorities are drawn from a Poisson
//! distribution. Negative samples are folded to their absolute value.
//!
//! Generation takes a caller-supplied RNG, so seeded runs are
//! reproducible and the policies themselves never touch randomness.
//!
//! # Configuration file
//!
//! [`WorkloadConfig::parse_legacy`] reads the four-line text format:
//!
//! ```text
//! 10
//! 5 2
//! 3 1
//! 3
//! ```
//!
//! (process count; arrival mean and std; burst mean and std; priority lambda).
//!
//! # Reference
//! Knuth (1997), "The Art of Computer Programming", Vol. 2, §3.4.1

use std::str::FromStr;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessSet};
use crate::validation::ValidationError;

/// Smallest burst a generated process may have.
pub const MIN_BURST: f64 = 0.01;

/// Parameters of the workload generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of processes.
    pub num_processes: usize,
    /// Mean of the arrival-time distribution.
    pub arrival_mean: f64,
    /// Standard deviation of the arrival-time distribution.
    pub arrival_std: f64,
    /// Mean of the burst-time distribution.
    pub burst_mean: f64,
    /// Standard deviation of the burst-time distribution.
    pub burst_std: f64,
    /// Rate of the Poisson priority distribution.
    pub priority_lambda: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            num_processes: 10,
            arrival_mean: 5.0,
            arrival_std: 2.0,
            burst_mean: 3.0,
            burst_std: 1.0,
            priority_lambda: 3.0,
        }
    }
}

impl WorkloadConfig {
    /// Creates a config for `num_processes` with default distributions.
    pub fn new(num_processes: usize) -> Self {
        Self {
            num_processes,
            ..Default::default()
        }
    }

    /// Sets the arrival-time distribution.
    pub fn with_arrival(mut self, mean: f64, std: f64) -> Self {
        self.arrival_mean = mean;
        self.arrival_std = std;
        self
    }

    /// Sets the burst-time distribution.
    pub fn with_burst(mut self, mean: f64, std: f64) -> Self {
        self.burst_mean = mean;
        self.burst_std = std;
        self
    }

    /// Sets the priority rate.
    pub fn with_priority_lambda(mut self, lambda: f64) -> Self {
        self.priority_lambda = lambda;
        self
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.num_processes == 0 {
            return Err(ValidationError::configuration(
                "num_processes must be at least 1",
            )
            .with_field("num_processes"));
        }
        check_distribution("arrival", self.arrival_mean, self.arrival_std)?;
        check_distribution("burst", self.burst_mean, self.burst_std)?;
        if !self.priority_lambda.is_finite() || self.priority_lambda <= 0.0 {
            return Err(ValidationError::configuration(format!(
                "priority_lambda must be positive, got {}",
                self.priority_lambda
            ))
            .with_field("priority_lambda"));
        }
        Ok(())
    }

    /// Parses the four-line text format.
    pub fn parse_legacy(text: &str) -> Result<Self, ValidationError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut next_line = |what: &'static str| {
            lines.next().ok_or_else(|| {
                ValidationError::configuration(format!("missing {what} line")).with_field(what)
            })
        };

        let num_processes = parse_field::<usize>(next_line("num_processes")?, "num_processes")?;
        let (arrival_mean, arrival_std) = parse_pair(next_line("arrival")?, "arrival")?;
        let (burst_mean, burst_std) = parse_pair(next_line("burst")?, "burst")?;
        let priority_lambda = parse_field::<f64>(next_line("priority_lambda")?, "priority_lambda")?;

        let config = Self {
            num_processes,
            arrival_mean,
            arrival_std,
            burst_mean,
            burst_std,
            priority_lambda,
        };
        config.validate()?;
        Ok(config)
    }

    /// Renders the config in the four-line text format.
    pub fn to_legacy(&self) -> String {
        format!(
            "{}\n{} {}\n{} {}\n{}\n",
            self.num_processes,
            self.arrival_mean,
            self.arrival_std,
            self.burst_mean,
            self.burst_std,
            self.priority_lambda
        )
    }

    /// Draws a process set.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ProcessSet, ValidationError> {
        self.validate()?;

        let processes: Vec<Process> = (0..self.num_processes)
            .map(|_| {
                let arrival = sample_normal(rng, self.arrival_mean, self.arrival_std).abs();
                let burst = sample_normal(rng, self.burst_mean, self.burst_std)
                    .abs()
                    .max(MIN_BURST);
                let priority = sample_poisson(rng, self.priority_lambda);
                Process::new(arrival, burst).with_priority(priority)
            })
            .collect();

        let set = ProcessSet::new(processes)?;
        debug!(
            "generated {} processes (mean burst {:.3}, first arrival {:.3})",
            set.len(),
            set.mean_burst(),
            set.earliest_arrival()
        );
        Ok(set)
    }

    /// Draws a process set from a seeded [`StdRng`].
    pub fn generate_seeded(&self, seed: u64) -> Result<ProcessSet, ValidationError> {
        self.generate(&mut StdRng::seed_from_u64(seed))
    }
}

impl FromStr for WorkloadConfig {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_legacy(s)
    }
}

fn check_distribution(field: &'static str, mean: f64, std: f64) -> Result<(), ValidationError> {
    if !mean.is_finite() || !std.is_finite() || std < 0.0 {
        return Err(ValidationError::configuration(format!(
            "{field} distribution needs a finite mean and std >= 0, got mean {mean}, std {std}"
        ))
        .with_field(field));
    }
    Ok(())
}

fn parse_field<T: FromStr>(token: &str, field: &'static str) -> Result<T, ValidationError> {
    token.trim().parse().map_err(|_| {
        ValidationError::configuration(format!("cannot parse {field} from '{token}'"))
            .with_field(field)
    })
}

fn parse_pair(line: &str, field: &'static str) -> Result<(f64, f64), ValidationError> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((parse_field(a, field)?, parse_field(b, field)?)),
        _ => Err(ValidationError::configuration(format!(
            "expected '<mean> <std>' for {field}, got '{line}'"
        ))
        .with_field(field)),
    }
}

/// Box–Muller transform.
fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    if std == 0.0 {
        return mean;
    }
    // u1 in (0, 1] keeps ln finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + std * z
}

/// Knuth's multiplication method; adequate for the small rates used here.
fn sample_poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> i32 {
    let limit = (-lambda).exp();
    let mut k = 0;
    let mut p = rng.random::<f64>();
    while p > limit && k < i32::MAX {
        k += 1;
        p *= rng.random::<f64>();
    }
    k
}
