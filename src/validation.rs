//! Input validation for scheduling simulations.
//!
//! Checks the caller-supplied process description before any simulation
//! state is allocated. Detects:
//! - Empty input (N = 0)
//! - Mismatched array lengths (arrival / burst / priority)
//! - Non-positive or non-finite burst times
//! - Negative or non-finite arrival times
//! - Non-positive round-robin quanta
//!
//! Simulations fail fast on the first problem ([`validate_arrays`]);
//! [`validate_all`] collects every problem for reporting.

use std::fmt;

use crate::models::Process;

/// Validation result collecting every detected issue.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Offending input array or parameter (e.g. `"burst"`, `"quantum"`).
    pub field: Option<&'static str>,
    /// Offending process index, when the problem is per-process.
    pub index: Option<usize>,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Process description is malformed (empty, mismatched, out of range).
    InvalidInput,
    /// A policy or generator parameter is out of range.
    ConfigurationError,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            index: None,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidInput, message)
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::ConfigurationError, message)
    }

    pub(crate) fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Whether this error is an input error.
    pub fn is_invalid_input(&self) -> bool {
        self.kind == ValidationErrorKind::InvalidInput
    }

    /// Whether this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.kind == ValidationErrorKind::ConfigurationError
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => f.write_str("invalid input"),
            Self::ConfigurationError => f.write_str("configuration error"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        match (self.field, self.index) {
            (Some(field), Some(index)) => write!(f, " ({field}[{index}])"),
            (Some(field), None) => write!(f, " ({field})"),
            (None, Some(index)) => write!(f, " (process {index})"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates arrival/burst arrays and, optionally, a priority array.
///
/// Returns the first problem found. Lengths are checked before values so
/// that per-index messages always refer to a well-formed position.
pub fn validate_arrays(
    arrival: &[f64],
    burst: &[f64],
    priority: Option<&[i32]>,
) -> Result<(), ValidationError> {
    if arrival.is_empty() && burst.is_empty() {
        return Err(ValidationError::invalid_input("at least one process is required"));
    }
    if arrival.len() != burst.len() {
        return Err(ValidationError::invalid_input(format!(
            "arrival has {} entries but burst has {}",
            arrival.len(),
            burst.len()
        ))
        .with_field("burst"));
    }
    if let Some(priority) = priority {
        if priority.len() != arrival.len() {
            return Err(ValidationError::invalid_input(format!(
                "priority has {} entries but {} processes were given",
                priority.len(),
                arrival.len()
            ))
            .with_field("priority"));
        }
    }

    for (i, (&a, &b)) in arrival.iter().zip(burst).enumerate() {
        check_arrival(i, a)?;
        check_burst(i, b)?;
    }
    Ok(())
}

/// Validates already-built process records.
pub fn validate_processes(processes: &[Process]) -> Result<(), ValidationError> {
    if processes.is_empty() {
        return Err(ValidationError::invalid_input("at least one process is required"));
    }
    for (i, p) in processes.iter().enumerate() {
        check_arrival(i, p.arrival_time)?;
        check_burst(i, p.burst_time)?;
    }
    Ok(())
}

/// Validates a round-robin time quantum.
pub fn validate_quantum(quantum: f64) -> Result<(), ValidationError> {
    if !quantum.is_finite() || quantum <= 0.0 {
        return Err(
            ValidationError::configuration(format!("quantum must be positive, got {quantum}"))
                .with_field("quantum"),
        );
    }
    Ok(())
}

/// Validates arrays and collects every problem instead of stopping at the first.
pub fn validate_all(arrival: &[f64], burst: &[f64], priority: Option<&[i32]>) -> ValidationResult {
    let mut errors = Vec::new();

    if arrival.is_empty() && burst.is_empty() {
        errors.push(ValidationError::invalid_input(
            "at least one process is required",
        ));
    }
    if arrival.len() != burst.len() {
        errors.push(
            ValidationError::invalid_input(format!(
                "arrival has {} entries but burst has {}",
                arrival.len(),
                burst.len()
            ))
            .with_field("burst"),
        );
    }
    if let Some(priority) = priority {
        if priority.len() != arrival.len() {
            errors.push(
                ValidationError::invalid_input(format!(
                    "priority has {} entries but {} processes were given",
                    priority.len(),
                    arrival.len()
                ))
                .with_field("priority"),
            );
        }
    }

    for (i, &a) in arrival.iter().enumerate() {
        if let Err(e) = check_arrival(i, a) {
            errors.push(e);
        }
    }
    for (i, &b) in burst.iter().enumerate() {
        if let Err(e) = check_burst(i, b) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_arrival(index: usize, arrival: f64) -> Result<(), ValidationError> {
    if !arrival.is_finite() || arrival < 0.0 {
        return Err(ValidationError::invalid_input(format!(
            "arrival time must be a finite value >= 0, got {arrival}"
        ))
        .with_field("arrival")
        .with_index(index));
    }
    Ok(())
}

fn check_burst(index: usize, burst: f64) -> Result<(), ValidationError> {
    if !burst.is_finite() || burst <= 0.0 {
        return Err(ValidationError::invalid_input(format!(
            "burst time must be a finite value > 0, got {burst}"
        ))
        .with_field("burst")
        .with_index(index));
    }
    Ok(())
}
