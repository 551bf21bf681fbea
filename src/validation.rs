//! Input validation for process workloads.
//!
//! Schedulers accept any input and never fail, but a well-formed workload
//! has unique positive pids, positive bursts and non-negative arrivals.
//! Detects:
//! - Duplicate pids
//! - Zero pids
//! - Bursts without CPU demand
//! - Negative arrival times
//!
//! All problems are reported at once rather than stopping at the first.

use crate::models::Process;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Pid of the offending process.
    pub pid: u32,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same pid.
    DuplicatePid,
    /// Pid 0 is reserved.
    InvalidPid,
    /// `burst_time <= 0`.
    NonPositiveBurst,
    /// `arrival_time < 0`.
    NegativeArrival,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, pid: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            pid,
            message: message.into(),
        }
    }
}

/// Validates a workload before scheduling.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues in
/// input order.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for p in processes {
        if p.pid == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPid,
                p.pid,
                format!("Process '{}' has pid 0", p.name),
            ));
        }

        if !seen.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                p.pid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                p.pid,
                format!("Process {} has burst time {} (must be > 0)", p.pid, p.burst_time),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                p.pid,
                format!(
                    "Process {} arrives at {} (must be >= 0)",
                    p.pid, p.arrival_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
