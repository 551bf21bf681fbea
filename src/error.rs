//! Error types for scheduler construction and lookup.

use thiserror::Error;

/// Errors raised while configuring or looking up a scheduler.
///
/// Running a scheduler never fails; only building one can.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedError {
    /// No algorithm is registered under this name.
    #[error("Unknown algorithm '{0}'. Valid: FCFS, SJF, SRTF, RR, Priority, PreemptivePriority, MLFQ")]
    UnknownAlgorithm(String),

    /// A parameter that must be strictly positive was not.
    #[error("Invalid {name}: {value} (must be > 0)")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: i64,
    },

    /// A parameter that must not be negative was.
    #[error("Invalid {name}: {value} (must be >= 0)")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: i64,
    },

    /// MLFQ was configured without any level.
    #[error("MLFQ requires at least one queue level")]
    NoQueueLevels,

    /// A `[min, max]` range with `min > max`.
    #[error("Invalid {name} range: {min}..={max}")]
    InvalidRange {
        /// Parameter name.
        name: &'static str,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },

    /// A ratio outside `[0, 1]`.
    #[error("Invalid {name}: {value} (must be within 0.0..=1.0)")]
    InvalidRatio {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl SchedError {
    /// Fails with [`SchedError::NonPositive`] unless `value > 0`.
    pub(crate) fn ensure_positive(name: &'static str, value: i64) -> Result<i64, Self> {
        if value > 0 {
            Ok(value)
        } else {
            Err(Self::NonPositive { name, value })
        }
    }

    /// Fails with [`SchedError::Negative`] unless `value >= 0`.
    pub(crate) fn ensure_non_negative(name: &'static str, value: i64) -> Result<i64, Self> {
        if value >= 0 {
            Ok(value)
        } else {
            Err(Self::Negative { name, value })
        }
    }
}
