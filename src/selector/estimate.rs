//! Closed-form waiting-time estimates per algorithm.
//!
//! With `m` the mean burst and `n` the process count:
//!
//! | Algorithm | Base | Adjustment |
//! |-----------|------|------------|
//! | FCFS | `m(n-1)/2` | ×(1 + 0.3·cv) if cv > 0.5 |
//! | SJF | `m(n-1)/3` | |
//! | SRTF | `m(n-1)/4` | |
//! | RR | `m·n/2` | ×0.8 if io > 0.3 |
//! | Priority | `m(n-1)/3` | ×1.3 if priority variance < 3 |
//! | Preemptive Priority | `m(n-1)/4` | ×0.9 if io > 0.3 |
//! | MLFQ | `m·n/3` | ×0.9 if n > 10 |
//!
//! These are heuristics for ranking, not predictions of the simulated
//! result.

use serde::{Deserialize, Serialize};

use super::WorkloadAnalysis;
use crate::scheduler::{Algorithm, Policy, Scheduler};

/// Smallest Round Robin quantum the selector recommends (ms).
pub const MIN_TIME_QUANTUM: i64 = 10;
/// Largest Round Robin quantum the selector recommends (ms).
pub const MAX_TIME_QUANTUM: i64 = 50;
const QUANTUM_DIVISOR: f64 = 5.0;

/// Estimated average waiting time of one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEstimate {
    /// Algorithm being estimated.
    pub algorithm: Algorithm,
    /// Estimated mean waiting time (ms).
    pub expected_avg_wait: f64,
    /// Quantum the selector would use, for Round Robin only.
    pub time_quantum: Option<i64>,
}

impl PerformanceEstimate {
    /// Fresh scheduler configured as estimated.
    pub fn build_policy(&self) -> Policy {
        match self.time_quantum {
            Some(q) => Policy::round_robin(q)
                .unwrap_or_else(|_| Policy::from_algorithm(Algorithm::RoundRobin)),
            None => Policy::from_algorithm(self.algorithm),
        }
    }

    /// Display name of the configured scheduler.
    pub fn display_name(&self) -> String {
        self.build_policy().name()
    }
}

/// Round Robin quantum for a mean burst: `clamp(m / 5, 10, 50)`.
pub fn recommended_quantum(avg_burst_time: f64) -> i64 {
    ((avg_burst_time / QUANTUM_DIVISOR) as i64).clamp(MIN_TIME_QUANTUM, MAX_TIME_QUANTUM)
}

/// Estimates every algorithm, in canonical order.
pub fn estimate_all(analysis: &WorkloadAnalysis) -> Vec<PerformanceEstimate> {
    Algorithm::all()
        .into_iter()
        .map(|algorithm| estimate(analysis, algorithm))
        .collect()
}

/// Estimate for a single algorithm.
pub fn estimate(analysis: &WorkloadAnalysis, algorithm: Algorithm) -> PerformanceEstimate {
    let m = analysis.avg_burst_time;
    let n = analysis.process_count as f64;
    let cv = analysis.coefficient_of_variation;
    let io = analysis.io_bound_ratio;
    let others = (n - 1.0).max(0.0);

    let mut time_quantum = None;
    let expected_avg_wait = match algorithm {
        Algorithm::Fcfs => {
            let base = m * others / 2.0;
            if cv > 0.5 {
                base * (1.0 + 0.3 * cv)
            } else {
                base
            }
        }
        Algorithm::Sjf => m * others / 3.0,
        Algorithm::Srtf => m * others / 4.0,
        Algorithm::RoundRobin => {
            time_quantum = Some(recommended_quantum(m));
            let base = m * n / 2.0;
            if io > 0.3 {
                base * 0.8
            } else {
                base
            }
        }
        Algorithm::Priority => {
            let base = m * others / 3.0;
            if analysis.priority_variance < 3.0 {
                base * 1.3
            } else {
                base
            }
        }
        Algorithm::PreemptivePriority => {
            let base = m * others / 4.0;
            if io > 0.3 {
                base * 0.9
            } else {
                base
            }
        }
        Algorithm::Mlfq => {
            let base = m * n / 3.0;
            if analysis.process_count > 10 {
                base * 0.9
            } else {
                base
            }
        }
    };

    PerformanceEstimate {
        algorithm,
        expected_avg_wait,
        time_quantum,
    }
}

/// Sorts estimates ascending by expected wait. Ties keep their order.
pub fn rank(mut estimates: Vec<PerformanceEstimate>) -> Vec<PerformanceEstimate> {
    estimates.sort_by(|a, b| a.expected_avg_wait.total_cmp(&b.expected_avg_wait));
    estimates
}
