//! Workload characterization.

use serde::{Deserialize, Serialize};

use crate::models::Process;

/// Mean burst below which an I/O-heavy workload counts as interactive (ms).
const INTERACTIVE_MAX_BURST: f64 = 50.0;
/// I/O share above which a short-burst workload counts as interactive.
const INTERACTIVE_MIN_IO_RATIO: f64 = 0.3;
/// Mean burst above which a CPU-heavy workload counts as batch (ms).
const BATCH_MIN_BURST: f64 = 100.0;
/// I/O share below which a long-burst workload counts as batch.
const BATCH_MAX_IO_RATIO: f64 = 0.2;

/// Summary statistics of a process workload.
///
/// Variances are sample variances (`n - 1` denominator) and are 0 when
/// there are fewer than two processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadAnalysis {
    /// Number of processes.
    pub process_count: usize,
    /// Mean burst time (ms).
    pub avg_burst_time: f64,
    /// Sample variance of burst times.
    pub burst_time_variance: f64,
    /// Burst standard deviation over mean. 0 when the mean is 0.
    pub coefficient_of_variation: f64,
    /// `max(priority) - min(priority)`.
    pub priority_range: i64,
    /// Sample variance of priorities.
    pub priority_variance: f64,
    /// Share of I/O-bound processes in `[0, 1]`.
    pub io_bound_ratio: f64,
    /// `1 - io_bound_ratio`.
    pub cpu_bound_ratio: f64,
    /// Mean gap between consecutive sorted arrivals (ms).
    pub avg_arrival_spread: f64,
    /// Short bursts with a notable I/O share.
    pub is_interactive: bool,
    /// Long bursts with little I/O.
    pub is_batch: bool,
}

impl WorkloadAnalysis {
    /// Analyzes `processes`. An empty slice gives all zeros.
    pub fn analyze(processes: &[Process]) -> Self {
        let n = processes.len();
        if n == 0 {
            return Self::default();
        }

        let bursts: Vec<f64> = processes.iter().map(|p| p.burst_time as f64).collect();
        let priorities: Vec<f64> = processes.iter().map(|p| f64::from(p.priority)).collect();

        let avg_burst_time = mean(&bursts);
        let burst_time_variance = sample_variance(&bursts);
        let coefficient_of_variation = if avg_burst_time > 0.0 {
            burst_time_variance.sqrt() / avg_burst_time
        } else {
            0.0
        };

        let max_priority = processes.iter().map(|p| p.priority).max().unwrap_or(0);
        let min_priority = processes.iter().map(|p| p.priority).min().unwrap_or(0);

        let io_count = processes.iter().filter(|p| p.io_bound).count();
        let io_bound_ratio = io_count as f64 / n as f64;

        let mut arrivals: Vec<i64> = processes.iter().map(|p| p.arrival_time).collect();
        arrivals.sort_unstable();
        let gaps: Vec<f64> = arrivals.windows(2).map(|w| (w[1] - w[0]) as f64).collect();

        Self {
            process_count: n,
            avg_burst_time,
            burst_time_variance,
            coefficient_of_variation,
            priority_range: i64::from(max_priority) - i64::from(min_priority),
            priority_variance: sample_variance(&priorities),
            io_bound_ratio,
            cpu_bound_ratio: 1.0 - io_bound_ratio,
            avg_arrival_spread: mean(&gaps),
            is_interactive: avg_burst_time < INTERACTIVE_MAX_BURST
                && io_bound_ratio > INTERACTIVE_MIN_IO_RATIO,
            is_batch: avg_burst_time > BATCH_MIN_BURST && io_bound_ratio < BATCH_MAX_IO_RATIO,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_empty() {
        assert_eq!(WorkloadAnalysis::analyze(&[]), WorkloadAnalysis::default());
    }

    #[test]
    fn test_analyze_single_process() {
        let a = WorkloadAnalysis::analyze(&[Process::new(1, 40).with_io_bound(true)]);
        assert_eq!(a.process_count, 1);
        assert!((a.avg_burst_time - 40.0).abs() < 1e-10);
        assert_eq!(a.burst_time_variance, 0.0);
        assert_eq!(a.coefficient_of_variation, 0.0);
        assert_eq!(a.avg_arrival_spread, 0.0);
        assert!(a.is_interactive);
    }

    #[test]
    fn test_analyze_statistics() {
        let processes = vec![
            Process::new(1, 10).with_arrival(0).with_priority(1),
            Process::new(2, 20).with_arrival(8).with_priority(3),
            Process::new(3, 30).with_arrival(2).with_priority(8),
            Process::new(4, 40).with_arrival(12).with_priority(4).with_io_bound(true),
        ];
        let a = WorkloadAnalysis::analyze(&processes);

        assert!((a.avg_burst_time - 25.0).abs() < 1e-10);
        // deviations 15, 5, 5, 15 -> 500 / 3
        assert!((a.burst_time_variance - 500.0 / 3.0).abs() < 1e-10);
        assert!((a.coefficient_of_variation - (500.0f64 / 3.0).sqrt() / 25.0).abs() < 1e-10);
        assert_eq!(a.priority_range, 7);
        assert!((a.io_bound_ratio - 0.25).abs() < 1e-10);
        assert!((a.cpu_bound_ratio - 0.75).abs() < 1e-10);
        // sorted arrivals 0, 2, 8, 12
        assert!((a.avg_arrival_spread - 4.0).abs() < 1e-10);
        assert!(!a.is_interactive);
        assert!(!a.is_batch);
    }

    #[test]
    fn test_analyze_zero_bursts_cv_guarded() {
        let a = WorkloadAnalysis::analyze(&[Process::new(1, 0), Process::new(2, 0)]);
        assert_eq!(a.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_analyze_extreme_priorities() {
        let processes = vec![
            Process::new(1, 10).with_priority(i32::MIN),
            Process::new(2, 10).with_priority(i32::MAX),
        ];
        let a = WorkloadAnalysis::analyze(&processes);
        assert_eq!(a.priority_range, i64::from(u32::MAX));
        assert!(a.priority_variance > 0.0);
    }

    #[test]
    fn test_analyze_batch() {
        let processes: Vec<Process> = (1..=3).map(|pid| Process::new(pid, 150)).collect();
        let a = WorkloadAnalysis::analyze(&processes);
        assert!(a.is_batch);
        assert!(!a.is_interactive);
    }
}
