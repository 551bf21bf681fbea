//! Adaptive scheduler selection.
//!
//! Picks a scheduling algorithm for a workload in four steps:
//!
//! 1. Characterize the workload ([`WorkloadAnalysis`]).
//! 2. Estimate each algorithm's mean waiting time ([`PerformanceEstimate`]).
//! 3. Rank the estimates and keep the best three.
//! 4. Apply overrides: a widely spread priority distribution favours the
//!    priority schedulers, an interactive workload favours Round Robin or
//!    MLFQ. Otherwise the best estimate wins.
//!
//! [`AdaptiveSelector::compare_all`] runs every algorithm on the same
//! workload for a side-by-side comparison of actual results.
//!
//! # Example
//!
//! ```
//! use u_cpu_sched::models::Process;
//! use u_cpu_sched::selector::AdaptiveSelector;
//!
//! let processes: Vec<Process> = (1..=5).map(|pid| Process::new(pid, 100)).collect();
//! let recommendation = AdaptiveSelector::new().select_scheduler(&processes);
//! assert_eq!(recommendation.algorithm_name, "SRTF");
//! ```

mod analysis;
mod estimate;

pub use analysis::WorkloadAnalysis;
pub use estimate::{
    estimate, estimate_all, rank, recommended_quantum, PerformanceEstimate, MAX_TIME_QUANTUM,
    MIN_TIME_QUANTUM,
};

use std::fmt::Write;

use tracing::{debug, info, instrument};

use crate::error::SchedError;
use crate::models::Process;
use crate::scheduler::{Algorithm, Policy, Scheduler, SchedulingResult};

/// Number of ranked candidates the overrides may choose from.
const SHORTLIST: usize = 3;
/// Confidence of an estimate-driven choice.
const ESTIMATE_CONFIDENCE: f64 = 0.85;
/// Round Robin quantum used by [`AdaptiveSelector::compare_all`] (ms).
pub const DEFAULT_COMPARISON_QUANTUM: i64 = 20;

/// Outcome of [`AdaptiveSelector::select_scheduler`].
#[derive(Debug, Clone)]
pub struct SchedulerRecommendation {
    /// Freshly constructed scheduler, ready to run.
    pub scheduler: Policy,
    /// Display name of the scheduler.
    pub algorithm_name: String,
    /// Ranked estimate table and the reason for the choice.
    pub justification: String,
    /// Estimated mean waiting time of the choice (ms).
    pub expected_avg_wait: f64,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Workload-driven scheduler selector.
#[derive(Debug, Clone)]
pub struct AdaptiveSelector {
    comparison_quantum: i64,
}

impl AdaptiveSelector {
    /// Creates a selector.
    pub fn new() -> Self {
        Self {
            comparison_quantum: DEFAULT_COMPARISON_QUANTUM,
        }
    }

    /// Sets the Round Robin quantum used by `compare_all`.
    pub fn with_comparison_quantum(mut self, time_quantum: i64) -> Result<Self, SchedError> {
        self.comparison_quantum = SchedError::ensure_positive("time quantum", time_quantum)?;
        Ok(self)
    }

    /// Round Robin quantum used by `compare_all`.
    pub fn comparison_quantum(&self) -> i64 {
        self.comparison_quantum
    }

    /// Characterizes `processes`.
    pub fn analyze_workload(&self, processes: &[Process]) -> WorkloadAnalysis {
        WorkloadAnalysis::analyze(processes)
    }

    /// Recommends a scheduler for `processes`.
    #[instrument(skip_all, fields(processes = processes.len()))]
    pub fn select_scheduler(&self, processes: &[Process]) -> SchedulerRecommendation {
        let analysis = self.analyze_workload(processes);
        if analysis.process_count == 0 {
            info!("empty workload, defaulting to FCFS");
            return SchedulerRecommendation {
                scheduler: Policy::from_algorithm(Algorithm::Fcfs),
                algorithm_name: "FCFS".to_string(),
                justification: "No processes to schedule. FCFS selected as default.".to_string(),
                expected_avg_wait: 0.0,
                confidence: 1.0,
            };
        }

        let ranked = rank(estimate_all(&analysis));
        for e in &ranked {
            debug!(
                algorithm = %e.algorithm,
                expected_avg_wait_ms = e.expected_avg_wait,
                "estimate"
            );
        }

        let shortlist = &ranked[..SHORTLIST.min(ranked.len())];
        let (chosen, reason) = choose(&analysis, shortlist);
        let chosen = chosen.clone();

        let scheduler = chosen.build_policy();
        let algorithm_name = scheduler.name();
        let justification = justify(&analysis, &ranked, &algorithm_name, &reason);

        info!(
            algorithm = %algorithm_name,
            expected_avg_wait_ms = chosen.expected_avg_wait,
            processes = analysis.process_count,
            "scheduler selected"
        );

        SchedulerRecommendation {
            scheduler,
            algorithm_name,
            justification,
            expected_avg_wait: chosen.expected_avg_wait,
            confidence: ESTIMATE_CONFIDENCE,
        }
    }

    /// Runs every algorithm once on copies of `processes`.
    ///
    /// Returns `(short key, result)` pairs in canonical algorithm order.
    /// Round Robin uses the comparison quantum.
    #[instrument(skip_all, fields(processes = processes.len()))]
    pub fn compare_all(&self, processes: &[Process]) -> Vec<(String, SchedulingResult)> {
        Algorithm::all()
            .into_iter()
            .map(|algorithm| {
                let mut policy = match algorithm {
                    Algorithm::RoundRobin => Policy::round_robin(self.comparison_quantum)
                        .unwrap_or_else(|_| Policy::from_algorithm(algorithm)),
                    other => Policy::from_algorithm(other),
                };
                let result = policy.schedule(processes.to_vec());
                (algorithm.as_str().to_string(), result)
            })
            .collect()
    }
}

impl Default for AdaptiveSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the override rules to the shortlist.
fn choose<'a>(
    analysis: &WorkloadAnalysis,
    shortlist: &'a [PerformanceEstimate],
) -> (&'a PerformanceEstimate, String) {
    let find = |algorithm: Algorithm| shortlist.iter().find(|e| e.algorithm == algorithm);
    let best = &shortlist[0];

    let priority_ok = analysis.priority_variance > 6.0 && analysis.priority_range > 7;
    if priority_ok {
        if analysis.io_bound_ratio > 0.3 {
            if let Some(e) = find(Algorithm::PreemptivePriority) {
                return (
                    e,
                    format!(
                        "Priorities vary widely (variance {:.1}, range {}) and {:.0}% of \
                         processes are I/O-bound: preemptive priority with aging serves \
                         urgent work first without starving the rest.",
                        analysis.priority_variance,
                        analysis.priority_range,
                        analysis.io_bound_ratio * 100.0
                    ),
                );
            }
        }
        if let Some(e) = find(Algorithm::Priority) {
            return (
                e,
                format!(
                    "Priorities vary widely (variance {:.1}, range {}): priority \
                     scheduling runs critical processes first.",
                    analysis.priority_variance, analysis.priority_range
                ),
            );
        }
        return (best, lowest_wait_reason(best));
    }

    if analysis.is_interactive || analysis.io_bound_ratio > 0.5 {
        if let Some(e) = shortlist
            .iter()
            .find(|e| matches!(e.algorithm, Algorithm::RoundRobin | Algorithm::Mlfq))
        {
            return (
                e,
                format!(
                    "Interactive workload ({:.0}% I/O-bound, mean burst {:.1}ms): \
                     time slicing keeps response times short.",
                    analysis.io_bound_ratio * 100.0,
                    analysis.avg_burst_time
                ),
            );
        }
    }

    (best, lowest_wait_reason(best))
}

fn lowest_wait_reason(best: &PerformanceEstimate) -> String {
    format!(
        "{} has the lowest estimated average waiting time ({:.1}ms).",
        best.display_name(),
        best.expected_avg_wait
    )
}

fn justify(
    analysis: &WorkloadAnalysis,
    ranked: &[PerformanceEstimate],
    chosen: &str,
    reason: &str,
) -> String {
    let mut text = format!(
        "Workload: {} processes, mean burst {:.1}ms, CV {:.2}, {:.0}% I/O-bound.\n\
         Estimated average waiting time:\n",
        analysis.process_count,
        analysis.avg_burst_time,
        analysis.coefficient_of_variation,
        analysis.io_bound_ratio * 100.0
    );
    for (i, e) in ranked.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(
            text,
            "  {}. {:<34} {:>10.1}ms",
            i + 1,
            e.display_name(),
            e.expected_avg_wait
        );
    }
    let _ = write!(text, "Selected {chosen}. {reason}");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(n: u32, burst: i64) -> Vec<Process> {
        (1..=n).map(|pid| Process::new(pid, burst).with_priority(5)).collect()
    }

    #[test]
    fn test_select_uniform_workload_picks_srtf() {
        let rec = AdaptiveSelector::new().select_scheduler(&uniform(5, 100));

        assert_eq!(rec.algorithm_name, "SRTF");
        assert_eq!(rec.scheduler.algorithm(), Algorithm::Srtf);
        assert!((rec.expected_avg_wait - 100.0).abs() < 1e-9);
        assert!((rec.confidence - 0.85).abs() < 1e-12);
        assert!(rec.justification.contains("Selected SRTF"));
        assert!(rec.justification.contains("Round Robin (q=20)"));
    }

    #[test]
    fn test_select_empty_defaults_to_fcfs() {
        let rec = AdaptiveSelector::new().select_scheduler(&[]);
        assert_eq!(rec.algorithm_name, "FCFS");
        assert_eq!(rec.scheduler.algorithm(), Algorithm::Fcfs);
        assert_eq!(rec.expected_avg_wait, 0.0);
        assert_eq!(rec.confidence, 1.0);
    }

    #[test]
    fn test_select_spread_priorities_with_io_picks_preemptive_priority() {
        let processes = vec![
            Process::new(1, 100).with_priority(1).with_io_bound(true),
            Process::new(2, 100).with_priority(10).with_io_bound(true),
            Process::new(3, 100).with_priority(1),
            Process::new(4, 100).with_priority(10),
        ];
        let rec = AdaptiveSelector::new().select_scheduler(&processes);

        assert_eq!(rec.scheduler.algorithm(), Algorithm::PreemptivePriority);
        assert_eq!(rec.algorithm_name, "Priority (Preemptive with Aging)");
        assert!((rec.expected_avg_wait - 67.5).abs() < 1e-9);
    }

    #[test]
    fn test_select_spread_priorities_without_io_falls_back() {
        let processes = vec![
            Process::new(1, 100).with_priority(1),
            Process::new(2, 100).with_priority(10),
            Process::new(3, 100).with_priority(1),
            Process::new(4, 100).with_priority(10),
        ];
        let rec = AdaptiveSelector::new().select_scheduler(&processes);

        // Non-preemptive priority never makes the shortlist here.
        assert_eq!(rec.scheduler.algorithm(), Algorithm::Srtf);
        assert!((rec.expected_avg_wait - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_large_interactive_workload_picks_mlfq() {
        let processes: Vec<Process> = (1..=20)
            .map(|pid| Process::new(pid, 20).with_io_bound(true))
            .collect();
        let rec = AdaptiveSelector::new().select_scheduler(&processes);

        assert_eq!(rec.algorithm_name, "MLFQ");
        assert!((rec.expected_avg_wait - 120.0).abs() < 1e-9);
        assert!(rec.justification.contains("Interactive"));
    }

    #[test]
    fn test_select_small_interactive_workload_keeps_best() {
        // Neither RR nor MLFQ reaches the shortlist with 5 processes.
        let processes: Vec<Process> = (1..=5)
            .map(|pid| Process::new(pid, 20).with_io_bound(true))
            .collect();
        let rec = AdaptiveSelector::new().select_scheduler(&processes);

        assert_eq!(rec.scheduler.algorithm(), Algorithm::PreemptivePriority);
        assert!((rec.expected_avg_wait - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_io_heavy_batch_workload_picks_mlfq() {
        // Mean burst 100 is not interactive; 60% I/O still favours slicing.
        let processes: Vec<Process> = (1..=20)
            .map(|pid| Process::new(pid, 100).with_io_bound(pid <= 12))
            .collect();
        let selector = AdaptiveSelector::new();
        assert!(!selector.analyze_workload(&processes).is_interactive);

        let rec = selector.select_scheduler(&processes);
        assert_eq!(rec.scheduler.algorithm(), Algorithm::Mlfq);
        assert!((rec.expected_avg_wait - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_extreme_priorities() {
        let processes = vec![
            Process::new(1, 100).with_priority(i32::MIN),
            Process::new(2, 100).with_priority(i32::MAX),
        ];
        let rec = AdaptiveSelector::new().select_scheduler(&processes);
        assert_eq!(rec.scheduler.algorithm(), Algorithm::Srtf);
        assert!(rec.justification.contains("Selected SRTF"));
    }

    fn shortlist_of(entries: &[(Algorithm, f64)]) -> Vec<PerformanceEstimate> {
        entries
            .iter()
            .map(|&(algorithm, expected_avg_wait)| PerformanceEstimate {
                algorithm,
                expected_avg_wait,
                time_quantum: None,
            })
            .collect()
    }

    fn spread_priorities(io_bound_ratio: f64) -> WorkloadAnalysis {
        WorkloadAnalysis {
            process_count: 4,
            avg_burst_time: 100.0,
            priority_range: 9,
            priority_variance: 27.0,
            io_bound_ratio,
            cpu_bound_ratio: 1.0 - io_bound_ratio,
            ..WorkloadAnalysis::default()
        }
    }

    #[test]
    fn test_choose_non_preemptive_priority_when_shortlisted() {
        let shortlist = shortlist_of(&[
            (Algorithm::Srtf, 75.0),
            (Algorithm::Priority, 90.0),
            (Algorithm::Sjf, 100.0),
        ]);
        let (chosen, reason) = choose(&spread_priorities(0.0), &shortlist);
        assert_eq!(chosen.algorithm, Algorithm::Priority);
        assert!(reason.contains("priority scheduling"));
    }

    #[test]
    fn test_choose_io_heavy_without_preemptive_priority_falls_to_priority() {
        let shortlist = shortlist_of(&[
            (Algorithm::Srtf, 75.0),
            (Algorithm::Priority, 90.0),
            (Algorithm::Sjf, 100.0),
        ]);
        let (chosen, _) = choose(&spread_priorities(0.5), &shortlist);
        assert_eq!(chosen.algorithm, Algorithm::Priority);
    }

    #[test]
    fn test_compare_all_runs_every_algorithm() {
        let processes = vec![
            Process::new(1, 30).with_arrival(0),
            Process::new(2, 12).with_arrival(4),
            Process::new(3, 45).with_arrival(9),
        ];
        let results = AdaptiveSelector::new().compare_all(&processes);

        let keys: Vec<&str> = results.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["FCFS", "SJF", "SRTF", "RR", "Priority", "PreemptivePriority", "MLFQ"]
        );
        assert_eq!(results[3].1.algorithm, "Round Robin (q=20)");
        for (_, result) in &results {
            assert_eq!(result.gantt_chart.busy_time_ms(), 87);
            assert_eq!(result.processes.len(), 3);
        }
        // The input itself is untouched.
        assert_eq!(processes[0].completion_time, 0);
    }

    #[test]
    fn test_comparison_quantum_configurable() {
        let selector = AdaptiveSelector::new().with_comparison_quantum(5).unwrap();
        let results = selector.compare_all(&[Process::new(1, 12)]);
        assert_eq!(results[3].1.algorithm, "Round Robin (q=5)");
        assert!(AdaptiveSelector::new().with_comparison_quantum(0).is_err());
    }
}
