//! Schedule quality metrics (KPIs).
//!
//! Computes the standard CPU-scheduling performance indicators from the
//! processes of a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting | turnaround − burst |
//! | Turnaround | completion − arrival |
//! | Response | first dispatch − arrival |
//! | CPU Utilization | 100 · Σ burst / makespan |
//! | Throughput | n / (makespan / 1000) |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2:
//! Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::Process;

/// Scheduling performance indicators.
///
/// All time values are in milliseconds. Every average is 0 for an empty
/// process set, and the rate metrics are 0 for a zero makespan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Number of processes measured.
    pub process_count: usize,
    /// Makespan (ms).
    pub total_time_ms: i64,
    /// Mean waiting time (ms).
    pub avg_waiting_ms: f64,
    /// Mean turnaround time (ms).
    pub avg_turnaround_ms: f64,
    /// Mean response time (ms).
    pub avg_response_ms: f64,
    /// Mean completion time (ms).
    pub avg_completion_ms: f64,
    /// Longest single wait (ms).
    pub max_waiting_ms: i64,
    /// Shortest single wait (ms).
    pub min_waiting_ms: i64,
    /// CPU busy time (ms).
    pub busy_time_ms: i64,
    /// CPU idle time within the makespan (ms).
    pub idle_time_ms: i64,
    /// Busy share of the makespan (percent).
    pub cpu_utilization: f64,
    /// Processes per second.
    pub throughput: f64,
}

/// One row of a side-by-side KPI comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRow {
    /// Metric name.
    pub metric: &'static str,
    /// Value in the left-hand run.
    pub left: f64,
    /// Value in the right-hand run.
    pub right: f64,
}

impl KpiRow {
    /// `right - left`.
    pub fn delta(&self) -> f64 {
        self.right - self.left
    }
}

impl ScheduleKpi {
    /// Computes KPIs from finished processes and the run's makespan.
    pub fn calculate(processes: &[Process], total_time_ms: i64) -> Self {
        let n = processes.len();
        if n == 0 {
            return Self {
                total_time_ms,
                ..Default::default()
            };
        }

        let mut total_waiting: i64 = 0;
        let mut total_turnaround: i64 = 0;
        let mut total_response: i64 = 0;
        let mut total_completion: i64 = 0;
        let mut max_waiting = i64::MIN;
        let mut min_waiting = i64::MAX;
        let mut busy: i64 = 0;

        for p in processes {
            total_waiting += p.waiting_time;
            total_turnaround += p.turnaround_time;
            total_response += p.response_time.unwrap_or(0);
            total_completion += p.completion_time;
            max_waiting = max_waiting.max(p.waiting_time);
            min_waiting = min_waiting.min(p.waiting_time);
            busy += p.burst_time.max(0);
        }

        let count = n as f64;
        let (cpu_utilization, throughput) = if total_time_ms > 0 {
            (
                busy as f64 / total_time_ms as f64 * 100.0,
                count / (total_time_ms as f64 / 1000.0),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            process_count: n,
            total_time_ms,
            avg_waiting_ms: total_waiting as f64 / count,
            avg_turnaround_ms: total_turnaround as f64 / count,
            avg_response_ms: total_response as f64 / count,
            avg_completion_ms: total_completion as f64 / count,
            max_waiting_ms: max_waiting,
            min_waiting_ms: min_waiting,
            busy_time_ms: busy,
            idle_time_ms: (total_time_ms - busy).max(0),
            cpu_utilization,
            throughput,
        }
    }

    /// Side-by-side comparison with another run (`self` on the left).
    pub fn compare(&self, other: &Self) -> Vec<KpiRow> {
        let row = |metric, left, right| KpiRow {
            metric,
            left,
            right,
        };
        vec![
            row("avg_waiting_time", self.avg_waiting_ms, other.avg_waiting_ms),
            row(
                "avg_turnaround_time",
                self.avg_turnaround_ms,
                other.avg_turnaround_ms,
            ),
            row("avg_response_time", self.avg_response_ms, other.avg_response_ms),
            row("cpu_utilization", self.cpu_utilization, other.cpu_utilization),
            row("throughput", self.throughput, other.throughput),
            row(
                "max_waiting_time",
                self.max_waiting_ms as f64,
                other.max_waiting_ms as f64,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(pid: u32, burst: i64, arrival: i64, first_run: i64, completion: i64) -> Process {
        let mut p = Process::new(pid, burst).with_arrival(arrival);
        p.mark_dispatched(first_run);
        p.complete(completion);
        p
    }

    #[test]
    fn test_kpi_basic() {
        let processes = vec![finished(1, 5, 0, 0, 5), finished(2, 3, 1, 5, 8)];
        let kpi = ScheduleKpi::calculate(&processes, 8);

        assert_eq!(kpi.process_count, 2);
        assert!((kpi.avg_waiting_ms - 2.0).abs() < 1e-10);
        assert!((kpi.avg_response_ms - 2.0).abs() < 1e-10);
        assert_eq!(kpi.max_waiting_ms, 4);
        assert_eq!(kpi.min_waiting_ms, 0);
        assert_eq!(kpi.busy_time_ms, 8);
        assert_eq!(kpi.idle_time_ms, 0);
    }

    #[test]
    fn test_kpi_idle_gap() {
        // P2 arrives after P1 finished: 5ms of idle CPU.
        let processes = vec![finished(1, 5, 0, 0, 5), finished(2, 5, 10, 10, 15)];
        let kpi = ScheduleKpi::calculate(&processes, 15);

        assert_eq!(kpi.idle_time_ms, 5);
        assert!((kpi.cpu_utilization - 200.0 / 3.0).abs() < 1e-9);
        assert!((kpi.throughput - 2.0 / 0.015).abs() < 1e-9);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&[], 0);
        assert_eq!(kpi.process_count, 0);
        assert_eq!(kpi.avg_waiting_ms, 0.0);
        assert_eq!(kpi.cpu_utilization, 0.0);
        assert_eq!(kpi.throughput, 0.0);
    }

    #[test]
    fn test_kpi_zero_makespan() {
        let mut p = Process::new(1, 0);
        p.complete_instantly();
        let kpi = ScheduleKpi::calculate(&[p], 0);
        assert_eq!(kpi.process_count, 1);
        assert_eq!(kpi.cpu_utilization, 0.0);
        assert_eq!(kpi.throughput, 0.0);
    }

    #[test]
    fn test_compare() {
        let a = ScheduleKpi::calculate(&[finished(1, 5, 0, 0, 5)], 5);
        let b = ScheduleKpi::calculate(&[finished(1, 5, 0, 3, 8)], 8);
        let rows = a.compare(&b);

        let waiting = rows
            .iter()
            .find(|r| r.metric == "avg_waiting_time")
            .unwrap();
        assert!((waiting.delta() - 3.0).abs() < 1e-10);
        assert_eq!(rows.len(), 6);
    }
}
