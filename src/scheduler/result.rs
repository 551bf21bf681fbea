//! Output aggregate of one scheduling run.

use serde::{Deserialize, Serialize};

use super::ScheduleKpi;
use crate::models::{GanttChart, Process};

/// Result of a scheduling simulation.
///
/// Created once per `schedule()` call and not mutated afterwards.
/// All times are in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingResult {
    /// Display name of the algorithm that produced the run.
    pub algorithm: String,
    /// The scheduled processes with their final metrics.
    pub processes: Vec<Process>,
    /// Execution timeline.
    pub gantt_chart: GanttChart,
    /// Number of CPU occupant changes.
    pub context_switches: usize,
    /// Makespan: latest completion time.
    pub total_time: i64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Mean completion time.
    pub avg_completion_time: f64,
    /// Busy share of the makespan, in percent.
    pub cpu_utilization: f64,
    /// Completed processes per second of virtual time.
    pub throughput: f64,
}

impl SchedulingResult {
    /// Assembles a result and derives its metrics.
    pub fn new(
        algorithm: impl Into<String>,
        processes: Vec<Process>,
        gantt_chart: GanttChart,
        context_switches: usize,
    ) -> Self {
        let total_time = processes
            .iter()
            .map(|p| p.completion_time)
            .max()
            .unwrap_or(0);
        let kpi = ScheduleKpi::calculate(&processes, total_time);

        Self {
            algorithm: algorithm.into(),
            processes,
            gantt_chart,
            context_switches,
            total_time,
            avg_waiting_time: kpi.avg_waiting_ms,
            avg_turnaround_time: kpi.avg_turnaround_ms,
            avg_response_time: kpi.avg_response_ms,
            avg_completion_time: kpi.avg_completion_ms,
            cpu_utilization: kpi.cpu_utilization,
            throughput: kpi.throughput,
        }
    }

    /// An empty result: no processes, zero time, zero metrics.
    pub fn empty(algorithm: impl Into<String>) -> Self {
        Self::new(algorithm, Vec::new(), GanttChart::new(), 0)
    }

    /// Full KPI set for this run.
    pub fn kpi(&self) -> ScheduleKpi {
        ScheduleKpi::calculate(&self.processes, self.total_time)
    }

    /// Finds a process by id.
    pub fn process(&self, pid: u32) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Waiting time per process, in pid order.
    pub fn waiting_times(&self) -> Vec<(u32, i64)> {
        let mut times: Vec<(u32, i64)> = self
            .processes
            .iter()
            .map(|p| (p.pid, p.waiting_time))
            .collect();
        times.sort_by_key(|&(pid, _)| pid);
        times
    }

    /// Number of scheduled processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }
}
