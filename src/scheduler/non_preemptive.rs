//! Non-preemptive schedulers: FCFS, SJF and Priority.
//!
//! The three policies share one control flow and differ only in the key
//! used to pick from the ready set:
//!
//! | Policy | Key |
//! |--------|-----|
//! | FCFS | `(arrival_time, pid)` |
//! | SJF | `(burst_time, arrival_time, pid)` |
//! | Priority | `(priority, arrival_time, pid)` |
//!
//! Once dispatched, a process runs its whole burst. A better candidate
//! arriving meanwhile waits for the next decision point.

use super::state::SchedulerCore;
use super::{Scheduler, SchedulingResult};
use crate::dispatching::RuleEngine;
use crate::models::Process;

/// Run-to-completion loop shared by the non-preemptive policies.
#[derive(Debug, Clone)]
struct NonPreemptive {
    engine: RuleEngine,
    core: SchedulerCore,
}

impl NonPreemptive {
    fn new(engine: RuleEngine) -> Self {
        Self {
            engine,
            core: SchedulerCore::new(),
        }
    }

    fn select_next(&self, processes: &[Process]) -> Option<usize> {
        self.engine
            .select_best(processes, &self.core.ready_queue)
    }

    fn run(&mut self, name: String, mut processes: Vec<Process>) -> SchedulingResult {
        let mut pending = self.core.begin(&mut processes);

        loop {
            let arrived = self.core.admit_arrivals(&mut processes, &mut pending);
            self.core.ready_queue.extend(arrived);

            let Some(next) = self.select_next(&processes) else {
                match pending.next_arrival(&processes) {
                    Some(t) => {
                        self.core.idle_until(t);
                        continue;
                    }
                    None => break,
                }
            };

            self.core.take_ready(next);
            self.core.dispatch(&mut processes, next);
            let burst = processes[next].remaining_time;
            self.core.run(&mut processes, next, burst);
            self.core.finish(&mut processes, next);
        }

        self.core.finish_run(name, processes)
    }
}

/// First-Come-First-Served scheduler.
///
/// Response time equals waiting time: every process is dispatched once.
#[derive(Debug, Clone)]
pub struct FcfsScheduler {
    inner: NonPreemptive,
}

impl FcfsScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self {
            inner: NonPreemptive::new(RuleEngine::first_come_first_served()),
        }
    }
}

impl Default for FcfsScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> String {
        "FCFS".to_string()
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn schedule(&mut self, processes: Vec<Process>) -> SchedulingResult {
        let name = self.name();
        self.inner.run(name, processes)
    }

    fn select_next(&self, processes: &[Process]) -> Option<usize> {
        self.inner.select_next(processes)
    }

    fn reset(&mut self) {
        self.inner.core.reset();
    }
}

/// Shortest-Job-First scheduler (non-preemptive).
#[derive(Debug, Clone)]
pub struct SjfScheduler {
    inner: NonPreemptive,
}

impl SjfScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self {
            inner: NonPreemptive::new(RuleEngine::shortest_job_first()),
        }
    }
}

impl Default for SjfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> String {
        "SJF".to_string()
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn schedule(&mut self, processes: Vec<Process>) -> SchedulingResult {
        let name = self.name();
        self.inner.run(name, processes)
    }

    fn select_next(&self, processes: &[Process]) -> Option<usize> {
        self.inner.select_next(processes)
    }

    fn reset(&mut self) {
        self.inner.core.reset();
    }
}

/// Priority scheduler (non-preemptive, lower value first).
#[derive(Debug, Clone)]
pub struct PriorityScheduler {
    inner: NonPreemptive,
}

impl PriorityScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self {
            inner: NonPreemptive::new(RuleEngine::static_priority()),
        }
    }
}

impl Default for PriorityScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> String {
        "Priority (Non-Preemptive)".to_string()
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn schedule(&mut self, processes: Vec<Process>) -> SchedulingResult {
        let name = self.name();
        self.inner.run(name, processes)
    }

    fn select_next(&self, processes: &[Process]) -> Option<usize> {
        self.inner.select_next(processes)
    }

    fn reset(&mut self) {
        self.inner.core.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessState;

    fn make_process(pid: u32, arrival: i64, burst: i64, priority: i32) -> Process {
        Process::new(pid, burst)
            .with_arrival(arrival)
            .with_priority(priority)
    }

    #[test]
    fn test_fcfs_scenario() {
        let processes = vec![
            make_process(1, 0, 5, 0),
            make_process(2, 1, 3, 0),
            make_process(3, 2, 8, 0),
        ];
        let result = FcfsScheduler::new().schedule(processes);

        assert_eq!(
            result.gantt_chart.as_triples(),
            vec![(1, 0, 5), (2, 5, 8), (3, 8, 16)]
        );
        assert_eq!(result.waiting_times(), vec![(1, 0), (2, 4), (3, 6)]);
        assert_eq!(result.context_switches, 2);
        assert_eq!(result.total_time, 16);
        for p in &result.processes {
            assert_eq!(p.response_time, Some(p.waiting_time));
        }
    }

    #[test]
    fn test_fcfs_ties_by_pid() {
        let processes = vec![make_process(2, 0, 4, 0), make_process(1, 0, 4, 0)];
        let result = FcfsScheduler::new().schedule(processes);
        assert_eq!(result.gantt_chart.pid_sequence(), vec![1, 2]);
    }

    #[test]
    fn test_fcfs_idle_gap() {
        let processes = vec![make_process(1, 0, 3, 0), make_process(2, 10, 2, 0)];
        let result = FcfsScheduler::new().schedule(processes);

        assert_eq!(result.gantt_chart.as_triples(), vec![(1, 0, 3), (2, 10, 12)]);
        assert_eq!(result.total_time, 12);
        assert_eq!(result.process(2).unwrap().waiting_time, 0);
        // Occupant changed from P1 to P2 across the gap.
        assert_eq!(result.context_switches, 1);
    }

    #[test]
    fn test_sjf_picks_shortest_ready() {
        let processes = vec![
            make_process(1, 0, 7, 0),
            make_process(2, 2, 4, 0),
            make_process(3, 4, 1, 0),
            make_process(4, 5, 4, 0),
        ];
        let result = SjfScheduler::new().schedule(processes);

        // At t=7: P3 (1) < P2 (4, arr 2) < P4 (4, arr 5)
        assert_eq!(
            result.gantt_chart.as_triples(),
            vec![(1, 0, 7), (3, 7, 8), (2, 8, 12), (4, 12, 16)]
        );
    }

    #[test]
    fn test_sjf_does_not_preempt() {
        let processes = vec![make_process(1, 0, 10, 0), make_process(2, 1, 1, 0)];
        let result = SjfScheduler::new().schedule(processes);
        assert_eq!(result.gantt_chart.as_triples(), vec![(1, 0, 10), (2, 10, 11)]);
    }

    #[test]
    fn test_priority_ordering() {
        let processes = vec![
            make_process(1, 0, 4, 3),
            make_process(2, 1, 3, 1),
            make_process(3, 1, 2, 2),
            make_process(4, 2, 1, 1),
        ];
        let result = PriorityScheduler::new().schedule(processes);

        // P1 runs first (only one ready), then priority 1 by arrival, then 2.
        assert_eq!(result.gantt_chart.pid_sequence(), vec![1, 2, 4, 3]);
        assert_eq!(result.algorithm, "Priority (Non-Preemptive)");
    }

    #[test]
    fn test_all_terminated() {
        let processes = vec![make_process(1, 3, 2, 0), make_process(2, 0, 6, 0)];
        let result = PriorityScheduler::new().schedule(processes);
        for p in &result.processes {
            assert_eq!(p.state, ProcessState::Terminated);
            assert_eq!(p.remaining_time, 0);
            assert_eq!(p.turnaround_time, p.completion_time - p.arrival_time);
            assert_eq!(p.waiting_time, p.turnaround_time - p.burst_time);
        }
    }

    #[test]
    fn test_zero_burst_never_runs() {
        let processes = vec![make_process(1, 0, 5, 0), make_process(2, 2, 0, 0)];
        let result = FcfsScheduler::new().schedule(processes);

        assert_eq!(result.gantt_chart.pid_sequence(), vec![1]);
        let p2 = result.process(2).unwrap();
        assert_eq!(p2.completion_time, 2);
        assert_eq!(p2.waiting_time, 0);
        assert_eq!(p2.response_time, Some(0));
    }

    #[test]
    fn test_empty_input() {
        let result = SjfScheduler::new().schedule(Vec::new());
        assert_eq!(result.total_time, 0);
        assert!(result.gantt_chart.is_empty());
        assert_eq!(result.avg_waiting_time, 0.0);
    }

    #[test]
    fn test_rerun_resets_state() {
        let mut scheduler = FcfsScheduler::new();
        let first = scheduler.schedule(vec![make_process(1, 0, 5, 0), make_process(2, 0, 5, 0)]);
        let second = scheduler.schedule(first.processes.clone());
        assert_eq!(first.gantt_chart, second.gantt_chart);
        assert_eq!(second.context_switches, 1);
    }

    #[test]
    fn test_select_next_after_reset() {
        let mut scheduler = SjfScheduler::new();
        scheduler.reset();
        assert_eq!(scheduler.select_next(&[]), None);
        assert!(!scheduler.is_preemptive());
    }
}
