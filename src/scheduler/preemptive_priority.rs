//! Preemptive Priority scheduler with aging.
//!
//! The ready process with the lowest effective priority
//! (`priority - aging_counter`) holds the CPU. A higher-priority arrival
//! preempts it at once.
//!
//! # Aging
//!
//! Ticks fall on absolute multiples of the aging interval. At each tick,
//! every process waiting in the ready set earns `aging_amount` of credit,
//! so a low-priority process cannot be starved forever. The process that
//! held the CPU during the tick earns nothing. Ticks that fall inside an
//! idle gap are skipped since nothing is waiting.

use tracing::debug;

use super::state::SchedulerCore;
use super::{Scheduler, SchedulingResult};
use crate::dispatching::RuleEngine;
use crate::error::SchedError;
use crate::models::Process;

/// Default aging interval (ms).
pub const DEFAULT_AGING_INTERVAL: i64 = 50;
/// Default priority credit per aging tick.
pub const DEFAULT_AGING_AMOUNT: i32 = 1;

/// Preemptive Priority scheduler.
#[derive(Debug, Clone)]
pub struct PreemptivePriorityScheduler {
    aging_interval: i64,
    aging_amount: i32,
    engine: RuleEngine,
    core: SchedulerCore,
}

impl PreemptivePriorityScheduler {
    /// Creates a scheduler.
    ///
    /// `aging_interval` must be > 0 and `aging_amount` >= 0.
    pub fn new(aging_interval: i64, aging_amount: i32) -> Result<Self, SchedError> {
        SchedError::ensure_positive("aging interval", aging_interval)?;
        SchedError::ensure_non_negative("aging amount", i64::from(aging_amount))?;
        Ok(Self {
            aging_interval,
            aging_amount,
            engine: RuleEngine::aged_priority(),
            core: SchedulerCore::new(),
        })
    }

    /// Aging interval (ms).
    pub fn aging_interval(&self) -> i64 {
        self.aging_interval
    }

    /// Priority credit per tick.
    pub fn aging_amount(&self) -> i32 {
        self.aging_amount
    }

    /// First tick strictly after `time`.
    fn tick_after(&self, time: i64) -> i64 {
        (time / self.aging_interval + 1) * self.aging_interval
    }

    fn apply_aging(&self, processes: &mut [Process]) {
        for &idx in &self.core.ready_queue {
            let p = &mut processes[idx];
            p.aging_counter = p.aging_counter.saturating_add(self.aging_amount);
        }
        debug!(
            time_ms = self.core.current_time,
            aged = self.core.ready_queue.len(),
            "aging tick"
        );
    }
}

impl Default for PreemptivePriorityScheduler {
    fn default() -> Self {
        Self {
            aging_interval: DEFAULT_AGING_INTERVAL,
            aging_amount: DEFAULT_AGING_AMOUNT,
            engine: RuleEngine::aged_priority(),
            core: SchedulerCore::new(),
        }
    }
}

impl Scheduler for PreemptivePriorityScheduler {
    fn name(&self) -> String {
        "Priority (Preemptive with Aging)".to_string()
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn schedule(&mut self, mut processes: Vec<Process>) -> SchedulingResult {
        let mut pending = self.core.begin(&mut processes);
        let mut next_tick = self.aging_interval;

        loop {
            let arrived = self.core.admit_arrivals(&mut processes, &mut pending);
            self.core.ready_queue.extend(arrived);

            let Some(next) = self.select_next(&processes) else {
                match pending.next_arrival(&processes) {
                    Some(t) => {
                        self.core.idle_until(t);
                        next_tick = next_tick.max(self.tick_after(t));
                        continue;
                    }
                    None => break,
                }
            };

            self.core.take_ready(next);
            self.core.dispatch(&mut processes, next);

            // Run until completion, the next arrival or the next aging tick.
            let now = self.core.current_time;
            let mut until = (now + processes[next].remaining_time).min(next_tick);
            if let Some(arrival) = pending.next_arrival(&processes) {
                until = until.min(arrival);
            }
            self.core.run(&mut processes, next, until - now);

            if self.core.current_time >= next_tick {
                self.apply_aging(&mut processes);
                next_tick = self.tick_after(self.core.current_time);
            }

            if processes[next].remaining_time == 0 {
                self.core.finish(&mut processes, next);
            } else {
                self.core.preempt(&mut processes, next);
                self.core.ready_queue.push(next);
            }
        }

        self.core.finish_run(self.name(), processes)
    }

    fn select_next(&self, processes: &[Process]) -> Option<usize> {
        self.engine
            .select_best(processes, &self.core.ready_queue)
    }

    fn reset(&mut self) {
        self.core.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_process(pid: u32, arrival: i64, burst: i64, priority: i32) -> Process {
        Process::new(pid, burst)
            .with_arrival(arrival)
            .with_priority(priority)
    }

    #[test]
    fn test_higher_priority_arrival_preempts() {
        let processes = vec![make_process(1, 0, 10, 3), make_process(2, 2, 4, 1)];
        let result = PreemptivePriorityScheduler::default().schedule(processes);

        assert_eq!(
            result.gantt_chart.as_triples(),
            vec![(1, 0, 2), (2, 2, 6), (1, 6, 14)]
        );
        assert_eq!(result.context_switches, 2);
        assert_eq!(result.process(2).unwrap().waiting_time, 0);
    }

    #[test]
    fn test_lower_priority_arrival_waits() {
        let processes = vec![make_process(1, 0, 10, 1), make_process(2, 2, 4, 5)];
        let result = PreemptivePriorityScheduler::default().schedule(processes);
        assert_eq!(result.gantt_chart.as_triples(), vec![(1, 0, 10), (2, 10, 14)]);
    }

    #[test]
    fn test_aging_prevents_starvation() {
        let processes = vec![make_process(1, 0, 10, 5), make_process(2, 0, 200, 1)];
        let result = PreemptivePriorityScheduler::new(10, 1)
            .unwrap()
            .schedule(processes);

        // After four ticks P1 catches up to P2 and wins the pid tie.
        assert_eq!(
            result.gantt_chart.as_triples(),
            vec![(2, 0, 40), (1, 40, 50), (2, 50, 210)]
        );
        assert_eq!(result.process(1).unwrap().completion_time, 50);
        assert_eq!(result.process(1).unwrap().aging_counter, 4);
    }

    #[test]
    fn test_zero_aging_amount_starves() {
        let processes = vec![make_process(1, 0, 10, 5), make_process(2, 0, 200, 1)];
        let result = PreemptivePriorityScheduler::new(10, 0)
            .unwrap()
            .schedule(processes);

        assert_eq!(result.gantt_chart.as_triples(), vec![(2, 0, 200), (1, 200, 210)]);
        assert_eq!(result.context_switches, 1);
    }

    #[test]
    fn test_running_process_not_aged() {
        let processes = vec![make_process(1, 0, 120, 1)];
        let result = PreemptivePriorityScheduler::default().schedule(processes);

        let p1 = result.process(1).unwrap();
        assert_eq!(p1.aging_counter, 0);
        assert_eq!(result.gantt_chart.as_triples(), vec![(1, 0, 120)]);
    }

    #[test]
    fn test_idle_gap_skips_ticks() {
        let processes = vec![make_process(1, 0, 5, 1), make_process(2, 300, 5, 1)];
        let result = PreemptivePriorityScheduler::default().schedule(processes);
        assert_eq!(result.gantt_chart.as_triples(), vec![(1, 0, 5), (2, 300, 305)]);
        assert_eq!(result.total_time, 305);
    }

    #[test]
    fn test_empty() {
        let result = PreemptivePriorityScheduler::default().schedule(Vec::new());
        assert_eq!(result.total_time, 0);
        assert!(result.gantt_chart.is_empty());
        assert_eq!(result.context_switches, 0);
    }

    #[test]
    fn test_aging_at_priority_floor() {
        let processes = vec![
            make_process(1, 0, 100, i32::MIN),
            make_process(2, 0, 100, i32::MIN),
        ];
        let result = PreemptivePriorityScheduler::default().schedule(processes);

        // Each tick lets the waiting process overtake the running one.
        assert_eq!(
            result.gantt_chart.as_triples(),
            vec![(1, 0, 50), (2, 50, 100), (1, 100, 150), (2, 150, 200)]
        );
        assert_eq!(result.total_time, 200);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(PreemptivePriorityScheduler::new(0, 1).is_err());
        assert!(PreemptivePriorityScheduler::new(50, -1).is_err());
        let s = PreemptivePriorityScheduler::default();
        assert_eq!(s.aging_interval(), 50);
        assert_eq!(s.aging_amount(), 1);
    }
}
