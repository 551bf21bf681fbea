//! Round Robin scheduler.
//!
//! Processes share the CPU in a circular FIFO queue, each dispatch lasting
//! at most one time quantum. After a slice, processes that arrived during
//! it are queued before the preempted process goes to the back.

use std::collections::VecDeque;

use tracing::debug;

use super::state::{ArrivalQueue, SchedulerCore};
use super::{Scheduler, SchedulingResult};
use crate::error::SchedError;
use crate::models::Process;

/// Default time quantum (ms).
pub const DEFAULT_TIME_QUANTUM: i64 = 10;

/// Round Robin scheduler.
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    time_quantum: i64,
    queue: VecDeque<usize>,
    core: SchedulerCore,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the given quantum (ms, must be > 0).
    pub fn new(time_quantum: i64) -> Result<Self, SchedError> {
        Ok(Self {
            time_quantum: SchedError::ensure_positive("time quantum", time_quantum)?,
            queue: VecDeque::new(),
            core: SchedulerCore::new(),
        })
    }

    /// Time quantum (ms).
    pub fn time_quantum(&self) -> i64 {
        self.time_quantum
    }

    fn enqueue_arrivals(&mut self, processes: &mut [Process], pending: &mut ArrivalQueue) {
        let arrived = self.core.admit_arrivals(processes, pending);
        self.queue.extend(arrived);
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self {
            time_quantum: DEFAULT_TIME_QUANTUM,
            queue: VecDeque::new(),
            core: SchedulerCore::new(),
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> String {
        format!("Round Robin (q={})", self.time_quantum)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn schedule(&mut self, mut processes: Vec<Process>) -> SchedulingResult {
        self.queue.clear();
        let mut pending = self.core.begin(&mut processes);

        loop {
            self.enqueue_arrivals(&mut processes, &mut pending);

            let Some(next) = self.queue.pop_front() else {
                match pending.next_arrival(&processes) {
                    Some(t) => {
                        self.core.idle_until(t);
                        continue;
                    }
                    None => break,
                }
            };

            self.core.dispatch(&mut processes, next);
            self.core.run(&mut processes, next, self.time_quantum);

            // Arrivals during the slice go ahead of the preempted process.
            self.enqueue_arrivals(&mut processes, &mut pending);

            if processes[next].remaining_time == 0 {
                self.core.finish(&mut processes, next);
            } else {
                debug!(
                    time_ms = self.core.current_time,
                    pid = processes[next].pid,
                    remaining_ms = processes[next].remaining_time,
                    "quantum expired, re-queued"
                );
                self.core.preempt(&mut processes, next);
                self.queue.push_back(next);
            }
        }

        self.core.finish_run(self.name(), processes)
    }

    fn select_next(&self, _processes: &[Process]) -> Option<usize> {
        self.queue.front().copied()
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.core.reset();
    }
}
