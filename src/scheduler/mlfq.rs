//! Multi-Level Feedback Queue scheduler.
//!
//! # Rules
//!
//! 1. New arrivals enter level 0 (highest priority).
//! 2. The CPU goes to the front of the highest non-empty level.
//! 3. A process that uses its whole quantum drops one level. At the lowest
//!    level it stays where it is.
//! 4. A process that stops early is queued at the back of its own level.
//! 5. Every `boost_interval` ms all processes move back to level 0.
//!
//! A quantum of 0 means run to completion. At levels below the top, an
//! arrival cuts the running slice short so it can be served from level 0.

use std::collections::VecDeque;

use tracing::debug;

use super::state::{ArrivalQueue, SchedulerCore};
use super::{Scheduler, SchedulingResult};
use crate::error::SchedError;
use crate::models::{Process, ProcessState};

/// Default per-level quantums (ms). The last level runs to completion.
pub const DEFAULT_TIME_QUANTUMS: [i64; 3] = [8, 16, 0];
/// Default boost interval (ms).
pub const DEFAULT_BOOST_INTERVAL: i64 = 500;

/// Multi-Level Feedback Queue scheduler.
#[derive(Debug, Clone)]
pub struct MlfqScheduler {
    time_quantums: Vec<i64>,
    boost_interval: i64,
    queues: Vec<VecDeque<usize>>,
    last_boost: i64,
    core: SchedulerCore,
}

impl MlfqScheduler {
    /// Creates a scheduler with one level per quantum.
    ///
    /// Needs at least one level. Quantums must be >= 0 and
    /// `boost_interval` > 0.
    pub fn new(time_quantums: Vec<i64>, boost_interval: i64) -> Result<Self, SchedError> {
        if time_quantums.is_empty() {
            return Err(SchedError::NoQueueLevels);
        }
        for &q in &time_quantums {
            SchedError::ensure_non_negative("time quantum", q)?;
        }
        SchedError::ensure_positive("boost interval", boost_interval)?;

        let levels = time_quantums.len();
        Ok(Self {
            time_quantums,
            boost_interval,
            queues: vec![VecDeque::new(); levels],
            last_boost: 0,
            core: SchedulerCore::new(),
        })
    }

    /// Number of queue levels.
    pub fn num_levels(&self) -> usize {
        self.time_quantums.len()
    }

    /// Per-level quantums (ms).
    pub fn time_quantums(&self) -> &[i64] {
        &self.time_quantums
    }

    /// Boost interval (ms).
    pub fn boost_interval(&self) -> i64 {
        self.boost_interval
    }

    fn lowest_level(&self) -> usize {
        self.num_levels() - 1
    }

    fn enqueue(&mut self, processes: &mut [Process], idx: usize, level: usize) {
        let level = level.min(self.lowest_level());
        let p = &mut processes[idx];
        p.queue_level = level;
        p.state = ProcessState::Ready;
        self.queues[level].push_back(idx);
    }

    fn admit(&mut self, processes: &mut [Process], pending: &mut ArrivalQueue) {
        for idx in self.core.admit_arrivals(processes, pending) {
            self.enqueue(processes, idx, 0);
        }
    }

    /// Moves every process below level 0 back to the top, keeping order.
    fn priority_boost(&mut self, processes: &mut [Process]) {
        let mut boosted = 0;
        for level in 1..self.queues.len() {
            while let Some(idx) = self.queues[level].pop_front() {
                processes[idx].queue_level = 0;
                self.queues[0].push_back(idx);
                boosted += 1;
            }
        }
        self.last_boost = self.core.current_time;
        debug!(time_ms = self.core.current_time, boosted, "priority boost");
    }

    /// Pops the front of the highest non-empty level.
    fn pop_next(&mut self) -> Option<(usize, usize)> {
        self.queues
            .iter_mut()
            .enumerate()
            .find_map(|(level, queue)| queue.pop_front().map(|idx| (level, idx)))
    }

    fn clear_queues(&mut self) {
        for queue in &mut self.queues {
            queue.clear();
        }
        self.last_boost = 0;
    }
}

impl Default for MlfqScheduler {
    fn default() -> Self {
        let levels = DEFAULT_TIME_QUANTUMS.len();
        Self {
            time_quantums: DEFAULT_TIME_QUANTUMS.to_vec(),
            boost_interval: DEFAULT_BOOST_INTERVAL,
            queues: vec![VecDeque::new(); levels],
            last_boost: 0,
            core: SchedulerCore::new(),
        }
    }
}

impl Scheduler for MlfqScheduler {
    fn name(&self) -> String {
        "MLFQ".to_string()
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn schedule(&mut self, mut processes: Vec<Process>) -> SchedulingResult {
        self.clear_queues();
        let mut pending = self.core.begin(&mut processes);

        loop {
            self.admit(&mut processes, &mut pending);

            if self.core.current_time - self.last_boost >= self.boost_interval {
                self.priority_boost(&mut processes);
            }

            let Some((level, next)) = self.pop_next() else {
                match pending.next_arrival(&processes) {
                    Some(t) => {
                        self.core.idle_until(t);
                        continue;
                    }
                    None => break,
                }
            };

            self.core.dispatch(&mut processes, next);

            let now = self.core.current_time;
            let remaining = processes[next].remaining_time;
            let quantum = match self.time_quantums[level] {
                0 => remaining,
                q => q,
            };
            let mut slice = quantum.min(remaining);
            if level > 0 {
                if let Some(arrival) = pending.next_arrival(&processes) {
                    if arrival < now + slice {
                        slice = arrival - now;
                    }
                }
            }
            self.core.run(&mut processes, next, slice);

            self.admit(&mut processes, &mut pending);

            if processes[next].remaining_time == 0 {
                self.core.finish(&mut processes, next);
                continue;
            }

            self.core.preempt(&mut processes, next);
            let target = if slice >= quantum && level < self.lowest_level() {
                debug!(
                    time_ms = self.core.current_time,
                    pid = processes[next].pid,
                    from = level,
                    to = level + 1,
                    "quantum exhausted, demoted"
                );
                level + 1
            } else {
                level
            };
            self.enqueue(&mut processes, next, target);
        }

        self.core.finish_run(self.name(), processes)
    }

    fn select_next(&self, _processes: &[Process]) -> Option<usize> {
        self.queues.iter().find_map(|queue| queue.front().copied())
    }

    fn reset(&mut self) {
        self.clear_queues();
        self.core.reset();
    }
}
