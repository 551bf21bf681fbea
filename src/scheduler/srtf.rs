//! Shortest-Remaining-Time-First scheduler.
//!
//! Preemptive SJF. Decisions are taken only at events: an arrival, or the
//! completion of the running process. Between events the selected process
//! runs without interruption, so the loop jumps straight from one event to
//! the next instead of stepping the clock.

use super::state::SchedulerCore;
use super::{Scheduler, SchedulingResult};
use crate::dispatching::RuleEngine;
use crate::models::Process;

/// Shortest-Remaining-Time-First scheduler.
///
/// Selection key: `(remaining_time, arrival_time, pid)`.
#[derive(Debug, Clone)]
pub struct SrtfScheduler {
    engine: RuleEngine,
    core: SchedulerCore,
}

impl SrtfScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self {
            engine: RuleEngine::shortest_remaining_first(),
            core: SchedulerCore::new(),
        }
    }
}

impl Default for SrtfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SrtfScheduler {
    fn name(&self) -> String {
        "SRTF".to_string()
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn schedule(&mut self, mut processes: Vec<Process>) -> SchedulingResult {
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

            // Next event: the next arrival or this process's completion.
            let now = self.core.current_time;
            let completion = now + processes[next].remaining_time;
            let until = match pending.next_arrival(&processes) {
                Some(arrival) if arrival < completion => arrival,
                _ => completion,
            };
            self.core.run(&mut processes, next, until - now);

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
