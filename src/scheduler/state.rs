//! Shared discrete-event bookkeeping.
//!
//! Every algorithm drives the same state: a virtual clock, the pending
//! arrivals, a ready set, the Gantt log and the context-switch counter.
//! Processes live in the caller's arena (`&mut [Process]`); the core only
//! stores indices into it.
//!
//! # Context switches
//! One switch is counted per change of CPU occupant, excluding the very
//! first dispatch. Idle gaps do not count on their own: the switch is
//! counted when the next dispatched pid differs from the last one.

use std::collections::VecDeque;

use tracing::{debug, info};

use super::SchedulingResult;
use crate::models::{GanttChart, Process, ProcessState};

/// Processes that have not arrived yet, in `(arrival_time, pid)` order.
#[derive(Debug, Clone, Default)]
pub struct ArrivalQueue {
    pending: VecDeque<usize>,
}

impl ArrivalQueue {
    /// Builds the queue from every process in the arena.
    pub fn from_processes(processes: &[Process]) -> Self {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| (processes[i].arrival_time, processes[i].pid));
        Self {
            pending: order.into(),
        }
    }

    /// Pops the next process whose arrival is at or before `now`.
    pub fn pop_arrived(&mut self, processes: &[Process], now: i64) -> Option<usize> {
        let &front = self.pending.front()?;
        if processes[front].arrival_time <= now {
            self.pending.pop_front()
        } else {
            None
        }
    }

    /// Arrival time of the next pending process.
    pub fn next_arrival(&self, processes: &[Process]) -> Option<i64> {
        self.pending.front().map(|&i| processes[i].arrival_time)
    }
}

/// Clock, ready set, Gantt log and switch counter of one run.
#[derive(Debug, Clone, Default)]
pub struct SchedulerCore {
    /// Ready processes (indices into the arena), in admission order.
    pub ready_queue: Vec<usize>,
    /// Virtual clock (ms).
    pub current_time: i64,
    /// Execution timeline.
    pub gantt: GanttChart,
    /// Number of occupant changes.
    pub context_switches: usize,
    last_pid: Option<u32>,
}

impl SchedulerCore {
    /// Creates an idle core at t=0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all state between runs.
    pub fn reset(&mut self) {
        self.ready_queue.clear();
        self.current_time = 0;
        self.gantt = GanttChart::new();
        self.context_switches = 0;
        self.last_pid = None;
    }

    /// Starts a run: resets the core and every process, returns the
    /// pending arrivals.
    pub fn begin(&mut self, processes: &mut [Process]) -> ArrivalQueue {
        self.reset();
        for p in processes.iter_mut() {
            p.reset();
        }
        ArrivalQueue::from_processes(processes)
    }

    /// Admits every process that has arrived by now.
    ///
    /// Returns the admitted indices that need the CPU, in arrival order.
    /// Processes without CPU demand terminate on the spot.
    pub fn admit_arrivals(
        &mut self,
        processes: &mut [Process],
        pending: &mut ArrivalQueue,
    ) -> Vec<usize> {
        let mut admitted = Vec::new();
        while let Some(idx) = pending.pop_arrived(processes, self.current_time) {
            let p = &mut processes[idx];
            if p.burst_time <= 0 {
                p.complete_instantly();
                debug!(time_ms = self.current_time, pid = p.pid, "no CPU demand, completed");
                continue;
            }
            p.state = ProcessState::Ready;
            debug!(time_ms = self.current_time, pid = p.pid, "arrived");
            admitted.push(idx);
        }
        admitted
    }

    /// Jumps the clock forward over an idle gap.
    pub fn idle_until(&mut self, time: i64) {
        if time > self.current_time {
            debug!(from_ms = self.current_time, to_ms = time, "CPU idle");
            self.current_time = time;
        }
    }

    /// Removes `idx` from the ready set, if present.
    pub fn take_ready(&mut self, idx: usize) {
        if let Some(pos) = self.ready_queue.iter().position(|&i| i == idx) {
            self.ready_queue.remove(pos);
        }
    }

    /// Gives the CPU to `idx`.
    pub fn dispatch(&mut self, processes: &mut [Process], idx: usize) {
        let p = &mut processes[idx];
        if let Some(prev) = self.last_pid {
            if prev != p.pid {
                self.context_switches += 1;
                debug!(time_ms = self.current_time, from = prev, to = p.pid, "context switch");
            }
        }
        self.last_pid = Some(p.pid);
        p.mark_dispatched(self.current_time);
    }

    /// Runs `idx` for `duration` ms and logs the interval.
    pub fn run(&mut self, processes: &mut [Process], idx: usize, duration: i64) {
        let p = &mut processes[idx];
        let duration = duration.clamp(0, p.remaining_time);
        let start = self.current_time;
        self.current_time += duration;
        p.remaining_time -= duration;
        self.gantt.record(p.pid, start, self.current_time);
    }

    /// Terminates the running process at the current clock.
    pub fn finish(&mut self, processes: &mut [Process], idx: usize) {
        let p = &mut processes[idx];
        p.complete(self.current_time);
        debug!(
            time_ms = self.current_time,
            pid = p.pid,
            waiting_ms = p.waiting_time,
            "completed"
        );
    }

    /// Takes the CPU away from `idx`, which becomes ready again.
    pub fn preempt(&mut self, processes: &mut [Process], idx: usize) {
        processes[idx].state = ProcessState::Ready;
    }

    /// Builds the result of a finished run.
    pub fn finish_run(&self, algorithm: String, processes: Vec<Process>) -> SchedulingResult {
        let result = SchedulingResult::new(
            algorithm,
            processes,
            self.gantt.clone(),
            self.context_switches,
        );
        info!(
            algorithm = %result.algorithm,
            processes = result.process_count(),
            total_time_ms = result.total_time,
            context_switches = result.context_switches,
            avg_waiting_ms = result.avg_waiting_time,
            "scheduling run finished"
        );
        result
    }
}
