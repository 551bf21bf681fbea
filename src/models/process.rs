//! Process (schedulable unit) model.
//!
//! A process carries its static workload description (arrival, burst,
//! priority, I/O character) plus the simulation state a scheduler writes
//! back while running it.
//!
//! # Time Representation
//! All times are in milliseconds of virtual time relative to t=0.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessState {
    /// Created, not yet arrived in the ready set.
    #[default]
    New,
    /// Waiting in a ready queue.
    Ready,
    /// Occupying the CPU.
    Running,
    /// Waiting on an external event. Never entered by the schedulers.
    Blocked,
    /// Finished.
    Terminated,
}

/// A process to be scheduled.
///
/// The static fields (`pid`, `burst_time`, `priority`, `arrival_time`,
/// `io_bound`) describe the workload. Every other field is simulation
/// state owned by the scheduler that currently runs the process; it is
/// cleared by [`Process::reset`] at the start of every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Unique positive identifier.
    pub pid: u32,
    /// Human-readable name.
    pub name: String,
    /// CPU time required (ms).
    pub burst_time: i64,
    /// Scheduling priority (lower = more important).
    pub priority: i32,
    /// Arrival time (ms).
    pub arrival_time: i64,
    /// Whether the process is I/O-bound.
    pub io_bound: bool,

    /// Current lifecycle state.
    pub state: ProcessState,
    /// CPU time still needed (ms).
    pub remaining_time: i64,
    /// Time spent ready but not running (ms).
    pub waiting_time: i64,
    /// Completion minus arrival (ms).
    pub turnaround_time: i64,
    /// First dispatch minus arrival (ms). `None` until first dispatched.
    pub response_time: Option<i64>,
    /// Time the process finished (ms).
    pub completion_time: i64,
    /// Time of first dispatch (ms).
    pub start_time: Option<i64>,
    /// Current MLFQ level (0 = highest).
    pub queue_level: usize,
    /// Accumulated aging credit (priority units).
    pub aging_counter: i32,
}

impl Process {
    /// Creates a new process arriving at t=0 with priority 0.
    pub fn new(pid: u32, burst_time: i64) -> Self {
        Self {
            pid,
            name: format!("P{pid}"),
            burst_time,
            priority: 0,
            arrival_time: 0,
            io_bound: false,
            state: ProcessState::New,
            remaining_time: burst_time,
            waiting_time: 0,
            turnaround_time: 0,
            response_time: None,
            completion_time: 0,
            start_time: None,
            queue_level: 0,
            aging_counter: 0,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_ms: i64) -> Self {
        self.arrival_time = arrival_ms;
        self
    }

    /// Marks the process as I/O-bound.
    pub fn with_io_bound(mut self, io_bound: bool) -> Self {
        self.io_bound = io_bound;
        self
    }

    /// Clears all simulation state for a fresh run.
    pub fn reset(&mut self) {
        self.state = ProcessState::New;
        self.remaining_time = self.burst_time;
        self.waiting_time = 0;
        self.turnaround_time = 0;
        self.response_time = None;
        self.completion_time = 0;
        self.start_time = None;
        self.queue_level = 0;
        self.aging_counter = 0;
    }

    /// Effective priority under aging (lower = more important).
    #[inline]
    ///
    /// Computed in `i64` so extreme priorities cannot overflow.
    pub fn effective_priority(&self) -> i64 {
        i64::from(self.priority) - i64::from(self.aging_counter)
    }

    /// Whether the process has finished.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// Records the first dispatch at `now`. Later calls are ignored.
    pub fn mark_dispatched(&mut self, now: i64) {
        if self.response_time.is_none() {
            self.response_time = Some(now - self.arrival_time);
            self.start_time = Some(now);
        }
        self.state = ProcessState::Running;
    }

    /// Terminates the process at `now` and derives its metrics.
    ///
    /// `turnaround = completion - arrival`, `waiting = turnaround - burst`.
    pub fn complete(&mut self, now: i64) {
        self.remaining_time = 0;
        self.completion_time = now;
        self.turnaround_time = now - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
        self.state = ProcessState::Terminated;
    }

    /// Terminates a process with no CPU demand at its arrival time.
    ///
    /// Such a process never occupies the CPU: zero wait and response.
    pub fn complete_instantly(&mut self) {
        let at = self.arrival_time;
        self.remaining_time = 0;
        self.completion_time = at;
        self.turnaround_time = 0;
        self.waiting_time = 0;
        self.response_time = Some(0);
        self.start_time = Some(at);
        self.state = ProcessState::Terminated;
    }
}
