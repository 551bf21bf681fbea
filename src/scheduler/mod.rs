//! CPU scheduling algorithms and run metrics.
//!
//! Every algorithm is a discrete-event simulation over virtual time in
//! milliseconds. The clock jumps from one decision point (an arrival, a
//! completion, a quantum expiry or an aging tick) to the next.
//!
//! # Algorithms
//!
//! | Scheduler | Preemptive | Selection |
//! |-----------|------------|-----------|
//! | [`FcfsScheduler`] | no | earliest arrival |
//! | [`SjfScheduler`] | no | shortest burst |
//! | [`SrtfScheduler`] | yes | shortest remaining time |
//! | [`RoundRobinScheduler`] | yes | FIFO with a time quantum |
//! | [`PriorityScheduler`] | no | lowest priority value |
//! | [`PreemptivePriorityScheduler`] | yes | lowest effective priority, with aging |
//! | [`MlfqScheduler`] | yes | highest non-empty feedback level |
//!
//! # Conventions
//!
//! - Ties fall back to earlier arrival, then lower pid.
//! - A context switch is counted each time the CPU passes to a different
//!   process than the one that last ran. Idle time alone is not a switch.
//! - Back-to-back runs of the same process form one Gantt interval.
//! - A process with no CPU demand completes at its arrival and never
//!   appears in the Gantt chart.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

mod kpi;
mod mlfq;
mod non_preemptive;
mod policy;
mod preemptive_priority;
mod result;
mod round_robin;
mod srtf;
mod state;

pub use kpi::{KpiRow, ScheduleKpi};
pub use mlfq::MlfqScheduler;
pub use non_preemptive::{FcfsScheduler, PriorityScheduler, SjfScheduler};
pub use policy::{Algorithm, Policy, SchedulerConfig};
pub use preemptive_priority::PreemptivePriorityScheduler;
pub use result::SchedulingResult;
pub use round_robin::RoundRobinScheduler;
pub use srtf::SrtfScheduler;

use crate::models::Process;

/// A CPU scheduling algorithm.
///
/// `schedule` takes ownership of the workload, resets every process and
/// returns it inside the result with final metrics filled in. Schedulers
/// are reusable: each call starts from a clean state.
pub trait Scheduler {
    /// Display name, e.g. `"Round Robin (q=10)"`.
    fn name(&self) -> String;

    /// Whether a running process can lose the CPU before it finishes.
    fn is_preemptive(&self) -> bool;

    /// Runs the simulation to completion.
    fn schedule(&mut self, processes: Vec<Process>) -> SchedulingResult;

    /// Index of the process that would be dispatched next from the
    /// scheduler's current ready state, if any.
    fn select_next(&self, processes: &[Process]) -> Option<usize>;

    /// Clears internal simulation state.
    fn reset(&mut self);
}
