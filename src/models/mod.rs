//! Scheduling domain models.
//!
//! Provides the data types consumed and produced by the schedulers.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Workload unit with arrival, burst, priority and run state |
//! | `GanttChart` | Ordered record of CPU occupancy |

mod gantt;
mod process;

pub use gantt::{GanttChart, GanttEntry};
pub use process::{Process, ProcessState};
