//! CPU scheduling simulator.
//!
//! Simulates classic uniprocessor scheduling policies over a workload of
//! processes in virtual time, records the execution timeline and derives
//! per-process and aggregate metrics. An adaptive selector recommends a
//! policy from workload statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessState`, `GanttChart`
//! - **`dispatching`**: Selection rules and the multi-rule `RuleEngine`
//! - **`scheduler`**: The seven algorithms, the `Scheduler` trait,
//!   `SchedulingResult` and KPIs
//! - **`selector`**: Workload analysis and adaptive algorithm choice
//! - **`workload`**: Random workload generation
//! - **`validation`**: Input integrity checks (duplicate pids, bad bursts)
//! - **`error`**: Configuration errors
//!
//! # Example
//!
//! ```
//! use u_cpu_sched::models::Process;
//! use u_cpu_sched::scheduler::{Scheduler, SrtfScheduler};
//!
//! let processes = vec![
//!     Process::new(1, 8).with_arrival(0),
//!     Process::new(2, 4).with_arrival(1),
//! ];
//! let result = SrtfScheduler::new().schedule(processes);
//!
//! assert_eq!(result.gantt_chart.as_triples(), vec![(1, 0, 1), (2, 1, 5), (1, 5, 12)]);
//! assert_eq!(result.context_switches, 2);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts"
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod selector;
pub mod validation;
pub mod workload;

pub use error::SchedError;
pub use models::{GanttChart, GanttEntry, Process, ProcessState};
pub use scheduler::{Algorithm, Policy, Scheduler, SchedulerConfig, SchedulingResult};
pub use selector::{AdaptiveSelector, SchedulerRecommendation};
