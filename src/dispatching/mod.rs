//! Dispatching rules and rule engine for ready-queue selection.
//!
//! Every scheduler picks the next process from its ready set by a
//! lexicographic key such as `(burst_time, arrival_time, pid)`. The key is
//! expressed as a chain of rules evaluated in sequence: the next rule is
//! consulted only on a tie, and the process id breaks any final tie.
//!
//! # Usage
//!
//! ```
//! use u_cpu_sched::dispatching::{RuleEngine, TieBreaker};
//! use u_cpu_sched::dispatching::rules;
//! use u_cpu_sched::models::Process;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestBurst)
//!     .with_tie_breaker(rules::ArrivalOrder)
//!     .with_final_tie_breaker(TieBreaker::ById);
//!
//! let processes = vec![Process::new(1, 30), Process::new(2, 10)];
//! let best = engine.select_best(&processes, &[0, 1]);
//! assert_eq!(best, Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first). Scores are the
/// integer times and priorities themselves, compared exactly.
pub type RuleScore = i64;

/// A dispatching rule that evaluates process priority.
///
/// # Score Convention
/// **Lower score = dispatched first.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates a ready process.
    fn evaluate(&self, process: &Process) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
