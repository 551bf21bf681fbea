//! Built-in dispatching rules.
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | `ArrivalOrder` (FIFO) | arrival time | FCFS, tie-breaks |
//! | `ShortestBurst` (SPT) | burst time | SJF |
//! | `ShortestRemaining` (SRPT) | remaining time | SRTF |
//! | `StaticPriority` | priority | Priority |
//! | `EffectivePriority` | priority − aging credit | Preemptive Priority |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::Process;

// ======================== Time-based rules ========================

/// First In First Out.
///
/// Prioritizes processes by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl DispatchingRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.arrival_time
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Shortest Processing Time.
///
/// Prioritizes processes with the shorter total burst. Optimal for mean
/// waiting time among non-preemptive policies when all jobs are present.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Shortest Remaining Processing Time.
///
/// Prioritizes processes closest to completion.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRPT"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.remaining_time
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Processing Time"
    }
}

// ======================== Priority-based rules ========================

/// Static priority rule.
///
/// Lower `priority` values are more important and score lower.
#[derive(Debug, Clone, Copy)]
pub struct StaticPriority;

impl DispatchingRule for StaticPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        i64::from(process.priority)
    }

    fn description(&self) -> &'static str {
        "Static Priority"
    }
}

/// Aged priority rule.
///
/// Scores `priority - aging_counter`, so waiting strictly improves a
/// process's standing.
#[derive(Debug, Clone, Copy)]
pub struct EffectivePriority;

impl DispatchingRule for EffectivePriority {
    fn name(&self) -> &'static str {
        "AGED-PRIORITY"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.effective_priority()
    }

    fn description(&self) -> &'static str {
        "Effective Priority with Aging"
    }
}
