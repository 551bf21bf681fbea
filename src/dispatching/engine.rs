//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules into a lexicographic selection key and
//! applies it to a set of ready processes.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::trace;

use super::rules;
use super::{DispatchingRule, RuleScore};
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Leave the candidates' relative order unchanged.
    #[default]
    Stable,
    /// Deterministic by ascending process id.
    ById,
}

/// A composable rule engine for ready-queue selection.
///
/// Rules are evaluated in sequence; the next rule is used only when the
/// previous ones tie.
///
/// # Example
/// ```
/// use u_cpu_sched::dispatching::RuleEngine;
///
/// let engine = RuleEngine::shortest_job_first();
/// assert_eq!(engine.rule_names(), vec!["SPT", "FIFO"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
        }
    }

    /// `(arrival_time, pid)`.
    pub fn first_come_first_served() -> Self {
        Self::new()
            .with_rule(rules::ArrivalOrder)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// `(burst_time, arrival_time, pid)`.
    pub fn shortest_job_first() -> Self {
        Self::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(rules::ArrivalOrder)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// `(remaining_time, arrival_time, pid)`.
    pub fn shortest_remaining_first() -> Self {
        Self::new()
            .with_rule(rules::ShortestRemaining)
            .with_tie_breaker(rules::ArrivalOrder)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// `(priority, arrival_time, pid)`.
    pub fn static_priority() -> Self {
        Self::new()
            .with_rule(rules::StaticPriority)
            .with_tie_breaker(rules::ArrivalOrder)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// `(priority - aging_counter, arrival_time, pid)`.
    pub fn aged_priority() -> Self {
        Self::new()
            .with_rule(rules::EffectivePriority)
            .with_tie_breaker(rules::ArrivalOrder)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts candidate indices (into `processes`) best-first.
    pub fn sort_indices(&self, processes: &[Process], candidates: &[usize]) -> Vec<usize> {
        let mut indices = candidates.to_vec();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b]));
        indices
    }

    /// Returns the index (into `processes`) of the best candidate.
    ///
    /// On a full tie the earliest candidate wins.
    pub fn select_best(&self, processes: &[Process], candidates: &[usize]) -> Option<usize> {
        let best = candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.compare(&processes[a], &processes[b]))?;

        trace!(
            pid = processes[best].pid,
            candidates = candidates.len(),
            "selected"
        );
        Some(best)
    }

    /// Evaluates a single process and returns the score from each rule.
    pub fn evaluate(&self, process: &Process) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(process))
            .collect()
    }

    /// Compares two processes under this engine's key.
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ById => a.pid.cmp(&b.pid),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
