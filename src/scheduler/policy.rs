//! Algorithm registry and configured scheduler instances.
//!
//! [`Algorithm`] names the seven supported policies. [`Policy`] holds one
//! configured scheduler of any kind and dispatches to it, so callers can
//! pick an algorithm at run time without boxing. [`SchedulerConfig`] is the
//! serializable form: an algorithm plus optional parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mlfq::{MlfqScheduler, DEFAULT_BOOST_INTERVAL, DEFAULT_TIME_QUANTUMS};
use super::non_preemptive::{FcfsScheduler, PriorityScheduler, SjfScheduler};
use super::preemptive_priority::{
    PreemptivePriorityScheduler, DEFAULT_AGING_AMOUNT, DEFAULT_AGING_INTERVAL,
};
use super::round_robin::{RoundRobinScheduler, DEFAULT_TIME_QUANTUM};
use super::srtf::SrtfScheduler;
use super::{Scheduler, SchedulingResult};
use crate::error::SchedError;
use crate::models::Process;

/// Supported scheduling algorithms, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF")]
    Sjf,
    #[serde(rename = "SRTF")]
    Srtf,
    #[serde(rename = "RR")]
    RoundRobin,
    #[serde(rename = "Priority")]
    Priority,
    #[serde(rename = "PreemptivePriority")]
    PreemptivePriority,
    #[serde(rename = "MLFQ")]
    Mlfq,
}

impl Algorithm {
    /// All algorithms in canonical order.
    pub fn all() -> [Algorithm; 7] {
        [
            Algorithm::Fcfs,
            Algorithm::Sjf,
            Algorithm::Srtf,
            Algorithm::RoundRobin,
            Algorithm::Priority,
            Algorithm::PreemptivePriority,
            Algorithm::Mlfq,
        ]
    }

    /// Short key, e.g. `"RR"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin => "RR",
            Algorithm::Priority => "Priority",
            Algorithm::PreemptivePriority => "PreemptivePriority",
            Algorithm::Mlfq => "MLFQ",
        }
    }

    /// Whether the algorithm can take the CPU from a running process.
    pub fn is_preemptive(&self) -> bool {
        !matches!(
            self,
            Algorithm::Fcfs | Algorithm::Sjf | Algorithm::Priority
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SchedError;

    /// Case-insensitive. Spaces, `-` and `_` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "fcfs" | "fifo" | "firstcomefirstserved" => Ok(Algorithm::Fcfs),
            "sjf" | "shortestjobfirst" => Ok(Algorithm::Sjf),
            "srtf" | "srt" | "shortestremainingtimefirst" => Ok(Algorithm::Srtf),
            "rr" | "roundrobin" => Ok(Algorithm::RoundRobin),
            "priority" | "nonpreemptivepriority" => Ok(Algorithm::Priority),
            "preemptivepriority" | "prioritypreemptive" => Ok(Algorithm::PreemptivePriority),
            "mlfq" | "multilevelfeedbackqueue" => Ok(Algorithm::Mlfq),
            _ => Err(SchedError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A configured scheduler of any supported kind.
#[derive(Debug, Clone)]
pub enum Policy {
    Fcfs(FcfsScheduler),
    Sjf(SjfScheduler),
    Srtf(SrtfScheduler),
    RoundRobin(RoundRobinScheduler),
    Priority(PriorityScheduler),
    PreemptivePriority(PreemptivePriorityScheduler),
    Mlfq(MlfqScheduler),
}

impl Policy {
    /// Scheduler for `algorithm` with default parameters.
    pub fn from_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Fcfs => Policy::Fcfs(FcfsScheduler::new()),
            Algorithm::Sjf => Policy::Sjf(SjfScheduler::new()),
            Algorithm::Srtf => Policy::Srtf(SrtfScheduler::new()),
            Algorithm::RoundRobin => Policy::RoundRobin(RoundRobinScheduler::default()),
            Algorithm::Priority => Policy::Priority(PriorityScheduler::new()),
            Algorithm::PreemptivePriority => {
                Policy::PreemptivePriority(PreemptivePriorityScheduler::default())
            }
            Algorithm::Mlfq => Policy::Mlfq(MlfqScheduler::default()),
        }
    }

    /// Round Robin with the given quantum.
    pub fn round_robin(time_quantum: i64) -> Result<Self, SchedError> {
        RoundRobinScheduler::new(time_quantum).map(Policy::RoundRobin)
    }

    /// Which algorithm this is.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Policy::Fcfs(_) => Algorithm::Fcfs,
            Policy::Sjf(_) => Algorithm::Sjf,
            Policy::Srtf(_) => Algorithm::Srtf,
            Policy::RoundRobin(_) => Algorithm::RoundRobin,
            Policy::Priority(_) => Algorithm::Priority,
            Policy::PreemptivePriority(_) => Algorithm::PreemptivePriority,
            Policy::Mlfq(_) => Algorithm::Mlfq,
        }
    }

    fn as_scheduler(&self) -> &dyn Scheduler {
        match self {
            Policy::Fcfs(s) => s,
            Policy::Sjf(s) => s,
            Policy::Srtf(s) => s,
            Policy::RoundRobin(s) => s,
            Policy::Priority(s) => s,
            Policy::PreemptivePriority(s) => s,
            Policy::Mlfq(s) => s,
        }
    }

    fn as_scheduler_mut(&mut self) -> &mut dyn Scheduler {
        match self {
            Policy::Fcfs(s) => s,
            Policy::Sjf(s) => s,
            Policy::Srtf(s) => s,
            Policy::RoundRobin(s) => s,
            Policy::Priority(s) => s,
            Policy::PreemptivePriority(s) => s,
            Policy::Mlfq(s) => s,
        }
    }
}

impl Scheduler for Policy {
    fn name(&self) -> String {
        self.as_scheduler().name()
    }

    fn is_preemptive(&self) -> bool {
        self.as_scheduler().is_preemptive()
    }

    fn schedule(&mut self, processes: Vec<Process>) -> SchedulingResult {
        self.as_scheduler_mut().schedule(processes)
    }

    fn select_next(&self, processes: &[Process]) -> Option<usize> {
        self.as_scheduler().select_next(processes)
    }

    fn reset(&mut self) {
        self.as_scheduler_mut().reset();
    }
}

impl From<Algorithm> for Policy {
    fn from(algorithm: Algorithm) -> Self {
        Policy::from_algorithm(algorithm)
    }
}

/// Serializable scheduler configuration.
///
/// Parameters that do not apply to the chosen algorithm are ignored.
/// Missing parameters take the scheduler's defaults.
///
/// ```
/// use u_cpu_sched::scheduler::{Algorithm, Scheduler, SchedulerConfig};
///
/// let policy = SchedulerConfig::new(Algorithm::RoundRobin)
///     .with_time_quantum(4)
///     .build()
///     .unwrap();
/// assert_eq!(policy.name(), "Round Robin (q=4)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Algorithm to run.
    pub algorithm: Algorithm,
    /// Round Robin quantum (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<i64>,
    /// Preemptive Priority aging interval (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aging_interval: Option<i64>,
    /// Preemptive Priority credit per tick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aging_amount: Option<i32>,
    /// MLFQ per-level quantums (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quantums: Option<Vec<i64>>,
    /// MLFQ boost interval (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_interval: Option<i64>,
}

impl SchedulerConfig {
    /// Configuration with all defaults.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            time_quantum: None,
            aging_interval: None,
            aging_amount: None,
            time_quantums: None,
            boost_interval: None,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_time_quantum(mut self, time_quantum: i64) -> Self {
        self.time_quantum = Some(time_quantum);
        self
    }

    /// Sets the aging parameters.
    pub fn with_aging(mut self, interval: i64, amount: i32) -> Self {
        self.aging_interval = Some(interval);
        self.aging_amount = Some(amount);
        self
    }

    /// Sets the MLFQ levels.
    pub fn with_time_quantums(mut self, time_quantums: Vec<i64>) -> Self {
        self.time_quantums = Some(time_quantums);
        self
    }

    /// Sets the MLFQ boost interval.
    pub fn with_boost_interval(mut self, boost_interval: i64) -> Self {
        self.boost_interval = Some(boost_interval);
        self
    }

    /// Builds the configured scheduler.
    pub fn build(&self) -> Result<Policy, SchedError> {
        let policy = match self.algorithm {
            Algorithm::RoundRobin => {
                Policy::round_robin(self.time_quantum.unwrap_or(DEFAULT_TIME_QUANTUM))?
            }
            Algorithm::PreemptivePriority => {
                Policy::PreemptivePriority(PreemptivePriorityScheduler::new(
                    self.aging_interval.unwrap_or(DEFAULT_AGING_INTERVAL),
                    self.aging_amount.unwrap_or(DEFAULT_AGING_AMOUNT),
                )?)
            }
            Algorithm::Mlfq => Policy::Mlfq(MlfqScheduler::new(
                self.time_quantums
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TIME_QUANTUMS.to_vec()),
                self.boost_interval.unwrap_or(DEFAULT_BOOST_INTERVAL),
            )?),
            other => Policy::from_algorithm(other),
        };
        Ok(policy)
    }
}

impl From<Algorithm> for SchedulerConfig {
    fn from(algorithm: Algorithm) -> Self {
        SchedulerConfig::new(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_order_and_keys() {
        let keys: Vec<_> = Algorithm::all().iter().map(|a| a.as_str()).collect();
        assert_eq!(
            keys,
            vec!["FCFS", "SJF", "SRTF", "RR", "Priority", "PreemptivePriority", "MLFQ"]
        );
    }

    #[test]
    fn test_algorithm_from_str() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.as_str().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("round-robin".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert_eq!("Round Robin".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert_eq!("preemptive_priority".parse::<Algorithm>(), Ok(Algorithm::PreemptivePriority));
        assert_eq!("mlfq".parse::<Algorithm>(), Ok(Algorithm::Mlfq));
    }

    #[test]
    fn test_algorithm_from_str_unknown() {
        assert_eq!(
            "lottery".parse::<Algorithm>(),
            Err(SchedError::UnknownAlgorithm("lottery".to_string()))
        );
    }

    #[test]
    fn test_policy_matches_algorithm() {
        for algorithm in Algorithm::all() {
            let policy = Policy::from_algorithm(algorithm);
            assert_eq!(policy.algorithm(), algorithm);
            assert_eq!(policy.is_preemptive(), algorithm.is_preemptive());
        }
    }

    #[test]
    fn test_policy_display_names() {
        let names: Vec<_> = Algorithm::all()
            .iter()
            .map(|&a| Policy::from_algorithm(a).name())
            .collect();
        assert_eq!(
            names,
            vec![
                "FCFS",
                "SJF",
                "SRTF",
                "Round Robin (q=10)",
                "Priority (Non-Preemptive)",
                "Priority (Preemptive with Aging)",
                "MLFQ",
            ]
        );
    }

    #[test]
    fn test_policy_schedules() {
        let processes = vec![
            Process::new(1, 5).with_arrival(0),
            Process::new(2, 3).with_arrival(0),
        ];
        let mut policy = Policy::round_robin(4).unwrap();
        let result = policy.schedule(processes);
        assert_eq!(result.algorithm, "Round Robin (q=4)");
        assert_eq!(result.context_switches, 2);
    }

    #[test]
    fn test_config_build_defaults() {
        let policy = SchedulerConfig::new(Algorithm::Mlfq).build().unwrap();
        match policy {
            Policy::Mlfq(mlfq) => {
                assert_eq!(mlfq.time_quantums(), &[8, 16, 0]);
                assert_eq!(mlfq.boost_interval(), 500);
            }
            other => panic!("unexpected policy {other:?}"),
        }
    }

    #[test]
    fn test_config_build_rejects_invalid() {
        assert!(SchedulerConfig::new(Algorithm::RoundRobin)
            .with_time_quantum(0)
            .build()
            .is_err());
        assert!(SchedulerConfig::new(Algorithm::PreemptivePriority)
            .with_aging(-1, 1)
            .build()
            .is_err());
        assert_eq!(
            SchedulerConfig::new(Algorithm::Mlfq)
                .with_time_quantums(Vec::new())
                .build()
                .unwrap_err(),
            SchedError::NoQueueLevels
        );
    }

    #[test]
    fn test_config_json() {
        let json = r#"{"algorithm": "RR", "time_quantum": 25}"#;
        let config: SchedulerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, SchedulerConfig::new(Algorithm::RoundRobin).with_time_quantum(25));
        assert_eq!(config.build().unwrap().name(), "Round Robin (q=25)");

        let out = serde_json::to_string(&SchedulerConfig::new(Algorithm::Srtf)).unwrap();
        assert_eq!(out, r#"{"algorithm":"SRTF"}"#);
    }
}
