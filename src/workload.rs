//! Random workload generation.
//!
//! Produces process sets for experiments and comparisons. Arrivals start
//! at 0 and each subsequent process arrives a random gap after the
//! previous one. Any [`rand::Rng`] can drive it, so a seeded generator
//! gives reproducible workloads.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SchedError;
use crate::models::Process;

/// Generator parameters. Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Pid of the first generated process.
    pub first_pid: u32,
    /// Burst time range (ms).
    pub burst_range: (i64, i64),
    /// Priority range.
    pub priority_range: (i32, i32),
    /// Probability that a process is I/O-bound.
    pub io_ratio: f64,
    /// Largest gap between consecutive arrivals (ms).
    pub max_arrival_gap: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            first_pid: 1,
            burst_range: (10, 200),
            priority_range: (1, 10),
            io_ratio: 0.3,
            max_arrival_gap: 20,
        }
    }
}

impl GeneratorConfig {
    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), SchedError> {
        let (min_burst, max_burst) = self.burst_range;
        SchedError::ensure_positive("minimum burst", min_burst)?;
        if min_burst > max_burst {
            return Err(SchedError::InvalidRange {
                name: "burst",
                min: min_burst,
                max: max_burst,
            });
        }
        let (min_priority, max_priority) = self.priority_range;
        if min_priority > max_priority {
            return Err(SchedError::InvalidRange {
                name: "priority",
                min: i64::from(min_priority),
                max: i64::from(max_priority),
            });
        }
        if !(0.0..=1.0).contains(&self.io_ratio) {
            return Err(SchedError::InvalidRatio {
                name: "io ratio",
                value: self.io_ratio,
            });
        }
        SchedError::ensure_positive("first pid", i64::from(self.first_pid))?;
        SchedError::ensure_non_negative("arrival gap", self.max_arrival_gap)?;
        Ok(())
    }
}

/// Random process generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    config: GeneratorConfig,
}

impl WorkloadGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(config: GeneratorConfig) -> Result<Self, SchedError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generator parameters.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates `count` processes with sequential pids.
    pub fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Process> {
        let c = &self.config;
        let mut arrival = 0;

        (0..count)
            .map(|i| {
                let pid = c.first_pid + i as u32;
                let process = Process::new(pid, rng.random_range(c.burst_range.0..=c.burst_range.1))
                    .with_name(format!("Process_{pid}"))
                    .with_priority(rng.random_range(c.priority_range.0..=c.priority_range.1))
                    .with_arrival(arrival)
                    .with_io_bound(rng.random_bool(c.io_ratio));
                arrival += rng.random_range(0..=c.max_arrival_gap);
                process
            })
            .collect()
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }
}
