//! Gantt chart (execution timeline) model.
//!
//! A Gantt chart is the ordered record of which process occupied the
//! single CPU during which interval. Because only one process runs at a
//! time, entries are non-overlapping and ordered by start time.

use serde::{Deserialize, Serialize};

/// One contiguous interval of CPU occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// Process occupying the CPU.
    pub pid: u32,
    /// Start time (ms).
    pub start_ms: i64,
    /// End time (ms), exclusive.
    pub end_ms: i64,
}

impl GanttEntry {
    /// Creates a new entry.
    pub fn new(pid: u32, start_ms: i64, end_ms: i64) -> Self {
        Self {
            pid,
            start_ms,
            end_ms,
        }
    }

    /// Interval length (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Ordered execution timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttChart {
    /// Entries in start order.
    pub entries: Vec<GanttEntry>,
}

impl GanttChart {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run of `pid` over `[start_ms, end_ms)`.
    ///
    /// Empty runs are dropped. A run that continues the previous entry of
    /// the same process without a gap extends that entry.
    pub fn record(&mut self, pid: u32, start_ms: i64, end_ms: i64) {
        if end_ms <= start_ms {
            return;
        }
        if let Some(last) = self.entries.last_mut() {
            if last.pid == pid && last.end_ms == start_ms {
                last.end_ms = end_ms;
                return;
            }
        }
        self.entries.push(GanttEntry::new(pid, start_ms, end_ms));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chart has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest end time (ms), 0 when empty.
    pub fn makespan_ms(&self) -> i64 {
        self.entries.iter().map(|e| e.end_ms).max().unwrap_or(0)
    }

    /// Total time the CPU was occupied (ms).
    pub fn busy_time_ms(&self) -> i64 {
        self.entries.iter().map(GanttEntry::duration_ms).sum()
    }

    /// Entries belonging to one process.
    pub fn entries_for_process(&self, pid: u32) -> Vec<&GanttEntry> {
        self.entries.iter().filter(|e| e.pid == pid).collect()
    }

    /// Process ids in execution order (one per entry).
    pub fn pid_sequence(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.pid).collect()
    }

    /// Entries as `(pid, start, end)` triples.
    pub fn as_triples(&self) -> Vec<(u32, i64, i64)> {
        self.entries
            .iter()
            .map(|e| (e.pid, e.start_ms, e.end_ms))
            .collect()
    }

    /// Whether every entry has positive length and entries are sorted
    /// by start and pairwise non-overlapping.
    pub fn is_well_formed(&self) -> bool {
        self.entries.iter().all(|e| e.start_ms < e.end_ms)
            && self
                .entries
                .windows(2)
                .all(|w| w[0].end_ms <= w[1].start_ms)
    }
}
