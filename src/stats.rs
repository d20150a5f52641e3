//! Summary statistics over a project's session logs

use crate::session::{extract_file_reads, extract_file_writes, ToolEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Counts over every session of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_count: usize,
    pub total_events: usize,
    pub total_reads: usize,
    pub total_writes: usize,
    /// Distinct paths read or written, as logged (not normalized)
    pub unique_files: usize,
    pub base_path: String,
}

/// Accumulates [`SessionStats`] one session at a time
#[derive(Debug, Default)]
pub struct StatsCollector {
    stats: SessionStats,
    files: HashSet<String>,
}

impl StatsCollector {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            stats: SessionStats {
                base_path: base_path.into(),
                ..SessionStats::default()
            },
            files: HashSet::new(),
        }
    }

    /// Add one session's events
    pub fn record_session(&mut self, events: &[ToolEvent]) {
        let reads = extract_file_reads(events);
        let writes = extract_file_writes(events);

        self.stats.session_count += 1;
        self.stats.total_events += events.len();
        self.stats.total_reads += reads.len();
        self.stats.total_writes += writes.len();
        self.files.extend(reads);
        self.files.extend(writes);
    }

    pub fn finish(mut self) -> SessionStats {
        self.stats.unique_files = self.files.len();
        self.stats
    }
}
