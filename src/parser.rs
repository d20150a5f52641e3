//! Session log parser: ties discovery, extraction, aggregation and sync together
//!
//! # Example
//!
//! ```no_run
//! use filehop::config::ParserConfig;
//! use filehop::parser::SessionLogParser;
//!
//! let config = ParserConfig::from_env("/home/dev/app", None)?;
//! let parser = SessionLogParser::new(config);
//!
//! let graph = parser.build_transition_matrix(true);
//! for t in graph.top_transitions(10) {
//!     println!("{} -> {}: {}", t.from, t.to, t.count);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::ParserConfig;
use crate::session::{extract_file_reads, list_session_files, normalize_path, read_session_file, AccessSequence, ToolEvent};
use crate::stats::{SessionStats, StatsCollector};
use crate::store::{StoreResult, TransitionStore};
use crate::sync::{sync_to_store, SyncReport};
use crate::transition::{build_transition_matrix, TransitionGraph};
use std::path::{Path, PathBuf};

/// Reads one project's session logs
#[derive(Debug, Clone)]
pub struct SessionLogParser {
    config: ParserConfig,
}

impl SessionLogParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn base_path(&self) -> &Path {
        &self.config.sessions_base_path
    }

    /// Agent session files, sorted; empty if the directory doesn't exist
    pub fn list_sessions(&self) -> Vec<PathBuf> {
        list_session_files(self.base_path())
    }

    /// Tool events of one session file
    pub fn parse_session(&self, session_file: &Path) -> Vec<ToolEvent> {
        read_session_file(session_file)
    }

    /// Events of every session, one list per file
    pub fn parse_all(&self) -> Vec<Vec<ToolEvent>> {
        self.list_sessions()
            .iter()
            .map(|path| self.parse_session(path))
            .collect()
    }

    /// Project-relative form of `path` (unchanged if outside the project)
    pub fn normalize_path(&self, path: &str) -> String {
        normalize_path(path, &self.config.project_root)
    }

    /// Read sequence of every session
    pub fn session_sequences(&self, normalize: bool) -> Vec<AccessSequence> {
        self.parse_all()
            .iter()
            .map(|events| {
                let reads = extract_file_reads(events);
                if normalize {
                    reads.iter().map(|p| self.normalize_path(p)).collect()
                } else {
                    reads
                }
            })
            .collect()
    }

    /// Transition counts over all sessions
    ///
    /// Rebuilt from the logs on every call.
    pub fn build_transition_matrix(&self, normalize: bool) -> TransitionGraph {
        let sessions = self.parse_all();
        let root = normalize.then_some(self.config.project_root.as_str());
        let graph = build_transition_matrix(&sessions, root);
        tracing::debug!(
            sessions = sessions.len(),
            sources = graph.source_count(),
            edges = graph.edge_count(),
            "built transition matrix"
        );
        graph
    }

    pub fn get_stats(&self) -> SessionStats {
        let mut collector = StatsCollector::new(self.base_path().display().to_string());
        for path in self.list_sessions() {
            collector.record_session(&self.parse_session(&path));
        }
        collector.finish()
    }

    /// Build the normalized graph and add it to the store
    ///
    /// Additive: see [`sync_to_store`].
    pub fn sync_to_store<S: TransitionStore + ?Sized>(&self, store: &S, namespace: &str) -> StoreResult<SyncReport> {
        let graph = self.build_transition_matrix(true);
        sync_to_store(store, &graph, namespace)
    }
}
