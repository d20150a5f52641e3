//! Persisting a transition graph into a sorted-set store

use crate::store::{transition_key, StoreResult, TransitionStore};
use crate::transition::TransitionGraph;
use serde::{Deserialize, Serialize};

/// Outcome of one sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Source files written (one sorted set each)
    pub keys_written: usize,
    /// Edges written
    pub total_transitions: usize,
}

/// Add every edge of `graph` to the store under `namespace`
///
/// Scores are incremented, not replaced: syncing the same graph twice doubles
/// the stored counts. Clear the namespace first for an idempotent resync.
/// Concurrent syncs from several processes are not coordinated.
pub fn sync_to_store<S: TransitionStore + ?Sized>(
    store: &S,
    graph: &TransitionGraph,
    namespace: &str,
) -> StoreResult<SyncReport> {
    let mut report = SyncReport::default();

    for source in graph.sources() {
        let key = transition_key(namespace, source);
        let Some(destinations) = graph.get(source) else {
            continue;
        };
        for (destination, count) in destinations {
            store.increment_score(&key, destination, *count as f64)?;
            report.total_transitions += 1;
        }
        report.keys_written += 1;
    }

    tracing::info!(
        keys_written = report.keys_written,
        total_transitions = report.total_transitions,
        "synced transitions"
    );
    Ok(report)
}
