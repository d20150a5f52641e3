use crate::session::{extract_file_reads, normalize_path, ToolEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type alias for the outgoing edges of one file: destination → count
pub type DestinationCounts = BTreeMap<String, u64>;

/// A single weighted edge, used for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub count: u64,
}

/// First-order file transition counts aggregated over many sessions
///
/// Node = file path, edge `A → B` = number of times B was read right after A
/// within one session. Stored counts are always ≥ 1 and a file never has an
/// edge to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransitionGraph {
    edges: BTreeMap<String, DestinationCounts>,
}

impl TransitionGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from independent access sequences
    ///
    /// # Example
    /// ```
    /// use filehop::transition::TransitionGraph;
    ///
    /// let session: Vec<String> = ["X", "Y", "Z", "Y"].iter().map(|s| s.to_string()).collect();
    /// let graph = TransitionGraph::from_sequences([session]);
    ///
    /// assert_eq!(graph.count("X", "Y"), 1);
    /// assert_eq!(graph.count("Y", "X"), 0);
    /// ```
    pub fn from_sequences<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[String]>,
    {
        let mut graph = Self::new();
        for sequence in sequences {
            graph.add_sequence(sequence.as_ref());
        }
        graph
    }

    /// Add `count` observations of `from → to`
    ///
    /// Self-transitions and zero counts are ignored. Returns whether the graph changed.
    pub fn record_count(&mut self, from: &str, to: &str, count: u64) -> bool {
        if from == to || count == 0 {
            return false;
        }
        *self
            .edges
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_insert(0) += count;
        true
    }

    /// Add one observation of `from → to`
    pub fn record(&mut self, from: &str, to: &str) -> bool {
        self.record_count(from, to, 1)
    }

    /// Count every adjacent pair of one session's sequence
    pub fn add_sequence(&mut self, sequence: &[String]) {
        for pair in sequence.windows(2) {
            self.record(&pair[0], &pair[1]);
        }
    }

    /// Sum another graph's counts into this one
    pub fn merge(&mut self, other: TransitionGraph) {
        for (from, destinations) in other.edges {
            for (to, count) in destinations {
                self.record_count(&from, &to, count);
            }
        }
    }

    /// Outgoing edges of `from`
    pub fn get(&self, from: &str) -> Option<&DestinationCounts> {
        self.edges.get(from)
    }

    /// Count of `from → to` (0 if never observed)
    pub fn count(&self, from: &str, to: &str) -> u64 {
        self.get(from)
            .and_then(|destinations| destinations.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Source files in path order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// All edges as (from, to, count), ordered by source then destination
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.edges.iter().flat_map(|(from, destinations)| {
            destinations
                .iter()
                .map(move |(to, count)| (from.as_str(), to.as_str(), *count))
        })
    }

    /// Number of files with at least one outgoing edge
    pub fn source_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// Sum of all edge counts
    pub fn total_weight(&self) -> u64 {
        self.edges.values().flat_map(|d| d.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Most frequent transitions across the whole graph
    ///
    /// Ordered by count descending, ties by source then destination path.
    pub fn top_transitions(&self, k: usize) -> Vec<Transition> {
        let mut transitions: Vec<Transition> = self
            .iter()
            .map(|(from, to, count)| Transition {
                from: from.to_string(),
                to: to.to_string(),
                count,
            })
            .collect();

        // iter() is already (from, to) ordered, a stable sort keeps that for ties
        transitions.sort_by(|a, b| b.count.cmp(&a.count));
        transitions.truncate(k);
        transitions
    }
}

/// Aggregate read transitions over many sessions
///
/// Each item of `sessions` is the event list of one session. Its reads
/// (made relative to `normalize` when given) are counted pairwise; the last
/// read of one session never connects to the first read of the next.
pub fn build_transition_matrix<I, S>(sessions: I, normalize: Option<&str>) -> TransitionGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<[ToolEvent]>,
{
    let mut graph = TransitionGraph::new();
    for events in sessions {
        let mut reads = extract_file_reads(events.as_ref());
        if let Some(root) = normalize {
            reads = reads.iter().map(|path| normalize_path(path, root)).collect();
        }
        graph.add_sequence(&reads);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn reads(paths: &[&str]) -> Vec<ToolEvent> {
        paths
            .iter()
            .map(|p| ToolEvent::new("Read").with_parameter("file_path", *p))
            .collect()
    }

    #[test]
    fn test_xyzy_has_no_back_edge() {
        let graph = TransitionGraph::from_sequences([seq(&["X", "Y", "Z", "Y"])]);

        assert_eq!(graph.count("X", "Y"), 1);
        assert_eq!(graph.count("Y", "Z"), 1);
        assert_eq!(graph.count("Z", "Y"), 1);
        assert_eq!(graph.count("Y", "X"), 0);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_self_transitions_skipped() {
        let graph = TransitionGraph::from_sequences([seq(&["a", "a", "b", "b", "a"])]);

        assert_eq!(graph.count("a", "a"), 0);
        assert_eq!(graph.count("b", "b"), 0);
        assert_eq!(graph.count("a", "b"), 1);
        assert_eq!(graph.count("b", "a"), 1);
    }

    #[test]
    fn test_sessions_do_not_connect() {
        let graph = TransitionGraph::from_sequences([seq(&["a", "b"]), seq(&["c", "d"])]);

        assert_eq!(graph.count("b", "c"), 0);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_counts_sum_across_sessions() {
        let graph = TransitionGraph::from_sequences([
            seq(&["a", "b"]),
            seq(&["a", "b", "c"]),
            seq(&["x", "a", "b"]),
        ]);

        assert_eq!(graph.count("a", "b"), 3);
        assert_eq!(graph.total_weight(), 5);
    }

    #[test]
    fn test_short_sessions_contribute_nothing() {
        let graph = TransitionGraph::from_sequences([seq(&[]), seq(&["only"])]);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_record_count_ignores_zero() {
        let mut graph = TransitionGraph::new();
        assert!(!graph.record_count("a", "b", 0));
        assert!(graph.get("a").is_none());
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut left = TransitionGraph::from_sequences([seq(&["a", "b", "c"])]);
        let right = TransitionGraph::from_sequences([seq(&["a", "b", "d"])]);

        left.merge(right);

        assert_eq!(left.count("a", "b"), 2);
        assert_eq!(left.count("b", "c"), 1);
        assert_eq!(left.count("b", "d"), 1);
    }

    #[test]
    fn test_top_transitions_ordering() {
        let graph = TransitionGraph::from_sequences([
            seq(&["a", "b", "a", "b", "a", "b"]),
            seq(&["c", "d"]),
            seq(&["c", "e"]),
        ]);

        let top = graph.top_transitions(3);

        assert_eq!(top.len(), 3);
        assert_eq!((top[0].from.as_str(), top[0].to.as_str(), top[0].count), ("a", "b", 3));
        assert_eq!((top[1].from.as_str(), top[1].to.as_str(), top[1].count), ("b", "a", 2));
        assert_eq!((top[2].from.as_str(), top[2].to.as_str()), ("c", "d"));
    }

    #[test]
    fn test_build_transition_matrix_normalizes() {
        let sessions = vec![reads(&["/proj/a.rs", "/proj/b.rs", "/lib/c.rs"])];

        let graph = build_transition_matrix(&sessions, Some("/proj"));

        assert_eq!(graph.count("a.rs", "b.rs"), 1);
        assert_eq!(graph.count("b.rs", "/lib/c.rs"), 1);
    }

    #[test]
    fn test_build_transition_matrix_raw_paths() {
        let sessions = vec![reads(&["/proj/a.rs", "/proj/b.rs"])];

        let graph = build_transition_matrix(&sessions, None);

        assert_eq!(graph.count("/proj/a.rs", "/proj/b.rs"), 1);
    }

    #[test]
    fn test_normalization_can_create_self_transition() {
        // Two spellings of the same file collapse after normalization
        let sessions = vec![reads(&["/proj/a.rs", "a.rs"])];

        let graph = build_transition_matrix(&sessions, Some("/proj"));

        assert!(graph.is_empty());
    }

    #[test]
    fn test_build_transition_matrix_ignores_writes() {
        let mut events = reads(&["a"]);
        events.push(ToolEvent::new("Edit").with_parameter("file_path", "w"));
        events.extend(reads(&["b"]));

        let graph = build_transition_matrix([events], None);

        assert_eq!(graph.count("a", "b"), 1);
        assert_eq!(graph.count("a", "w"), 0);
    }

    #[test]
    fn test_graph_serializes_as_nested_object() {
        let graph = TransitionGraph::from_sequences([seq(&["a", "b"])]);
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json, serde_json::json!({"a": {"b": 1}}));
    }
}
