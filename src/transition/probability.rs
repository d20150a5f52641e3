use crate::transition::TransitionGraph;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate next file with its probability (or combined score)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub path: String,
    pub probability: f64,
}

impl Prediction {
    pub fn new(path: impl Into<String>, probability: f64) -> Self {
        Self {
            path: path.into(),
            probability,
        }
    }
}

/// Type alias for a ranked list of predictions
pub type ProbabilityDistribution = Vec<Prediction>;

/// Descending by probability, then ascending by path
pub(crate) fn rank_order(a: &Prediction, b: &Prediction) -> Ordering {
    b.probability
        .total_cmp(&a.probability)
        .then_with(|| a.path.cmp(&b.path))
}

/// Normalize raw (path, weight) pairs into a ranked distribution
///
/// Returns an empty distribution when the weights sum to zero.
pub(crate) fn normalize_weights<I, S>(weights: I) -> ProbabilityDistribution
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    let weights: Vec<(String, f64)> = weights
        .into_iter()
        .map(|(path, weight)| (path.into(), weight))
        .collect();

    let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut distribution: ProbabilityDistribution = weights
        .into_iter()
        .map(|(path, weight)| Prediction::new(path, weight / total))
        .collect();
    distribution.sort_by(rank_order);
    distribution
}

/// Maximum-likelihood next-file distribution for `from_file`
///
/// Each destination's probability is its count over the total outgoing count.
/// No smoothing: unseen destinations are absent rather than zero. An unknown
/// file gives an empty distribution.
///
/// # Example
/// ```
/// use filehop::transition::{get_transition_probabilities, TransitionGraph};
///
/// let mut graph = TransitionGraph::new();
/// graph.record_count("a.rs", "b.rs", 3);
/// graph.record_count("a.rs", "c.rs", 1);
///
/// let dist = get_transition_probabilities("a.rs", &graph);
/// assert_eq!(dist[0].path, "b.rs");
/// assert!((dist[0].probability - 0.75).abs() < 1e-9);
/// ```
pub fn get_transition_probabilities(from_file: &str, graph: &TransitionGraph) -> ProbabilityDistribution {
    match graph.get(from_file) {
        Some(destinations) => normalize_weights(
            destinations
                .iter()
                .map(|(to, count)| (to.as_str(), *count as f64)),
        ),
        None => Vec::new(),
    }
}
