// First-order File Transition Model
//
// Instead of counting how often a file is read, this learns which file is read
// NEXT. Adjacent reads within one session form weighted edges (A → B); the
// outgoing edges of a file, normalized, give a maximum-likelihood estimate of
// P(next = B | current = A).
//
// Only the immediately preceding file matters (first-order Markov chain).

mod graph;
mod probability;

pub use graph::{build_transition_matrix, DestinationCounts, Transition, TransitionGraph};
pub use probability::{get_transition_probabilities, Prediction, ProbabilityDistribution};

pub(crate) use probability::{normalize_weights, rank_order};
