//! Next-file prediction from a persisted transition model
//!
//! Queries are read-only. A file the store knows nothing about gets an empty
//! prediction, never an error; only store failures are errors.

use crate::store::{transition_key, StoreResult, TransitionStore, DEFAULT_NAMESPACE};
use crate::transition::{normalize_weights, rank_order, Prediction, ProbabilityDistribution};
use std::collections::{HashMap, HashSet};

/// Candidates fetched per current file before combining
pub const PREDICTION_FAN_OUT: usize = 20;

/// Read-only view of a transition model held in a store
#[derive(Debug)]
pub struct Predictor<'a, S: ?Sized> {
    store: &'a S,
    namespace: String,
}

impl<'a, S: TransitionStore + ?Sized> Predictor<'a, S> {
    /// Predictor over the default namespace
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Use a different key namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Most likely next files after `current_file`
    ///
    /// Fetches the top `limit` destinations by stored count and normalizes
    /// over that subset only. With a truncated fetch the probabilities are
    /// larger than the full model's; pass a large `limit` for exact values.
    pub fn predict_next(&self, current_file: &str, limit: usize) -> StoreResult<ProbabilityDistribution> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let key = transition_key(&self.namespace, current_file);
        let fetched = self.store.range_by_score_desc(&key, 0, limit)?;
        Ok(normalize_weights(fetched))
    }

    /// Combined forecast for several open files
    ///
    /// Each current file contributes its top [`PREDICTION_FAN_OUT`]
    /// predictions. Scores of a candidate predicted from several files are
    /// added, so agreement ranks higher. Files already in `current_files` are
    /// never returned. Repeated entries in `current_files` count once.
    pub fn get_all_predictions<T: AsRef<str>>(
        &self,
        current_files: &[T],
        limit: usize,
    ) -> StoreResult<ProbabilityDistribution> {
        let open: HashSet<&str> = current_files.iter().map(T::as_ref).collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut combined: HashMap<String, f64> = HashMap::new();

        for current in current_files.iter().map(T::as_ref) {
            if !seen.insert(current) {
                continue;
            }
            for prediction in self.predict_next(current, PREDICTION_FAN_OUT)? {
                if open.contains(prediction.path.as_str()) {
                    continue;
                }
                *combined.entry(prediction.path).or_insert(0.0) += prediction.probability;
            }
        }

        let mut ranked: ProbabilityDistribution = combined
            .into_iter()
            .map(|(path, score)| Prediction::new(path, score))
            .collect();
        ranked.sort_by(rank_order);
        ranked.truncate(limit);
        Ok(ranked)
    }
}

/// [`Predictor::predict_next`] on the default namespace
pub fn predict_next<S: TransitionStore + ?Sized>(
    store: &S,
    current_file: &str,
    limit: usize,
) -> StoreResult<ProbabilityDistribution> {
    Predictor::new(store).predict_next(current_file, limit)
}

/// [`Predictor::get_all_predictions`] on the default namespace
pub fn get_all_predictions<S: TransitionStore + ?Sized, T: AsRef<str>>(
    store: &S,
    current_files: &[T],
    limit: usize,
) -> StoreResult<ProbabilityDistribution> {
    Predictor::new(store).get_all_predictions(current_files, limit)
}
