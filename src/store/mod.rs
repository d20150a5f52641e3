//! Sorted-set store for persisted transitions
//!
//! The model only needs three operations from its backing store: increment a
//! member's score, read a key's members by descending score, and a liveness
//! check. Anything that provides them can hold the model.
//!
//! Keys are `<namespace>:transition:<source-file>`, members are destination
//! files, scores are transition counts.

mod error;
mod memory;
mod redis_store;

pub use self::error::{StoreError, StoreResult};
pub use self::memory::MemoryStore;
pub use self::redis_store::{RedisStore, DEFAULT_REDIS_URL};

/// Default key namespace
pub const DEFAULT_NAMESPACE: &str = "aoa";

/// Key segment for transition sets
pub const TRANSITION_SEGMENT: &str = "transition";

/// Store key holding the outgoing transitions of `source`
///
/// # Example
/// ```
/// use filehop::store::transition_key;
///
/// assert_eq!(transition_key("aoa", "src/main.rs"), "aoa:transition:src/main.rs");
/// ```
pub fn transition_key(namespace: &str, source: &str) -> String {
    format!("{}:{}:{}", namespace, TRANSITION_SEGMENT, source)
}

/// Minimal sorted-set contract
pub trait TransitionStore: Send + Sync {
    /// Add `delta` to `member`'s score in `key`, creating either as needed.
    /// Returns the new score.
    fn increment_score(&self, key: &str, member: &str, delta: f64) -> StoreResult<f64>;

    /// Members of `key` with scores, highest score first, skipping `offset`
    /// and returning at most `limit`. A missing key is an empty range.
    ///
    /// Order among equal scores is backend-defined: [`MemoryStore`] returns
    /// them by member ascending, [`RedisStore`] by member descending. Callers
    /// that truncate may therefore keep different members at a tie.
    fn range_by_score_desc(&self, key: &str, offset: usize, limit: usize) -> StoreResult<Vec<(String, f64)>>;

    /// Check the store is reachable
    fn ping(&self) -> StoreResult<()>;
}
