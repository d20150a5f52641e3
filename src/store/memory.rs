use crate::store::{StoreError, StoreResult, TransitionStore};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process sorted-set store
///
/// Ranges order members by score descending, then member ascending.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: Mutex<HashMap<String, HashMap<String, f64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sets(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, HashMap<String, f64>>>> {
        self.sets
            .lock()
            .map_err(|_| StoreError::Command("memory store lock poisoned".to_string()))
    }

    /// Score of `member` in `key`, if present
    pub fn score(&self, key: &str, member: &str) -> Option<f64> {
        let sets = self.sets().ok()?;
        sets.get(key)?.get(member).copied()
    }

    /// Number of sorted sets held
    pub fn key_count(&self) -> usize {
        self.sets().map(|sets| sets.len()).unwrap_or(0)
    }

    /// Sorted set names, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .sets()
            .map(|sets| sets.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Drop every sorted set
    pub fn clear(&self) -> StoreResult<()> {
        self.sets()?.clear();
        Ok(())
    }
}

impl TransitionStore for MemoryStore {
    fn increment_score(&self, key: &str, member: &str, delta: f64) -> StoreResult<f64> {
        let mut sets = self.sets()?;
        let score = sets
            .entry(key.to_string())
            .or_default()
            .entry(member.to_string())
            .or_insert(0.0);
        *score += delta;
        Ok(*score)
    }

    fn range_by_score_desc(&self, key: &str, offset: usize, limit: usize) -> StoreResult<Vec<(String, f64)>> {
        let sets = self.sets()?;
        let Some(set) = sets.get(key) else {
            return Ok(Vec::new());
        };

        let mut members: Vec<(String, f64)> = set
            .iter()
            .map(|(member, score)| (member.clone(), *score))
            .collect();
        members.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(members.into_iter().skip(offset).take(limit).collect())
    }

    fn ping(&self) -> StoreResult<()> {
        self.sets().map(|_| ())
    }
}
