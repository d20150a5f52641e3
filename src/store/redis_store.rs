//! Redis-backed transition store
//!
//! Transitions live in Redis sorted sets: ZINCRBY for sync, ZREVRANGE
//! WITHSCORES for prediction, PING for liveness.

use crate::store::{StoreError, StoreResult, TransitionStore};
use redis::{Commands, RedisError};
use std::sync::Mutex;
use std::time::Duration;

/// Default Redis URL when neither a flag nor `REDIS_URL` is given
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379/0";

/// Connect timeout for the initial connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Sorted-set store on a single Redis connection
///
/// Members with equal scores come back in reverse lexicographic order (Redis
/// ZREVRANGE), the opposite of [`MemoryStore`](crate::store::MemoryStore).
pub struct RedisStore {
    url: String,
    conn: Mutex<redis::Connection>,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").field("url", &self.url).finish()
    }
}

impl RedisStore {
    /// Open a connection to `url`
    ///
    /// # Errors
    /// `StoreError::InvalidUrl` if the URL does not parse, `StoreError::Connection`
    /// if the server cannot be reached.
    pub fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url).map_err(|e| StoreError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let conn = client
            .get_connection_with_timeout(CONNECT_TIMEOUT)
            .map_err(|e| StoreError::Connection {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Connected to Redis at {}", url);
        Ok(Self {
            url: url.to_string(),
            conn: Mutex::new(conn),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_error(&self, e: RedisError) -> StoreError {
        if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() || e.is_timeout() {
            StoreError::Connection {
                url: self.url.clone(),
                message: e.to_string(),
            }
        } else {
            StoreError::Command(e.to_string())
        }
    }

    fn with_conn<T>(
        &self,
        op: impl FnOnce(&mut redis::Connection) -> redis::RedisResult<T>,
    ) -> StoreResult<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Command("redis connection lock poisoned".to_string()))?;
        op(&mut conn).map_err(|e| self.map_error(e))
    }
}

/// Inclusive ZREVRANGE rank bounds for `offset`/`limit`
///
/// `None` when the range is empty. Both bounds stay non-negative: ZREVRANGE
/// reads negative ranks from the end of the set, so an oversized stop is
/// clamped to `isize::MAX` instead of being allowed to wrap.
fn rank_bounds(offset: usize, limit: usize) -> Option<(isize, isize)> {
    if limit == 0 {
        return None;
    }
    let start = isize::try_from(offset).ok()?;
    let stop = isize::try_from(offset.saturating_add(limit - 1)).unwrap_or(isize::MAX);
    Some((start, stop))
}

impl TransitionStore for RedisStore {
    fn increment_score(&self, key: &str, member: &str, delta: f64) -> StoreResult<f64> {
        self.with_conn(|conn| conn.zincr(key, member, delta))
    }

    fn range_by_score_desc(&self, key: &str, offset: usize, limit: usize) -> StoreResult<Vec<(String, f64)>> {
        let Some((start, stop)) = rank_bounds(offset, limit) else {
            return Ok(Vec::new());
        };
        self.with_conn(|conn| conn.zrevrange_withscores(key, start, stop))
    }

    fn ping(&self) -> StoreResult<()> {
        self.with_conn(|conn| redis::cmd("PING").query::<String>(conn))
            .map(|_| ())
    }
}
