//! Shared memo for pairwise edit distances.
//!
//! Candidate generation and ranking ask for the same name pairs over and
//! over. `MemoizedDistance` caches every computed pair keyed by the
//! unordered pair (smaller string first), behind a `parking_lot::RwLock` so
//! one memo can serve several matching calls running on different threads.
//!
//! # Usage
//!
//! ```
//! use gingko::algorithms::{EditDistance, MemoizedDistance};
//!
//! let memo = MemoizedDistance::new();
//! assert_eq!(memo.distance("Vijay", "Voja"), 2);
//! assert_eq!(memo.distance("Voja", "Vijay"), 2);
//! assert_eq!(memo.len(), 1);
//! ```
//!
//! Clones share the same cache. Entries are pure functions of their keys, so
//! a racing insert can only ever write the value that is already there.

use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use super::levenshtein::levenshtein;
use super::EditDistance;

type PairCache = AHashMap<Box<str>, AHashMap<Box<str>, usize>>;

/// Thread-safe memoizing wrapper around Levenshtein distance.
#[derive(Clone, Default)]
pub struct MemoizedDistance {
    inner: Arc<RwLock<PairCache>>,
}

impl MemoizedDistance {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a pair, computing and caching it on a miss.
    ///
    /// Identical strings short-circuit to 0 and are never cached.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        if a == b {
            return 0;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };

        if let Some(&cached) = self.inner.read().get(lo).and_then(|row| row.get(hi)) {
            return cached;
        }

        let dist = levenshtein(lo, hi);
        *self
            .inner
            .write()
            .entry(Box::from(lo))
            .or_default()
            .entry(Box::from(hi))
            .or_insert(dist)
    }

    /// Number of cached pairs.
    ///
    /// Acquires a shared read lock.
    pub fn len(&self) -> usize {
        self.inner.read().values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Drop every cached pair.
    ///
    /// Acquires an exclusive write lock.
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

impl EditDistance for MemoizedDistance {
    fn distance(&self, a: &str, b: &str) -> usize {
        MemoizedDistance::distance(self, a, b)
    }

    fn name(&self) -> &'static str {
        "memoized_levenshtein"
    }
}

impl std::fmt::Debug for MemoizedDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedDistance")
            .field("cached_pairs", &self.len())
            .finish()
    }
}
