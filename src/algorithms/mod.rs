//! String distance algorithms used by the matching engine
//!
//! Each algorithm is available as a standalone function for composability,
//! plus a trait-based interface so the engine can run against either the
//! direct computation or a shared memo.

pub mod levenshtein;
pub mod memo;

pub use levenshtein::*;
pub use memo::*;

/// Trait for edit distance algorithms that return integer distances.
///
/// Implementations must be pure: the same pair always yields the same
/// distance, `distance(a, a) == 0`, and `distance(a, b) == distance(b, a)`.
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Whether `a` and `b` are at most `max_distance` edits apart.
    fn within(&self, a: &str, b: &str, max_distance: usize) -> bool {
        self.distance(a, b) <= max_distance
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}
