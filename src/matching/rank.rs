//! Candidate scoring
//!
//! ```text
//! base  = sum(scores) + (min(scores) - 1) * 3
//! rank  = base - 2 * sum(edit distance over tuple pairs with differing names)
//! ```
//!
//! The `+3` term favours combinations where even the least popular country
//! uses the name a lot. The `-2` per edit makes spelling divergence cost more
//! than that bonus, so identical spellings outrank near-misses of similar
//! popularity.

use super::candidates::Candidate;
use crate::algorithms::EditDistance;

const MIN_SCORE_WEIGHT: i64 = 3;
const DISTANCE_WEIGHT: i64 = 2;

/// Popularity-only part of the rank.
///
/// The penalty is never negative, so `base_score` is an upper bound on the
/// full rank.
pub fn base_score(candidate: &Candidate<'_>) -> i64 {
    let scores = candidate.tuples().iter().map(|t| i64::from(t.score));
    let total: i64 = scores.clone().sum();
    match scores.min() {
        Some(min_score) => total + (min_score - 1) * MIN_SCORE_WEIGHT,
        None => 0,
    }
}

/// Scores candidates against an edit distance.
pub struct CandidateRanker<'d, D: EditDistance + ?Sized> {
    distance: &'d D,
}

impl<'d, D: EditDistance + ?Sized> CandidateRanker<'d, D> {
    pub fn new(distance: &'d D) -> Self {
        Self { distance }
    }

    /// Sum of edit distances over every pair of tuples whose names differ.
    pub fn dissimilarity(&self, candidate: &Candidate<'_>) -> usize {
        let tuples = candidate.tuples();
        let mut sum = 0;
        for (i, a) in tuples.iter().enumerate() {
            for b in &tuples[i + 1..] {
                if a.name != b.name {
                    sum += self.distance.distance(a.name, b.name);
                }
            }
        }
        sum
    }

    /// Rank of `candidate`.
    ///
    /// With `filter_rank`, a candidate whose [`base_score`] is already below
    /// it gets the base back without any distance work: the true rank can
    /// only be lower.
    pub fn score(&self, candidate: &Candidate<'_>, filter_rank: Option<i64>) -> i64 {
        let base = base_score(candidate);
        if filter_rank.is_some_and(|threshold| base < threshold) {
            return base;
        }
        let penalty = i64::try_from(self.dissimilarity(candidate)).unwrap_or(i64::MAX / 4);
        base - DISTANCE_WEIGHT * penalty
    }
}
