//! Levenshtein (edit) distance implementation
//!
//! Unit-cost insertion, deletion and substitution over Unicode scalar
//! values. Two DP rows are kept instead of the full `(m+1) x (n+1)` table;
//! the recurrence is the textbook one:
//!
//! ```text
//! d[i][j] = d[i-1][j-1]                                   if a[i-1] == b[j-1]
//!         = 1 + min(d[i-1][j], d[i][j-1], d[i-1][j-1])    otherwise
//! ```

use super::EditDistance;
use smallvec::SmallVec;

/// Standard DP distance for char slices.
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Ensure shorter string is on the column axis
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut prev: SmallVec<[usize; 64]> = (0..=n_target).collect();
    let mut curr: SmallVec<[usize; 64]> = SmallVec::with_capacity(n_target + 1);

    for (i, &sc) in source.iter().enumerate() {
        curr.clear();
        curr.push(i + 1);

        for (j, &tc) in target.iter().enumerate() {
            let val = if sc == tc {
                prev[j]
            } else {
                1 + prev[j + 1] // deletion
                    .min(curr[j]) // insertion
                    .min(prev[j]) // substitution
            };
            curr.push(val);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n_target]
}

/// DP distance with a max_distance threshold.
///
/// Bails out as soon as every cell of a row exceeds the threshold, since
/// row minima never decrease.
#[inline]
fn dp_distance_bounded(a: &[char], b: &[char], max_distance: usize) -> Option<usize> {
    let m = a.len();
    let n = b.len();

    if m.abs_diff(n) > max_distance {
        return None;
    }
    if m == 0 || n == 0 {
        return Some(m.max(n));
    }

    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut prev: SmallVec<[usize; 64]> = (0..=n_target).collect();
    let mut curr: SmallVec<[usize; 64]> = SmallVec::with_capacity(n_target + 1);

    for (i, &sc) in source.iter().enumerate() {
        curr.clear();
        curr.push(i + 1);
        let mut row_min = i + 1;

        for (j, &tc) in target.iter().enumerate() {
            let val = if sc == tc {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
            row_min = row_min.min(val);
            curr.push(val);
        }

        if row_min > max_distance {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let result = prev[n_target];
    (result <= max_distance).then_some(result)
}

// ============================================================================
// Public API
// ============================================================================

/// Levenshtein distance calculator with optional early termination
///
/// # Complexity
/// - Time: O(m*n) where m and n are string lengths
/// - Space: O(min(m,n)) using two DP rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    /// Maximum distance to compute (for early termination)
    pub max_distance: Option<usize>,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self { max_distance: None }
    }

    #[must_use]
    pub fn with_max_distance(max_distance: usize) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }

    /// Returns `None` if the distance exceeds `max_distance`.
    #[must_use]
    pub fn compute(&self, a: &str, b: &str) -> Option<usize> {
        match self.max_distance {
            Some(max_d) => levenshtein_bounded(a, b, max_d),
            None => Some(levenshtein(a, b)),
        }
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        // Anything past the threshold reports as max_distance + 1
        match self.max_distance {
            Some(max_d) => levenshtein_bounded(a, b, max_d).unwrap_or(max_d.saturating_add(1)),
            None => levenshtein(a, b),
        }
    }

    fn within(&self, a: &str, b: &str, max_distance: usize) -> bool {
        levenshtein_bounded(a, b, max_distance).is_some()
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Convenience function for simple distance calculation
///
/// # Example
/// ```
/// use gingko::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("Vijay", "Voja"), 2);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 32]> = a.chars().collect();
    let b_chars: SmallVec<[char; 32]> = b.chars().collect();
    dp_distance(&a_chars, &b_chars)
}

/// Compute Levenshtein distance, giving up once it exceeds `max_distance`.
///
/// # Example
/// ```
/// use gingko::algorithms::levenshtein::levenshtein_bounded;
///
/// assert_eq!(levenshtein_bounded("Ana", "Anna", 2), Some(1));
/// assert_eq!(levenshtein_bounded("Zara", "Bob", 2), None);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_bounded(a: &str, b: &str, max_distance: usize) -> Option<usize> {
    if a == b {
        return Some(0);
    }

    let a_chars: SmallVec<[char; 32]> = a.chars().collect();
    let b_chars: SmallVec<[char; 32]> = b.chars().collect();
    dp_distance_bounded(&a_chars, &b_chars, max_distance)
}
