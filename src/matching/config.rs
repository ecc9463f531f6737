//! Matching configuration

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Default minimum rank a match needs to be reported.
pub const DEFAULT_MIN_RANK: i64 = 4;

/// Default maximum edit distance between any two names in one candidate.
pub const DEFAULT_MAX_PAIR_DISTANCE: usize = 2;

/// Default separator between names in a phonetic match.
pub const DEFAULT_SEPARATOR: &str = " / ";

/// Minimum number of phonetic groups before candidate generation fans out
/// over the rayon pool. Below this, thread coordination costs more than it
/// saves.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// How unisex popularity is derived when unisex matches are requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnisexPolicy {
    /// Only use unisex tables stored on the record.
    DirectOnly,
    /// Use a stored unisex table when present; otherwise synthesize one from
    /// every country with both a male and a female score, averaging the two
    /// (rounded half up).
    #[default]
    Synthesized,
}

/// Tunables for a [`PhoneticMatcher`](super::PhoneticMatcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub min_rank: i64,
    pub max_pair_distance: usize,
    pub separator: String,
    pub unisex_policy: UnisexPolicy,
    pub parallel_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_rank: DEFAULT_MIN_RANK,
            max_pair_distance: DEFAULT_MAX_PAIR_DISTANCE,
            separator: DEFAULT_SEPARATOR.to_string(),
            unisex_policy: UnisexPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_rank(mut self, min_rank: i64) -> Self {
        self.min_rank = min_rank;
        self
    }

    #[must_use]
    pub fn with_max_pair_distance(mut self, max_pair_distance: usize) -> Self {
        self.max_pair_distance = max_pair_distance;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_unisex_policy(mut self, policy: UnisexPolicy) -> Self {
        self.unisex_policy = policy;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.separator.is_empty() {
            return Err(MatchError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
