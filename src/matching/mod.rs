//! Phonetic matching engine
//!
//! Pipeline for one call:
//!
//! 1. [`PhoneticIndex`] groups eligible names by phonetic code and keeps the
//!    groups that cover every requested country.
//! 2. [`CandidateGenerator`] enumerates one-name-per-country combinations
//!    per group, pruning spellings too far apart.
//! 3. [`CandidateRanker`] scores each combination.
//! 4. [`MatchSelector`] sorts them and picks exact, then phonetic matches.
//!
//! # Example
//!
//! ```
//! use gingko::names::NameDatabase;
//! use gingko::matching::find_phonetic_matches;
//!
//! let db = NameDatabase::from_json_str(r#"{
//!     "Vijay": {"male": {"in": 7}, "metaphone": ["FJ"]},
//!     "Voja": {"male": {"si": 1}, "metaphone": ["FJ"]}
//! }"#).unwrap();
//!
//! let matches = find_phonetic_matches(&db, &["in", "si"], "male").unwrap();
//! assert!(matches.exact.is_empty());
//! assert_eq!(matches.phonetic[0].names, "Vijay / Voja");
//! assert_eq!(matches.phonetic[0].rank, 4);
//! ```

pub mod candidates;
pub mod config;
pub mod index;
pub mod rank;
pub mod select;

#[cfg(test)]
mod property_tests;

pub use candidates::{Candidate, CandidateGenerator, CandidateTuple};
pub use config::{MatchConfig, UnisexPolicy};
pub use index::{GroupMember, PhoneticGroup, PhoneticIndex};
pub use rank::{base_score, CandidateRanker};
pub use select::{MatchEntry, MatchKind, MatchSelector, PhoneticMatches, ScoredCandidate};

use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use crate::algorithms::MemoizedDistance;
use crate::error::MatchError;
use crate::names::{NameDatabase, RequestedScope};

/// Matching engine with a distance memo shared across calls.
///
/// Cloning is cheap and clones share the memo, so one matcher can serve
/// concurrent requests. Output depends only on the database, scope and
/// config; the memo only saves work.
#[derive(Debug, Clone, Default)]
pub struct PhoneticMatcher {
    config: MatchConfig,
    memo: MemoizedDistance,
}

impl PhoneticMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            memo: MemoizedDistance::new(),
        }
    }

    /// Use an existing memo (e.g. one shared by a worker pool).
    pub fn with_memo(config: MatchConfig, memo: MemoizedDistance) -> Self {
        Self { config, memo }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn memo(&self) -> &MemoizedDistance {
        &self.memo
    }

    /// Find exact and phonetic matches for `scope`.
    pub fn find_matches(
        &self,
        db: &NameDatabase,
        scope: &RequestedScope,
    ) -> Result<PhoneticMatches, MatchError> {
        self.config.validate()?;
        let start = Instant::now();

        let index = PhoneticIndex::build(db, scope, self.config.unisex_policy);
        debug!(
            eligible_records = index.eligible_records(),
            phonetic_groups = index.total_groups(),
            covering_groups = index.len(),
            "built phonetic index"
        );

        let countries = scope.countries();
        let generator = CandidateGenerator::new(&self.memo, self.config.max_pair_distance);
        let per_group: Vec<Vec<Candidate<'_>>> = if index.len() >= self.config.parallel_threshold {
            index
                .groups()
                .par_iter()
                .map(|group| generator.generate(group, countries))
                .collect()
        } else {
            index
                .groups()
                .iter()
                .map(|group| generator.generate(group, countries))
                .collect()
        };

        let candidates: Vec<Candidate<'_>> = per_group.into_iter().flatten().collect();
        for candidate in &candidates {
            candidate.verify_coverage(countries)?;
        }
        let generated = candidates.len();

        let ranker = CandidateRanker::new(&self.memo);
        let selector = MatchSelector::new(&ranker, self.config.min_rank, &self.config.separator);
        let ranked = selector.rank(candidates);
        debug!(generated, above_min_rank = ranked.len(), "ranked candidates");

        let matches = selector.select(&ranked);
        info!(
            gender = %scope.gender(),
            countries = scope.len(),
            exact = matches.exact.len(),
            phonetic = matches.phonetic.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "phonetic matching finished"
        );
        Ok(matches)
    }
}

/// One-shot matching with the default configuration and a fresh memo.
pub fn find_phonetic_matches(
    db: &NameDatabase,
    countries: &[&str],
    gender: &str,
) -> Result<PhoneticMatches, MatchError> {
    let scope = RequestedScope::parse(gender, countries)?;
    PhoneticMatcher::default().find_matches(db, &scope)
}
