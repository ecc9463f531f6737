//! Match selection: ranks every candidate, then greedily picks
//! non-overlapping exact matches followed by phonetic matches.
//!
//! Both passes walk the same list, sorted by rank (descending) and then by
//! the first country's name. A name accepted at some rank is *claimed*: a
//! later candidate using it is skipped if the claim's rank is strictly higher
//! than the candidate's. Equal ranks may share a name.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use super::candidates::Candidate;
use super::rank::CandidateRanker;
use crate::algorithms::EditDistance;

/// A candidate with its computed rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    pub candidate: Candidate<'a>,
    pub rank: i64,
}

/// Exact (one spelling everywhere) or phonetic (several spellings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Phonetic,
}

impl MatchKind {
    pub fn of(candidate: &Candidate<'_>) -> Self {
        if candidate.is_exact() {
            MatchKind::Exact
        } else {
            MatchKind::Phonetic
        }
    }
}

/// One reported match: the distinct names joined by the separator, and its rank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchEntry {
    pub names: String,
    pub rank: i64,
}

/// Final output of a matching call. Both lists are in descending rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticMatches {
    pub exact: Vec<MatchEntry>,
    pub phonetic: Vec<MatchEntry>,
}

impl PhoneticMatches {
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.phonetic.is_empty()
    }

    /// Total entries across both lists
    pub fn len(&self) -> usize {
        self.exact.len() + self.phonetic.len()
    }

    /// Entries of one kind.
    pub fn of_kind(&self, kind: MatchKind) -> &[MatchEntry] {
        match kind {
            MatchKind::Exact => &self.exact,
            MatchKind::Phonetic => &self.phonetic,
        }
    }
}

/// Bookkeeping shared by both passes
#[derive(Default)]
struct SelectionState<'a> {
    claims: AHashMap<&'a str, i64>,
    emitted: AHashSet<String>,
}

/// Filters, orders and deduplicates scored candidates.
pub struct MatchSelector<'r, 'd, D: EditDistance + ?Sized> {
    ranker: &'r CandidateRanker<'d, D>,
    min_rank: i64,
    separator: &'r str,
}

impl<'r, 'd, D: EditDistance + ?Sized> MatchSelector<'r, 'd, D> {
    pub fn new(ranker: &'r CandidateRanker<'d, D>, min_rank: i64, separator: &'r str) -> Self {
        Self {
            ranker,
            min_rank,
            separator,
        }
    }

    /// Drop candidates below `min_rank` and sort the rest.
    ///
    /// Ranking uses `min_rank` as the fast-reject threshold, so candidates
    /// whose popularity alone cannot reach it never pay for distance work.
    /// Ties are broken by the first country's name, then by input order.
    pub fn rank<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<ScoredCandidate<'a>> {
        let mut scored: Vec<ScoredCandidate<'a>> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let rank = self.ranker.score(&candidate, Some(self.min_rank));
                (rank >= self.min_rank).then_some(ScoredCandidate { candidate, rank })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.rank
                .cmp(&a.rank)
                .then_with(|| a.candidate.first_name().cmp(b.candidate.first_name()))
        });
        scored
    }

    /// Run the exact pass, then the phonetic pass, over a ranked list.
    pub fn select<'a>(&self, ranked: &[ScoredCandidate<'a>]) -> PhoneticMatches {
        let mut state = SelectionState::default();
        PhoneticMatches {
            exact: self.select_pass(ranked, MatchKind::Exact, &mut state),
            phonetic: self.select_pass(ranked, MatchKind::Phonetic, &mut state),
        }
    }

    fn select_pass<'a>(
        &self,
        ranked: &[ScoredCandidate<'a>],
        kind: MatchKind,
        state: &mut SelectionState<'a>,
    ) -> Vec<MatchEntry> {
        let mut out = Vec::new();

        for scored in ranked {
            let candidate = &scored.candidate;
            if MatchKind::of(candidate) != kind {
                continue;
            }

            let rank = self.ranker.score(candidate, None);
            if rank < self.min_rank {
                break;
            }

            let names = candidate.distinct_names();
            let outranked = names
                .iter()
                .any(|name| state.claims.get(name).is_some_and(|&claimed| claimed > rank));
            if outranked {
                continue;
            }

            for &name in &names {
                state.claims.insert(name, rank);
            }

            let display = names.join(self.separator);
            if !state.emitted.insert(display.clone()) {
                continue;
            }
            out.push(MatchEntry {
                names: display,
                rank,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Levenshtein;
    use crate::matching::candidates::CandidateTuple;
    use crate::names::CountryCode;

    fn entry(names: &str, rank: i64) -> MatchEntry {
        MatchEntry {
            names: names.to_string(),
            rank,
        }
    }

    fn build<'a>(countries: &'a [CountryCode], picks: &[&[(&'a str, u32)]]) -> Vec<Candidate<'a>> {
        picks
            .iter()
            .map(|pick| {
                Candidate::new(
                    countries
                        .iter()
                        .zip(pick.iter())
                        .map(|(country, &(name, score))| CandidateTuple { country, name, score }),
                )
            })
            .collect()
    }

    fn countries() -> Vec<CountryCode> {
        vec![CountryCode::new("us").unwrap(), CountryCode::new("in").unwrap()]
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let countries = countries();
        let candidates = build(
            &countries,
            &[
                &[("Ana", 1), ("Ana", 2)],   // base 3, dropped
                &[("Ana", 5), ("Ana", 5)],   // 22
                &[("Anna", 9), ("Ana", 5)],  // 26 - 2 = 24
                &[("Bea", 5), ("Bea", 5)],   // 22
            ],
        );
        let lev = Levenshtein::new();
        let ranker = CandidateRanker::new(&lev);
        let selector = MatchSelector::new(&ranker, 4, " / ");

        let ranked = selector.rank(candidates);
        let summary: Vec<(&str, i64)> = ranked
            .iter()
            .map(|s| (s.candidate.first_name(), s.rank))
            .collect();
        assert_eq!(summary, vec![("Anna", 24), ("Ana", 22), ("Bea", 22)]);
    }

    #[test]
    fn test_exact_then_phonetic_with_claims() {
        let countries = countries();
        let candidates = build(
            &countries,
            &[
                &[("Ana", 5), ("Ana", 5)],  // exact 22
                &[("Anna", 9), ("Ana", 5)], // phonetic 24
                &[("Anna", 9), ("Anna", 2)], // exact 11 + 3 = 14
            ],
        );
        let lev = Levenshtein::new();
        let ranker = CandidateRanker::new(&lev);
        let selector = MatchSelector::new(&ranker, 4, " / ");
        let matches = selector.select(&selector.rank(candidates));

        // The phonetic pass runs second, so "Ana" was claimed at 22 and
        // "Anna" at 14 when "Anna / Ana" (24) is considered: not outranked.
        assert_eq!(matches.exact, vec![entry("Ana", 22), entry("Anna", 14)]);
        assert_eq!(matches.phonetic, vec![entry("Anna / Ana", 24)]);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_higher_claim_blocks_lower_match() {
        let countries = countries();
        let candidates = build(
            &countries,
            &[
                &[("Mia", 9), ("Mia", 9)],  // exact 42
                &[("Mia", 5), ("Maya", 5)], // phonetic 22 - 4 = 18, Mia claimed at 42
                &[("Mya", 5), ("Maya", 5)], // phonetic 22 - 2 = 20
            ],
        );
        let lev = Levenshtein::new();
        let ranker = CandidateRanker::new(&lev);
        let selector = MatchSelector::new(&ranker, 4, " / ");
        let matches = selector.select(&selector.rank(candidates));

        assert_eq!(matches.exact, vec![entry("Mia", 42)]);
        assert_eq!(matches.phonetic, vec![entry("Mya / Maya", 20)]);
    }

    #[test]
    fn test_equal_rank_may_share_name() {
        let countries = countries();
        let candidates = build(
            &countries,
            &[
                &[("Mia", 5), ("Mya", 5)], // 22 - 2 = 20
                &[("Mya", 5), ("Mia", 5)], // 20
            ],
        );
        let lev = Levenshtein::new();
        let ranker = CandidateRanker::new(&lev);
        let selector = MatchSelector::new(&ranker, 4, " / ");
        let matches = selector.select(&selector.rank(candidates));

        assert_eq!(
            matches.phonetic,
            vec![entry("Mia / Mya", 20), entry("Mya / Mia", 20)]
        );
    }

    #[test]
    fn test_duplicate_display_strings_collapse() {
        let us = CountryCode::new("us").unwrap();
        let gb = CountryCode::new("gb").unwrap();
        let si = CountryCode::new("si").unwrap();
        let countries = vec![us, gb, si];
        let candidates = build(
            &countries,
            &[
                &[("Ana", 5), ("Anna", 5), ("Ana", 5)],
                &[("Ana", 5), ("Anna", 5), ("Anna", 5)],
            ],
        );
        let lev = Levenshtein::new();
        let ranker = CandidateRanker::new(&lev);
        let selector = MatchSelector::new(&ranker, 4, " / ");
        let matches = selector.select(&selector.rank(candidates));

        // Both rank 15 + 12 - 2 * 2 = 23 and collapse to the same display string
        assert_eq!(matches.phonetic, vec![entry("Ana / Anna", 23)]);
    }

    #[test]
    fn test_custom_separator() {
        let countries = countries();
        let candidates = build(&countries, &[&[("Vijay", 7), ("Voja", 1)]]);
        let lev = Levenshtein::new();
        let ranker = CandidateRanker::new(&lev);
        let selector = MatchSelector::new(&ranker, 4, ", ");
        let matches = selector.select(&selector.rank(candidates));
        assert_eq!(matches.phonetic, vec![entry("Vijay, Voja", 4)]);
        assert!(matches.of_kind(MatchKind::Exact).is_empty());
    }
}
