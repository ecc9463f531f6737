//! Candidate generation: every viable one-name-per-country combination
//! within a phonetic group.
//!
//! Countries are visited in scope order. At each step every name scored in
//! that country is tried in group order, and rejected if it is more than
//! `max_pair_distance` edits away from any name already chosen. Sharing a
//! phonetic code is not enough on its own: `"Zara"` and `"Bob"` can collide
//! on a code while being nothing alike. Recursion depth equals the number of
//! requested countries.

use smallvec::SmallVec;

use super::index::PhoneticGroup;
use crate::algorithms::EditDistance;
use crate::error::MatchError;
use crate::names::{CountryCode, Popularity};

/// One (country, name, popularity) choice inside a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateTuple<'a> {
    pub country: &'a CountryCode,
    pub name: &'a str,
    pub score: Popularity,
}

/// A full combination: exactly one tuple per requested country, in scope order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    tuples: SmallVec<[CandidateTuple<'a>; 4]>,
}

impl<'a> Candidate<'a> {
    pub fn new(tuples: impl IntoIterator<Item = CandidateTuple<'a>>) -> Self {
        Self {
            tuples: tuples.into_iter().collect(),
        }
    }

    pub fn tuples(&self) -> &[CandidateTuple<'a>] {
        &self.tuples
    }

    /// Name chosen for the first requested country.
    pub fn first_name(&self) -> &'a str {
        self.tuples.first().map_or("", |t| t.name)
    }

    /// Distinct names in order of first appearance.
    pub fn distinct_names(&self) -> SmallVec<[&'a str; 4]> {
        let mut names: SmallVec<[&'a str; 4]> = SmallVec::new();
        for tuple in &self.tuples {
            if !names.contains(&tuple.name) {
                names.push(tuple.name);
            }
        }
        names
    }

    /// Every country uses the same spelling.
    pub fn is_exact(&self) -> bool {
        self.distinct_names().len() == 1
    }

    /// Check that the candidate has exactly one tuple per requested country,
    /// in the requested order.
    pub fn verify_coverage(&self, countries: &[CountryCode]) -> Result<(), MatchError> {
        let covered = self.tuples.len() == countries.len()
            && self
                .tuples
                .iter()
                .zip(countries)
                .all(|(tuple, country)| tuple.country == country);
        if covered {
            return Ok(());
        }
        Err(MatchError::CoverageViolation {
            names: self.tuples.iter().map(|t| format!("{}:{}", t.country, t.name)).collect(),
            expected: countries.iter().map(CountryCode::to_string).collect(),
        })
    }
}

/// Enumerates candidates for phonetic groups.
pub struct CandidateGenerator<'d, D: EditDistance + ?Sized> {
    distance: &'d D,
    max_pair_distance: usize,
}

impl<'d, D: EditDistance + ?Sized> CandidateGenerator<'d, D> {
    pub fn new(distance: &'d D, max_pair_distance: usize) -> Self {
        Self {
            distance,
            max_pair_distance,
        }
    }

    /// All candidates for `group` across `countries`.
    ///
    /// The result may be empty even for a group that covers every country,
    /// when no combination satisfies the pairwise distance limit.
    pub fn generate<'a>(
        &self,
        group: &PhoneticGroup<'a>,
        countries: &'a [CountryCode],
    ) -> Vec<Candidate<'a>> {
        // Per-country (name, score) options, in group order
        let options: Vec<Vec<(&'a str, Popularity)>> = countries
            .iter()
            .map(|country| {
                group
                    .members()
                    .iter()
                    .filter_map(|m| m.scores.get(country.as_str()).map(|s| (m.name, s)))
                    .collect()
            })
            .collect();

        let mut out = Vec::new();
        let mut current: SmallVec<[CandidateTuple<'a>; 4]> = SmallVec::new();
        self.backtrack(countries, &options, &mut current, &mut out);
        out
    }

    fn backtrack<'a>(
        &self,
        countries: &'a [CountryCode],
        options: &[Vec<(&'a str, Popularity)>],
        current: &mut SmallVec<[CandidateTuple<'a>; 4]>,
        out: &mut Vec<Candidate<'a>>,
    ) {
        let k = current.len();
        if k == countries.len() {
            out.push(Candidate {
                tuples: current.clone(),
            });
            return;
        }

        for &(name, score) in &options[k] {
            let too_far = current
                .iter()
                .any(|chosen| !self.distance.within(chosen.name, name, self.max_pair_distance));
            if too_far {
                continue;
            }

            current.push(CandidateTuple {
                country: &countries[k],
                name,
                score,
            });
            self.backtrack(countries, options, current, out);
            current.pop();
        }
    }
}
