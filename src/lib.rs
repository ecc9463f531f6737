//! Gingko - Cross-country phonetic name matching
//!
//! Given a name database with per-country popularity and phonetic codes,
//! finds names that are popular in every requested country, either spelled
//! the same everywhere (exact matches) or spelled differently but sounding
//! alike (phonetic matches), and ranks them.
//!
//! # Features
//! - Phonetic grouping with pairwise edit-distance pruning
//! - Popularity-weighted ranking with a cheap fast-reject bound
//! - Greedy non-overlapping selection
//! - Thread-safe distance memo shared across calls
//! - Optional Python bindings (`python` feature)

pub mod algorithms;
pub mod error;
pub mod matching;
pub mod names;

#[cfg(feature = "python")]
mod python;

pub use algorithms::{EditDistance, Levenshtein, MemoizedDistance};
pub use error::{MatchError, Result};
pub use matching::{
    find_phonetic_matches, MatchConfig, MatchEntry, PhoneticMatcher, PhoneticMatches,
    UnisexPolicy,
};
pub use names::{CountryCode, Gender, NameDatabase, NameRecord, PhoneticCode, RequestedScope};
