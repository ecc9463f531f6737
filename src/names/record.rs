//! Per-name popularity records

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::codes::{CountryCode, Gender, PhoneticCode};
use crate::error::MatchError;

/// Popularity of a name in one country. Higher is more popular; the
/// generated databases use a 1-13 logarithmic scale.
pub type Popularity = u32;

/// Country -> popularity table for one gender of one name.
///
/// Absence of a country means the name is not a candidate there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryScores(AHashMap<CountryCode, Popularity>);

impl CountryScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Popularity for `country`, if the name is used there.
    pub fn get(&self, country: &str) -> Option<Popularity> {
        self.0.get(country).copied()
    }

    pub fn contains(&self, country: &str) -> bool {
        self.0.contains_key(country)
    }

    pub fn insert(&mut self, country: CountryCode, score: Popularity) {
        self.0.insert(country, score);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CountryCode, Popularity)> {
        self.0.iter().map(|(c, &s)| (c, s))
    }

    pub fn countries(&self) -> impl Iterator<Item = &CountryCode> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CountryCode, Popularity)> for CountryScores {
    fn from_iter<I: IntoIterator<Item = (CountryCode, Popularity)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One name with its phonetic codes and per-gender popularity tables.
///
/// Immutable once built; the matching engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    name: String,
    phonetic_codes: Vec<PhoneticCode>,
    male: Option<CountryScores>,
    female: Option<CountryScores>,
    unisex: Option<CountryScores>,
}

impl NameRecord {
    /// Create a record with no popularity data yet.
    ///
    /// Duplicate phonetic codes are collapsed, keeping first-seen order.
    pub fn new<I>(name: impl Into<String>, phonetic_codes: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = PhoneticCode>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MatchError::EmptyName);
        }

        let mut codes: Vec<PhoneticCode> = Vec::new();
        for code in phonetic_codes {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        if codes.is_empty() {
            return Err(MatchError::MissingPhoneticCodes(name));
        }

        Ok(Self {
            name,
            phonetic_codes: codes,
            male: None,
            female: None,
            unisex: None,
        })
    }

    /// Attach a popularity table for `gender`, replacing any previous one.
    ///
    /// Scores must be positive.
    pub fn with_scores<'a, I>(mut self, gender: Gender, scores: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut table = CountryScores::new();
        for (country, score) in scores {
            let code = CountryCode::new(country)?;
            let popularity = Popularity::try_from(score)
                .ok()
                .filter(|&p| p > 0)
                .ok_or_else(|| MatchError::InvalidScore {
                    name: self.name.clone(),
                    country: code.to_string(),
                    score,
                })?;
            table.insert(code, popularity);
        }
        *self.slot_mut(gender) = Some(table);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phonetic_codes(&self) -> &[PhoneticCode] {
        &self.phonetic_codes
    }

    /// Popularity table stored for `gender`, if any.
    pub fn scores(&self, gender: Gender) -> Option<&CountryScores> {
        match gender {
            Gender::Male => self.male.as_ref(),
            Gender::Female => self.female.as_ref(),
            Gender::Unisex => self.unisex.as_ref(),
        }
    }

    fn slot_mut(&mut self, gender: Gender) -> &mut Option<CountryScores> {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
            Gender::Unisex => &mut self.unisex,
        }
    }

    /// Re-check invariants on a record that bypassed the constructors
    /// (e.g. one restored from a snapshot).
    pub(crate) fn validate(&self) -> Result<(), MatchError> {
        if self.name.trim().is_empty() {
            return Err(MatchError::EmptyName);
        }
        if self.phonetic_codes.is_empty() {
            return Err(MatchError::MissingPhoneticCodes(self.name.clone()));
        }
        for gender in Gender::ALL {
            let Some(table) = self.scores(gender) else {
                continue;
            };
            if let Some((country, score)) = table.iter().find(|&(_, s)| s == 0) {
                return Err(MatchError::InvalidScore {
                    name: self.name.clone(),
                    country: country.to_string(),
                    score: i64::from(score),
                });
            }
        }
        Ok(())
    }
}
