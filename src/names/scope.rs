//! Target gender and countries for one matching call

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use super::codes::{CountryCode, Gender};
use crate::error::MatchError;

/// The gender and ordered, duplicate-free list of countries to match across.
///
/// Deserialization goes through [`RequestedScope::new`], so a decoded scope
/// holds the same guarantees as a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScope")]
pub struct RequestedScope {
    gender: Gender,
    countries: Vec<CountryCode>,
}

/// Wire form of a scope before validation
#[derive(Deserialize)]
struct RawScope {
    gender: Gender,
    countries: Vec<CountryCode>,
}

impl TryFrom<RawScope> for RequestedScope {
    type Error = MatchError;

    fn try_from(raw: RawScope) -> Result<Self, Self::Error> {
        Self::new(raw.gender, raw.countries)
    }
}

impl RequestedScope {
    /// Duplicates are dropped, keeping the first occurrence's position.
    pub fn new<I>(gender: Gender, countries: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = CountryCode>,
    {
        let mut seen = AHashSet::new();
        let countries: Vec<CountryCode> = countries
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .collect();
        if countries.is_empty() {
            return Err(MatchError::EmptyCountries);
        }
        Ok(Self { gender, countries })
    }

    /// Parse a gender tag and raw country codes.
    ///
    /// # Example
    /// ```
    /// use gingko::names::{Gender, RequestedScope};
    ///
    /// let scope = RequestedScope::parse("male", &["in", "si", "IN"]).unwrap();
    /// assert_eq!(scope.gender(), Gender::Male);
    /// assert_eq!(scope.len(), 2);
    /// ```
    pub fn parse(gender: &str, countries: &[&str]) -> Result<Self, MatchError> {
        let gender: Gender = gender.parse()?;
        let countries = countries
            .iter()
            .map(|c| CountryCode::new(c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(gender, countries)
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn countries(&self) -> &[CountryCode] {
        &self.countries
    }

    pub fn contains(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c.as_str() == country)
    }

    /// Number of requested countries (always at least one)
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
