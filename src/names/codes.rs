//! Validated newtypes for country codes, phonetic codes and gender tags

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;

/// Lowercase ISO-style country code (`"us"`, `"in"`, `"si"`).
///
/// Input is trimmed and lowercased; anything that is not 2-3 ASCII letters
/// afterwards is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(Box<str>);

impl CountryCode {
    pub fn new(code: &str) -> Result<Self, MatchError> {
        let normalized = code.trim().to_ascii_lowercase();
        let valid = (2..=3).contains(&normalized.len())
            && normalized.bytes().all(|b| b.is_ascii_lowercase());
        if !valid {
            return Err(MatchError::InvalidCountryCode(code.to_string()));
        }
        Ok(Self(normalized.into_boxed_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CountryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0.into_string()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Precomputed phonetic key (double metaphone output such as `"FJ"`, `"0MS"`).
///
/// Stored uppercase; must be non-empty ASCII alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneticCode(Box<str>);

impl PhoneticCode {
    pub fn new(code: &str) -> Result<Self, MatchError> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized.is_empty() || !normalized.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(MatchError::InvalidPhoneticCode(code.to_string()));
        }
        Ok(Self(normalized.into_boxed_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PhoneticCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for PhoneticCode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PhoneticCode {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PhoneticCode> for String {
    fn from(code: PhoneticCode) -> Self {
        code.0.into_string()
    }
}

impl fmt::Display for PhoneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Gender tag a popularity table is recorded under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unisex];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unisex => "unisex",
        }
    }
}

impl FromStr for Gender {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "unisex" => Ok(Gender::Unisex),
            _ => Err(MatchError::UnknownGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_normalizes() {
        assert_eq!(CountryCode::new(" US ").unwrap().as_str(), "us");
        assert_eq!(CountryCode::new("si").unwrap().to_string(), "si");
    }

    #[test]
    fn test_country_code_rejects_malformed() {
        for bad in ["", "u", "usa1", "u s", "abcd", "é"] {
            assert_eq!(
                CountryCode::new(bad),
                Err(MatchError::InvalidCountryCode(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_phonetic_code_uppercases() {
        assert_eq!(PhoneticCode::new("fj").unwrap().as_str(), "FJ");
        assert_eq!(PhoneticCode::new("0MS").unwrap().as_str(), "0MS");
    }

    #[test]
    fn test_phonetic_code_rejects_malformed() {
        assert!(PhoneticCode::new("").is_err());
        assert!(PhoneticCode::new("F J").is_err());
        assert!(PhoneticCode::new("FJ-").is_err());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("unisex".parse::<Gender>(), Ok(Gender::Unisex));
        assert_eq!(
            "other".parse::<Gender>(),
            Err(MatchError::UnknownGender("other".to_string()))
        );
    }

    #[test]
    fn test_codes_deserialize_with_validation() {
        let code: CountryCode = serde_json::from_str("\"IN\"").unwrap();
        assert_eq!(code.as_str(), "in");
        assert!(serde_json::from_str::<CountryCode>("\"india\"").is_err());
        assert!(serde_json::from_str::<PhoneticCode>("\"\"").is_err());
    }
}
