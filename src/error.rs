//! Error type shared by the data model and the matching engine

use thiserror::Error;

/// Errors that can occur while validating inputs or running a match
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// No target countries were requested
    #[error("At least one country must be requested")]
    EmptyCountries,

    /// Gender tag outside male/female/unisex
    #[error("Unknown gender: '{0}'. Valid: male, female, unisex")]
    UnknownGender(String),

    /// Country code is not 2-3 ASCII letters
    #[error("Invalid country code: '{0}'")]
    InvalidCountryCode(String),

    /// Phonetic code is empty or not ASCII alphanumeric
    #[error("Invalid phonetic code: '{0}'")]
    InvalidPhoneticCode(String),

    /// Popularity scores must be positive
    #[error("Name '{name}' has invalid score {score} for country '{country}'")]
    InvalidScore {
        name: String,
        country: String,
        score: i64,
    },

    /// Name record carries no phonetic code
    #[error("Name '{0}' has no phonetic codes")]
    MissingPhoneticCodes(String),

    /// Name is empty or whitespace
    #[error("Name must not be empty")]
    EmptyName,

    /// Same name appears twice in a database
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A candidate reached ranking without covering the requested countries
    /// exactly once each. This is a defect in candidate generation.
    #[error("Internal error: candidate {names:?} does not cover countries {expected:?}")]
    CoverageViolation {
        names: Vec<String>,
        expected: Vec<String>,
    },

    /// Name database JSON could not be decoded
    #[error("Database error: {0}")]
    Database(String),

    /// Binary snapshot could not be encoded or decoded
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Database(err.to_string())
    }
}

impl From<bincode::Error> for MatchError {
    fn from(err: bincode::Error) -> Self {
        MatchError::Snapshot(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = MatchError> = std::result::Result<T, E>;
