//! Immutable name database
//!
//! Holds validated [`NameRecord`]s in a fixed order so every matching call
//! over the same database iterates identically. The JSON layout accepted by
//! [`NameDatabase::from_json_str`] is the one produced by the name-registry
//! importer:
//!
//! ```text
//! {
//!   "George": {"female": {"fr": 1, "us": 1}, "male": {"gb": 8, "us": 8}, "metaphone": ["JRJ", "KRK"]},
//!   ...
//! }
//! ```

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::codes::{CountryCode, Gender, PhoneticCode};
use super::record::NameRecord;
use crate::error::MatchError;

/// A name entry as it appears in the generated JSON file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    #[serde(default)]
    male: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    female: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    unisex: Option<BTreeMap<String, i64>>,
    metaphone: Vec<String>,
}

impl RawRecord {
    fn into_record(self, name: String) -> Result<NameRecord, MatchError> {
        let codes = self
            .metaphone
            .iter()
            .map(|code| PhoneticCode::new(code))
            .collect::<Result<Vec<_>, _>>()?;

        let mut record = NameRecord::new(name, codes)?;
        for (gender, table) in [
            (Gender::Male, self.male),
            (Gender::Female, self.female),
            (Gender::Unisex, self.unisex),
        ] {
            if let Some(table) = table {
                record = record.with_scores(gender, table.iter().map(|(c, &s)| (c.as_str(), s)))?;
            }
        }
        Ok(record)
    }
}

/// Serializable state for NameDatabase (the lookup table is rebuilt on load)
#[derive(Debug, Serialize, Deserialize)]
struct DatabaseState {
    records: Vec<NameRecord>,
}

/// Read-only collection of name records, unique by name.
#[derive(Debug, Clone, Default)]
pub struct NameDatabase {
    records: Vec<NameRecord>,
    by_name: AHashMap<String, usize>,
}

impl NameDatabase {
    /// Build a database from records, keeping their order.
    pub fn from_records<I>(records: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = NameRecord>,
    {
        let mut db = Self::default();
        for record in records {
            record.validate()?;
            if db.by_name.contains_key(record.name()) {
                return Err(MatchError::DuplicateName(record.name().to_string()));
            }
            db.by_name.insert(record.name().to_string(), db.records.len());
            db.records.push(record);
        }
        Ok(db)
    }

    /// Parse the generated `names.json` layout. Records come out sorted by name.
    pub fn from_json_str(json: &str) -> Result<Self, MatchError> {
        let raw: BTreeMap<String, RawRecord> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .map(|(name, entry)| entry.into_record(name))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    /// Serialize the database to a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MatchError> {
        let state = DatabaseState {
            records: self.records.clone(),
        };
        Ok(bincode::serialize(&state)?)
    }

    /// Restore a database from [`NameDatabase::to_bytes`] output.
    ///
    /// Records are re-validated; a corrupted snapshot is an error, not a
    /// silently smaller database.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MatchError> {
        let state: DatabaseState = bincode::deserialize(data)?;
        Self::from_records(state.records)
    }

    pub fn get(&self, name: &str) -> Option<&NameRecord> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every country that appears in any popularity table, sorted.
    pub fn countries(&self) -> BTreeSet<&CountryCode> {
        self.records
            .iter()
            .flat_map(|record| {
                Gender::ALL
                    .into_iter()
                    .filter_map(move |g| record.scores(g))
                    .flat_map(|table| table.countries())
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a NameDatabase {
    type Item = &'a NameRecord;
    type IntoIter = std::slice::Iter<'a, NameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
