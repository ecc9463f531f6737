//! Phonetic index: inverts the name database into phonetic-code groups.
//!
//! Only records with a popularity entry for the requested gender in at
//! least one requested country take part. A group is kept only when its
//! members, taken together, have a score in *every* requested country:
//! candidate generation needs one name per country and has nothing to offer
//! for a group that leaves a country uncovered. Countries outside the scope
//! are ignored when comparing coverage.

use ahash::AHashMap;
use std::borrow::Cow;

use super::config::UnisexPolicy;
use crate::names::{
    CountryScores, Gender, NameDatabase, NameRecord, PhoneticCode, Popularity, RequestedScope,
};

/// Popularity table to use for `record` under `gender`.
///
/// For [`Gender::Unisex`] with [`UnisexPolicy::Synthesized`], a record
/// without a stored unisex table gets one built from the countries where it
/// has both a male and a female score: `(male + female + 1) / 2`.
pub fn scores_for(
    record: &NameRecord,
    gender: Gender,
    policy: UnisexPolicy,
) -> Option<Cow<'_, CountryScores>> {
    if let Some(table) = record.scores(gender) {
        return Some(Cow::Borrowed(table));
    }
    if gender != Gender::Unisex || policy == UnisexPolicy::DirectOnly {
        return None;
    }

    let male = record.scores(Gender::Male)?;
    let female = record.scores(Gender::Female)?;
    let synthesized: CountryScores = male
        .iter()
        .filter_map(|(country, m)| {
            female
                .get(country.as_str())
                .map(|f| (country.clone(), rounded_mean(m, f)))
        })
        .collect();

    (!synthesized.is_empty()).then_some(Cow::Owned(synthesized))
}

/// Average of two scores, rounded half up. Widened so `u32::MAX` inputs
/// cannot overflow; the result always fits back into a `Popularity`.
fn rounded_mean(a: Popularity, b: Popularity) -> Popularity {
    let mean = (u64::from(a) + u64::from(b) + 1) / 2;
    Popularity::try_from(mean).unwrap_or(Popularity::MAX)
}

/// A name inside a phonetic group, with its gender-resolved scores.
#[derive(Debug, Clone)]
pub struct GroupMember<'db> {
    pub name: &'db str,
    pub scores: Cow<'db, CountryScores>,
}

/// Names sharing one phonetic code, in database order.
#[derive(Debug, Clone)]
pub struct PhoneticGroup<'db> {
    code: &'db PhoneticCode,
    members: Vec<GroupMember<'db>>,
}

impl<'db> PhoneticGroup<'db> {
    fn new(code: &'db PhoneticCode) -> Self {
        Self {
            code,
            members: Vec::new(),
        }
    }

    pub fn code(&self) -> &'db PhoneticCode {
        self.code
    }

    pub fn members(&self) -> &[GroupMember<'db>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether every requested country has at least one member scored there.
    pub fn covers(&self, scope: &RequestedScope) -> bool {
        scope
            .countries()
            .iter()
            .all(|country| self.members.iter().any(|m| m.scores.contains(country.as_str())))
    }
}

/// Phonetic groups usable for one scope.
#[derive(Debug, Clone)]
pub struct PhoneticIndex<'db> {
    groups: Vec<PhoneticGroup<'db>>,
    eligible_records: usize,
    total_groups: usize,
}

impl<'db> PhoneticIndex<'db> {
    /// Build the index for `scope`. Groups appear in order of the first
    /// record carrying their code.
    pub fn build(db: &'db NameDatabase, scope: &RequestedScope, policy: UnisexPolicy) -> Self {
        let mut slots: AHashMap<&'db PhoneticCode, usize> = AHashMap::new();
        let mut groups: Vec<PhoneticGroup<'db>> = Vec::new();
        let mut eligible_records = 0;

        for record in db {
            let Some(scores) = scores_for(record, scope.gender(), policy) else {
                continue;
            };
            if !scope.countries().iter().any(|c| scores.contains(c.as_str())) {
                continue;
            }
            eligible_records += 1;

            for code in record.phonetic_codes() {
                let idx = *slots.entry(code).or_insert_with(|| {
                    groups.push(PhoneticGroup::new(code));
                    groups.len() - 1
                });
                groups[idx].members.push(GroupMember {
                    name: record.name(),
                    scores: scores.clone(),
                });
            }
        }

        let total_groups = groups.len();
        groups.retain(|group| group.covers(scope));

        Self {
            groups,
            eligible_records,
            total_groups,
        }
    }

    pub fn groups(&self) -> &[PhoneticGroup<'db>] {
        &self.groups
    }

    /// Records that had a score in at least one requested country.
    pub fn eligible_records(&self) -> usize {
        self.eligible_records
    }

    /// Groups before the coverage filter.
    pub fn total_groups(&self) -> usize {
        self.total_groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
