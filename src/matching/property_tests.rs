//! Property-based tests for the matching engine.
//!
//! 1. **Edit distance is a metric**: identity, symmetry, triangle inequality
//! 2. **Memo agrees with direct computation**
//! 3. **Fast reject is sound**: a base below the threshold means a rank below it
//! 4. **Coverage**: every candidate has one tuple per requested country, in order
//! 5. **Rank monotonicity**: output lists never increase in rank
//! 6. **Claim exclusivity**: a claimed name is never reused at a lower rank
//! 7. **Idempotence**: repeated calls give identical output

use proptest::prelude::*;
use std::collections::BTreeMap;

use super::*;
use crate::algorithms::{levenshtein, Levenshtein, MemoizedDistance};
use crate::names::{CountryCode, Gender, NameRecord, PhoneticCode};

// ============================================================================
// Generators
// ============================================================================

const NAME_POOL: &[&str] = &[
    "Ana", "Anna", "Ann", "Anne", "Hana", "Mia", "Maya", "Maja", "Mya", "Vijay", "Voja", "Vojo",
    "Vujo", "Marko", "Mirko", "Marco", "Luka", "Luca", "Lucas", "Zara", "Sara", "Sarah", "Bob",
];

const CODE_POOL: &[&str] = &["AN", "M", "MJ", "FJ", "MRK", "LK", "SR"];

const COUNTRY_POOL: &[&str] = &["us", "in", "si", "gb"];

fn short_name() -> impl Strategy<Value = String> {
    "[a-eA-E]{0,7}"
}

fn score_table() -> impl Strategy<Value = BTreeMap<&'static str, i64>> {
    prop::collection::btree_map(prop::sample::select(COUNTRY_POOL), 1i64..=13, 0..=3)
}

fn record() -> impl Strategy<Value = NameRecord> {
    (
        prop::sample::select(NAME_POOL),
        prop::collection::vec(prop::sample::select(CODE_POOL), 1..=2),
        score_table(),
        score_table(),
    )
        .prop_map(|(name, codes, male, female)| {
            NameRecord::new(name, codes.into_iter().map(|c| PhoneticCode::new(c).unwrap()))
                .unwrap()
                .with_scores(Gender::Male, male.into_iter())
                .unwrap()
                .with_scores(Gender::Female, female.into_iter())
                .unwrap()
        })
}

fn database() -> impl Strategy<Value = NameDatabase> {
    prop::collection::vec(record(), 0..14).prop_map(|records| {
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<NameRecord> = records
            .into_iter()
            .filter(|r| seen.insert(r.name().to_string()))
            .collect();
        NameDatabase::from_records(unique).unwrap()
    })
}

fn scope() -> impl Strategy<Value = RequestedScope> {
    (
        prop::sample::select(vec![Gender::Male, Gender::Female, Gender::Unisex]),
        prop::sample::subsequence(COUNTRY_POOL, 1..=3),
    )
        .prop_map(|(gender, countries)| {
            RequestedScope::new(gender, countries.into_iter().map(|c| CountryCode::new(c).unwrap()))
                .unwrap()
        })
}

fn small_config() -> MatchConfig {
    MatchConfig::default().with_min_rank(1)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn distance_identity_and_empty(s in short_name()) {
        prop_assert_eq!(levenshtein(&s, &s), 0);
        prop_assert_eq!(levenshtein(&s, ""), s.chars().count());
    }

    #[test]
    fn distance_symmetric(a in short_name(), b in short_name()) {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn distance_triangle_inequality(a in short_name(), b in short_name(), c in short_name()) {
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
    }

    #[test]
    fn bounded_distance_agrees(a in short_name(), b in short_name(), max in 0usize..5) {
        let full = levenshtein(&a, &b);
        let bounded = Levenshtein::with_max_distance(max).compute(&a, &b);
        prop_assert_eq!(bounded, (full <= max).then_some(full));
    }

    #[test]
    fn memo_agrees_with_direct(pairs in prop::collection::vec((short_name(), short_name()), 1..20)) {
        let memo = MemoizedDistance::new();
        for (a, b) in &pairs {
            prop_assert_eq!(memo.distance(a, b), levenshtein(a, b));
            prop_assert_eq!(memo.distance(b, a), levenshtein(a, b));
        }
    }

    #[test]
    fn fast_reject_is_sound(
        picks in prop::collection::vec((prop::sample::select(NAME_POOL), 1u32..=13), 1..=4),
        threshold in -20i64..60,
    ) {
        let countries: Vec<CountryCode> = ["us", "in", "si", "gb"]
            .iter()
            .map(|c| CountryCode::new(c).unwrap())
            .collect();
        let candidate = Candidate::new(
            countries.iter().zip(&picks).map(|(country, &(name, score))| CandidateTuple { country, name, score }),
        );
        let lev = Levenshtein::new();
        let ranker = CandidateRanker::new(&lev);

        let base = base_score(&candidate);
        let rank = ranker.score(&candidate, None);
        prop_assert!(rank <= base);
        if base < threshold {
            prop_assert!(rank < threshold);
            prop_assert_eq!(ranker.score(&candidate, Some(threshold)), base);
        } else {
            prop_assert_eq!(ranker.score(&candidate, Some(threshold)), rank);
        }
    }

    #[test]
    fn candidates_cover_scope(db in database(), scope in scope()) {
        let index = PhoneticIndex::build(&db, &scope, UnisexPolicy::Synthesized);
        let lev = Levenshtein::new();
        let generator = CandidateGenerator::new(&lev, 2);
        for group in index.groups() {
            prop_assert!(group.covers(&scope));
            for candidate in generator.generate(group, scope.countries()) {
                prop_assert!(candidate.verify_coverage(scope.countries()).is_ok());
                let tuples = candidate.tuples();
                for (i, a) in tuples.iter().enumerate() {
                    prop_assert!(a.score > 0);
                    for b in &tuples[i + 1..] {
                        prop_assert!(levenshtein(a.name, b.name) <= 2);
                    }
                }
            }
        }
    }

    #[test]
    fn output_ranks_descend(db in database(), scope in scope()) {
        let matches = PhoneticMatcher::new(small_config()).find_matches(&db, &scope).unwrap();
        for list in [&matches.exact, &matches.phonetic] {
            for pair in list.windows(2) {
                prop_assert!(pair[0].rank >= pair[1].rank);
            }
            for entry in list.iter() {
                prop_assert!(entry.rank >= 1);
            }
        }
    }

    #[test]
    fn claimed_names_never_reused_below_claim(db in database(), scope in scope()) {
        let matcher = PhoneticMatcher::new(small_config());
        let matches = matcher.find_matches(&db, &scope).unwrap();
        let separator = matcher.config().separator.as_str();

        let ranks_by_name = |list: &[MatchEntry]| -> Result<BTreeMap<String, i64>, TestCaseError> {
            let mut seen: BTreeMap<String, i64> = BTreeMap::new();
            for entry in list {
                for name in entry.names.split(separator) {
                    if let Some(&previous) = seen.get(name) {
                        prop_assert_eq!(previous, entry.rank, "{} reused at a lower rank", name);
                    }
                    seen.insert(name.to_string(), entry.rank);
                }
            }
            Ok(seen)
        };

        let exact = ranks_by_name(&matches.exact)?;
        let phonetic = ranks_by_name(&matches.phonetic)?;
        // The exact pass runs first, so a phonetic reuse must not rank lower
        for (name, rank) in &phonetic {
            if let Some(exact_rank) = exact.get(name) {
                prop_assert!(rank >= exact_rank, "{} exact at {} but phonetic at {}", name, exact_rank, rank);
            }
        }

        let mut displays: Vec<&str> = matches
            .exact
            .iter()
            .chain(&matches.phonetic)
            .map(|e| e.names.as_str())
            .collect();
        displays.sort_unstable();
        let before = displays.len();
        displays.dedup();
        prop_assert_eq!(before, displays.len());
    }

    #[test]
    fn matching_is_idempotent(db in database(), scope in scope()) {
        let shared = PhoneticMatcher::new(small_config());
        let first = shared.find_matches(&db, &scope).unwrap();
        let second = shared.find_matches(&db, &scope).unwrap();
        let fresh = PhoneticMatcher::new(small_config()).find_matches(&db, &scope).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &fresh);
    }
}
