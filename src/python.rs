//! Python bindings (`gingko._core`)

use pyo3::create_exception;
use pyo3::prelude::*;

use crate::algorithms;
use crate::error::MatchError;
use crate::matching::{self, MatchConfig, PhoneticMatcher};
use crate::names::{NameDatabase, RequestedScope};

// GingkoError (base)
//   ├── ValidationError - bad gender, country codes or config
//   └── DatabaseError - malformed name data
create_exception!(gingko, GingkoError, pyo3::exceptions::PyException);
create_exception!(gingko, ValidationError, GingkoError);
create_exception!(gingko, DatabaseError, GingkoError);

/// Which Python exception a [`MatchError`] surfaces as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    Validation,
    Database,
    Internal,
}

impl ErrorClass {
    fn of(err: &MatchError) -> Self {
        match err {
            MatchError::EmptyCountries
            | MatchError::UnknownGender(_)
            | MatchError::InvalidConfig(_) => ErrorClass::Validation,
            // Malformed codes only reach here from the request's country
            // list; the same errors raised while loading `names_json` are
            // classified by `load_database`.
            MatchError::InvalidCountryCode(_) => ErrorClass::Validation,
            MatchError::Database(_)
            | MatchError::Snapshot(_)
            | MatchError::InvalidPhoneticCode(_)
            | MatchError::InvalidScore { .. }
            | MatchError::MissingPhoneticCodes(_)
            | MatchError::EmptyName
            | MatchError::DuplicateName(_) => ErrorClass::Database,
            MatchError::CoverageViolation { .. } => ErrorClass::Internal,
        }
    }
}

fn raise(class: ErrorClass, err: MatchError) -> PyErr {
    match class {
        ErrorClass::Validation => ValidationError::new_err(err.to_string()),
        ErrorClass::Database => DatabaseError::new_err(err.to_string()),
        ErrorClass::Internal => GingkoError::new_err(err.to_string()),
    }
}

fn to_py_err(err: MatchError) -> PyErr {
    raise(ErrorClass::of(&err), err)
}

/// Every failure while decoding name data is a database error, including
/// malformed country keys inside a popularity table.
fn load_database(names_json: &str) -> Result<NameDatabase, (ErrorClass, MatchError)> {
    NameDatabase::from_json_str(names_json).map_err(|err| (ErrorClass::Database, err))
}

/// Result of `find_phonetic_matches`: `(names, rank)` pairs, best first.
#[pyclass(name = "PhoneticMatches")]
#[derive(Clone, Debug)]
pub struct PyPhoneticMatches {
    #[pyo3(get)]
    pub exact: Vec<(String, i64)>,

    #[pyo3(get)]
    pub phonetic: Vec<(String, i64)>,
}

impl From<matching::PhoneticMatches> for PyPhoneticMatches {
    fn from(matches: matching::PhoneticMatches) -> Self {
        let pairs = |entries: Vec<matching::MatchEntry>| -> Vec<(String, i64)> {
            entries.into_iter().map(|e| (e.names, e.rank)).collect()
        };
        Self {
            exact: pairs(matches.exact),
            phonetic: pairs(matches.phonetic),
        }
    }
}

#[pymethods]
impl PyPhoneticMatches {
    fn __repr__(&self) -> String {
        format!(
            "PhoneticMatches(exact={}, phonetic={})",
            self.exact.len(),
            self.phonetic.len()
        )
    }

    fn __len__(&self) -> usize {
        self.exact.len() + self.phonetic.len()
    }
}

/// Levenshtein distance in characters.
#[pyfunction]
fn levenshtein(a: &str, b: &str) -> usize {
    algorithms::levenshtein(a, b)
}

/// Match names across `countries` for `gender` using a `names.json` document.
#[pyfunction]
#[pyo3(signature = (names_json, countries, gender, min_rank=4))]
fn find_phonetic_matches(
    py: Python<'_>,
    names_json: &str,
    countries: Vec<String>,
    gender: &str,
    min_rank: i64,
) -> PyResult<PyPhoneticMatches> {
    let country_refs: Vec<&str> = countries.iter().map(String::as_str).collect();
    let scope = RequestedScope::parse(gender, &country_refs).map_err(to_py_err)?;
    let matcher = PhoneticMatcher::new(MatchConfig::default().with_min_rank(min_rank));

    let matches = py
        .allow_threads(|| {
            let db = load_database(names_json)?;
            matcher
                .find_matches(&db, &scope)
                .map_err(|err| (ErrorClass::of(&err), err))
        })
        .map_err(|(class, err)| raise(class, err))?;
    Ok(matches.into())
}

#[pymodule]
fn _core(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("GingkoError", py.get_type::<GingkoError>())?;
    m.add("ValidationError", py.get_type::<ValidationError>())?;
    m.add("DatabaseError", py.get_type::<DatabaseError>())?;

    m.add_class::<PyPhoneticMatches>()?;

    m.add_function(wrap_pyfunction!(levenshtein, m)?)?;
    m.add_function(wrap_pyfunction!(find_phonetic_matches, m)?)?;
    Ok(())
}
