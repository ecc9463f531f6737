//! Typed name data: validated codes, popularity records, the database and
//! the per-call request scope.

pub mod codes;
pub mod database;
pub mod record;
pub mod scope;

pub use codes::{CountryCode, Gender, PhoneticCode};
pub use database::NameDatabase;
pub use record::{CountryScores, NameRecord, Popularity};
pub use scope::RequestedScope;
