//! `field-parser` turns untyped, name-keyed records into typed domain values
//! by declaring which fields exist, how each one is parsed, and whether it may
//! be absent.
//!
//! # General approach
//!
//! A [`FieldParser`] converts one present raw value, e.g. a string into an
//! `u8`. Binding it to a name gives a [`Field`] which yields `None` for absent
//! values, or a [`Mandatory`] field which reports absent values as errors.
//! [`fields()`] combines fields into a schema that parses a whole
//! [`RawRecord`] and [`map_to()`](Fields::map_to) feeds the parsed values,
//! in declaration order, into a constructor.
//!
//! Parsing never stops at the first problem. Every field of a record is
//! evaluated and all rejected values are reported together as
//! [`ParseErrors`], each with the [`SourcePath`] to the value.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use field_parser::{FieldParserExt, fields, text};
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     first_name: String,
//!     last_name: Option<String>,
//!     age: u8,
//! }
//!
//! let person = fields((
//!     text::non_empty_string().field("firstName").mandatory(),
//!     text::string().field("lastName"),
//!     text::parsed::<u8, _>().field("age").mandatory(),
//! ))
//! .map_to(|first_name, last_name, age| Person {
//!     first_name,
//!     last_name,
//!     age,
//! });
//!
//! let record = HashMap::from([("firstName", "Ada"), ("age", "36")]);
//! assert_eq!(
//!     person.parse(&record).unwrap(),
//!     Person {
//!         first_name: "Ada".to_string(),
//!         last_name: None,
//!         age: 36,
//!     }
//! );
//!
//! let record = HashMap::from([("firstName", ""), ("age", "old")]);
//! let errors = person.parse(&record).unwrap_err();
//! assert_eq!(
//!     errors.to_string(),
//!     "Accumulated errors:\n\
//!      - firstName must not be empty\n\
//!      - age is invalid: invalid digit found in string\n"
//! );
//! ```
//!
//! # Features
//!
//! - `json` (default): parsers for [`serde_json::Value`] trees in [`json`].
//! - `serde`: `Serialize` for [`FieldError`] and [`ParseErrors`].

#![deny(missing_debug_implementations)]
#![deny(missing_docs)]

pub mod construct;
pub mod error;
pub mod field;
#[cfg(feature = "json")]
pub mod json;
pub mod mapper;
pub mod parser;
pub mod path;
pub mod record;
pub mod schema;
pub mod text;

pub use crate::{
    construct::Constructor,
    error::{ErrorKind, FieldError, ParseErrors, ParseResult, SchemaError},
    field::{Field, Mandatory, SchemaField, field, mandatory},
    mapper::{Mapper, Nested, TryMapper},
    parser::{FieldParser, FieldParserExt, from_fn},
    path::{FieldName, PathSegment, SourcePath},
    record::RawRecord,
    schema::{Fields, Schema, fields},
};

#[cfg(test)]
pub(crate) mod test_util {
    use std::collections::HashMap;

    use super::*;

    pub fn n(name: &str) -> FieldName {
        name.parse().unwrap()
    }

    pub fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{n, record};

    #[derive(Debug, PartialEq, Eq)]
    struct Account {
        login: String,
        display_name: Option<String>,
        quota: u32,
    }

    impl Account {
        fn new(login: String, display_name: Option<String>, quota: u32) -> Self {
            Self {
                login,
                display_name,
                quota,
            }
        }
    }

    fn account() -> Mapper<
        (
            Mandatory<Field<text::NonEmptyText<String>>>,
            Field<text::Text<String>>,
            Mandatory<Field<parser::Filter<text::Parsed<u32, String>, fn(&u32) -> bool>>>,
        ),
        fn(String, Option<String>, u32) -> Account,
        Account,
    > {
        fields((
            text::non_empty_string().field("login").mandatory(),
            text::string().field("displayName"),
            text::parsed::<u32, _>()
                .filter((|quota: &u32| *quota > 0) as fn(&u32) -> bool, "must be positive")
                .field("quota")
                .mandatory(),
        ))
        .map_to(Account::new as fn(_, _, _) -> _)
    }

    #[test]
    fn should_map_complete_record() {
        let account = account()
            .parse(&record(&[("login", "ada"), ("displayName", "Ada"), ("quota", "5")]))
            .unwrap();

        assert_eq!(
            account,
            Account {
                login: "ada".to_string(),
                display_name: Some("Ada".to_string()),
                quota: 5,
            }
        );
    }

    #[test]
    fn should_report_every_problem_of_a_record() {
        let err = account()
            .parse(&record(&[("displayName", ""), ("quota", "0"), ("extra", "x")]))
            .unwrap_err();

        assert_eq!(err.len(), 2);
        assert_eq!(
            err.missing_fields().collect::<Vec<_>>(),
            vec![&SourcePath::from(n("login"))]
        );
        assert_eq!(
            err.get_by_path(&SourcePath::from(n("quota"))).collect::<Vec<_>>(),
            vec![&ErrorKind::InvalidFieldValue("must be positive".to_string())]
        );
    }

    #[test]
    fn should_accept_borrowed_records() {
        let pairs = [("login", "ada"), ("quota", "1"), ("login", "grace")];

        let (login, quota) = fields((
            text::string::<&str>().field("login").mandatory(),
            text::parsed::<u32, &str>().field("quota"),
        ))
        .parse(&pairs[..])
        .unwrap();

        assert_eq!(login, "ada");
        assert_eq!(quota, Some(1));
    }
}
