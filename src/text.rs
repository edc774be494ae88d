//! Parsers for records whose raw values are text, e.g. form data, query
//! strings, or environment variables.
//!
//! All parsers accept any raw value implementing `AsRef<str>`. The concrete
//! type is usually inferred from the record the schema is applied to.

use std::{fmt, marker::PhantomData, str::FromStr};

use crate::{
    error::{ParseErrors, ParseResult},
    parser::FieldParser,
};

/// Parser returned by [`string()`].
pub struct Text<V: ?Sized> {
    _raw: PhantomData<fn(&V)>,
}

/// Parser returned by [`non_empty_string()`].
pub struct NonEmptyText<V: ?Sized> {
    _raw: PhantomData<fn(&V)>,
}

/// Parser returned by [`parsed()`].
pub struct Parsed<T, V: ?Sized> {
    _marker: PhantomData<(fn() -> T, fn(&V))>,
}

/// Take the raw text as is, including the empty string.
pub fn string<V>() -> Text<V>
where
    V: AsRef<str> + ?Sized,
{
    Text { _raw: PhantomData }
}

/// Take the raw text, rejecting the empty string.
pub fn non_empty_string<V>() -> NonEmptyText<V>
where
    V: AsRef<str> + ?Sized,
{
    NonEmptyText { _raw: PhantomData }
}

/// Parse the raw text with `T`'s [`FromStr`] implementation.
///
/// ```
/// # use field_parser::{FieldParser, text};
/// let age = text::parsed::<u8, String>();
/// assert_eq!(age.parse(&"42".to_string()).unwrap(), 42);
/// assert_eq!(
///     age.parse(&"-1".to_string()).unwrap_err().first().to_string(),
///     "root is invalid: invalid digit found in string"
/// );
/// ```
pub fn parsed<T, V>() -> Parsed<T, V>
where
    T: FromStr,
    T::Err: fmt::Display,
    V: AsRef<str> + ?Sized,
{
    Parsed {
        _marker: PhantomData,
    }
}

impl<V> FieldParser for Text<V>
where
    V: AsRef<str> + ?Sized,
{
    type Raw = V;
    type Output = String;

    fn parse(&self, raw: &V) -> ParseResult<String> {
        Ok(raw.as_ref().to_owned())
    }
}

impl<V> FieldParser for NonEmptyText<V>
where
    V: AsRef<str> + ?Sized,
{
    type Raw = V;
    type Output = String;

    fn parse(&self, raw: &V) -> ParseResult<String> {
        match raw.as_ref() {
            "" => Err(ParseErrors::invalid("must not be empty")),
            text => Ok(text.to_owned()),
        }
    }
}

impl<T, V> FieldParser for Parsed<T, V>
where
    T: FromStr,
    T::Err: fmt::Display,
    V: AsRef<str> + ?Sized,
{
    type Raw = V;
    type Output = T;

    fn parse(&self, raw: &V) -> ParseResult<T> {
        raw.as_ref()
            .parse()
            .map_err(|error| ParseErrors::invalid(format!("is invalid: {error}")))
    }
}

macro_rules! impl_marker_traits {
    ($name:ident < $($param:ident),+ >, $raw:ident) => {
        impl< $( $param ),+ > fmt::Debug for $name< $( $param ),+ >
        where
            $raw: ?Sized,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl< $( $param ),+ > Clone for $name< $( $param ),+ >
        where
            $raw: ?Sized,
        {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl< $( $param ),+ > Copy for $name< $( $param ),+ > where $raw: ?Sized {}
    };
}

impl_marker_traits!(Text<V>, V);
impl_marker_traits!(NonEmptyText<V>, V);
impl_marker_traits!(Parsed<T, V>, V);

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{fields, field::mandatory, parser::FieldParserExt};

    #[test]
    fn should_keep_empty_string() {
        assert_eq!(string::<str>().parse("").unwrap(), "");
    }

    #[test]
    fn should_reject_empty_string() {
        let err = non_empty_string::<str>().parse("").unwrap_err();

        assert_eq!(err.first().to_string(), "root must not be empty");
    }

    #[test]
    fn should_infer_raw_type_from_record() {
        let record = HashMap::from([("port", "8080"), ("debug", "true")]);

        let (port, debug, host) = fields((
            mandatory(parsed::<u16, _>().field("port")),
            parsed::<bool, _>().field("debug"),
            string().field("host"),
        ))
        .parse(&record)
        .unwrap();

        assert_eq!(port, 8080);
        assert_eq!(debug, Some(true));
        assert_eq!(host, None);
    }
}
