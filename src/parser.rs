//! The [`FieldParser`] contract and combinators to refine parsers.

use std::{borrow::Cow, fmt, marker::PhantomData};

use crate::{
    error::{ParseErrors, ParseResult},
    field::Field,
    path::FieldName,
};

/// Converts one present raw value into a typed value.
///
/// Parsers never see absent values, whether a field may be missing is decided
/// by [`Field`] and [`Mandatory`](crate::field::Mandatory). Parsers are
/// expected to be pure so the same parser can be shared by any number of
/// records and threads.
///
/// Errors are relative to the parsed value: a scalar parser reports at the
/// root path, a list parser prefixes element errors with their index.
pub trait FieldParser {
    /// Type of the raw values this parser accepts.
    type Raw: ?Sized;
    /// Type of the parsed values.
    type Output;

    /// Parse a present raw value.
    fn parse(&self, raw: &Self::Raw) -> ParseResult<Self::Output>;
}

/// Combinators available on every [`FieldParser`].
pub trait FieldParserExt: FieldParser + Sized {
    /// Transform successfully parsed values.
    fn map<F, U>(self, map: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map { parser: self, map }
    }

    /// Transform successfully parsed values with a conversion that may fail.
    ///
    /// A conversion error `e` is reported as `is invalid: {e}`.
    ///
    /// ```
    /// # use field_parser::{FieldParser, FieldParserExt, text};
    /// let port = text::parsed::<u32, &str>().try_map(u16::try_from);
    /// assert_eq!(port.parse(&"8080").unwrap(), 8080);
    /// assert!(port.parse(&"70000").is_err());
    /// ```
    fn try_map<F, U, E>(self, map: F) -> TryMap<Self, F>
    where
        F: Fn(Self::Output) -> Result<U, E>,
        E: fmt::Display,
    {
        TryMap { parser: self, map }
    }

    /// Reject parsed values that do not satisfy `predicate` with `reason`.
    fn filter<F>(self, predicate: F, reason: impl Into<Cow<'static, str>>) -> Filter<Self, F>
    where
        F: Fn(&Self::Output) -> bool,
    {
        Filter {
            parser: self,
            predicate,
            reason: reason.into(),
        }
    }

    /// Bind the parser to an optional field called `name`.
    fn field(self, name: &'static str) -> Field<Self> {
        Field::named(FieldName::from_static(name), self)
    }
}

impl<P> FieldParserExt for P where P: FieldParser {}

/// Create a parser from a closure.
///
/// ```
/// # use field_parser::{FieldParser, ParseErrors, from_fn};
/// let even = from_fn(|raw: &i64| {
///     if raw % 2 == 0 { Ok(*raw) } else { Err(ParseErrors::invalid("is odd")) }
/// });
/// assert_eq!(even.parse(&4).unwrap(), 4);
/// ```
pub fn from_fn<V, T, F>(parse: F) -> FromFn<V, F>
where
    V: ?Sized,
    F: Fn(&V) -> ParseResult<T>,
{
    FromFn {
        parse,
        _raw: PhantomData,
    }
}

/// Parser returned by [`from_fn()`].
pub struct FromFn<V: ?Sized, F> {
    parse: F,
    _raw: PhantomData<fn(&V)>,
}

/// Parser returned by [`FieldParserExt::map()`].
#[derive(Clone)]
pub struct Map<P, F> {
    parser: P,
    map: F,
}

/// Parser returned by [`FieldParserExt::try_map()`].
#[derive(Clone)]
pub struct TryMap<P, F> {
    parser: P,
    map: F,
}

/// Parser returned by [`FieldParserExt::filter()`].
#[derive(Clone)]
pub struct Filter<P, F> {
    parser: P,
    predicate: F,
    reason: Cow<'static, str>,
}

impl<V, T, F> FieldParser for FromFn<V, F>
where
    V: ?Sized,
    F: Fn(&V) -> ParseResult<T>,
{
    type Raw = V;
    type Output = T;

    fn parse(&self, raw: &V) -> ParseResult<T> {
        (self.parse)(raw)
    }
}

impl<V: ?Sized, F> fmt::Debug for FromFn<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<P: fmt::Debug, F> fmt::Debug for Map<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

impl<P: fmt::Debug, F> fmt::Debug for TryMap<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryMap")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

impl<P: fmt::Debug, F> fmt::Debug for Filter<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("parser", &self.parser)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

impl<P, F, U> FieldParser for Map<P, F>
where
    P: FieldParser,
    F: Fn(P::Output) -> U,
{
    type Raw = P::Raw;
    type Output = U;

    fn parse(&self, raw: &P::Raw) -> ParseResult<U> {
        self.parser.parse(raw).map(&self.map)
    }
}

impl<P, F, U, E> FieldParser for TryMap<P, F>
where
    P: FieldParser,
    F: Fn(P::Output) -> Result<U, E>,
    E: fmt::Display,
{
    type Raw = P::Raw;
    type Output = U;

    fn parse(&self, raw: &P::Raw) -> ParseResult<U> {
        let value = self.parser.parse(raw)?;
        (self.map)(value).map_err(|error| ParseErrors::invalid(format!("is invalid: {error}")))
    }
}

impl<P, F> FieldParser for Filter<P, F>
where
    P: FieldParser,
    F: Fn(&P::Output) -> bool,
{
    type Raw = P::Raw;
    type Output = P::Output;

    fn parse(&self, raw: &P::Raw) -> ParseResult<P::Output> {
        let value = self.parser.parse(raw)?;
        if (self.predicate)(&value) {
            Ok(value)
        } else {
            Err(ParseErrors::invalid(&self.reason))
        }
    }
}
