//! Named fields and their policy for absent values.

use crate::{
    error::{FieldError, ParseResult},
    parser::FieldParser,
    path::{FieldName, PathSegment},
    record::RawRecord,
};

/// A named entry of a record together with the policy for its absence.
///
/// Implemented by [`Field`] (absent is fine) and [`Mandatory`] (absent is an
/// error). Schemas are tuples or lists of `SchemaField`s.
pub trait SchemaField {
    /// Type of the raw values of the record.
    type Raw: ?Sized;
    /// Type of the extracted value.
    type Output;

    /// The field's name in the record.
    fn name(&self) -> &FieldName;

    /// Turn the possibly absent raw value into the field's value.
    ///
    /// Error paths start with the field's name.
    fn extract(&self, raw: Option<&Self::Raw>) -> ParseResult<Self::Output>;

    /// Look the field up in `record` and [`extract()`](Self::extract) it.
    fn extract_from<R>(&self, record: &R) -> ParseResult<Self::Output>
    where
        R: RawRecord<Value = Self::Raw> + ?Sized,
    {
        self.extract(record.get(self.name().as_str()))
    }
}

/// An optional field: absent values yield `None`.
#[derive(Debug, Clone)]
pub struct Field<P> {
    name: FieldName,
    parser: P,
}

/// Wraps a field producing `Option<T>` into one producing `T` that reports
/// [`MissingRequiredField`](crate::error::ErrorKind::MissingRequiredField)
/// when the value is absent.
#[derive(Debug, Clone)]
pub struct Mandatory<F> {
    field: F,
}

/// Bind `parser` to an optional field called `name`.
pub fn field<P>(name: &'static str, parser: P) -> Field<P>
where
    P: FieldParser,
{
    Field::named(FieldName::from_static(name), parser)
}

/// Make an optional field mandatory.
pub fn mandatory<F, T>(field: F) -> Mandatory<F>
where
    F: SchemaField<Output = Option<T>>,
{
    Mandatory { field }
}

impl<P> Field<P> {
    /// Bind `parser` to an optional field with a name known at runtime.
    pub fn named(name: FieldName, parser: P) -> Self {
        Self { name, parser }
    }

    /// Same as [`mandatory(self)`](mandatory()).
    pub fn mandatory(self) -> Mandatory<Self> {
        Mandatory { field: self }
    }

    /// The parser for present values.
    pub fn parser(&self) -> &P {
        &self.parser
    }
}

impl<P> SchemaField for Field<P>
where
    P: FieldParser,
{
    type Raw = P::Raw;
    type Output = Option<P::Output>;

    fn name(&self) -> &FieldName {
        &self.name
    }

    fn extract(&self, raw: Option<&P::Raw>) -> ParseResult<Self::Output> {
        match raw {
            None => Ok(None),
            Some(raw) => self
                .parser
                .parse(raw)
                .map(Some)
                .map_err(|errors| errors.prefixed(PathSegment::Field(self.name.clone()))),
        }
    }
}

impl<F, T> SchemaField for Mandatory<F>
where
    F: SchemaField<Output = Option<T>>,
{
    type Raw = F::Raw;
    type Output = T;

    fn name(&self) -> &FieldName {
        self.field.name()
    }

    fn extract(&self, raw: Option<&F::Raw>) -> ParseResult<T> {
        self.field
            .extract(raw)?
            .ok_or_else(|| FieldError::missing(self.name().clone()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ErrorKind, ParseErrors},
        parser::{FieldParserExt, from_fn},
        text,
    };

    #[test]
    fn should_yield_none_for_absent_optional() {
        let last_name = field("lastName", text::string::<&str>());

        assert_eq!(last_name.extract(None).unwrap(), None);
    }

    #[test]
    fn should_parse_present_empty_value() {
        let last_name = field("lastName", text::string::<&str>());

        assert_eq!(last_name.extract(Some(&"")).unwrap(), Some(String::new()));
    }

    #[test]
    fn should_report_missing_mandatory() {
        let first_name = mandatory(field("firstName", text::string::<&str>()));

        let err = first_name.extract(None).unwrap_err();

        assert_eq!(err.len(), 1);
        assert_eq!(err.first().kind(), &ErrorKind::MissingRequiredField);
        assert_eq!(err.first().path().to_string(), "firstName");
    }

    #[test]
    fn should_validate_empty_mandatory_value() {
        let first_name = text::non_empty_string::<&str>()
            .field("firstName")
            .mandatory();

        let err = first_name.extract(Some(&"")).unwrap_err();

        assert_eq!(err.first().to_string(), "firstName must not be empty");
    }

    #[test]
    fn should_prefix_parser_errors_with_name() {
        let nested = from_fn(|_: &&str| -> ParseResult<u8> {
            Err(ParseErrors::invalid("is broken").prefixed(PathSegment::index(3)))
        })
        .field("items");

        let err = nested.extract(Some(&"x")).unwrap_err();

        assert_eq!(err.first().path().to_string(), "items[3]");
    }

    #[test]
    fn should_keep_parser_for_reuse() {
        let age = text::parsed::<u8, &str>().field("age");

        assert_eq!(age.parser().parse(&"7").unwrap(), 7);
        assert_eq!(age.extract(Some(&"7")).unwrap(), Some(7));
    }

    #[test]
    fn should_treat_both_spellings_alike() {
        let fluent = text::string::<&str>().field("name").mandatory();
        let functional = mandatory(field("name", text::string::<&str>()));

        assert_eq!(fluent.extract(None), functional.extract(None));
        assert_eq!(fluent.extract(Some(&"a")), functional.extract(Some(&"a")));
    }
}
