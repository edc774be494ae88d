//! Combine [`SchemaField`]s into a parser for whole records.
//!
//! A schema is a tuple of fields, e.g. `(mandatory(name), age)`, or a list of
//! fields of the same type. Parsing a record evaluates every field in
//! declaration order and either returns all values or all errors.

use std::collections::HashSet;

use crate::{
    error::{Accumulator, ParseResult, SchemaError},
    field::SchemaField,
    path::FieldName,
    record::RawRecord,
};

/// An ordered collection of fields parsed together from one record.
pub trait Schema {
    /// Type of the raw values of the record.
    type Raw: ?Sized;
    /// The fields' values in declaration order.
    type Output;

    /// Names of all fields in declaration order.
    fn field_names(&self) -> Vec<&FieldName>;

    /// Extract all fields from `record` without stopping at the first error.
    ///
    /// Errors are reported in declaration order. No value is returned unless
    /// every field succeeded.
    fn parse_record<R>(&self, record: &R) -> ParseResult<Self::Output>
    where
        R: RawRecord<Value = Self::Raw> + ?Sized;
}

/// A validated [`Schema`]: field names are unique.
///
/// Create it with [`fields()`] or [`Fields::try_new()`], then turn it into a
/// parser for a domain type with [`map_to()`](Fields::map_to).
#[derive(Debug, Clone)]
pub struct Fields<S> {
    schema: S,
}

/// Create a [`Fields`] from a tuple or list of fields.
///
/// # Panics
///
/// If two fields share a name. Use [`Fields::try_new()`] for schemas built
/// from runtime data.
pub fn fields<S>(schema: S) -> Fields<S>
where
    S: Schema,
{
    Fields::new(schema)
}

impl<S> Fields<S>
where
    S: Schema,
{
    /// Same as [`fields()`].
    ///
    /// # Panics
    ///
    /// If two fields share a name.
    pub fn new(schema: S) -> Self {
        match Self::try_new(schema) {
            Ok(fields) => fields,
            Err(error) => panic!("invalid schema: {error}"),
        }
    }

    /// Check that all field names are unique.
    pub fn try_new(schema: S) -> Result<Self, SchemaError> {
        let duplicate = {
            let mut seen = HashSet::new();
            schema
                .field_names()
                .into_iter()
                .find(|name| !seen.insert(name.as_str()))
                .cloned()
        };

        match duplicate {
            Some(name) => Err(SchemaError::DuplicateField(name)),
            None => Ok(Self { schema }),
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.schema.field_names().len()
    }

    /// True if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all fields in declaration order.
    pub fn field_names(&self) -> Vec<&FieldName> {
        self.schema.field_names()
    }

    /// Access the underlying schema.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub(crate) fn into_schema(self) -> S {
        self.schema
    }

    /// Parse `record` into the tuple of all field values.
    pub fn parse<R>(&self, record: &R) -> ParseResult<S::Output>
    where
        R: RawRecord<Value = S::Raw> + ?Sized,
    {
        let result = self.schema.parse_record(record);
        if let Err(errors) = &result {
            tracing::debug!(
                errors = errors.len(),
                first = %errors.first(),
                "record rejected"
            );
        }
        result
    }
}

macro_rules! impl_schema {
    ($first:ident $first_idx:tt $(, $field:ident $idx:tt)*) => {
        impl<$first $(, $field)*> Schema for ($first, $($field,)*)
        where
            $first: SchemaField,
            $( $field: SchemaField<Raw = $first::Raw>, )*
        {
            type Raw = $first::Raw;
            type Output = ($first::Output, $($field::Output,)*);

            fn field_names(&self) -> Vec<&FieldName> {
                vec![self.$first_idx.name() $(, self.$idx.name())*]
            }

            #[allow(non_snake_case)]
            fn parse_record<Rec>(&self, record: &Rec) -> ParseResult<Self::Output>
            where
                Rec: RawRecord<Value = Self::Raw> + ?Sized,
            {
                let mut errors = Accumulator::default();
                let $first = errors.record(self.$first_idx.extract_from(record));
                $( let $field = errors.record(self.$idx.extract_from(record)); )*

                match ($first, $($field,)*) {
                    (Some($first), $(Some($field),)*) => Ok(($first, $($field,)*)),
                    _ => Err(errors.finish()),
                }
            }
        }
    };
}

impl_schema!(A 0);
impl_schema!(A 0, B 1);
impl_schema!(A 0, B 1, C 2);
impl_schema!(A 0, B 1, C 2, D 3);
impl_schema!(A 0, B 1, C 2, D 3, E 4);
impl_schema!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_schema!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_schema!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_schema!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_schema!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_schema!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_schema!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);

/// Fields only known at runtime, all of the same type.
impl<F> Schema for Vec<F>
where
    F: SchemaField,
{
    type Raw = F::Raw;
    type Output = Vec<F::Output>;

    fn field_names(&self) -> Vec<&FieldName> {
        self.iter().map(SchemaField::name).collect()
    }

    fn parse_record<R>(&self, record: &R) -> ParseResult<Self::Output>
    where
        R: RawRecord<Value = F::Raw> + ?Sized,
    {
        let mut errors = Accumulator::default();
        let values = self
            .iter()
            .filter_map(|field| errors.record(field.extract_from(record)))
            .collect();
        errors.into_result(values)
    }
}

impl<F, const N: usize> Schema for [F; N]
where
    F: SchemaField,
{
    type Raw = F::Raw;
    type Output = [F::Output; N];

    fn field_names(&self) -> Vec<&FieldName> {
        self.iter().map(SchemaField::name).collect()
    }

    fn parse_record<R>(&self, record: &R) -> ParseResult<Self::Output>
    where
        R: RawRecord<Value = F::Raw> + ?Sized,
    {
        let mut errors = Accumulator::default();
        let values = self
            .each_ref()
            .map(|field| errors.record(field.extract_from(record)));
        if !errors.is_empty() {
            return Err(errors.finish());
        }

        // Would only panic if a value was discarded without its errors.
        Ok(values.map(|value| value.expect("no errors were recorded")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        error::ErrorKind,
        field::{Field, field, mandatory},
        parser::FieldParserExt,
        test_util::{n, record},
        text,
    };

    #[test]
    fn should_return_values_in_declaration_order() {
        let record = record(&[("b", "2"), ("a", "1")]);

        let (a, b) = fields((
            mandatory(field("a", text::parsed::<u8, _>())),
            mandatory(field("b", text::parsed::<u8, _>())),
        ))
        .parse(&record)
        .unwrap();

        assert_eq!((a, b), (1, 2));
    }

    #[test]
    fn should_return_all_errors_in_declaration_order() {
        let record = record(&[("age", "old"), ("email", "")]);

        let err = fields((
            text::string().field("name").mandatory(),
            text::parsed::<u8, _>().field("age"),
            text::non_empty_string().field("email"),
            text::string().field("nickname"),
        ))
        .parse(&record)
        .unwrap_err();

        let paths = err
            .iter()
            .map(|error| error.path().to_string())
            .collect::<Vec<_>>();
        assert_eq!(paths, vec!["name", "age", "email"]);
        assert_eq!(err.first().kind(), &ErrorKind::MissingRequiredField);
    }

    #[test]
    fn should_ignore_unknown_fields() {
        let record = record(&[("name", "Heinz"), ("otherField", "Schmidt")]);

        let (name,) = fields((text::string().field("name"),))
            .parse(&record)
            .unwrap();

        assert_eq!(name.as_deref(), Some("Heinz"));
    }

    #[test]
    fn should_reject_duplicate_names() {
        let err = Fields::try_new((
            text::string::<String>().field("id"),
            text::string::<String>().field("id").mandatory(),
        ))
        .unwrap_err();

        assert_eq!(err, SchemaError::DuplicateField(n("id")));
    }

    #[test]
    #[should_panic(expected = "declared more than once")]
    fn should_fail_fast_on_duplicate_names() {
        let _ = fields(vec![
            text::string::<String>().field("id"),
            text::string::<String>().field("id"),
        ]);
    }

    #[test]
    fn should_parse_runtime_schema() {
        let columns = ["x", "y", "z"]
            .into_iter()
            .map(|name| Field::named(name.parse().unwrap(), text::parsed::<i32, String>()).mandatory())
            .collect::<Vec<_>>();
        let schema = Fields::try_new(columns).unwrap();

        let values = schema
            .parse(&record(&[("x", "1"), ("y", "2"), ("z", "3")]))
            .unwrap();
        let err = schema
            .parse(&record(&[("x", "1"), ("z", "x")]))
            .unwrap_err();

        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(err.len(), 2);
        assert_eq!(err.missing_fields().count(), 1);
    }

    #[test]
    fn should_parse_array_schema() {
        let schema = fields([
            text::parsed::<u8, String>().field("r"),
            text::parsed::<u8, String>().field("g"),
            text::parsed::<u8, String>().field("b"),
        ]);

        let rgb = schema
            .parse(&record(&[("r", "255"), ("b", "7")]))
            .unwrap();
        let err = schema
            .parse(&record(&[("r", "256"), ("g", "-1")]))
            .unwrap_err();

        assert_eq!(rgb, [Some(255), None, Some(7)]);
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn should_list_field_names() {
        let schema = fields((
            text::string::<String>().field("first"),
            text::string::<String>().field("second"),
        ));

        assert_eq!(schema.field_names(), vec![&n("first"), &n("second")]);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn should_read_keys_with_path_syntax() {
        let schema = fields((
            text::parsed::<u16, _>().field("server.port").mandatory(),
            text::string().field("items[0]"),
            text::string().field("root").mandatory(),
        ));

        let (port, item, root) = schema
            .parse(&record(&[("server.port", "8080"), ("items[0]", "a"), ("root", "/")]))
            .unwrap();
        let err = schema
            .parse(&record(&[("server.port", "x")]))
            .unwrap_err();

        assert_eq!((port, item.as_deref(), root.as_str()), (8080, Some("a"), "/"));
        let printed = err.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(
            printed,
            vec![
                r#"["server.port"] is invalid: invalid digit found in string"#,
                r#"["root"] is mandatory but does not exist"#,
            ]
        );
        assert!(err.iter().all(|error| !error.path().is_root()));
    }

    #[test]
    fn should_expose_schema_fields() {
        let schema = fields((
            text::string::<String>().field("a"),
            text::string::<String>().field("b").mandatory(),
        ));

        let (a, b) = schema.schema();

        assert_eq!(a.name(), &n("a"));
        assert_eq!(b.name(), &n("b"));
    }

    #[test]
    fn should_give_identical_results_on_reparse() {
        let schema = fields((
            text::non_empty_string().field("a").mandatory(),
            text::parsed::<u8, _>().field("b"),
        ));
        let record: HashMap<String, String> = record(&[("b", "x")]);

        assert_eq!(schema.parse(&record), schema.parse(&record));
    }
}
