//! Turn a record's parsed values into a domain type.

use std::{fmt, marker::PhantomData};

use crate::{
    construct::Constructor,
    error::{ParseErrors, ParseResult, SchemaError},
    field::SchemaField,
    parser::FieldParser,
    record::RawRecord,
    schema::{Fields, Schema},
};

/// A parser for records that builds `Out` from the fields of a schema.
///
/// Created by [`Fields::map_to()`]. The constructor is only called if every
/// field was parsed successfully.
pub struct Mapper<S, C, Out> {
    fields: Fields<S>,
    constructor: C,
    _marker: PhantomData<fn() -> Out>,
}

/// Like [`Mapper`] but the constructor may reject the parsed values.
///
/// Created by [`Fields::try_map_to()`].
pub struct TryMapper<S, C, Out, E> {
    fields: Fields<S>,
    constructor: C,
    _marker: PhantomData<fn() -> Result<Out, E>>,
}

/// A mapper used as [`FieldParser`] for record-shaped values of type `R`.
///
/// Created by [`Mapper::nested()`] or [`TryMapper::nested()`].
pub struct Nested<R: ?Sized, M> {
    mapper: M,
    _record: PhantomData<fn(&R)>,
}

impl<S> Fields<S>
where
    S: Schema,
{
    /// Provide a [`Constructor`] that receives the parsed values in
    /// declaration order.
    ///
    /// The number, order, and types of the constructor's parameters must match
    /// the schema's fields, which is checked by the compiler.
    pub fn map_to<C, Out>(self, constructor: C) -> Mapper<S, C, Out>
    where
        C: Constructor<S::Output, Out>,
    {
        Mapper {
            fields: self,
            constructor,
            _marker: PhantomData,
        }
    }

    /// Provide a [`Constructor`] that validates the parsed values as a whole.
    ///
    /// An error of the constructor is reported at the record's root path.
    pub fn try_map_to<C, Out, E>(self, constructor: C) -> TryMapper<S, C, Out, E>
    where
        C: Constructor<S::Output, Result<Out, E>>,
        E: fmt::Display,
    {
        TryMapper {
            fields: self,
            constructor,
            _marker: PhantomData,
        }
    }
}

impl<F> Fields<Vec<F>>
where
    F: SchemaField,
{
    /// Provide a [`Constructor`] taking exactly `N` values for a schema only
    /// known at runtime.
    ///
    /// Fails if the schema does not have exactly `N` fields.
    pub fn map_to_array<C, Out, const N: usize>(
        self,
        constructor: C,
    ) -> Result<Mapper<[F; N], C, Out>, SchemaError>
    where
        C: Constructor<[F::Output; N], Out>,
    {
        let fields = self.len();
        let schema: [F; N] = self
            .into_schema()
            .try_into()
            .map_err(|_| SchemaError::ArityMismatch { fields, params: N })?;

        Ok(Fields::try_new(schema)?.map_to(constructor))
    }
}

impl<S, C, Out> Mapper<S, C, Out>
where
    S: Schema,
    C: Constructor<S::Output, Out>,
{
    /// Parse `record` and construct the output from its values.
    pub fn parse<R>(&self, record: &R) -> ParseResult<Out>
    where
        R: RawRecord<Value = S::Raw> + ?Sized,
    {
        let values = self.fields.parse(record)?;
        Ok(self.constructor.construct(values))
    }

    /// The schema the mapper reads.
    pub fn fields(&self) -> &Fields<S> {
        &self.fields
    }

    /// Use the mapper as [`FieldParser`] for fields holding nested records.
    pub fn nested<R>(self) -> Nested<R, Self>
    where
        R: RawRecord<Value = S::Raw> + ?Sized,
    {
        Nested {
            mapper: self,
            _record: PhantomData,
        }
    }
}

impl<S, C, Out, E> TryMapper<S, C, Out, E>
where
    S: Schema,
    C: Constructor<S::Output, Result<Out, E>>,
    E: fmt::Display,
{
    /// Parse `record` and let the constructor validate its values.
    pub fn parse<R>(&self, record: &R) -> ParseResult<Out>
    where
        R: RawRecord<Value = S::Raw> + ?Sized,
    {
        let values = self.fields.parse(record)?;
        self.constructor.construct(values).map_err(|error| {
            tracing::debug!(%error, "record rejected by constructor");
            ParseErrors::invalid(error)
        })
    }

    /// The schema the mapper reads.
    pub fn fields(&self) -> &Fields<S> {
        &self.fields
    }

    /// Use the mapper as [`FieldParser`] for fields holding nested records.
    pub fn nested<R>(self) -> Nested<R, Self>
    where
        R: RawRecord<Value = S::Raw> + ?Sized,
    {
        Nested {
            mapper: self,
            _record: PhantomData,
        }
    }
}

impl<R, S, C, Out> FieldParser for Nested<R, Mapper<S, C, Out>>
where
    R: RawRecord<Value = S::Raw> + ?Sized,
    S: Schema,
    C: Constructor<S::Output, Out>,
{
    type Raw = R;
    type Output = Out;

    fn parse(&self, raw: &R) -> ParseResult<Out> {
        self.mapper.parse(raw)
    }
}

impl<R, S, C, Out, E> FieldParser for Nested<R, TryMapper<S, C, Out, E>>
where
    R: RawRecord<Value = S::Raw> + ?Sized,
    S: Schema,
    C: Constructor<S::Output, Result<Out, E>>,
    E: fmt::Display,
{
    type Raw = R;
    type Output = Out;

    fn parse(&self, raw: &R) -> ParseResult<Out> {
        self.mapper.parse(raw)
    }
}

impl<S: fmt::Debug, C, Out> fmt::Debug for Mapper<S, C, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<S: fmt::Debug, C, Out, E> fmt::Debug for TryMapper<S, C, Out, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryMapper")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<R: ?Sized, M: fmt::Debug> fmt::Debug for Nested<R, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Nested").field(&self.mapper).finish()
    }
}
