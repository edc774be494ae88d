//! Provide [`ParseErrors`] to present every rejected value of an input.

use std::{fmt, slice, vec};

use crate::path::{FieldName, PathSegment, SourcePath};

/// Outcome of parsing a value, a field, or a whole record.
pub type ParseResult<T> = Result<T, ParseErrors>;

/// Why a single value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A mandatory field is absent from the record.
    #[error("is mandatory but does not exist")]
    MissingRequiredField,
    /// A present value failed type, format, or range validation.
    #[error("{0}")]
    InvalidFieldValue(String),
}

/// A rejected value and the path to it in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path} {kind}")]
pub struct FieldError {
    path: SourcePath,
    kind: ErrorKind,
}

/// All errors of one parse in input order.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    errors: Vec<FieldError>,
}

/// Mistakes in a schema's definition, as opposed to mistakes in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two fields of one schema share a name.
    #[error("field '{0}' is declared more than once")]
    DuplicateField(FieldName),
    /// The schema and the constructor disagree on the number of values.
    #[error("schema declares {fields} fields but the constructor takes {params} arguments")]
    ArityMismatch {
        /// Number of fields in the schema.
        fields: usize,
        /// Number of parameters of the constructor.
        params: usize,
    },
}

impl ErrorKind {
    /// Stable, machine-readable name of the kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequiredField => "missing_required_field",
            ErrorKind::InvalidFieldValue(_) => "invalid_field_value",
        }
    }
}

impl FieldError {
    /// Create an error at the given path.
    pub fn new(path: SourcePath, kind: ErrorKind) -> Self {
        Self { path, kind }
    }

    /// The mandatory field `name` is absent.
    pub fn missing(name: FieldName) -> Self {
        Self::new(name.into(), ErrorKind::MissingRequiredField)
    }

    /// The value at hand was rejected for `reason`.
    ///
    /// The error's path is relative to the value. Enclosing fields, lists and
    /// records prefix their own segments on the way out.
    pub fn invalid(reason: impl fmt::Display) -> Self {
        Self::new(
            SourcePath::new(),
            ErrorKind::InvalidFieldValue(reason.to_string()),
        )
    }

    /// Path to the rejected value.
    pub fn path(&self) -> &SourcePath {
        &self.path
    }

    /// Why the value was rejected.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Name of the innermost field on the error's path, if any.
    pub fn field_name(&self) -> Option<&FieldName> {
        self.path
            .segments()
            .iter()
            .rev()
            .find_map(|segment| match segment {
                PathSegment::Field(name) => Some(name),
                PathSegment::Index(_) => None,
            })
    }

    pub(crate) fn prefixed(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }
}

impl ParseErrors {
    /// Start a collection with its first error.
    pub fn new(first: FieldError) -> Self {
        Self {
            errors: vec![first],
        }
    }

    /// Shorthand for a single [`FieldError::invalid()`].
    pub fn invalid(reason: impl fmt::Display) -> Self {
        Self::new(FieldError::invalid(reason))
    }

    /// Collect `errors` if there is at least one.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self { errors })
    }

    /// Number of stored errors. At least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error found first.
    pub fn first(&self) -> &FieldError {
        &self.errors[0]
    }

    /// All errors in input order.
    pub fn iter(&self) -> slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Get all errors recorded for exactly the given path.
    ///
    /// Errors are in input order.
    pub fn get_by_path<'a>(&'a self, path: &'a SourcePath) -> impl Iterator<Item = &'a ErrorKind> {
        self.errors
            .iter()
            .filter(move |error| &error.path == path)
            .map(FieldError::kind)
    }

    /// Get all errors located at or below `base`.
    pub fn get_under<'a>(&'a self, base: &'a SourcePath) -> impl Iterator<Item = &'a FieldError> {
        self.errors
            .iter()
            .filter(move |error| error.path.starts_with(base))
    }

    /// Paths of all mandatory fields that were absent.
    pub fn missing_fields(&self) -> impl Iterator<Item = &SourcePath> {
        self.errors
            .iter()
            .filter(|error| error.kind == ErrorKind::MissingRequiredField)
            .map(FieldError::path)
    }

    /// Append all errors of `other` after the ones at hand.
    pub fn merge(&mut self, other: ParseErrors) {
        self.errors.extend(other.errors);
    }

    /// Unwrap into the inner, non-empty list.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    pub(crate) fn prefixed(self, segment: PathSegment) -> Self {
        let errors = self
            .errors
            .into_iter()
            .map(|error| error.prefixed(segment.clone()))
            .collect();
        Self { errors }
    }
}

impl From<FieldError> for ParseErrors {
    fn from(error: FieldError) -> Self {
        Self::new(error)
    }
}

impl IntoIterator for ParseErrors {
    type Item = FieldError;
    type IntoIter = vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a FieldError;
    type IntoIter = slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accumulated errors:")?;
        for error in &self.errors {
            writeln!(f, "- {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

/// Collects errors of sibling values without stopping at the first one.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    errors: Vec<FieldError>,
}

impl Accumulator {
    /// Keep the value of a success, remember the errors of a failure.
    pub(crate) fn record<T>(&mut self, result: ParseResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `value` if nothing was recorded, else all recorded errors.
    pub(crate) fn into_result<T>(self, value: T) -> ParseResult<T> {
        match ParseErrors::from_vec(self.errors) {
            None => Ok(value),
            Some(errors) => Err(errors),
        }
    }

    /// Must only be called after a value was discarded by [`record()`](Self::record).
    pub(crate) fn finish(self) -> ParseErrors {
        // Would only panic if a value was discarded without its errors.
        ParseErrors::from_vec(self.errors).expect("a failed value recorded its errors")
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::{Serialize, Serializer, ser::SerializeStruct};

    use super::{FieldError, ParseErrors};

    impl Serialize for FieldError {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("FieldError", 3)?;
            state.serialize_field("path", &self.path.to_string())?;
            state.serialize_field("kind", self.kind.code())?;
            state.serialize_field("reason", &self.kind.to_string())?;
            state.end()
        }
    }

    impl Serialize for ParseErrors {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(&self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::n;

    #[test]
    fn should_include_path_in_display() {
        let mut errors = ParseErrors::new(FieldError::missing(n("foo")));
        errors.merge(
            ParseErrors::invalid("is not a string but a list")
                .prefixed(PathSegment::index(2))
                .prefixed(PathSegment::field(n("bar"))),
        );

        let display = errors.to_string();

        assert!(display.contains("- foo is mandatory but does not exist"));
        assert!(display.contains("- bar[2] is not a string but a list"));
    }

    #[test]
    fn should_print_root_for_top_level_error() {
        let error = FieldError::invalid("is not an object but a list");

        assert_eq!(error.to_string(), "root is not an object but a list");
    }

    #[test]
    fn should_never_collect_empty_errors() {
        assert!(ParseErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn should_find_errors_by_path() {
        let mut errors = ParseErrors::new(FieldError::missing(n("name")));
        errors.merge(ParseErrors::invalid("is negative").prefixed(PathSegment::field(n("age"))));
        let age = SourcePath::from(n("age"));

        let kinds = errors.get_by_path(&age).collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![&ErrorKind::InvalidFieldValue("is negative".to_string())]
        );
        assert_eq!(
            errors.missing_fields().collect::<Vec<_>>(),
            vec![&SourcePath::from(n("name"))]
        );
        assert_eq!(errors.first().field_name(), Some(&n("name")));
    }

    #[test]
    fn should_name_innermost_field() {
        let error = FieldError::invalid("is not a string but a list")
            .prefixed(PathSegment::index(1))
            .prefixed(PathSegment::field(n("hobbies")));

        assert_eq!(error.field_name(), Some(&n("hobbies")));
        assert_eq!(error.path().to_string(), "hobbies[1]");
    }

    #[test]
    fn should_hand_out_errors_in_order() {
        let mut errors = ParseErrors::new(FieldError::missing(n("a")));
        errors.merge(FieldError::missing(n("b")).into());

        let errors = errors.into_vec();

        assert_eq!(
            errors,
            vec![FieldError::missing(n("a")), FieldError::missing(n("b"))]
        );
    }

    #[test]
    fn should_accumulate_in_order() {
        let mut acc = Accumulator::default();

        let first = acc.record(Err::<u8, _>(FieldError::missing(n("a")).into()));
        let second = acc.record(Ok::<_, ParseErrors>(2));
        let third = acc.record(Err::<u8, _>(FieldError::missing(n("c")).into()));
        let errors = acc.into_result(()).unwrap_err();

        assert_eq!((first, second, third), (None, Some(2), None));
        let paths = errors.iter().map(|e| e.path().to_string()).collect::<Vec<_>>();
        assert_eq!(paths, vec!["a", "c"]);
    }
}
