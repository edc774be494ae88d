//! Parsers for [`serde_json::Value`] trees.
//!
//! A JSON object is a [`RawRecord`](crate::record::RawRecord), so schemas of
//! these parsers apply to `serde_json::Map` directly. Use [`object()`] to
//! parse an object that is itself a [`Value`], e.g. the document root or a
//! nested object.
//!
//! ```
//! use field_parser::{FieldParser, FieldParserExt, fields, json};
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     hobbies: Vec<String>,
//! }
//!
//! let person = json::object(
//!     fields((
//!         json::string().field("name").mandatory(),
//!         json::list_of(json::string()).field("hobbies").mandatory(),
//!     ))
//!     .map_to(|name, hobbies| Person { name, hobbies })
//!     .nested(),
//! );
//!
//! let input = serde_json::json!({ "name": "b", "hobbies": ["d", ["e"]] });
//! let errors = person.parse(&input).unwrap_err();
//! assert_eq!(
//!     errors.first().to_string(),
//!     "hobbies[1] is not a string but a list"
//! );
//! ```

use serde_json::{Map, Value};

use crate::{
    error::{Accumulator, ParseErrors, ParseResult},
    parser::FieldParser,
    path::PathSegment,
};

/// Parser returned by [`string()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Str;

/// Parser returned by [`integer()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

/// Parser returned by [`unsigned()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsigned;

/// Parser returned by [`float()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

/// Parser returned by [`boolean()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

/// Parser returned by [`value()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

/// Parser returned by [`nullable()`].
#[derive(Debug, Clone)]
pub struct Nullable<P> {
    parser: P,
}

/// Parser returned by [`list_of()`].
#[derive(Debug, Clone)]
pub struct ListOf<P> {
    element: P,
}

/// Parser returned by [`object()`].
#[derive(Debug, Clone)]
pub struct ObjectOf<P> {
    record: P,
}

/// A JSON string.
pub fn string() -> Str {
    Str
}

/// A JSON number without fraction that fits an `i64`.
pub fn integer() -> Integer {
    Integer
}

/// A JSON number without fraction that fits an `u64`.
pub fn unsigned() -> Unsigned {
    Unsigned
}

/// Any JSON number.
pub fn float() -> Float {
    Float
}

/// A JSON boolean.
pub fn boolean() -> Boolean {
    Boolean
}

/// Any JSON value, taken as is.
pub fn value() -> Any {
    Any
}

/// Accept `null` as `None`, parse everything else with `parser`.
///
/// Without this, `null` is a present value that most parsers reject.
pub fn nullable<P>(parser: P) -> Nullable<P>
where
    P: FieldParser<Raw = Value>,
{
    Nullable { parser }
}

/// A JSON array whose elements are parsed by `element`.
///
/// All elements are parsed. Errors are reported for every failing element
/// with the element's index as path.
pub fn list_of<P>(element: P) -> ListOf<P>
where
    P: FieldParser<Raw = Value>,
{
    ListOf { element }
}

/// A JSON object parsed by a record parser, e.g. a
/// [`Mapper::nested()`](crate::mapper::Mapper::nested).
pub fn object<P>(record: P) -> ObjectOf<P>
where
    P: FieldParser<Raw = Map<String, Value>>,
{
    ObjectOf { record }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn mismatch(expected: &str, found: &Value) -> ParseErrors {
    ParseErrors::invalid(format!("is not {expected} but {}", describe(found)))
}

impl FieldParser for Str {
    type Raw = Value;
    type Output = String;

    fn parse(&self, raw: &Value) -> ParseResult<String> {
        match raw {
            Value::String(string) => Ok(string.clone()),
            other => Err(mismatch("a string", other)),
        }
    }
}

impl FieldParser for Integer {
    type Raw = Value;
    type Output = i64;

    fn parse(&self, raw: &Value) -> ParseResult<i64> {
        match raw {
            Value::Number(number) if number.is_u64() => number.as_i64().ok_or_else(|| {
                ParseErrors::invalid(format!("is too large for a signed integer: {number}"))
            }),
            Value::Number(number) => number
                .as_i64()
                .ok_or_else(|| ParseErrors::invalid(format!("is not an integer but {number}"))),
            other => Err(mismatch("an integer", other)),
        }
    }
}

impl FieldParser for Unsigned {
    type Raw = Value;
    type Output = u64;

    fn parse(&self, raw: &Value) -> ParseResult<u64> {
        match raw {
            Value::Number(number) => number.as_u64().ok_or_else(|| {
                ParseErrors::invalid(format!("is not an unsigned integer but {number}"))
            }),
            other => Err(mismatch("an unsigned integer", other)),
        }
    }
}

impl FieldParser for Float {
    type Raw = Value;
    type Output = f64;

    fn parse(&self, raw: &Value) -> ParseResult<f64> {
        match raw {
            Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| ParseErrors::invalid(format!("is not a finite number but {number}"))),
            other => Err(mismatch("a number", other)),
        }
    }
}

impl FieldParser for Boolean {
    type Raw = Value;
    type Output = bool;

    fn parse(&self, raw: &Value) -> ParseResult<bool> {
        match raw {
            Value::Bool(flag) => Ok(*flag),
            other => Err(mismatch("a boolean", other)),
        }
    }
}

impl FieldParser for Any {
    type Raw = Value;
    type Output = Value;

    fn parse(&self, raw: &Value) -> ParseResult<Value> {
        Ok(raw.clone())
    }
}

impl<P> FieldParser for Nullable<P>
where
    P: FieldParser<Raw = Value>,
{
    type Raw = Value;
    type Output = Option<P::Output>;

    fn parse(&self, raw: &Value) -> ParseResult<Self::Output> {
        match raw {
            Value::Null => Ok(None),
            other => self.parser.parse(other).map(Some),
        }
    }
}

impl<P> FieldParser for ListOf<P>
where
    P: FieldParser<Raw = Value>,
{
    type Raw = Value;
    type Output = Vec<P::Output>;

    fn parse(&self, raw: &Value) -> ParseResult<Self::Output> {
        let Value::Array(elements) = raw else {
            return Err(mismatch("a list", raw));
        };

        let mut errors = Accumulator::default();
        let values = elements
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                let result = self
                    .element
                    .parse(element)
                    .map_err(|element_errors| element_errors.prefixed(PathSegment::Index(index)));
                errors.record(result)
            })
            .collect();
        errors.into_result(values)
    }
}

impl<P> FieldParser for ObjectOf<P>
where
    P: FieldParser<Raw = Map<String, Value>>,
{
    type Raw = Value;
    type Output = P::Output;

    fn parse(&self, raw: &Value) -> ParseResult<P::Output> {
        match raw {
            Value::Object(map) => self.record.parse(map),
            other => Err(mismatch("an object", other)),
        }
    }
}
