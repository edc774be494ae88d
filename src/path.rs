//! [`SourcePath`] to locate a rejected value within the parsed input.

use std::{borrow::Cow, convert::Infallible, fmt, num::ParseIntError, str::FromStr};

/// Characters that force a field segment into its quoted form `["name"]`.
const SPECIAL_CHARS: [char; 5] = ['.', '[', ']', '"', '\\'];
const ROOT: &str = "root";

/// Errors parsing a [`SourcePath`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A bare field segment contains a character that requires quoting.
    #[error("segment '{0}' contains one of {SPECIAL_CHARS:?} and must be quoted")]
    InvalidCharInName(String),
    /// A bare field segment must contain at least one character.
    #[error("field name must not be empty")]
    EmptyName,
    /// Incomplete index segment.
    #[error("segment '{0}' does not contain proper brackets")]
    IncompleteIndexSegment(String),
    /// Invalid index in an index segment.
    #[error("invalid index")]
    InvalidIdx(#[from] ParseIntError),
    /// Something other than `.` or `[` follows a closed bracket.
    #[error("unexpected '{0}' after a bracket segment")]
    UnexpectedInput(String),
}

/// The full path from the root of the input to a value.
///
/// Composed of [`PathSegment`]s. The empty path is the root itself and prints
/// as `root`. Field names that would be ambiguous in the dotted form, e.g.
/// `server.port` or `root`, print quoted: `["server.port"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourcePath {
    segments: Vec<PathSegment>,
}

/// A segment of a full [`SourcePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// The segment references a named field of a record.
    Field(FieldName),
    /// The segment references an element of a list by position.
    Index(usize),
}

/// The key of a field in a record.
///
/// Any string is a valid name. Path syntax only matters when a
/// [`SourcePath`] is printed or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName(Cow<'static, str>);

impl SourcePath {
    /// Construct a new, empty path.
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a new segment to the path.
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut new = self.clone();
        new.segments.push(segment);
        new
    }

    /// The path's segments from the root outwards.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True for the path pointing at the input itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if `base` is a prefix of the path at hand.
    ///
    /// For example: `foo.bar` is the base of `foo.bar.baz`.
    pub fn starts_with(&self, base: &Self) -> bool {
        self.segments.starts_with(&base.segments)
    }

    /// Put `segment` in front of all other segments.
    pub(crate) fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }
}

impl From<FieldName> for SourcePath {
    fn from(name: FieldName) -> Self {
        Self {
            segments: vec![PathSegment::Field(name)],
        }
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(ROOT);
        }

        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if needs_quotes(name.as_str()) => {
                    write_quoted(f, name.as_str())?
                }
                PathSegment::Field(name) if position == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for SourcePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ROOT {
            return Ok(Self::new());
        }

        let mut segments = Vec::new();
        let mut rest = s;
        if !rest.starts_with('[') {
            let (name, tail) = split_bare_name(rest)?;
            segments.push(PathSegment::Field(name));
            rest = tail;
        }
        while !rest.is_empty() {
            let (segment, tail) = if let Some(tail) = rest.strip_prefix('.') {
                let (name, tail) = split_bare_name(tail)?;
                (PathSegment::Field(name), tail)
            } else if let Some(tail) = rest.strip_prefix('[') {
                split_bracket(tail)?
            } else {
                return Err(Error::UnexpectedInput(rest.to_string()));
            };
            segments.push(segment);
            rest = tail;
        }

        Ok(Self { segments })
    }
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty() || name == ROOT || name.contains(SPECIAL_CHARS)
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    f.write_str("[\"")?;
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"]")
}

/// Split a bare name off the front of `s`, up to the next `.` or `[`.
fn split_bare_name(s: &str) -> Result<(FieldName, &str), Error> {
    let end = s.find(['.', '[']).unwrap_or(s.len());
    let (name, tail) = s.split_at(end);
    if name.is_empty() {
        Err(Error::EmptyName)
    } else if name.contains(SPECIAL_CHARS) {
        Err(Error::InvalidCharInName(name.to_string()))
    } else {
        Ok((FieldName::from(name), tail))
    }
}

/// Parse `0]` or `"name"]` following an opening bracket.
fn split_bracket(s: &str) -> Result<(PathSegment, &str), Error> {
    let incomplete = || Error::IncompleteIndexSegment(format!("[{s}"));

    let Some(quoted) = s.strip_prefix('"') else {
        let end = s.find(']').ok_or_else(incomplete)?;
        return Ok((PathSegment::Index(s[..end].parse()?), &s[end + 1..]));
    };

    let mut name = String::new();
    let mut chars = quoted.char_indices();
    while let Some((position, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next().ok_or_else(incomplete)?;
                name.push(escaped);
            }
            '"' => {
                let tail = quoted[position + 1..]
                    .strip_prefix(']')
                    .ok_or_else(incomplete)?;
                return Ok((PathSegment::Field(name.into()), tail));
            }
            c => name.push(c),
        }
    }
    Err(incomplete())
}

impl PathSegment {
    /// Construct a field segment.
    pub fn field(name: FieldName) -> Self {
        Self::Field(name)
    }

    /// Construct an index segment.
    pub fn index(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) if needs_quotes(name.as_str()) => {
                write_quoted(f, name.as_str())
            }
            PathSegment::Field(name) => write!(f, "{name}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FieldName {
    /// Create a name from a string literal without copying it.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Access the inner name as a string slice.
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for FieldName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_string()))
    }
}
