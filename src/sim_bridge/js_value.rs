//! Typed access into the simulation's positional JS arrays.
//!
//! The bridge forwards the site's variables as-is: heterogeneous JSON arrays
//! whose meaning is positional. These helpers pull one field out with an
//! index-tagged error, so a drifted upstream layout is reported instead of
//! silently misread.

use serde_json::Value;
use std::fmt;

#[derive(Debug)]
pub enum DecodeError {
    /// The array is shorter than the layout requires.
    MissingField(usize),
    /// The field exists but holds an unconvertible value.
    WrongType { index: usize, expected: &'static str },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingField(index) => write!(f, "missing positional field {index}"),
            DecodeError::WrongType { index, expected } => {
                write!(f, "positional field {index} is not a {expected}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

fn field(values: &[Value], index: usize) -> Result<&Value, DecodeError> {
    values.get(index).ok_or(DecodeError::MissingField(index))
}

pub fn as_i64(values: &[Value], index: usize) -> Result<i64, DecodeError> {
    field(values, index)?
        .as_i64()
        .ok_or(DecodeError::WrongType { index, expected: "integer" })
}

pub fn as_i32(values: &[Value], index: usize) -> Result<i32, DecodeError> {
    i32::try_from(as_i64(values, index)?)
        .map_err(|_| DecodeError::WrongType { index, expected: "32-bit integer" })
}

pub fn as_usize(values: &[Value], index: usize) -> Result<usize, DecodeError> {
    usize::try_from(as_i64(values, index)?)
        .map_err(|_| DecodeError::WrongType { index, expected: "unsigned integer" })
}

pub fn as_f64(values: &[Value], index: usize) -> Result<f64, DecodeError> {
    field(values, index)?
        .as_f64()
        .ok_or(DecodeError::WrongType { index, expected: "number" })
}

pub fn as_str<'a>(values: &'a [Value], index: usize) -> Result<&'a str, DecodeError> {
    field(values, index)?
        .as_str()
        .ok_or(DecodeError::WrongType { index, expected: "string" })
}

/// Single-character strings; the simulation encodes status designators this way.
pub fn as_char(values: &[Value], index: usize) -> Result<char, DecodeError> {
    let mut chars = as_str(values, index)?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DecodeError::WrongType { index, expected: "single character" }),
    }
}

/// The site mixes JSON booleans and 0/1 flags; accept both.
pub fn as_bool(values: &[Value], index: usize) -> Result<bool, DecodeError> {
    let value = field(values, index)?;
    if let Some(b) = value.as_bool() {
        return Ok(b);
    }
    match value.as_i64() {
        Some(0) => Ok(false),
        Some(_) => Ok(true),
        None => Err(DecodeError::WrongType { index, expected: "boolean" }),
    }
}
