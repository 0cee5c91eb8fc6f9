//! # Book Model
//!
//! The `Book` entity and the explicit decoder that turns one untyped wire
//! object into a `Book`.
//!
//! The API payload is never deserialized straight into `Book`. Each field is
//! pulled out and checked by `decode_book`, so the internal representation
//! does not follow whatever shape the server happens to send, and a malformed
//! entry fails loudly instead of producing a half-filled book.

use serde_json::{Map, Value};
use std::fmt;

/// Highest star rating a book can carry.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    /// Assigned by the API. Never generated client-side.
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Kept as the string the API stores, e.g. "1999" or "c. 1850".
    pub year: String,
    pub read: bool,
    pub rating: u8,
}

/// Why a wire object could not be turned into a `Book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The entry is not a JSON object.
    NotAnObject,
    /// A required field is absent (or `null`).
    MissingField(&'static str),
    /// A field is present but has the wrong JSON type.
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    /// The rating is outside 0..=5.
    RatingOutOfRange(i64),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::NotAnObject => write!(f, "book entry is not an object"),
            DecodeError::MissingField(field) => write!(f, "book is missing field `{field}`"),
            DecodeError::InvalidType { field, expected } => {
                write!(f, "book field `{field}` must be {expected}")
            }
            DecodeError::RatingOutOfRange(r) => {
                write!(f, "book rating {r} is outside 0..={MAX_RATING}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode one book from its wire representation.
///
/// Required fields: `id` (integer), `title`, `author`, `year` (strings),
/// `read` (boolean, number, or numeric string; nonzero is `true`) and
/// `rating` (integer in 0..=5). Unknown fields such as `userId` are ignored.
pub fn decode_book(raw: &Value) -> Result<Book, DecodeError> {
    let obj = raw.as_object().ok_or(DecodeError::NotAnObject)?;

    let id = required(obj, "id")?
        .as_i64()
        .ok_or(DecodeError::InvalidType {
            field: "id",
            expected: "an integer",
        })?;

    let rating = required(obj, "rating")?
        .as_i64()
        .ok_or(DecodeError::InvalidType {
            field: "rating",
            expected: "an integer",
        })?;
    if !(0..=i64::from(MAX_RATING)).contains(&rating) {
        return Err(DecodeError::RatingOutOfRange(rating));
    }

    Ok(Book {
        id,
        title: string_field(obj, "title")?,
        author: string_field(obj, "author")?,
        year: string_field(obj, "year")?,
        read: truthy(required(obj, "read")?).ok_or(DecodeError::InvalidType {
            field: "read",
            expected: "a boolean or number",
        })?,
        rating: rating as u8,
    })
}

/// Decode every entry, failing on the first malformed one.
pub fn decode_books(raw: &[Value]) -> Result<Vec<Book>, DecodeError> {
    raw.iter().map(decode_book).collect()
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(field)),
        Some(v) => Ok(v),
    }
}

fn string_field(obj: &Map<String, Value>, field: &'static str) -> Result<String, DecodeError> {
    required(obj, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(DecodeError::InvalidType {
            field,
            expected: "a string",
        })
}

/// Normalizes the `read` flag: the server has sent both `true`/`false` and
/// `1`/`0` over time.
fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" | "" => Some(false),
            other => other.parse::<f64>().ok().map(|f| f != 0.0),
        },
        _ => None,
    }
}
