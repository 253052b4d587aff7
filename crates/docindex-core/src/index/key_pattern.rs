//! Raw compound key pattern parsing.
//!
//! Patterns are JSON objects mapping field paths to index directions or
//! index types (`{"lastName": 1, "location": "2dsphere"}`). Shell-style
//! single-quoted strings are accepted as well.

use bson::Document;
use serde_json::{Map, Value};
use thiserror::Error as ThisError;

///
/// KeyPatternError
///

#[derive(Debug, ThisError)]
pub enum KeyPatternError {
    #[error("key pattern is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("key pattern must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("key pattern declares no keys")]
    Empty,

    #[error("key pattern has unterminated string literal")]
    UnterminatedString,

    #[error("key pattern value cannot be represented as BSON: {0}")]
    Bson(String),
}

/// Parse a raw key pattern into an ordered keys document.
pub fn parse_key_pattern(raw: &str) -> Result<Document, KeyPatternError> {
    let normalized = normalize_quotes(raw)?;
    let value: Value = serde_json::from_str(&normalized)?;

    let map = match value {
        Value::Object(map) => map,
        other => return Err(KeyPatternError::NotAnObject(json_kind(&other))),
    };
    if map.is_empty() {
        return Err(KeyPatternError::Empty);
    }

    into_document(map)
}

fn into_document(map: Map<String, Value>) -> Result<Document, KeyPatternError> {
    Document::try_from(map).map_err(|err| KeyPatternError::Bson(err.to_string()))
}

// Rewrites single-quoted string literals as double-quoted ones; everything
// outside string literals passes through untouched.
fn normalize_quotes(raw: &str) -> Result<String, KeyPatternError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push('"');
                copy_double_quoted(&mut chars, &mut out)?;
            }
            '\'' => {
                out.push('"');
                copy_single_quoted(&mut chars, &mut out)?;
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn copy_double_quoted(
    chars: &mut std::str::Chars<'_>,
    out: &mut String,
) -> Result<(), KeyPatternError> {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => out.push(chars.next().ok_or(KeyPatternError::UnterminatedString)?),
            '"' => return Ok(()),
            _ => {}
        }
    }

    Err(KeyPatternError::UnterminatedString)
}

fn copy_single_quoted(
    chars: &mut std::str::Chars<'_>,
    out: &mut String,
) -> Result<(), KeyPatternError> {
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next().ok_or(KeyPatternError::UnterminatedString)? {
                // \' needs no escape once the delimiter is a double quote
                '\'' => out.push('\''),
                escaped => {
                    out.push('\\');
                    out.push(escaped);
                }
            },
            '"' => out.push_str("\\\""),
            '\'' => {
                out.push('"');
                return Ok(());
            }
            _ => out.push(c),
        }
    }

    Err(KeyPatternError::UnterminatedString)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
