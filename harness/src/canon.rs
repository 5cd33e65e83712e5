//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. No whitespace (`{"a":1,"b":2}`).
//! 3. Numbers must be integers. Floats are rejected so that no digest ever
//!    depends on float formatting.
//! 4. Scalars and strings are written with `serde_json`'s escaping.

use serde::Serialize;
use serde_json::Value;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
    /// The value could not be converted to JSON.
    #[error("cannot serialize to JSON: {detail}")]
    Serialize { detail: String },
}

impl From<serde_json::Error> for CanonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize {
            detail: e.to_string(),
        }
    }
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is a float.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = Vec::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Serialize `value` through `serde_json` and canonicalize the result.
///
/// # Errors
///
/// As [`canonical_json_bytes`], plus [`CanonError::Serialize`] if `value`
/// does not map to JSON.
pub fn canonical_json_of<S: Serialize + ?Sized>(value: &S) -> Result<Vec<u8>, CanonError> {
    canonical_json_bytes(&serde_json::to_value(value)?)
}

fn write_value(out: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Number(n) if n.is_f64() => Err(CanonError::NonIntegerNumber { raw: n.to_string() }),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item)?;
            }
            out.push(b']');
            Ok(())
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_value(out, item)?;
            }
            out.push(b'}');
            Ok(())
        }
        scalar => Ok(serde_json::to_writer(&mut *out, scalar)?),
    }
}
