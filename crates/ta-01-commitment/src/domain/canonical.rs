//! # Canonicalizer
//!
//! Deterministic serialization of a structured payload.
//!
//! The canonical form is compact JSON text:
//! - mapping keys sorted by their raw UTF-8 bytes, duplicates rejected
//! - arrays in their original order
//! - no whitespace anywhere
//! - integers in decimal; finite floats as JavaScript's `JSON.stringify`
//!   prints them: shortest round-trip digits, `4.0` as `4`, fixed notation
//!   below `1e21` and exponent notation (`1e+21`, `1.5e-7`) outside
//!   `[1e-6, 1e21)`
//!
//! Writers and independent verifiers must reproduce these bytes exactly.

use super::errors::CanonicalizationError;
use serde::Serialize;
use shared_types::EventPayload;

/// Maximum nesting depth accepted by the canonicalizer.
pub const MAX_DEPTH: usize = 128;

/// Numeric scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanonicalNumber {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    UInt(u64),
    /// IEEE-754 double. Must be finite to canonicalize.
    Float(f64),
}

/// Tagged value tree accepted by the canonicalizer.
///
/// `Map` keeps entries in caller order; sorting happens at serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Number(CanonicalNumber),
    String(String),
    Array(Vec<CanonicalValue>),
    Map(Vec<(String, CanonicalValue)>),
}

impl CanonicalValue {
    /// Build a mapping from `(key, value)` pairs.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, CanonicalValue)>,
        K: Into<String>,
    {
        CanonicalValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Integer scalar.
    pub fn int(value: i64) -> Self {
        CanonicalValue::Number(CanonicalNumber::Int(value))
    }

    /// Float scalar.
    pub fn float(value: f64) -> Self {
        CanonicalValue::Number(CanonicalNumber::Float(value))
    }

    /// String scalar.
    pub fn string(value: impl Into<String>) -> Self {
        CanonicalValue::String(value.into())
    }

    /// Build a value tree from any `Serialize` type.
    ///
    /// Non-finite floats serialize to `null` through `serde_json`; build the
    /// tree directly when they must be rejected instead.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, CanonicalizationError> {
        serde_json::to_value(value)
            .map(CanonicalValue::from)
            .map_err(|e| CanonicalizationError::Unsupported(e.to_string()))
    }
}

impl From<&serde_json::Value> for CanonicalValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CanonicalValue::Null,
            Value::Bool(b) => CanonicalValue::Bool(*b),
            Value::Number(n) => CanonicalValue::Number(if let Some(i) = n.as_i64() {
                CanonicalNumber::Int(i)
            } else if let Some(u) = n.as_u64() {
                CanonicalNumber::UInt(u)
            } else {
                CanonicalNumber::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
            Value::String(s) => CanonicalValue::String(s.clone()),
            Value::Array(items) => CanonicalValue::Array(items.iter().map(Into::into).collect()),
            Value::Object(map) => CanonicalValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), CanonicalValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for CanonicalValue {
    fn from(value: serde_json::Value) -> Self {
        CanonicalValue::from(&value)
    }
}

impl From<&serde_json::Map<String, serde_json::Value>> for CanonicalValue {
    fn from(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        CanonicalValue::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), CanonicalValue::from(v)))
                .collect(),
        )
    }
}

/// The committed shape of an event: `{batchId, data, eventType}`.
pub fn canonical_payload(payload: &EventPayload) -> CanonicalValue {
    CanonicalValue::map([
        ("batchId", CanonicalValue::string(payload.batch_id.to_hex())),
        ("eventType", CanonicalValue::string(payload.event_type.as_str())),
        ("data", CanonicalValue::from(&payload.data)),
    ])
}

/// Canonical bytes of `value`.
///
/// # Errors
///
/// `CanonicalizationError` when any member has no defined serialization.
pub fn canonicalize(value: &CanonicalValue) -> Result<Vec<u8>, CanonicalizationError> {
    canonicalize_to_string(value).map(String::into_bytes)
}

/// Canonical form of `value` as text.
pub fn canonicalize_to_string(value: &CanonicalValue) -> Result<String, CanonicalizationError> {
    let mut out = String::new();
    write_value(value, 0, &mut out)?;
    Ok(out)
}

fn write_value(
    value: &CanonicalValue,
    depth: usize,
    out: &mut String,
) -> Result<(), CanonicalizationError> {
    if depth > MAX_DEPTH {
        return Err(CanonicalizationError::DepthExceeded { max: MAX_DEPTH });
    }

    match value {
        CanonicalValue::Null => out.push_str("null"),
        CanonicalValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        CanonicalValue::Number(n) => write_number(n, out)?,
        CanonicalValue::String(s) => write_string(s, out),
        CanonicalValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, depth + 1, out)?;
            }
            out.push(']');
        }
        CanonicalValue::Map(entries) => {
            let mut sorted: Vec<&(String, CanonicalValue)> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            if let Some(pair) = sorted.windows(2).find(|pair| pair[0].0 == pair[1].0) {
                return Err(CanonicalizationError::DuplicateKey(pair[0].0.clone()));
            }

            out.push('{');
            for (i, entry) in sorted.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(&entry.0, out);
                out.push(':');
                write_value(&entry.1, depth + 1, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_number(n: &CanonicalNumber, out: &mut String) -> Result<(), CanonicalizationError> {
    match *n {
        CanonicalNumber::Int(i) => out.push_str(&i.to_string()),
        CanonicalNumber::UInt(u) => out.push_str(&u.to_string()),
        CanonicalNumber::Float(f) => {
            if !f.is_finite() {
                return Err(CanonicalizationError::NonFiniteNumber);
            }
            write_float(f, out);
        }
    }
    Ok(())
}

/// ECMAScript `Number::toString` for a finite float, the form signing
/// clients emit through `JSON.stringify`.
///
/// Fixed notation for magnitudes in `[1e-6, 1e21)`, exponent notation
/// (`1e+21`, `1.5e-7`) outside it.
fn write_float(f: f64, out: &mut String) {
    if f == 0.0 {
        // Also folds -0.0 into "0".
        out.push('0');
        return;
    }
    if f < 0.0 {
        out.push('-');
    }

    // `{:e}` yields the shortest round-tripping digits, e.g. "1.5e-7".
    let scientific = format!("{:e}", f.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(n.unsigned_abs() as usize));
        out.push_str(&digits);
    } else {
        let (lead, rest) = digits.split_at(1);
        out.push_str(lead);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if n > 0 { '+' } else { '-' });
        out.push_str(&(n - 1).unsigned_abs().to_string());
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
