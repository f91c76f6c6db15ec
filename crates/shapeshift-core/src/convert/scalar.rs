//! Scalar coercion rules
//!
//! Every pair of scalar types converts through a single generic routine:
//! numbers cast with truncation, numbers are `true` when non-zero, booleans
//! are `1`/`0`, integers print in base 10, floats print with six decimals,
//! and strings parse as numeric literals. Integer literals accept `0x`,
//! `0o`, `0b` and leading-`0` octal prefixes as well as `_` digit
//! separators, and the empty string parses as zero.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::value::{Type, Value};
use std::num::IntErrorKind;
use thiserror::Error;

/// Failure to coerce one scalar into another
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScalarError {
    /// Input is not a literal of the requested kind
    #[error("parsing {input:?}: invalid syntax")]
    Syntax { input: String },

    /// Literal does not fit in the requested width
    #[error("parsing {input:?}: value out of range")]
    Range { input: String },

    /// One side is not a scalar
    #[error("cannot coerce {from} to {to}")]
    Unsupported { from: Type, to: Type },
}

impl ScalarError {
    fn syntax(input: &str) -> Self {
        Self::Syntax {
            input: input.to_string(),
        }
    }

    fn range(input: &str) -> Self {
        Self::Range {
            input: input.to_string(),
        }
    }
}

/// Borrowed view of a scalar value
#[derive(Debug, Clone, Copy)]
enum ScalarRef<'a> {
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(&'a str),
}

impl<'a> ScalarRef<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        Some(match value {
            Value::Bool(v) => Self::Bool(*v),
            Value::Int(v) | Value::Int64(v) => Self::Signed(*v),
            Value::Int8(v) => Self::Signed(*v as i64),
            Value::Int16(v) => Self::Signed(*v as i64),
            Value::Int32(v) => Self::Signed(*v as i64),
            Value::Uint(v) | Value::Uint64(v) => Self::Unsigned(*v),
            Value::Uint8(v) => Self::Unsigned(*v as u64),
            Value::Uint16(v) => Self::Unsigned(*v as u64),
            Value::Uint32(v) => Self::Unsigned(*v as u64),
            Value::Float32(v) => Self::Float(*v as f64),
            Value::Float64(v) => Self::Float(*v),
            Value::String(s) => Self::Text(s),
            _ => return None,
        })
    }
}

/// Numeric destination types
trait Numeric: Copy {
    fn from_i64(v: i64) -> Self;
    fn from_u64(v: u64) -> Self;
    fn from_f64(v: f64) -> Self;
    fn from_bool(v: bool) -> Self;
    fn parse(input: &str) -> Result<Self, ScalarError>;
}

macro_rules! impl_numeric_int {
    ($parse:ident; $($ty:ty => $bits:expr),* $(,)?) => {
        $(
            impl Numeric for $ty {
                fn from_i64(v: i64) -> Self {
                    v as $ty
                }

                fn from_u64(v: u64) -> Self {
                    v as $ty
                }

                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                fn from_bool(v: bool) -> Self {
                    v as $ty
                }

                fn parse(input: &str) -> Result<Self, ScalarError> {
                    if input.is_empty() {
                        return Ok(0);
                    }
                    $parse(input, $bits).map(|v| v as $ty)
                }
            }
        )*
    };
}

impl_numeric_int!(parse_signed; i8 => 8, i16 => 16, i32 => 32, i64 => 64);
impl_numeric_int!(parse_unsigned; u8 => 8, u16 => 16, u32 => 32, u64 => 64);

macro_rules! impl_numeric_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                fn from_i64(v: i64) -> Self {
                    v as $ty
                }

                fn from_u64(v: u64) -> Self {
                    v as $ty
                }

                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                fn from_bool(v: bool) -> Self {
                    if v { 1.0 } else { 0.0 }
                }

                fn parse(input: &str) -> Result<Self, ScalarError> {
                    input.parse::<$ty>().map_err(|_| ScalarError::syntax(input))
                }
            }
        )*
    };
}

impl_numeric_float!(f32, f64);

fn numeric<T: Numeric>(src: ScalarRef<'_>) -> Result<T, ScalarError> {
    Ok(match src {
        ScalarRef::Bool(v) => T::from_bool(v),
        ScalarRef::Signed(v) => T::from_i64(v),
        ScalarRef::Unsigned(v) => T::from_u64(v),
        ScalarRef::Float(v) => T::from_f64(v),
        ScalarRef::Text(s) => T::parse(s)?,
    })
}

fn truthy(src: ScalarRef<'_>) -> Result<bool, ScalarError> {
    Ok(match src {
        ScalarRef::Bool(v) => v,
        ScalarRef::Signed(v) => v != 0,
        ScalarRef::Unsigned(v) => v != 0,
        ScalarRef::Float(v) => v != 0.0,
        ScalarRef::Text(s) => parse_bool(s)?,
    })
}

fn text(src: ScalarRef<'_>) -> String {
    match src {
        ScalarRef::Bool(v) => v.to_string(),
        ScalarRef::Signed(v) => v.to_string(),
        ScalarRef::Unsigned(v) => v.to_string(),
        ScalarRef::Float(v) => format_float(v),
        ScalarRef::Text(s) => s.to_string(),
    }
}

/// Coerce scalar `src` into the scalar type currently held by `dst`
pub fn coerce(src: &Value, dst: &mut Value) -> Result<(), ScalarError> {
    let unsupported = |dst: &Value| ScalarError::Unsupported {
        from: src.type_of(),
        to: dst.type_of(),
    };
    let Some(scalar) = ScalarRef::of(src) else {
        return Err(unsupported(dst));
    };

    match dst {
        Value::Bool(slot) => *slot = truthy(scalar)?,
        Value::Int(slot) | Value::Int64(slot) => *slot = numeric(scalar)?,
        Value::Int8(slot) => *slot = numeric(scalar)?,
        Value::Int16(slot) => *slot = numeric(scalar)?,
        Value::Int32(slot) => *slot = numeric(scalar)?,
        Value::Uint(slot) | Value::Uint64(slot) => *slot = numeric(scalar)?,
        Value::Uint8(slot) => *slot = numeric(scalar)?,
        Value::Uint16(slot) => *slot = numeric(scalar)?,
        Value::Uint32(slot) => *slot = numeric(scalar)?,
        Value::Float32(slot) => *slot = numeric(scalar)?,
        Value::Float64(slot) => *slot = numeric(scalar)?,
        Value::String(slot) => *slot = text(scalar),
        other => return Err(unsupported(other)),
    }
    Ok(())
}

/// Format a float with six decimals; non-finite values print as `NaN`,
/// `+Inf` and `-Inf`
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf" } else { "-Inf" }.to_string()
    } else {
        format!("{:.6}", v)
    }
}

/// Parse a boolean literal
pub fn parse_bool(input: &str) -> Result<bool, ScalarError> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ScalarError::syntax(input)),
    }
}

/// Parse a signed integer literal that must fit in `bits` bits
pub fn parse_signed(input: &str, bits: u32) -> Result<i64, ScalarError> {
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let magnitude = parse_magnitude(input, digits)?;
    let limit = 1u64 << (bits - 1);
    if negative {
        if magnitude > limit {
            return Err(ScalarError::range(input));
        }
        Ok(0i64.wrapping_sub(magnitude as i64))
    } else {
        if magnitude >= limit {
            return Err(ScalarError::range(input));
        }
        Ok(magnitude as i64)
    }
}

/// Parse an unsigned integer literal that must fit in `bits` bits
///
/// No sign is accepted.
pub fn parse_unsigned(input: &str, bits: u32) -> Result<u64, ScalarError> {
    let magnitude = parse_magnitude(input, input)?;
    if bits < 64 && magnitude >= 1u64 << bits {
        return Err(ScalarError::range(input));
    }
    Ok(magnitude)
}

fn parse_magnitude(input: &str, digits: &str) -> Result<u64, ScalarError> {
    let (radix, body, prefixed) = if let Some(rest) = strip_prefix_ci(digits, "0x") {
        (16, rest, true)
    } else if let Some(rest) = strip_prefix_ci(digits, "0b") {
        (2, rest, true)
    } else if let Some(rest) = strip_prefix_ci(digits, "0o") {
        (8, rest, true)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..], true)
    } else {
        (10, digits, false)
    };

    if body.contains('_') && !underscores_ok(body, prefixed) {
        return Err(ScalarError::syntax(input));
    }
    let cleaned: String = body.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(ScalarError::syntax(input));
    }

    u64::from_str_radix(&cleaned, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => ScalarError::range(input),
        _ => ScalarError::syntax(input),
    })
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&s[prefix.len()..]),
        _ => None,
    }
}

/// `_` must sit between digits, or directly after a base prefix
fn underscores_ok(body: &str, prefixed: bool) -> bool {
    if body.ends_with('_') || body.contains("__") {
        return false;
    }
    prefixed || !body.starts_with('_')
}
