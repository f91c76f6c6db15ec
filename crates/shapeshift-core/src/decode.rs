//! Path evaluation followed by conversion
//!
//! Decoding pulls a sub-value out of a generic tree with a path expression
//! and converts it into a caller-supplied destination. A path that finds
//! nothing yields nil, which is then converted like any other source; shape
//! errors from the evaluator and conversion errors are returned as they are.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::convert::{default_converter, Converter};
use crate::path::{evaluate, PathOptions};
use crate::value::{Typed, Value};
use crate::Result;

static NIL: Value = Value::Nil;

impl Converter {
    /// Evaluate `expression` against `data` and convert the result into `dest`
    pub fn decode_with(
        &self,
        data: &Value,
        expression: &str,
        options: impl Into<PathOptions>,
        dest: &mut Value,
    ) -> Result<()> {
        let found = evaluate(data, expression, options)?;
        if found.is_none() {
            log::trace!("`{}` not found, decoding nil", expression);
        }
        self.convert(found.unwrap_or(&NIL), dest)?;
        Ok(())
    }

    /// Evaluate `expression` and convert the result into a fresh `T`
    pub fn decode_as<T: Typed>(&self, data: &Value, expression: &str) -> Result<T> {
        let mut dest = T::value_type().zero();
        self.decode_with(data, expression, PathOptions::default(), &mut dest)?;
        Ok(T::from_value(dest)?)
    }
}

/// Decode with the default converter and no path options
///
/// # Examples
///
/// ```
/// use shapeshift_core::{decode, Value};
/// use serde_json::json;
///
/// let data = Value::from(json!({"UserID": "10"}));
/// let mut id = Value::Uint32(0);
/// decode(&data, "UserID", &mut id).unwrap();
/// assert_eq!(id, Value::Uint32(10));
/// ```
pub fn decode(data: &Value, expression: &str, dest: &mut Value) -> Result<()> {
    default_converter().decode_with(data, expression, PathOptions::default(), dest)
}

/// Decode from a `serde_json` document
pub fn decode_json(json: &serde_json::Value, expression: &str, dest: &mut Value) -> Result<()> {
    decode(&Value::from(json), expression, dest)
}

/// Decode from JSON text
pub fn decode_json_str(text: &str, expression: &str, dest: &mut Value) -> Result<()> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    decode_json(&json, expression, dest)
}

/// Decode into a fresh `T` with the default converter
pub fn decode_as<T: Typed>(data: &Value, expression: &str) -> Result<T> {
    default_converter().decode_as(data, expression)
}
