//! Bridge between decoded JSON documents and [`Value`] trees
//!
//! JSON decoding happens elsewhere; this module only maps an already decoded
//! `serde_json::Value` onto the container model and back.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::{MapValue, SequenceValue, Type, Value};
use serde_json::{Map, Number, Value as JsonValue};

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Nil,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => number_to_value(&n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Sequence(SequenceValue::from_items(
                Type::Any,
                items.into_iter().map(Value::from),
            )),
            JsonValue::Object(object) => {
                let mut map = MapValue::new(Type::String, Type::Any);
                for (key, value) in object {
                    map.entries.push((Value::String(key), Value::from(value)));
                }
                Value::Map(map)
            }
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        Value::from(json.clone())
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int64(i)
    } else if let Some(u) = n.as_u64() {
        Value::Uint64(u)
    } else {
        Value::Float64(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn float_to_json(f: f64) -> JsonValue {
    Number::from_f64(f)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

impl Value {
    /// Render this value as JSON
    ///
    /// Structs become objects keyed by field name, pointers become their
    /// target (or `null`), non-finite floats become `null` and non-string map
    /// keys are printed.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Nil => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(v) | Value::Int64(v) => JsonValue::from(*v),
            Value::Int8(v) => JsonValue::from(*v),
            Value::Int16(v) => JsonValue::from(*v),
            Value::Int32(v) => JsonValue::from(*v),
            Value::Uint(v) | Value::Uint64(v) => JsonValue::from(*v),
            Value::Uint8(v) => JsonValue::from(*v),
            Value::Uint16(v) => JsonValue::from(*v),
            Value::Uint32(v) => JsonValue::from(*v),
            Value::Float32(v) => float_to_json(*v as f64),
            Value::Float64(v) => float_to_json(*v),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Map(map) => {
                let mut object = Map::new();
                for (key, value) in &map.entries {
                    let key = match key {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    object.insert(key, value.to_json());
                }
                JsonValue::Object(object)
            }
            Value::Struct(s) => {
                let mut object = Map::new();
                for (name, value) in &s.fields {
                    object.insert(name.clone(), value.to_json());
                }
                JsonValue::Object(object)
            }
            Value::Sequence(seq) => JsonValue::Array(seq.items.iter().map(Value::to_json).collect()),
            Value::Pointer(ptr) => match &ptr.target {
                Some(target) => target.to_json(),
                None => JsonValue::Null,
            },
        }
    }
}
