//! Runtime type descriptors for dynamic values
//!
//! Every [`Value`] carries enough information to report its [`Type`], and
//! every `Type` can allocate its zero value. The converter relies on both:
//! recipes are matched against types, and destinations that do not exist yet
//! are allocated from them.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::{MapValue, PointerValue, SequenceValue, StructValue, Value};
use std::fmt;

/// Runtime type of a [`Value`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Untyped slot; its zero value is [`Value::Nil`]
    Any,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Struct(StructType),
    Slice(Box<Type>),
    Array(Box<Type>, usize),
    Pointer(Box<Type>),
}

/// Declared layout of a struct type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    /// Struct name, used for display only
    pub name: String,
    /// Field names and types in declaration order
    pub fields: Vec<(String, Type)>,
}

impl StructType {
    /// Create an empty struct type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, name: impl Into<String>, field_type: Type) -> Self {
        self.fields.push((name.into(), field_type));
        self
    }
}

/// Every scalar type, in the order the built-in recipes are registered
pub const SCALAR_TYPES: [Type; 14] = [
    Type::Int,
    Type::Int8,
    Type::Int16,
    Type::Int32,
    Type::Int64,
    Type::Uint,
    Type::Uint8,
    Type::Uint16,
    Type::Uint32,
    Type::Uint64,
    Type::Float32,
    Type::Float64,
    Type::Bool,
    Type::String,
];

impl Type {
    /// Shorthand for `map[key]value`
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Shorthand for `[]elem`
    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    /// Shorthand for `[len]elem`
    pub fn array(elem: Type, len: usize) -> Self {
        Type::Array(Box::new(elem), len)
    }

    /// Shorthand for `*pointee`
    pub fn pointer(pointee: Type) -> Self {
        Type::Pointer(Box::new(pointee))
    }

    /// Whether this is one of the scalar types (string included)
    pub fn is_scalar(&self) -> bool {
        SCALAR_TYPES.contains(self)
    }

    /// Allocate the zero value of this type
    pub fn zero(&self) -> Value {
        match self {
            Type::Any => Value::Nil,
            Type::Bool => Value::Bool(false),
            Type::Int => Value::Int(0),
            Type::Int8 => Value::Int8(0),
            Type::Int16 => Value::Int16(0),
            Type::Int32 => Value::Int32(0),
            Type::Int64 => Value::Int64(0),
            Type::Uint => Value::Uint(0),
            Type::Uint8 => Value::Uint8(0),
            Type::Uint16 => Value::Uint16(0),
            Type::Uint32 => Value::Uint32(0),
            Type::Uint64 => Value::Uint64(0),
            Type::Float32 => Value::Float32(0.0),
            Type::Float64 => Value::Float64(0.0),
            Type::String => Value::String(String::new()),
            Type::Map { key, value } => {
                Value::Map(MapValue::new((**key).clone(), (**value).clone()))
            }
            Type::Struct(layout) => Value::Struct(StructValue {
                name: layout.name.clone(),
                fields: layout
                    .fields
                    .iter()
                    .map(|(name, field_type)| (name.clone(), field_type.zero()))
                    .collect(),
            }),
            Type::Slice(elem) => Value::Sequence(SequenceValue::slice((**elem).clone())),
            Type::Array(elem, len) => Value::Sequence(SequenceValue {
                elem_type: (**elem).clone(),
                len: Some(*len),
                items: (0..*len).map(|_| elem.zero()).collect(),
            }),
            Type::Pointer(pointee) => Value::Pointer(PointerValue::null((**pointee).clone())),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Int8 => write!(f, "int8"),
            Type::Int16 => write!(f, "int16"),
            Type::Int32 => write!(f, "int32"),
            Type::Int64 => write!(f, "int64"),
            Type::Uint => write!(f, "uint"),
            Type::Uint8 => write!(f, "uint8"),
            Type::Uint16 => write!(f, "uint16"),
            Type::Uint32 => write!(f, "uint32"),
            Type::Uint64 => write!(f, "uint64"),
            Type::Float32 => write!(f, "float32"),
            Type::Float64 => write!(f, "float64"),
            Type::String => write!(f, "string"),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Struct(layout) => write!(f, "struct {}", layout.name),
            Type::Slice(elem) => write!(f, "[]{}", elem),
            Type::Array(elem, len) => write!(f, "[{}]{}", len, elem),
            Type::Pointer(pointee) => write!(f, "*{}", pointee),
        }
    }
}
