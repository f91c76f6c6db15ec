//! Error types for path evaluation
//!
//! Only a step against a value that cannot be traversed is an error. A key,
//! field or index that is not there is reported as `Ok(None)` instead.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use thiserror::Error;

/// Path evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// A path step was attempted against a scalar or nil value
    #[error("unable to evaluate `{remaining}` on {found}: not a map, struct or sequence")]
    ShapeMismatch {
        /// Type of the value the step was attempted on
        found: String,
        /// The part of the expression that was not consumed yet
        remaining: String,
    },
}

impl PathError {
    /// Create a shape mismatch error for `value`
    pub fn shape_mismatch(value: &Value, remaining: impl Into<String>) -> Self {
        let found = match value {
            Value::Nil => "nil".to_string(),
            Value::Pointer(ptr) if ptr.is_null() => format!("nil {}", value.type_of()),
            other => other.type_of().to_string(),
        };
        Self::ShapeMismatch {
            found,
            remaining: remaining.into(),
        }
    }

    /// The unconsumed part of the expression
    pub fn remaining(&self) -> &str {
        match self {
            Self::ShapeMismatch { remaining, .. } => remaining,
        }
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}
