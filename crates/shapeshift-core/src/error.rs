//! Error types for the Shapeshift core library
//!
//! Each module defines its own error enum with `thiserror`; this module ties
//! them together into the crate-wide [`Error`] used by operations that span
//! more than one module, such as decoding.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::convert::ConversionError;
use crate::path::PathError;
use thiserror::Error;

/// Main error type for Shapeshift operations
#[derive(Error, Debug)]
pub enum Error {
    /// Path evaluation errors
    #[error("Path evaluation failed: {0}")]
    Path(#[source] PathError),

    /// Value conversion errors
    #[error("Conversion failed: {0}")]
    Conversion(#[source] ConversionError),

    /// JSON parsing errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The conversion error, if this is one
    pub fn as_conversion(&self) -> Option<&ConversionError> {
        match self {
            Error::Conversion(err) => Some(err),
            _ => None,
        }
    }

    /// The path error, if this is one
    pub fn as_path(&self) -> Option<&PathError> {
        match self {
            Error::Path(err) => Some(err),
            _ => None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Type, Value};

    #[test]
    fn test_error_display() {
        let err = Error::from(PathError::shape_mismatch(&Value::Int(1), "A"));
        assert_eq!(
            err.to_string(),
            "Path evaluation failed: unable to evaluate `A` on int: not a map, struct or sequence"
        );
        assert!(err.as_path().is_some());
        assert!(err.as_conversion().is_none());
    }

    #[test]
    fn test_conversion_error_wraps() {
        let err = Error::from(ConversionError::NoRecipeFound {
            from: Type::String,
            to: Type::Bool,
        });
        assert_eq!(
            err.to_string(),
            "Conversion failed: no recipe to convert string to bool"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_error() {
        let err = Error::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
