//! Error types for value conversion
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::value::Type;
use thiserror::Error;

/// Errors that can occur while converting one value into another
#[derive(Error, Debug)]
pub enum ConversionError {
    /// No recipe matches the pair and neither side is a pointer to unwrap
    #[error("no recipe to convert {from} to {to}")]
    NoRecipeFound { from: Type, to: Type },

    /// A recipe matched but reported a failure
    #[error("unable to convert {from} to {to}: {source}")]
    ConversionFailed {
        from: Type,
        to: Type,
        #[source]
        source: anyhow::Error,
    },

    /// A source key or field has no counterpart in the destination struct
    #[error("unknown field `{field}` in struct {target}")]
    UnknownField { field: String, target: String },

    /// The destination given to a pointer-only entry point cannot be written through
    #[error("destination must be a non-nil pointer, found {found}")]
    DestinationNotWritable { found: Type },

    /// A converted value did not have the shape a typed accessor expected
    #[error("expected a value of type {expected}, found {found}")]
    UnexpectedValue { expected: Type, found: Type },
}

impl ConversionError {
    /// Innermost conversion error, looking through nested recipe failures
    ///
    /// Recipes that convert children report the child's error as their own
    /// failure, so a deeply nested problem arrives wrapped once per level.
    pub fn root_cause(&self) -> &ConversionError {
        let mut current = self;
        while let ConversionError::ConversionFailed { source, .. } = current {
            match source.downcast_ref::<ConversionError>() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// The non-conversion error at the bottom of the chain, if it is an `E`
    pub fn find_cause<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self.root_cause() {
            ConversionError::ConversionFailed { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Whether the innermost failure is an unknown struct field
    pub fn is_unknown_field(&self) -> bool {
        matches!(self.root_cause(), ConversionError::UnknownField { .. })
    }
}

impl From<ConversionError> for crate::Error {
    fn from(err: ConversionError) -> Self {
        crate::Error::Conversion(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::scalar::ScalarError;

    #[test]
    fn test_root_cause_unwraps_nested_failures() {
        let inner = ConversionError::UnknownField {
            field: "Nmae".to_string(),
            target: "User".to_string(),
        };
        let outer = ConversionError::ConversionFailed {
            from: Type::map(Type::String, Type::Any),
            to: Type::slice(Type::Any),
            source: ConversionError::ConversionFailed {
                from: Type::map(Type::String, Type::Any),
                to: Type::Any,
                source: inner.into(),
            }
            .into(),
        };

        assert!(outer.is_unknown_field());
        assert!(matches!(
            outer.root_cause(),
            ConversionError::UnknownField { field, .. } if field == "Nmae"
        ));
    }

    #[test]
    fn test_find_cause_reaches_scalar_error() {
        let err = ConversionError::ConversionFailed {
            from: Type::String,
            to: Type::Int,
            source: ScalarError::Syntax {
                input: "x".to_string(),
            }
            .into(),
        };
        assert_eq!(
            err.find_cause::<ScalarError>(),
            Some(&ScalarError::Syntax {
                input: "x".to_string()
            })
        );
        assert!(!err.is_unknown_field());
    }

    #[test]
    fn test_messages() {
        let err = ConversionError::NoRecipeFound {
            from: Type::String,
            to: Type::slice(Type::Int32),
        };
        assert_eq!(err.to_string(), "no recipe to convert string to []int32");

        let err = ConversionError::DestinationNotWritable {
            found: Type::Int,
        };
        assert_eq!(err.to_string(), "destination must be a non-nil pointer, found int");
    }
}
