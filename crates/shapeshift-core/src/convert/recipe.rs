//! Conversion recipes
//!
//! A recipe pairs a source matcher and a destination matcher with a function
//! that performs the conversion. Matchers name either an exact [`Type`] or a
//! generic [`Shape`], so a single recipe can cover every map or every struct.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::engine::ConversionContext;
use crate::value::{Shape, Type, Value};
use std::fmt;
use std::sync::Arc;

/// Signature shared by all recipe functions
///
/// The function receives the source and the destination to fill in place. The
/// context gives access to the converter for nested conversions.
pub type RecipeFn =
    dyn Fn(&ConversionContext<'_>, &Value, &mut Value) -> anyhow::Result<()> + Send + Sync;

/// Which values a recipe side accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMatcher {
    /// Values of exactly this type
    Exact(Type),
    /// Any value of this shape, after following pointers
    Shape(Shape),
}

impl TypeMatcher {
    pub fn matches(&self, value_type: &Type, shape: Shape) -> bool {
        match self {
            TypeMatcher::Exact(expected) => expected == value_type,
            TypeMatcher::Shape(expected) => *expected == shape,
        }
    }
}

impl From<Type> for TypeMatcher {
    fn from(value_type: Type) -> Self {
        TypeMatcher::Exact(value_type)
    }
}

impl From<Shape> for TypeMatcher {
    fn from(shape: Shape) -> Self {
        TypeMatcher::Shape(shape)
    }
}

impl fmt::Display for TypeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMatcher::Exact(t) => write!(f, "{}", t),
            TypeMatcher::Shape(shape) => write!(f, "<{}>", shape),
        }
    }
}

/// A registered conversion between two kinds of values
#[derive(Clone)]
pub struct Recipe {
    from: TypeMatcher,
    to: TypeMatcher,
    func: Arc<RecipeFn>,
}

impl Recipe {
    /// Create a recipe
    ///
    /// ```
    /// use shapeshift_core::convert::Recipe;
    /// use shapeshift_core::{Type, Value};
    ///
    /// let answer = Recipe::new(Type::String, Type::Int, |_, _, dst| {
    ///     *dst = Value::Int(42);
    ///     Ok(())
    /// });
    /// assert_eq!(answer.to_string(), "string -> int");
    /// ```
    pub fn new<F>(from: impl Into<TypeMatcher>, to: impl Into<TypeMatcher>, func: F) -> Self
    where
        F: Fn(&ConversionContext<'_>, &Value, &mut Value) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            from: from.into(),
            to: to.into(),
            func: Arc::new(func),
        }
    }

    pub fn from(&self) -> &TypeMatcher {
        &self.from
    }

    pub fn to(&self) -> &TypeMatcher {
        &self.to
    }

    /// Whether this recipe handles the given source and destination
    pub fn matches(&self, src: (&Type, Shape), dst: (&Type, Shape)) -> bool {
        self.from.matches(src.0, src.1) && self.to.matches(dst.0, dst.1)
    }

    pub(crate) fn apply(
        &self,
        ctx: &ConversionContext<'_>,
        src: &Value,
        dst: &mut Value,
    ) -> anyhow::Result<()> {
        (self.func)(ctx, src, dst)
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
