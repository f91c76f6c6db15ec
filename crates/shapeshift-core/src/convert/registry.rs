//! Ordered recipe registry
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::built_in;
use super::recipe::Recipe;
use crate::value::{Shape, Type};
use std::sync::Arc;

/// Immutable, ordered list of recipes
///
/// Lookup returns the first recipe whose matchers accept both sides, so
/// recipes registered earlier take precedence. Custom recipes are placed in
/// front of the built-in ones. The list is shared, so cloning is cheap and a
/// registry can be used from several threads at once.
#[derive(Debug, Clone)]
pub struct Registry {
    recipes: Arc<[Recipe]>,
}

impl Registry {
    /// Custom recipes followed by the built-in ones
    pub fn new(custom: impl IntoIterator<Item = Recipe>) -> Self {
        let mut recipes: Vec<Recipe> = custom.into_iter().collect();
        let custom_count = recipes.len();
        recipes.extend(built_in::recipes());
        log::debug!(
            "recipe registry ready: {} custom, {} total",
            custom_count,
            recipes.len()
        );
        Self {
            recipes: recipes.into(),
        }
    }

    /// Only the built-in recipes
    pub fn builtin() -> Self {
        Self::new(Vec::new())
    }

    /// First recipe accepting the pair
    pub fn lookup(&self, src: (&Type, Shape), dst: (&Type, Shape)) -> Option<&Recipe> {
        find(&self.recipes, src, dst)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn find<'a>(
    recipes: &'a [Recipe],
    src: (&Type, Shape),
    dst: (&Type, Shape),
) -> Option<&'a Recipe> {
    recipes.iter().find(|recipe| recipe.matches(src, dst))
}
