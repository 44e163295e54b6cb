//! Recipes: named, parameterized pipeline constructions.
//!
//! A recipe validates a string-keyed parameter map, builds a stage graph
//! through the wiring API, and hands back the terminal node. Parameter
//! parsing and range checks are the recipe's responsibility; the engine only
//! ever sees the finished graph. Recipes here read their track library from
//! a local JSON file named by the `tracks` parameter.

pub mod daily_jams;
pub mod top_tracks_for_year;

pub use daily_jams::DailyJams;
pub use top_tracks_for_year::TopTracksForYear;

use crate::errors::PipelineError;
use crate::pipeline::StageNode;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

/// Named external parameters handed to a recipe.
#[derive(Debug, Clone, Default)]
pub struct RecipeParams {
    values: HashMap<String, String>,
}

impl RecipeParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`set`](RecipeParams::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Required string parameter.
    pub fn require(&self, name: &str) -> Result<&str, PipelineError> {
        self.get(name)
            .ok_or_else(|| PipelineError::parameter(name, "required parameter is missing"))
    }

    /// Required parameter parsed as `T`.
    pub fn require_parsed<T>(&self, name: &str) -> Result<T, PipelineError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.require(name)?
            .parse()
            .map_err(|e: T::Err| PipelineError::parameter(name, e))
    }

    /// Optional parameter parsed as `T`, falling back to `default` when
    /// absent. A present-but-unparsable value is still an error.
    pub fn parsed_or<T>(&self, name: &str, default: T) -> Result<T, PipelineError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(name) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|e: T::Err| PipelineError::parameter(name, e)),
        }
    }
}

impl FromIterator<(String, String)> for RecipeParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A reusable, named construction of a pipeline graph.
pub trait Recipe {
    /// CLI-facing identifier.
    fn slug(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Validate the parameters, build the stage graph, and return the
    /// terminal node.
    fn create(&self, params: &RecipeParams) -> Result<Arc<StageNode>, PipelineError>;
}

/// All recipes shipped with the crate.
pub fn builtin_recipes() -> Vec<Box<dyn Recipe>> {
    vec![Box::new(TopTracksForYear), Box::new(DailyJams)]
}

/// Look up a built-in recipe by slug.
pub fn find_recipe(slug: &str) -> Option<Box<dyn Recipe>> {
    builtin_recipes()
        .into_iter()
        .find(|recipe| recipe.slug() == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_reports_missing_parameters() {
        let params = RecipeParams::new();
        let err = params.require("user").unwrap_err();
        assert!(matches!(err, PipelineError::Parameter { .. }));
    }

    #[test]
    fn test_parsed_or_defaults_and_validates() {
        let params = RecipeParams::new().with("count", "12");
        assert_eq!(params.parsed_or::<usize>("count", 30).unwrap(), 12);
        assert_eq!(params.parsed_or::<usize>("missing", 30).unwrap(), 30);

        let bad = RecipeParams::new().with("count", "dozen");
        assert!(bad.parsed_or::<usize>("count", 30).is_err());
    }

    #[test]
    fn test_builtin_recipes_have_distinct_slugs() {
        let recipes = builtin_recipes();
        let mut slugs: Vec<_> = recipes.iter().map(|r| r.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), recipes.len());
    }

    #[test]
    fn test_find_recipe_by_slug() {
        assert!(find_recipe("daily-jams").is_some());
        assert!(find_recipe("no-such-recipe").is_none());
    }
}
