//! CLI command implementations.
//!
//! - **list**: print the built-in recipe slugs and descriptions
//! - **run**: build a recipe's pipeline, evaluate it, and serialize the
//!   result

pub mod list;
pub mod run;

pub use list::list_recipes;
pub use run::{run_recipe, RunConfig};
