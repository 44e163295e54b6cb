//! The `list` command: show available recipes.

use crate::recipes::builtin_recipes;

/// Print the built-in recipe slugs and descriptions to stdout.
pub fn list_recipes() {
    for recipe in builtin_recipes() {
        println!("{:<22} {}", recipe.slug(), recipe.description());
    }
}
