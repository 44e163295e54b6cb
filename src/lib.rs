// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod recipes;

// Re-export commonly used types
pub use crate::core::{Artist, ArtistCreditId, Playlist, RecordKind, Records, Track};
pub use crate::errors::PipelineError;
pub use crate::pipeline::stages::{
    ArtistCreditFilter, ArtistCreditLimiter, DedupFilter, JsonTracks, PlaylistMaker,
    PlaylistShuffle, RankingSort, RecentlyListenedFilter, RedundancyReducer, TrackList,
    YearRangeFilter, YearSort,
};
pub use crate::pipeline::{single_input, Stage, StageNode};
pub use crate::recipes::{builtin_recipes, find_recipe, Recipe, RecipeParams};
