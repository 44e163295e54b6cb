//! Year-in-review playlist built from a ranked track library.

use super::{Recipe, RecipeParams};
use crate::errors::PipelineError;
use crate::pipeline::stages::{DedupFilter, JsonTracks, PlaylistMaker, RankingSort, YearRangeFilter};
use crate::pipeline::StageNode;
use chrono::{Datelike, Utc};
use std::sync::Arc;

const DEFAULT_COUNT: usize = 30;
const EARLIEST_YEAR: i32 = 1800;

/// `top-tracks-for-year`: a listener's most relevant tracks released in a
/// given year, as a bounded playlist.
///
/// Parameters:
/// - `tracks`: path to a JSON track library
/// - `user`: listener name, used in the playlist title
/// - `year`: release year to cover
/// - `count`: maximum playlist length (optional, default 30)
pub struct TopTracksForYear;

impl Recipe for TopTracksForYear {
    fn slug(&self) -> &'static str {
        "top-tracks-for-year"
    }

    fn description(&self) -> &'static str {
        "Build a playlist of a listener's top tracks released in a given year."
    }

    fn create(&self, params: &RecipeParams) -> Result<Arc<StageNode>, PipelineError> {
        let tracks_path = params.require("tracks")?;
        let user = params.require("user")?;
        let year: i32 = params.require_parsed("year")?;
        let count: usize = params.parsed_or("count", DEFAULT_COUNT)?;

        let current_year = Utc::now().year();
        if !(EARLIEST_YEAR..=current_year).contains(&year) {
            return Err(PipelineError::parameter(
                "year",
                format!("must be between {} and {}", EARLIEST_YEAR, current_year),
            ));
        }
        if count == 0 {
            return Err(PipelineError::parameter("count", "must be at least 1"));
        }

        let library = StageNode::source(JsonTracks::new(tracks_path))?;
        let deduped = StageNode::attach(DedupFilter, vec![library])?;
        let in_year = StageNode::attach(YearRangeFilter::new(year, year, false)?, vec![deduped])?;
        let ranked = StageNode::attach(RankingSort::new(true), vec![in_year])?;
        StageNode::attach(
            PlaylistMaker::new(
                format!("Top tracks of {} for {}", year, user),
                format!(
                    "The tracks {} listened to most that were released in {}.",
                    user, year
                ),
                count,
            ),
            vec![ranked],
        )
    }
}
