//! Daily jams: one day's shuffled slice of a listener's recommendations.

use super::{Recipe, RecipeParams};
use crate::core::{RecordKind, Records};
use crate::errors::PipelineError;
use crate::pipeline::stage::{single_input, Stage};
use crate::pipeline::stages::{
    ArtistCreditLimiter, DedupFilter, JsonTracks, PlaylistMaker, PlaylistShuffle,
    RecentlyListenedFilter, RedundancyReducer,
};
use crate::pipeline::StageNode;
use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;

/// Tracks listened to within this many days stay out of the jam.
const RECENT_LISTEN_EXCLUSION_DAYS: u32 = 60;
/// Maximum playlist length.
const JAM_LENGTH: usize = 25;
/// No artist credit contributes more than this many tracks.
const MAX_TRACKS_PER_ARTIST: usize = 2;

/// `daily-jams`: a daily playlist from a listener's recommendations.
///
/// The recommendation dump is split into seven contiguous chunks, one per
/// weekday, so a week of daily jams covers the whole dump without repeats.
/// Tracks played within the last 60 days are excluded, no artist credit
/// contributes more than two tracks, and the final playlist is shuffled
/// with back-to-back same-artist picks spaced out.
///
/// Parameters:
/// - `tracks`: path to a JSON recommendation dump
/// - `user`: listener name, used in the playlist title
/// - `jam-date`: date of the jam as YYYY-MM-DD (optional, defaults to
///   today; the caller's date matters because timezones disagree on it)
pub struct DailyJams;

/// Picks the jam date's weekday chunk out of the incoming tracks.
struct WeekdayChunk {
    /// Monday-based weekday index, 0..=6.
    weekday: usize,
}

impl Stage for WeekdayChunk {
    fn name(&self) -> &str {
        "weekday-chunk"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let tracks = single_input(inputs)?.into_tracks()?;
        let chunk_len = tracks.len().div_ceil(7);
        if chunk_len == 0 {
            return Ok(Records::Tracks(Vec::new()));
        }
        let chunk = tracks
            .chunks(chunk_len)
            .nth(self.weekday)
            .unwrap_or(&[])
            .to_vec();
        Ok(Records::Tracks(chunk))
    }
}

impl Recipe for DailyJams {
    fn slug(&self) -> &'static str {
        "daily-jams"
    }

    fn description(&self) -> &'static str {
        "Build a daily playlist from a listener's recommendations, skipping recently played tracks."
    }

    fn create(&self, params: &RecipeParams) -> Result<Arc<StageNode>, PipelineError> {
        let tracks_path = params.require("tracks")?;
        let user = params.require("user")?;
        let jam_date = match params.get("jam-date") {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| PipelineError::parameter("jam-date", e))?,
            None => Utc::now().date_naive(),
        };
        let weekday = jam_date.weekday().num_days_from_monday() as usize;

        let recommendations = StageNode::reused(JsonTracks::new(tracks_path), Vec::new())?;
        let deduped = StageNode::attach(DedupFilter, vec![recommendations])?;
        let fresh = StageNode::attach(
            RecentlyListenedFilter::new(RECENT_LISTEN_EXCLUSION_DAYS),
            vec![deduped],
        )?;
        let todays = StageNode::attach(WeekdayChunk { weekday }, vec![fresh])?;
        let limited = StageNode::attach(
            ArtistCreditLimiter::new(MAX_TRACKS_PER_ARTIST, true),
            vec![todays],
        )?;
        let assembled = StageNode::attach(
            PlaylistMaker::new(
                format!("Daily Jams for {}, {}", user, jam_date),
                format!(
                    "Daily jams playlist for {}, made from their recommendations on {}.",
                    user, jam_date
                ),
                JAM_LENGTH,
            ),
            vec![limited],
        )?;
        let shuffled = StageNode::attach(PlaylistShuffle, vec![assembled])?;
        StageNode::attach(RedundancyReducer::same_artist(1), vec![shuffled])
    }
}
