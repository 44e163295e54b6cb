//! Listen-history filtering.

use crate::core::{RecordKind, Records};
use crate::errors::PipelineError;
use crate::pipeline::stage::{single_input, Stage};
use chrono::{Duration, Utc};

/// Drops tracks the listener played within the last `days` days.
///
/// Tracks with no listen history pass: the point of this filter is to keep
/// recent repeats out of a playlist, and a never-played track cannot be a
/// recent repeat. The cutoff is taken from the wall clock at evaluation
/// time.
pub struct RecentlyListenedFilter {
    days: u32,
}

impl RecentlyListenedFilter {
    pub fn new(days: u32) -> Self {
        Self { days }
    }
}

impl Stage for RecentlyListenedFilter {
    fn name(&self) -> &str {
        "recently-listened-filter"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let tracks = single_input(inputs)?.into_tracks()?;
        let cutoff = Utc::now() - Duration::days(i64::from(self.days));
        let mut kept = Vec::with_capacity(tracks.len());
        for track in tracks {
            match track.listened_at {
                Some(listened_at) if listened_at >= cutoff => {
                    log::debug!(
                        "dropping track {}: listened at {}",
                        track.id,
                        listened_at
                    );
                }
                _ => kept.push(track),
            }
        }
        Ok(Records::Tracks(kept))
    }
}
