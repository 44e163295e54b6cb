//! Duplicate-track removal.

use crate::core::{RecordKind, Records};
use crate::errors::PipelineError;
use crate::pipeline::stage::{single_input, Stage};
use std::collections::HashSet;

/// Keeps the first occurrence of each distinct track identifier, in input
/// order. Idempotent.
pub struct DedupFilter;

impl Stage for DedupFilter {
    fn name(&self) -> &str {
        "dedup-filter"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let tracks = single_input(inputs)?.into_tracks()?;
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(tracks.len());
        for track in tracks {
            if seen.insert(track.id.clone()) {
                kept.push(track);
            } else {
                log::debug!("dropping duplicate track {}", track.id);
            }
        }
        Ok(Records::Tracks(kept))
    }
}
