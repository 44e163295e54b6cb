//! Source stages that feed tracks into a pipeline.

use crate::core::{RecordKind, Records, Track};
use crate::errors::PipelineError;
use crate::pipeline::stage::Stage;
use std::fs;
use std::path::PathBuf;

/// Source stage yielding a fixed, in-memory list of tracks.
///
/// Useful in tests and for re-injecting previously produced tracks into a
/// new sub-graph.
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}

impl Stage for TrackList {
    fn name(&self) -> &str {
        "track-list"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, _inputs: Vec<Records>) -> Result<Records, PipelineError> {
        Ok(Records::Tracks(self.tracks.clone()))
    }
}

/// Source stage reading a JSON array of tracks from a local file.
///
/// The read happens inside `produce`, so this stage fills the collaborator
/// role: it owns its I/O and surfaces failures as
/// [`PipelineError::Collaborator`]. Wrap it in
/// [`StageNode::reused`](crate::pipeline::StageNode::reused) when several
/// downstream stages consume the same library, so the file is read at most
/// once per run.
pub struct JsonTracks {
    path: PathBuf,
}

impl JsonTracks {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Stage for JsonTracks {
    fn name(&self) -> &str {
        "json-tracks"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, _inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            PipelineError::collaborator(
                "json-tracks",
                format!("reading {}: {}", self.path.display(), e),
            )
        })?;
        let tracks: Vec<Track> = serde_json::from_str(&raw).map_err(|e| {
            PipelineError::collaborator(
                "json-tracks",
                format!("parsing {}: {}", self.path.display(), e),
            )
        })?;
        log::debug!(
            "loaded {} tracks from {}",
            tracks.len(),
            self.path.display()
        );
        Ok(Records::Tracks(tracks))
    }
}
