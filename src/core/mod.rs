//! Record types passed between pipeline stages.
//!
//! Records are immutable by convention: a stage receives owned sequences from
//! its sources and produces a new sequence, never mutating what an upstream
//! stage returned. All record types serialize with serde so they can be read
//! from track library files and written out as playlists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PipelineError;

/// Grouping key for one or more artists jointly credited on a track.
pub type ArtistCreditId = u64;

/// An artist reference carried by a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// Opaque artist identifier (e.g. a MusicBrainz artist MBID).
    pub id: String,
    /// Display name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier of the artist credit this artist appears under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_credit_id: Option<ArtistCreditId>,
}

impl Artist {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            artist_credit_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_artist_credit_id(mut self, artist_credit_id: ArtistCreditId) -> Self {
        self.artist_credit_id = Some(artist_credit_id);
        self
    }
}

/// A single track (recording).
///
/// Only the identifier is mandatory; every other attribute may be absent in
/// externally supplied data, and individual filters decide how to treat the
/// gaps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque, globally unique identifier (e.g. a recording MBID).
    pub id: String,
    /// Display title, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Relevance ranking; higher means more relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<f64>,
    /// Credited artist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<Artist>,
    /// When the listener last played this track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listened_at: Option<DateTime<Utc>>,
}

impl Track {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            year: None,
            ranking: None,
            artist: None,
            listened_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_ranking(mut self, ranking: f64) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn with_artist(mut self, artist: Artist) -> Self {
        self.artist = Some(artist);
        self
    }

    pub fn with_listened_at(mut self, listened_at: DateTime<Utc>) -> Self {
        self.listened_at = Some(listened_at);
        self
    }

    /// Artist-credit identifier, when the track carries one.
    pub fn artist_credit_id(&self) -> Option<ArtistCreditId> {
        self.artist.as_ref().and_then(|a| a.artist_credit_id)
    }
}

/// An ordered playlist, the pipeline's terminal product.
///
/// Created only by the playlist-assembly stage and never mutated afterwards;
/// playlist post-processing stages produce new playlists. Track order is the
/// final presentation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub description: String,
    pub tracks: Vec<Track>,
}

/// Descriptor for the record type a stage consumes or produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Track,
    Artist,
    Playlist,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Track => "Track",
            RecordKind::Artist => "Artist",
            RecordKind::Playlist => "Playlist",
        };
        write!(f, "{}", name)
    }
}

/// A homogeneous sequence of records, the unit of data exchanged between
/// stages.
#[derive(Clone, Debug, PartialEq)]
pub enum Records {
    Tracks(Vec<Track>),
    Artists(Vec<Artist>),
    Playlists(Vec<Playlist>),
}

impl Records {
    /// Kind descriptor for this sequence.
    pub fn kind(&self) -> RecordKind {
        match self {
            Records::Tracks(_) => RecordKind::Track,
            Records::Artists(_) => RecordKind::Artist,
            Records::Playlists(_) => RecordKind::Playlist,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Records::Tracks(records) => records.len(),
            Records::Artists(records) => records.len(),
            Records::Playlists(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unwrap a track sequence.
    ///
    /// Wiring guarantees a stage only ever sees the kinds it declared, so a
    /// mismatch here is an internal contract violation, not user error.
    pub fn into_tracks(self) -> Result<Vec<Track>, PipelineError> {
        match self {
            Records::Tracks(tracks) => Ok(tracks),
            other => Err(PipelineError::Other(format!(
                "expected a Track sequence, got {}",
                other.kind()
            ))),
        }
    }

    /// Unwrap an artist sequence.
    pub fn into_artists(self) -> Result<Vec<Artist>, PipelineError> {
        match self {
            Records::Artists(artists) => Ok(artists),
            other => Err(PipelineError::Other(format!(
                "expected an Artist sequence, got {}",
                other.kind()
            ))),
        }
    }

    /// Unwrap a playlist sequence.
    pub fn into_playlists(self) -> Result<Vec<Playlist>, PipelineError> {
        match self {
            Records::Playlists(playlists) => Ok(playlists),
            other => Err(PipelineError::Other(format!(
                "expected a Playlist sequence, got {}",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_builder() {
        let track = Track::new("rec-1")
            .with_title("Blue Monday")
            .with_year(1983)
            .with_ranking(0.92)
            .with_artist(Artist::new("art-1").with_artist_credit_id(7));

        assert_eq!(track.id, "rec-1");
        assert_eq!(track.year, Some(1983));
        assert_eq!(track.artist_credit_id(), Some(7));
        assert_eq!(track.listened_at, None);
    }

    #[test]
    fn test_artist_credit_id_absent_without_artist() {
        assert_eq!(Track::new("rec-1").artist_credit_id(), None);

        let uncredited = Track::new("rec-2").with_artist(Artist::new("art-2"));
        assert_eq!(uncredited.artist_credit_id(), None);
    }

    #[test]
    fn test_records_kind_and_len() {
        let records = Records::Tracks(vec![Track::new("a"), Track::new("b")]);
        assert_eq!(records.kind(), RecordKind::Track);
        assert_eq!(records.len(), 2);
        assert!(!records.is_empty());

        assert!(Records::Playlists(Vec::new()).is_empty());
    }

    #[test]
    fn test_records_unwrap_mismatch() {
        let records = Records::Tracks(vec![Track::new("a")]);
        assert!(records.into_playlists().is_err());
    }

    #[test]
    fn test_track_deserializes_with_missing_fields() {
        let track: Track = serde_json::from_str(r#"{"id": "rec-9"}"#).unwrap();
        assert_eq!(track.id, "rec-9");
        assert_eq!(track.year, None);
        assert_eq!(track.ranking, None);
        assert_eq!(track.artist, None);
    }
}
