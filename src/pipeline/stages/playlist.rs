//! Playlist assembly and playlist-level post-processing.

use crate::core::{Playlist, RecordKind, Records, Track};
use crate::errors::PipelineError;
use crate::pipeline::stage::{single_input, Stage};
use rand::seq::SliceRandom;

/// Assembles the incoming tracks into a single playlist.
///
/// Keeps at most `max_items` tracks, in the order they arrive; ordering
/// decisions belong to upstream stages or an explicit sort stage.
pub struct PlaylistMaker {
    name: String,
    description: String,
    max_items: usize,
}

impl PlaylistMaker {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        max_items: usize,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            max_items,
        }
    }
}

impl Stage for PlaylistMaker {
    fn name(&self) -> &str {
        "playlist-maker"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Playlist]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let mut tracks = single_input(inputs)?.into_tracks()?;
        if tracks.len() > self.max_items {
            log::debug!(
                "truncating playlist '{}' from {} to {} tracks",
                self.name,
                tracks.len(),
                self.max_items
            );
            tracks.truncate(self.max_items);
        }
        Ok(Records::Playlists(vec![Playlist {
            name: self.name.clone(),
            description: self.description.clone(),
            tracks,
        }]))
    }
}

/// Shuffles each incoming playlist's track order uniformly at random.
pub struct PlaylistShuffle;

impl Stage for PlaylistShuffle {
    fn name(&self) -> &str {
        "playlist-shuffle"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Playlist]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Playlist]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let playlists = single_input(inputs)?.into_playlists()?;
        let mut rng = rand::thread_rng();
        let shuffled = playlists
            .into_iter()
            .map(|playlist| {
                let Playlist {
                    name,
                    description,
                    mut tracks,
                } = playlist;
                tracks.shuffle(&mut rng);
                Playlist {
                    name,
                    description,
                    tracks,
                }
            })
            .collect();
        Ok(Records::Playlists(shuffled))
    }
}

/// Policy deciding whether two tracks are redundant near each other.
pub type RedundancyPolicy = Box<dyn Fn(&Track, &Track) -> bool + Send + Sync>;

/// Removes tracks that repeat too close to an earlier pick.
///
/// Each candidate is compared against the last `window` retained tracks with
/// the configured policy; a match drops it with a debug trace. The built-in
/// [`same_artist`](RedundancyReducer::same_artist) policy treats two tracks
/// sharing an artist credit as redundant.
pub struct RedundancyReducer {
    window: usize,
    policy: RedundancyPolicy,
}

impl RedundancyReducer {
    /// Build a reducer with a custom redundancy policy.
    pub fn new(
        window: usize,
        policy: impl Fn(&Track, &Track) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            window,
            policy: Box::new(policy),
        }
    }

    /// Reducer that spaces out tracks sharing an artist credit. Tracks
    /// without an artist credit are never considered redundant.
    pub fn same_artist(window: usize) -> Self {
        Self::new(window, |a, b| {
            match (a.artist_credit_id(), b.artist_credit_id()) {
                (Some(credit_a), Some(credit_b)) => credit_a == credit_b,
                _ => false,
            }
        })
    }
}

impl Stage for RedundancyReducer {
    fn name(&self) -> &str {
        "redundancy-reducer"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Playlist]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Playlist]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let playlists = single_input(inputs)?.into_playlists()?;
        let reduced = playlists
            .into_iter()
            .map(|playlist| {
                let Playlist {
                    name,
                    description,
                    tracks,
                } = playlist;
                let mut kept: Vec<Track> = Vec::with_capacity(tracks.len());
                for track in tracks {
                    let tail = kept.len().saturating_sub(self.window);
                    if kept[tail..].iter().any(|recent| (self.policy)(recent, &track)) {
                        log::debug!(
                            "dropping track {}: redundant within the last {} picks",
                            track.id,
                            self.window
                        );
                    } else {
                        kept.push(track);
                    }
                }
                Playlist {
                    name,
                    description,
                    tracks: kept,
                }
            })
            .collect();
        Ok(Records::Playlists(reduced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Artist;
    use pretty_assertions::assert_eq;

    fn playlist_of(tracks: Vec<Track>) -> Records {
        Records::Playlists(vec![Playlist {
            name: "test".to_string(),
            description: String::new(),
            tracks,
        }])
    }

    fn credited(id: &str, credit_id: u64) -> Track {
        Track::new(id).with_artist(Artist::new("art").with_artist_credit_id(credit_id))
    }

    #[test]
    fn test_maker_truncates_without_reordering() {
        let maker = PlaylistMaker::new("Mix", "A mix", 2);
        let input = Records::Tracks(vec![
            Track::new("a"),
            Track::new("b"),
            Track::new("c"),
        ]);
        let playlists = maker
            .produce(vec![input])
            .unwrap()
            .into_playlists()
            .unwrap();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Mix");
        let ids: Vec<_> = playlists[0].tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_shuffle_preserves_membership() {
        let tracks: Vec<Track> = (0..20).map(|i| Track::new(format!("rec-{}", i))).collect();
        let playlists = PlaylistShuffle
            .produce(vec![playlist_of(tracks.clone())])
            .unwrap()
            .into_playlists()
            .unwrap();
        assert_eq!(playlists[0].tracks.len(), tracks.len());
        for track in &tracks {
            assert!(playlists[0].tracks.iter().any(|t| t.id == track.id));
        }
    }

    #[test]
    fn test_reducer_spaces_out_same_artist_runs() {
        let reducer = RedundancyReducer::same_artist(1);
        let input = playlist_of(vec![
            credited("a1", 1),
            credited("a2", 1),
            credited("b1", 2),
            credited("a3", 1),
        ]);
        let playlists = reducer
            .produce(vec![input])
            .unwrap()
            .into_playlists()
            .unwrap();
        let ids: Vec<_> = playlists[0].tracks.iter().map(|t| t.id.as_str()).collect();
        // a2 repeats credit 1 immediately after a1; a3 is fine after b1.
        assert_eq!(ids, vec!["a1", "b1", "a3"]);
    }

    #[test]
    fn test_reducer_with_custom_policy() {
        let reducer = RedundancyReducer::new(2, |a, b| a.year == b.year && a.year.is_some());
        let input = playlist_of(vec![
            Track::new("a").with_year(1999),
            Track::new("b").with_year(1999),
            Track::new("c").with_year(2001),
        ]);
        let playlists = reducer
            .produce(vec![input])
            .unwrap()
            .into_playlists()
            .unwrap();
        let ids: Vec<_> = playlists[0].tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_reducer_never_drops_uncredited_tracks() {
        let reducer = RedundancyReducer::same_artist(3);
        let input = playlist_of(vec![Track::new("x"), Track::new("y"), Track::new("z")]);
        let playlists = reducer
            .produce(vec![input])
            .unwrap()
            .into_playlists()
            .unwrap();
        assert_eq!(playlists[0].tracks.len(), 3);
    }
}
