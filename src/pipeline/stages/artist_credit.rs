//! Filters keyed on the artist credit of a track.
//!
//! The artist credit is the grouping key for one or more artists jointly
//! credited on a track; these stages use it to include/exclude artists and
//! to cap how many tracks any one credit contributes.

use crate::core::{ArtistCreditId, RecordKind, Records, Track};
use crate::errors::PipelineError;
use crate::pipeline::stage::{single_input, Stage};
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Keeps or drops tracks according to a set of artist-credit identifiers.
///
/// With `include` set, only tracks credited to one of the given identifiers
/// survive; otherwise those tracks are the ones removed. Tracks without an
/// artist-credit identifier are dropped either way, with a debug trace
/// rather than an error.
#[derive(Debug)]
pub struct ArtistCreditFilter {
    credit_ids: HashSet<ArtistCreditId>,
    include: bool,
}

impl ArtistCreditFilter {
    /// Build the filter. The identifier set must not be empty; duplicate
    /// identifiers are harmless.
    pub fn new(
        credit_ids: impl IntoIterator<Item = ArtistCreditId>,
        include: bool,
    ) -> Result<Self, PipelineError> {
        let credit_ids: HashSet<ArtistCreditId> = credit_ids.into_iter().collect();
        if credit_ids.is_empty() {
            return Err(PipelineError::configuration(
                "artist-credit filter needs at least one artist-credit id",
            ));
        }
        Ok(Self {
            credit_ids,
            include,
        })
    }

    /// Filter that keeps only the given artist credits.
    pub fn include(
        credit_ids: impl IntoIterator<Item = ArtistCreditId>,
    ) -> Result<Self, PipelineError> {
        Self::new(credit_ids, true)
    }

    /// Filter that removes the given artist credits.
    pub fn exclude(
        credit_ids: impl IntoIterator<Item = ArtistCreditId>,
    ) -> Result<Self, PipelineError> {
        Self::new(credit_ids, false)
    }
}

impl Stage for ArtistCreditFilter {
    fn name(&self) -> &str {
        "artist-credit-filter"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let tracks = single_input(inputs)?.into_tracks()?;
        let mut kept = Vec::with_capacity(tracks.len());
        for track in tracks {
            let Some(credit_id) = track.artist_credit_id() else {
                log::debug!("dropping track {}: no artist-credit id", track.id);
                continue;
            };
            if self.credit_ids.contains(&credit_id) == self.include {
                kept.push(track);
            }
        }
        Ok(Records::Tracks(kept))
    }
}

/// Caps how many tracks any one artist credit contributes.
///
/// Tracks are grouped by artist-credit identifier. When every input track
/// carries a ranking, each group keeps its `max_per_credit` best by ranking:
/// the highest-ranked when `prefer_higher_ranked` is set, the lowest-ranked
/// otherwise, with ties resolved in favor of earlier input positions. When
/// any input track lacks a ranking, each group is instead sampled uniformly
/// at random, so the limiter still yields a bounded, fair selection from
/// incomplete ranking data.
///
/// Survivors are emitted in their original input order. Every input track
/// must carry an artist-credit identifier; one without fails the evaluation
/// with a configuration error.
pub struct ArtistCreditLimiter {
    max_per_credit: usize,
    prefer_higher_ranked: bool,
}

impl ArtistCreditLimiter {
    pub fn new(max_per_credit: usize, prefer_higher_ranked: bool) -> Self {
        Self {
            max_per_credit,
            prefer_higher_ranked,
        }
    }

    fn compare_rankings(&self, a: Option<f64>, b: Option<f64>) -> Ordering {
        let a = a.unwrap_or(f64::NEG_INFINITY);
        let b = b.unwrap_or(f64::NEG_INFINITY);
        let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        if self.prefer_higher_ranked {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl Stage for ArtistCreditLimiter {
    fn name(&self) -> &str {
        "artist-credit-limiter"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let tracks = single_input(inputs)?.into_tracks()?;

        // Group input positions by artist credit. Insertion order keeps the
        // grouping deterministic.
        let mut groups: IndexMap<ArtistCreditId, Vec<usize>> = IndexMap::new();
        let mut all_ranked = true;
        for (position, track) in tracks.iter().enumerate() {
            let Some(credit_id) = track.artist_credit_id() else {
                return Err(PipelineError::configuration(format!(
                    "artist-credit limiter requires an artist-credit id on every track, \
                     but track {} has none",
                    track.id
                )));
            };
            groups.entry(credit_id).or_default().push(position);
            if track.ranking.is_none() {
                all_ranked = false;
            }
        }

        let mut keep = vec![false; tracks.len()];
        let mut rng = rand::thread_rng();
        for (_, mut members) in groups {
            if all_ranked {
                // Stable sort over positions already in input order, so ties
                // fall back to input order.
                members
                    .sort_by(|&a, &b| self.compare_rankings(tracks[a].ranking, tracks[b].ranking));
            } else {
                members.shuffle(&mut rng);
            }
            for &position in members.iter().take(self.max_per_credit) {
                keep[position] = true;
            }
        }

        let kept: Vec<Track> = tracks
            .into_iter()
            .enumerate()
            .filter(|(position, _)| keep[*position])
            .map(|(_, track)| track)
            .collect();
        Ok(Records::Tracks(kept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Artist;
    use pretty_assertions::assert_eq;

    fn credited(id: &str, credit_id: ArtistCreditId) -> Track {
        Track::new(id).with_artist(Artist::new(format!("art-{}", credit_id)).with_artist_credit_id(credit_id))
    }

    fn ids(records: Records) -> Vec<String> {
        records
            .into_tracks()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    #[test]
    fn test_filter_include_keeps_only_listed_credits() {
        let filter = ArtistCreditFilter::include([1, 3]).unwrap();
        let input = Records::Tracks(vec![
            credited("a", 1),
            credited("b", 2),
            credited("c", 3),
        ]);
        assert_eq!(ids(filter.produce(vec![input]).unwrap()), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_exclude_removes_listed_credits() {
        let filter = ArtistCreditFilter::exclude([2]).unwrap();
        let input = Records::Tracks(vec![
            credited("a", 1),
            credited("b", 2),
            credited("c", 3),
        ]);
        assert_eq!(ids(filter.produce(vec![input]).unwrap()), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_drops_uncredited_tracks_without_error() {
        let filter = ArtistCreditFilter::exclude([99]).unwrap();
        let input = Records::Tracks(vec![Track::new("a"), credited("b", 1)]);
        assert_eq!(ids(filter.produce(vec![input]).unwrap()), vec!["b"]);
    }

    #[test]
    fn test_filter_rejects_empty_id_set() {
        let err = ArtistCreditFilter::include(Vec::new()).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn test_limiter_keeps_top_ranked_per_credit() {
        let limiter = ArtistCreditLimiter::new(2, true);
        let input = Records::Tracks(vec![
            credited("a1", 1).with_ranking(0.9),
            credited("a2", 1).with_ranking(0.5),
            credited("a3", 1).with_ranking(0.7),
            credited("b1", 2).with_ranking(0.4),
        ]);
        // Credit 1 keeps its two highest rankings; output order is input order.
        assert_eq!(
            ids(limiter.produce(vec![input]).unwrap()),
            vec!["a1", "a3", "b1"]
        );
    }

    #[test]
    fn test_limiter_prefers_lower_ranked_when_asked() {
        let limiter = ArtistCreditLimiter::new(2, false);
        let input = Records::Tracks(vec![
            credited("a1", 1).with_ranking(0.9),
            credited("a2", 1).with_ranking(0.5),
            credited("a3", 1).with_ranking(0.7),
        ]);
        assert_eq!(ids(limiter.produce(vec![input]).unwrap()), vec!["a2", "a3"]);
    }

    #[test]
    fn test_limiter_breaks_ties_by_input_order() {
        let limiter = ArtistCreditLimiter::new(1, true);
        let input = Records::Tracks(vec![
            credited("first", 1).with_ranking(0.5),
            credited("second", 1).with_ranking(0.5),
        ]);
        assert_eq!(ids(limiter.produce(vec![input]).unwrap()), vec!["first"]);
    }

    #[test]
    fn test_limiter_falls_back_to_sampling_without_full_rankings() {
        let limiter = ArtistCreditLimiter::new(2, true);
        let input = Records::Tracks(vec![
            credited("a1", 1).with_ranking(0.9),
            credited("a2", 1),
            credited("a3", 1).with_ranking(0.7),
            credited("b1", 2).with_ranking(0.4),
        ]);
        let kept = limiter
            .produce(vec![input])
            .unwrap()
            .into_tracks()
            .unwrap();

        let group_a: Vec<_> = kept
            .iter()
            .filter(|t| t.artist_credit_id() == Some(1))
            .collect();
        let group_b: Vec<_> = kept
            .iter()
            .filter(|t| t.artist_credit_id() == Some(2))
            .collect();
        assert_eq!(group_a.len(), 2);
        assert_eq!(group_b.len(), 1);
        // No cross-contamination: every survivor was in the input group.
        for track in &kept {
            assert!(["a1", "a2", "a3", "b1"].contains(&track.id.as_str()));
        }
    }

    #[test]
    fn test_limiter_requires_credits_on_every_track() {
        let limiter = ArtistCreditLimiter::new(2, true);
        let input = Records::Tracks(vec![credited("a", 1), Track::new("stray")]);
        let err = limiter.produce(vec![input]).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn test_limiter_of_zero_drops_everything() {
        let limiter = ArtistCreditLimiter::new(0, true);
        let input = Records::Tracks(vec![credited("a", 1).with_ranking(1.0)]);
        assert!(limiter.produce(vec![input]).unwrap().is_empty());
    }
}
