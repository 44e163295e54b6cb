//! Release-year filtering.

use crate::core::{RecordKind, Records};
use crate::errors::PipelineError;
use crate::pipeline::stage::{single_input, Stage};

/// Keeps tracks released within an inclusive year range.
///
/// Tracks without a year are always dropped, with a debug trace. With
/// `inverse` set, the filter instead keeps tracks strictly outside the
/// range.
#[derive(Debug)]
pub struct YearRangeFilter {
    start_year: i32,
    end_year: i32,
    inverse: bool,
}

impl YearRangeFilter {
    /// Build the filter. `start_year` must not exceed `end_year`.
    pub fn new(start_year: i32, end_year: i32, inverse: bool) -> Result<Self, PipelineError> {
        if start_year > end_year {
            return Err(PipelineError::configuration(format!(
                "year range start {} is after end {}",
                start_year, end_year
            )));
        }
        Ok(Self {
            start_year,
            end_year,
            inverse,
        })
    }
}

impl Stage for YearRangeFilter {
    fn name(&self) -> &str {
        "year-range-filter"
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
            let Some(year) = track.year else {
                log::debug!("dropping track {}: no release year", track.id);
                continue;
            };
            let in_range = self.start_year <= year && year <= self.end_year;
            if in_range != self.inverse {
                kept.push(track);
            }
        }
        Ok(Records::Tracks(kept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Track;
    use pretty_assertions::assert_eq;

    fn years(filter: &YearRangeFilter, input: Vec<Track>) -> Vec<i32> {
        filter
            .produce(vec![Records::Tracks(input)])
            .unwrap()
            .into_tracks()
            .unwrap()
            .into_iter()
            .filter_map(|t| t.year)
            .collect()
    }

    fn dated(year: i32) -> Track {
        Track::new(format!("rec-{}", year)).with_year(year)
    }

    #[test]
    fn test_keeps_tracks_inside_inclusive_range() {
        let filter = YearRangeFilter::new(1995, 2000, false).unwrap();
        let input = vec![dated(1990), dated(1995), dated(2000), dated(2005)];
        assert_eq!(years(&filter, input), vec![1995, 2000]);
    }

    #[test]
    fn test_drops_undated_tracks() {
        let filter = YearRangeFilter::new(1990, 2010, false).unwrap();
        let input = vec![dated(1999), Track::new("undated")];
        assert_eq!(years(&filter, input), vec![1999]);
    }

    #[test]
    fn test_inverse_keeps_tracks_outside_the_range() {
        let filter = YearRangeFilter::new(1995, 2000, true).unwrap();
        let input = vec![dated(1990), dated(1995), dated(2000), dated(2005)];
        assert_eq!(years(&filter, input), vec![1990, 2005]);
    }

    #[test]
    fn test_inverse_drops_undated_tracks_too() {
        let filter = YearRangeFilter::new(1995, 2000, true).unwrap();
        let input = vec![Track::new("undated"), dated(1980)];
        assert_eq!(years(&filter, input), vec![1980]);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = YearRangeFilter::new(2000, 1995, false).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn test_single_year_range() {
        let filter = YearRangeFilter::new(1999, 1999, false).unwrap();
        let input = vec![dated(1998), dated(1999), dated(2000)];
        assert_eq!(years(&filter, input), vec![1999]);
    }
}
