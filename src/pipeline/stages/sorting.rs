//! Explicit sort stages.
//!
//! Ordering decisions are made upstream of playlist assembly by these
//! stages; the assembly stage itself never re-sorts. Both sorts are stable,
//! and records missing the sort key order after all keyed records without
//! disturbing their relative order.

use crate::core::{RecordKind, Records};
use crate::errors::PipelineError;
use crate::pipeline::stage::{single_input, Stage};
use std::cmp::Ordering;

/// Stable sort by release year.
pub struct YearSort {
    ascending: bool,
}

impl YearSort {
    pub fn new(ascending: bool) -> Self {
        Self { ascending }
    }
}

impl Stage for YearSort {
    fn name(&self) -> &str {
        "year-sort"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let mut tracks = single_input(inputs)?.into_tracks()?;
        tracks.sort_by(|a, b| match (a.year, b.year) {
            (Some(ya), Some(yb)) => {
                if self.ascending {
                    ya.cmp(&yb)
                } else {
                    yb.cmp(&ya)
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(Records::Tracks(tracks))
    }
}

/// Stable sort by ranking; `descending` puts the most relevant first.
pub struct RankingSort {
    descending: bool,
}

impl RankingSort {
    pub fn new(descending: bool) -> Self {
        Self { descending }
    }
}

impl Stage for RankingSort {
    fn name(&self) -> &str {
        "ranking-sort"
    }

    fn declared_inputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn declared_outputs(&self) -> &[RecordKind] {
        &[RecordKind::Track]
    }

    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError> {
        let mut tracks = single_input(inputs)?.into_tracks()?;
        tracks.sort_by(|a, b| match (a.ranking, b.ranking) {
            (Some(ra), Some(rb)) => {
                let ordering = ra.partial_cmp(&rb).unwrap_or(Ordering::Equal);
                if self.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(Records::Tracks(tracks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Track;
    use pretty_assertions::assert_eq;

    fn ids(records: Records) -> Vec<String> {
        records
            .into_tracks()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    #[test]
    fn test_year_sort_ascending_with_undated_last() {
        let input = Records::Tracks(vec![
            Track::new("b").with_year(2001),
            Track::new("undated"),
            Track::new("a").with_year(1995),
        ]);
        let sorted = YearSort::new(true).produce(vec![input]).unwrap();
        assert_eq!(ids(sorted), vec!["a", "b", "undated"]);
    }

    #[test]
    fn test_year_sort_descending_keeps_undated_last() {
        let input = Records::Tracks(vec![
            Track::new("undated"),
            Track::new("a").with_year(1995),
            Track::new("b").with_year(2001),
        ]);
        let sorted = YearSort::new(false).produce(vec![input]).unwrap();
        assert_eq!(ids(sorted), vec!["b", "a", "undated"]);
    }

    #[test]
    fn test_ranking_sort_descending() {
        let input = Records::Tracks(vec![
            Track::new("mid").with_ranking(0.5),
            Track::new("top").with_ranking(0.9),
            Track::new("unranked"),
            Track::new("low").with_ranking(0.1),
        ]);
        let sorted = RankingSort::new(true).produce(vec![input]).unwrap();
        assert_eq!(ids(sorted), vec!["top", "mid", "low", "unranked"]);
    }

    #[test]
    fn test_sorts_are_stable_for_equal_keys() {
        let input = Records::Tracks(vec![
            Track::new("first").with_year(1999),
            Track::new("second").with_year(1999),
        ]);
        let sorted = YearSort::new(true).produce(vec![input]).unwrap();
        assert_eq!(ids(sorted), vec!["first", "second"]);
    }
}
