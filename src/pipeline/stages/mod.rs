//! Concrete pipeline stages: sources, filters, sorts, and playlist stages.
//!
//! Apart from the file-backed source, every stage here is a pure
//! transformation: deterministic for the same input (unless it deliberately
//! samples at random), free of I/O, and limited to debug-level logging as
//! its only side effect.

pub mod artist_credit;
pub mod dedup;
pub mod listened;
pub mod playlist;
pub mod sorting;
pub mod sources;
pub mod year_range;

pub use artist_credit::{ArtistCreditFilter, ArtistCreditLimiter};
pub use dedup::DedupFilter;
pub use listened::RecentlyListenedFilter;
pub use playlist::{PlaylistMaker, PlaylistShuffle, RedundancyReducer};
pub use sorting::{RankingSort, YearSort};
pub use sources::{JsonTracks, TrackList};
pub use year_range::YearRangeFilter;
