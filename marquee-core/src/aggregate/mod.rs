//! Multi-page aggregation over a [`CatalogClient`](crate::CatalogClient).
//!
//! [`BatchedAggregator`] overlaps request latency in bounded batches and
//! degrades failed pages to "no data"; [`SequentialAggregator`] walks pages
//! one by one and stops at the first failure.

mod batched;
mod sequential;

pub use batched::{Aggregate, BatchedAggregator};
pub use sequential::SequentialAggregator;

use std::collections::HashSet;
use std::ops::Range;
use std::time::Duration;

use marquee_model::{ListingPage, Movie};

use crate::providers::FetchFailure;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_INTER_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Knobs for batched aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSettings {
    /// Maximum number of page requests in flight at once.
    pub batch_size: usize,
    /// Fixed pause between batches. Not a backoff: it never grows.
    pub inter_batch_delay: Duration,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            inter_batch_delay: DEFAULT_INTER_BATCH_DELAY,
        }
    }
}

/// Result of fetching one page inside a batch.
///
/// Both an empty page and a failed page contribute nothing to the merged list;
/// the variants stay distinct so the aggregate can report which pages failed.
#[derive(Debug)]
pub enum PageOutcome {
    Loaded(ListingPage),
    Failed { page: u32, error: FetchFailure },
}

impl PageOutcome {
    pub fn page(&self) -> Option<&ListingPage> {
        match self {
            PageOutcome::Loaded(page) => Some(page),
            PageOutcome::Failed { .. } => None,
        }
    }

    pub fn is_last_page(&self) -> bool {
        self.page().is_some_and(ListingPage::is_last_page)
    }
}

/// Split `[start_page, start_page + page_count)` into consecutive ranges of at
/// most `batch_size` pages. A zero batch size is treated as one.
pub fn plan_batches(
    start_page: u32,
    page_count: u32,
    batch_size: usize,
) -> Vec<Range<u32>> {
    let batch_size = u32::try_from(batch_size.max(1)).unwrap_or(u32::MAX);
    let end = start_page.saturating_add(page_count);

    let mut batches = Vec::new();
    let mut cursor = start_page;
    while cursor < end {
        let batch_end = cursor.saturating_add(batch_size).min(end);
        batches.push(cursor..batch_end);
        cursor = batch_end;
    }
    batches
}

/// Keep the first occurrence of every id, preserving insertion order.
/// Returns the surviving items and the number of dropped duplicates.
pub fn dedup_by_id(movies: Vec<Movie>) -> (Vec<Movie>, usize) {
    let before = movies.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<Movie> =
        movies.into_iter().filter(|m| seen.insert(m.id)).collect();
    let dropped = before - unique.len();
    (unique, dropped)
}
