use crate::core::{
    buckets::{select_bucket, select_size_bucket, RangeBucket, PRICE_BUCKETS},
    filters::{matches, FilterCriteria},
    units::SizeUnit,
};
use crate::models::Property;

/// Result of a listing search
#[derive(Debug)]
pub struct SearchResult {
    pub properties: Vec<Property>,
    pub total_candidates: usize,
    pub total_matches: usize,
}

/// Buckets highlighted for a set of criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveBuckets {
    pub price: Option<&'static RangeBucket>,
    pub size: Option<&'static RangeBucket>,
}

/// Work out which quick-select buckets the criteria correspond to
///
/// Size buckets are looked up in the table for `unit`, comparing in
/// square feet.
pub fn active_buckets(criteria: &FilterCriteria, unit: SizeUnit) -> ActiveBuckets {
    ActiveBuckets {
        price: select_bucket(&PRICE_BUCKETS, criteria.min_price, criteria.max_price),
        size: select_size_bucket(unit, criteria.min_size, criteria.max_size),
    }
}

/// Runs filter criteria over a fetched listing set
///
/// The scan is a single ordered pass; matching properties keep the
/// relative order they were fetched in.
#[derive(Debug, Clone)]
pub struct Searcher {
    max_results: usize,
}

impl Searcher {
    pub fn new(max_results: usize) -> Self {
        Self {
            max_results: max_results.max(1),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            max_results: usize::MAX,
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Filter `candidates` and cap the output at `limit`, which is clamped
    /// to between one and the configured maximum
    pub fn search(
        &self,
        candidates: Vec<Property>,
        criteria: &FilterCriteria,
        limit: Option<usize>,
    ) -> SearchResult {
        let total_candidates = candidates.len();
        let limit = limit.unwrap_or(self.max_results).clamp(1, self.max_results);

        let mut properties: Vec<Property> = candidates
            .into_iter()
            .filter(|property| matches(property, criteria))
            .collect();

        let total_matches = properties.len();
        properties.truncate(limit);

        SearchResult {
            properties,
            total_candidates,
            total_matches,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::unbounded()
    }
}
