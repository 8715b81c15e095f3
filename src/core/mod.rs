// Core search exports
pub mod buckets;
pub mod filters;
pub mod search;
pub mod units;

pub use buckets::{
    apply_bucket, apply_price_bucket, bucket_for, find_bucket, select_bucket, select_size_bucket,
    PriceBounds, RangeBucket, SizeBounds, PRICE_BUCKETS, SQ_FT_BUCKETS, SQ_GAZ_BUCKETS,
};
pub use filters::{filter_properties, matches, FilterCriteria, DEFAULT_MAX_PRICE, DEFAULT_MAX_SIZE};
pub use search::{active_buckets, ActiveBuckets, SearchResult, Searcher};
pub use units::{from_canonical, to_canonical, to_canonical_exact, SizeUnit, SQ_FT_PER_SQ_GAZ};
