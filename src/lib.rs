//! Propnest - property listing service
//!
//! Listings are stored in PostgreSQL and searched with a small filtering
//! core: an inclusive price/size/text predicate, fixed quick-select range
//! buckets, and unit-aware size normalization (square feet and square gaz).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    apply_bucket, filter_properties, from_canonical, matches, select_bucket, to_canonical,
    FilterCriteria, RangeBucket, Searcher, SizeUnit,
};
pub use models::{Property, PropertyStatus, SearchParams, SearchResponse, User};
