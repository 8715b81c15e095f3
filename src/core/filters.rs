use serde::{Deserialize, Serialize};
use crate::core::buckets::{apply_bucket, apply_price_bucket, RangeBucket};
use crate::core::units::SizeUnit;
use crate::models::Property;

/// Upper price bound used when no price filter is active
pub const DEFAULT_MAX_PRICE: f64 = 1_000_000_000.0;

/// Upper size bound (square feet) used when no size filter is active
pub const DEFAULT_MAX_SIZE: f64 = 100_000.0;

/// Active search constraints
///
/// All bounds are inclusive. Sizes are always in square feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub min_price: f64,
    pub max_price: f64,
    pub min_size: f64,
    pub max_size: f64,
    #[serde(rename = "searchQuery")]
    pub query: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            min_size: 0.0,
            max_size: DEFAULT_MAX_SIZE,
            query: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn with_price_bucket(mut self, bucket: &RangeBucket) -> Self {
        let bounds = apply_price_bucket(bucket);
        self.min_price = bounds.min_price;
        self.max_price = bounds.max_price;
        self
    }

    /// Apply a size bucket whose breakpoints are expressed in `unit`
    pub fn with_size_bucket(mut self, bucket: &RangeBucket, unit: SizeUnit) -> Self {
        let bounds = apply_bucket(bucket, unit);
        self.min_size = bounds.min_size;
        self.max_size = bounds.max_size;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

/// Decide whether a property satisfies every active constraint
#[inline]
pub fn matches(property: &Property, criteria: &FilterCriteria) -> bool {
    // Price range
    if property.price < criteria.min_price || property.price > criteria.max_price {
        return false;
    }

    // Size range
    if property.size < criteria.min_size || property.size > criteria.max_size {
        return false;
    }

    matches_text(property, &criteria.query)
}

/// Case-insensitive substring match against title or location
#[inline]
pub fn matches_text(property: &Property, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    property.title.to_lowercase().contains(&needle)
        || property.location.to_lowercase().contains(&needle)
}

/// Narrow a list down to the matching properties, keeping their order
pub fn filter_properties<'a>(
    properties: &'a [Property],
    criteria: &FilterCriteria,
) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|property| matches(property, criteria))
        .collect()
}
