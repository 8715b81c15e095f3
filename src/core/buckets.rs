use serde::Serialize;
use crate::core::units::{to_canonical_exact, SizeUnit};

/// A predefined quick-select range
///
/// Breakpoints are integers so that unit conversion stays exact and
/// highlight comparisons never suffer from floating point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeBucket {
    pub min: u64,
    pub max: u64,
    pub label: &'static str,
}

impl RangeBucket {
    pub const fn new(min: u64, max: u64, label: &'static str) -> Self {
        Self { min, max, label }
    }

    /// Bounds of this bucket in canonical units, assuming its breakpoints are in `unit`
    #[inline]
    pub fn canonical_bounds(&self, unit: SizeUnit) -> (u64, u64) {
        (
            to_canonical_exact(self.min, unit),
            to_canonical_exact(self.max, unit),
        )
    }

    /// Whether the current bounds select exactly this bucket
    #[inline]
    pub fn is_selected(&self, min: f64, max: f64) -> bool {
        min == self.min as f64 && max == self.max as f64
    }
}

/// Inclusive price bounds produced by a price bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBounds {
    pub min_price: f64,
    pub max_price: f64,
}

/// Inclusive size bounds in square feet produced by a size bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeBounds {
    pub min_size: f64,
    pub max_size: f64,
}

pub const PRICE_BUCKETS: [RangeBucket; 4] = [
    RangeBucket::new(0, 2_000_000, "< ₹20L"),
    RangeBucket::new(2_000_000, 5_000_000, "₹20L - ₹50L"),
    RangeBucket::new(5_000_000, 10_000_000, "₹50L - ₹1Cr"),
    RangeBucket::new(10_000_000, 1_000_000_000, "> ₹1Cr"),
];

pub const SQ_FT_BUCKETS: [RangeBucket; 4] = [
    RangeBucket::new(0, 1_000, "< 1000 sq ft"),
    RangeBucket::new(1_000, 2_000, "1000-2000 sq ft"),
    RangeBucket::new(2_000, 5_000, "2000-5000 sq ft"),
    RangeBucket::new(5_000, 100_000, "> 5000 sq ft"),
];

pub const SQ_GAZ_BUCKETS: [RangeBucket; 4] = [
    RangeBucket::new(0, 111, "< 111 sq gaz"),
    RangeBucket::new(111, 222, "111-222 sq gaz"),
    RangeBucket::new(222, 555, "222-555 sq gaz"),
    RangeBucket::new(555, 11_111, "> 555 sq gaz"),
];

/// Find the bucket whose bounds equal `min`/`max` exactly
///
/// Bounds and breakpoints must be in the same unit. For size buckets use
/// [`select_size_bucket`], which handles the conversion.
pub fn select_bucket(buckets: &[RangeBucket], min: f64, max: f64) -> Option<&RangeBucket> {
    buckets.iter().find(|bucket| bucket.is_selected(min, max))
}

/// Find the size bucket of `unit` that is currently active for canonical bounds
///
/// Each bucket's bounds are converted to square feet before the comparison,
/// so raw gaz breakpoints are never compared against square-feet criteria.
pub fn select_size_bucket(
    unit: SizeUnit,
    min_size: f64,
    max_size: f64,
) -> Option<&'static RangeBucket> {
    unit.buckets().iter().find(|bucket| {
        let (min, max) = bucket.canonical_bounds(unit);
        min_size == min as f64 && max_size == max as f64
    })
}

/// Canonical size bounds for a size bucket whose breakpoints are in `unit`
#[inline]
pub fn apply_bucket(bucket: &RangeBucket, unit: SizeUnit) -> SizeBounds {
    let (min, max) = bucket.canonical_bounds(unit);
    SizeBounds {
        min_size: min as f64,
        max_size: max as f64,
    }
}

#[inline]
pub fn apply_price_bucket(bucket: &RangeBucket) -> PriceBounds {
    PriceBounds {
        min_price: bucket.min as f64,
        max_price: bucket.max as f64,
    }
}

/// Classify a value into the bucket table
///
/// Buckets are lower-inclusive and upper-exclusive; the last bucket is
/// open-ended. Negative values and NaN fall into no bucket.
pub fn bucket_for(buckets: &[RangeBucket], value: f64) -> Option<&RangeBucket> {
    if value.is_nan() {
        return None;
    }

    let last = buckets.len().checked_sub(1)?;
    buckets.iter().enumerate().find_map(|(i, bucket)| {
        let above_min = value >= bucket.min as f64;
        let below_max = i == last || value < bucket.max as f64;
        (above_min && below_max).then_some(bucket)
    })
}

/// Look up a bucket by its display label
pub fn find_bucket<'a>(buckets: &'a [RangeBucket], label: &str) -> Option<&'a RangeBucket> {
    let label = label.trim();
    buckets.iter().find(|bucket| bucket.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_contiguous() {
        for table in [&PRICE_BUCKETS[..], &SQ_FT_BUCKETS[..], &SQ_GAZ_BUCKETS[..]] {
            assert_eq!(table[0].min, 0);
            for pair in table.windows(2) {
                assert_eq!(pair[0].max, pair[1].min);
                assert!(pair[0].min < pair[0].max);
            }
        }
    }

    #[test]
    fn test_apply_gaz_bucket() {
        let bucket = find_bucket(&SQ_GAZ_BUCKETS, "111-222 sq gaz").unwrap();
        let bounds = apply_bucket(bucket, SizeUnit::SquareGaz);

        assert_eq!(bounds, SizeBounds { min_size: 999.0, max_size: 1998.0 });
    }

    #[test]
    fn test_apply_sqft_bucket_unchanged() {
        let bounds = apply_bucket(&SQ_FT_BUCKETS[1], SizeUnit::SquareFeet);
        assert_eq!(bounds, SizeBounds { min_size: 1000.0, max_size: 2000.0 });
    }

    #[test]
    fn test_select_size_bucket_recomputes_canonical() {
        let active = select_size_bucket(SizeUnit::SquareGaz, 999.0, 1998.0);
        assert_eq!(active.map(|b| b.label), Some("111-222 sq gaz"));

        // Raw gaz numbers inside square-feet criteria must not highlight anything
        assert!(select_size_bucket(SizeUnit::SquareGaz, 111.0, 222.0).is_none());
    }

    #[test]
    fn test_select_price_bucket() {
        let active = select_bucket(&PRICE_BUCKETS, 2_000_000.0, 5_000_000.0);
        assert_eq!(active.map(|b| b.label), Some("₹20L - ₹50L"));
        assert!(select_bucket(&PRICE_BUCKETS, 0.0, 1_000_000_001.0).is_none());
    }

    #[test]
    fn test_bucket_for_boundaries() {
        assert_eq!(bucket_for(&PRICE_BUCKETS, 0.0).unwrap().label, "< ₹20L");
        assert_eq!(bucket_for(&PRICE_BUCKETS, 2_000_000.0).unwrap().label, "₹20L - ₹50L");
        assert_eq!(bucket_for(&PRICE_BUCKETS, 9_999_999.99).unwrap().label, "₹50L - ₹1Cr");
        assert_eq!(bucket_for(&PRICE_BUCKETS, 5e12).unwrap().label, "> ₹1Cr");
        assert!(bucket_for(&PRICE_BUCKETS, -1.0).is_none());
        assert!(bucket_for(&PRICE_BUCKETS, f64::NAN).is_none());
        assert!(bucket_for(&[], 10.0).is_none());
    }

    #[test]
    fn test_find_bucket_unknown_label() {
        assert!(find_bucket(&PRICE_BUCKETS, "cheap").is_none());
        assert!(find_bucket(&SQ_FT_BUCKETS, " < 1000 sq ft ").is_some());
    }
}
