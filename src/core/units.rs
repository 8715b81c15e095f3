use serde::{Deserialize, Serialize};
use crate::core::buckets::{RangeBucket, SQ_FT_BUCKETS, SQ_GAZ_BUCKETS};

/// Square feet per square gaz
pub const SQ_FT_PER_SQ_GAZ: u64 = 9;

/// Unit a user-facing size number is expressed in
///
/// Square feet is the canonical unit: every size stored on a property or
/// inside a `FilterCriteria` is in square feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeUnit {
    #[default]
    #[serde(rename = "sqft", alias = "sq_ft")]
    SquareFeet,
    #[serde(rename = "sqgaz", alias = "sq_gaz")]
    SquareGaz,
}

impl SizeUnit {
    /// Number of canonical units in one unit of `self`
    #[inline]
    pub fn factor(self) -> u64 {
        match self {
            SizeUnit::SquareFeet => 1,
            SizeUnit::SquareGaz => SQ_FT_PER_SQ_GAZ,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeUnit::SquareFeet => "sq ft",
            SizeUnit::SquareGaz => "sq gaz",
        }
    }

    /// Quick-select size buckets, with breakpoints expressed in this unit
    pub fn buckets(self) -> &'static [RangeBucket] {
        match self {
            SizeUnit::SquareFeet => &SQ_FT_BUCKETS,
            SizeUnit::SquareGaz => &SQ_GAZ_BUCKETS,
        }
    }
}

impl std::fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeUnit::SquareFeet => write!(f, "sqft"),
            SizeUnit::SquareGaz => write!(f, "sqgaz"),
        }
    }
}

/// Convert a size expressed in `unit` to square feet
#[inline]
pub fn to_canonical(value: f64, unit: SizeUnit) -> f64 {
    match unit {
        SizeUnit::SquareFeet => value,
        SizeUnit::SquareGaz => value * SQ_FT_PER_SQ_GAZ as f64,
    }
}

/// Convert a size in square feet to `unit`
#[inline]
pub fn from_canonical(value: f64, unit: SizeUnit) -> f64 {
    match unit {
        SizeUnit::SquareFeet => value,
        SizeUnit::SquareGaz => value / SQ_FT_PER_SQ_GAZ as f64,
    }
}

/// Integer conversion for bucket breakpoints
#[inline]
pub fn to_canonical_exact(value: u64, unit: SizeUnit) -> u64 {
    value.saturating_mul(unit.factor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_unit_is_identity() {
        assert_eq!(to_canonical(1500.0, SizeUnit::SquareFeet), 1500.0);
        assert_eq!(from_canonical(1500.0, SizeUnit::SquareFeet), 1500.0);
    }

    #[test]
    fn test_gaz_conversion() {
        assert_eq!(to_canonical(111.0, SizeUnit::SquareGaz), 999.0);
        assert_eq!(from_canonical(1998.0, SizeUnit::SquareGaz), 222.0);
        assert_eq!(to_canonical_exact(11111, SizeUnit::SquareGaz), 99999);
    }

    #[test]
    fn test_round_trip() {
        for x in [0.0, 1.0, 10.5, 999.0, 1234.567, 100000.0] {
            let back = to_canonical(from_canonical(x, SizeUnit::SquareGaz), SizeUnit::SquareGaz);
            assert!((back - x).abs() < 1e-9, "round trip of {} gave {}", x, back);
        }
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(serde_json::to_string(&SizeUnit::SquareGaz).unwrap(), "\"sqgaz\"");
        let unit: SizeUnit = serde_json::from_str("\"sqft\"").unwrap();
        assert_eq!(unit, SizeUnit::SquareFeet);
        assert_eq!(SizeUnit::default(), SizeUnit::SquareFeet);
    }
}
