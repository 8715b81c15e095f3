use serde::{Deserialize, Serialize};
use crate::core::{FilterCriteria, RangeBucket, SizeUnit};
use crate::models::domain::Property;

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub properties: Vec<Property>,
    pub total_results: usize,
    pub total_matches: usize,
    /// Criteria actually applied, sizes in square feet
    pub criteria: FilterCriteria,
    pub size_unit: SizeUnit,
    pub active_price_bucket: Option<String>,
    pub active_size_bucket: Option<String>,
}

/// One quick-select bucket as rendered by filter controls
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketView {
    pub label: String,
    pub min: u64,
    pub max: u64,
    pub canonical_min: u64,
    pub canonical_max: u64,
    pub active: bool,
}

impl BucketView {
    /// `canonical` holds the bucket bounds in the unit criteria are stored in
    pub fn new(bucket: &RangeBucket, canonical: (u64, u64), active: bool) -> Self {
        let (canonical_min, canonical_max) = canonical;
        Self {
            label: bucket.label.to_string(),
            min: bucket.min,
            max: bucket.max,
            canonical_min,
            canonical_max,
            active,
        }
    }
}

/// Bucket tables for the filter controls
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTablesResponse {
    pub size_unit: SizeUnit,
    pub size_unit_label: String,
    pub price: Vec<BucketView>,
    pub size: Vec<BucketView>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
