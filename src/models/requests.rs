use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;
use crate::core::{find_bucket, to_canonical, FilterCriteria, SizeUnit, PRICE_BUCKETS};
use crate::models::domain::{NewProperty, PropertyChanges, PropertyStatus};

/// Errors turning request parameters into canonical values
#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("Invalid {field}: value must be a finite number")]
    NonFinite { field: &'static str },

    #[error("Unknown price bucket: {0}")]
    UnknownPriceBucket(String),

    #[error("Unknown size bucket {label:?} for unit {unit}")]
    UnknownSizeBucket { label: String, unit: SizeUnit },

    #[error("Invalid {field} range: min {min} is greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Query parameters of the search endpoint
///
/// Size values and size bucket labels are interpreted in `sizeUnit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[validate(range(min = 0.0))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub min_size: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_size: Option<f64>,
    #[serde(default, alias = "searchQuery")]
    pub q: Option<String>,
    #[serde(default)]
    pub size_unit: SizeUnit,
    pub price_bucket: Option<String>,
    pub size_bucket: Option<String>,
    pub limit: Option<usize>,
}

impl SearchParams {
    /// Build canonical criteria
    ///
    /// Defaults come first, then bucket selections, then explicit bounds.
    /// Size inputs are converted to square feet exactly once, here.
    pub fn to_criteria(&self) -> Result<FilterCriteria, CriteriaError> {
        let mut criteria = FilterCriteria::default();

        if let Some(label) = &self.price_bucket {
            let bucket = find_bucket(&PRICE_BUCKETS, label)
                .ok_or_else(|| CriteriaError::UnknownPriceBucket(label.clone()))?;
            criteria = criteria.with_price_bucket(bucket);
        }

        if let Some(label) = &self.size_bucket {
            let bucket = find_bucket(self.size_unit.buckets(), label).ok_or_else(|| {
                CriteriaError::UnknownSizeBucket {
                    label: label.clone(),
                    unit: self.size_unit,
                }
            })?;
            criteria = criteria.with_size_bucket(bucket, self.size_unit);
        }

        if let Some(min_price) = self.min_price {
            criteria.min_price = min_price;
        }
        if let Some(max_price) = self.max_price {
            criteria.max_price = max_price;
        }
        if let Some(min_size) = self.min_size {
            criteria.min_size = to_canonical(min_size, self.size_unit);
        }
        if let Some(max_size) = self.max_size {
            criteria.max_size = to_canonical(max_size, self.size_unit);
        }
        if let Some(query) = &self.q {
            criteria.query = query.clone();
        }

        finite("minPrice", criteria.min_price)?;
        finite("maxPrice", criteria.max_price)?;
        finite("minSize", criteria.min_size)?;
        finite("maxSize", criteria.max_size)?;

        if criteria.min_price > criteria.max_price {
            return Err(CriteriaError::InvertedRange {
                field: "price",
                min: criteria.min_price,
                max: criteria.max_price,
            });
        }
        if criteria.min_size > criteria.max_size {
            return Err(CriteriaError::InvertedRange {
                field: "size",
                min: criteria.min_size,
                max: criteria.max_size,
            });
        }

        Ok(criteria)
    }
}

/// NaN bounds compare false both ways and would disable the filter
fn finite(field: &'static str, value: f64) -> Result<f64, CriteriaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CriteriaError::NonFinite { field })
    }
}

/// Query parameters of the bucket table endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTableParams {
    #[serde(default)]
    pub size_unit: SizeUnit,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Current size bounds, already in square feet
    pub min_size: Option<f64>,
    pub max_size: Option<f64>,
}

impl BucketTableParams {
    pub fn current_criteria(&self) -> FilterCriteria {
        let defaults = FilterCriteria::default();
        FilterCriteria {
            min_price: self.min_price.unwrap_or(defaults.min_price),
            max_price: self.max_price.unwrap_or(defaults.max_price),
            min_size: self.min_size.unwrap_or(defaults.min_size),
            max_size: self.max_size.unwrap_or(defaults.max_size),
            query: defaults.query,
        }
    }
}

/// Request to create a listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub size: f64,
    #[serde(default)]
    pub size_unit: SizeUnit,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Vec<String>,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub condition: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[validate(length(min = 1))]
    pub property_type: String,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,
    pub furnished: bool,
}

impl CreatePropertyRequest {
    pub fn into_new_property(self, user_id: i32) -> Result<NewProperty, CriteriaError> {
        let price = finite("price", self.price)?;
        let size = finite("size", to_canonical(self.size, self.size_unit))?;

        Ok(NewProperty {
            user_id,
            title: self.title,
            description: self.description,
            price,
            size,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            images: self.images,
            phone: self.phone,
            condition: self.condition,
            amenities: self.amenities,
            facilities: self.facilities,
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            furnished: self.furnished,
        })
    }
}

/// Partial update of a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub size: Option<f64>,
    #[serde(default)]
    pub size_unit: SizeUnit,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub condition: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub facilities: Option<Vec<String>>,
    pub property_type: Option<String>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,
    pub furnished: Option<bool>,
    pub status: Option<PropertyStatus>,
}

impl UpdatePropertyRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.size.is_none()
            && self.location.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.images.is_none()
            && self.phone.is_none()
            && self.condition.is_none()
            && self.amenities.is_none()
            && self.facilities.is_none()
            && self.property_type.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.furnished.is_none()
            && self.status.is_none()
    }

    pub fn into_changes(self) -> Result<PropertyChanges, CriteriaError> {
        let price = self.price.map(|price| finite("price", price)).transpose()?;
        let size = self
            .size
            .map(|size| finite("size", to_canonical(size, self.size_unit)))
            .transpose()?;

        Ok(PropertyChanges {
            title: self.title,
            description: self.description,
            price,
            size,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            images: self.images,
            phone: self.phone,
            condition: self.condition,
            amenities: self.amenities,
            facilities: self.facilities,
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            furnished: self.furnished,
            status: self.status,
        })
    }
}

/// Administrative status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: PropertyStatus,
}
