// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{NewProperty, Property, PropertyChanges, PropertyStatus, User};
pub use requests::{
    BucketTableParams, CreatePropertyRequest, CriteriaError, SearchParams, UpdatePropertyRequest,
    UpdateStatusRequest,
};
pub use responses::{BucketTablesResponse, BucketView, ErrorResponse, HealthResponse, SearchResponse};
