use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a listing, managed by owners and administrators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "property_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Active,
    Inactive,
}

/// A property listing
///
/// `size` is always in square feet; conversion from other units happens
/// before a listing is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub size: f64,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub images: Vec<String>,
    pub phone: String,
    pub condition: String,
    pub amenities: Vec<String>,
    pub facilities: Vec<String>,
    pub property_type: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub furnished: bool,
    #[serde(default)]
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Image shown on listing cards
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Validated listing data ready to be inserted
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub size: f64,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub images: Vec<String>,
    pub phone: String,
    pub condition: String,
    pub amenities: Vec<String>,
    pub facilities: Vec<String>,
    pub property_type: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub furnished: bool,
}

/// Partial listing update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub size: Option<f64>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Option<Vec<String>>,
    pub phone: Option<String>,
    pub condition: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub facilities: Option<Vec<String>>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub furnished: Option<bool>,
    pub status: Option<PropertyStatus>,
}

/// Registered user
///
/// Credentials live with the identity provider and are never loaded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub theme: String,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&PropertyStatus::Inactive).unwrap(), "\"inactive\"");
        assert_eq!(PropertyStatus::default(), PropertyStatus::Active);
    }

    #[test]
    fn test_property_json_is_camel_case() {
        let property = Property {
            id: 7,
            user_id: 3,
            title: "Bareilly 3BHK Flat".to_string(),
            description: "Corner flat".to_string(),
            price: 3_000_000.0,
            size: 1500.0,
            location: "Civil Lines, Bareilly".to_string(),
            latitude: 28.367,
            longitude: 79.4304,
            images: vec!["uploads/a.jpg".to_string()],
            phone: "9999999999".to_string(),
            condition: "new".to_string(),
            amenities: vec![],
            facilities: vec![],
            property_type: "flat".to_string(),
            bedrooms: Some(3),
            bathrooms: None,
            furnished: false,
            status: PropertyStatus::Active,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["userId"], 3);
        assert_eq!(json["propertyType"], "flat");
        assert_eq!(json["status"], "active");
        assert_eq!(property.cover_image(), Some("uploads/a.jpg"));
    }
}
