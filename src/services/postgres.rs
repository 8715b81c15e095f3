use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use crate::models::{NewProperty, Property, PropertyChanges, PropertyStatus, User};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

const PROPERTY_COLUMNS: &str = r#"
    id, user_id, title, description, price, size, location, latitude, longitude,
    images, phone, condition, amenities, facilities, property_type, bedrooms,
    bathrooms, furnished, status, created_at
"#;

const USER_COLUMNS: &str = r#"
    id, username, name, email, phone, is_admin, theme, email_notifications, created_at
"#;

fn property_from_row(row: &PgRow) -> Property {
    Property {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        description: row.get("description"),
        price: row.get("price"),
        size: row.get("size"),
        location: row.get("location"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        images: row.get("images"),
        phone: row.get("phone"),
        condition: row.get("condition"),
        amenities: row.get("amenities"),
        facilities: row.get("facilities"),
        property_type: row.get("property_type"),
        bedrooms: row.get("bedrooms"),
        bathrooms: row.get("bathrooms"),
        furnished: row.get("furnished"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        is_admin: row.get("is_admin"),
        theme: row.get("theme"),
        email_notifications: row.get("email_notifications"),
        created_at: row.get("created_at"),
    }
}

/// PostgreSQL store for listings and users
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// All listings in insertion order
    pub async fn list_properties(&self) -> Result<Vec<Property>, PostgresError> {
        let query = format!("SELECT {} FROM properties ORDER BY id", PROPERTY_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        let properties: Vec<Property> = rows.iter().map(property_from_row).collect();

        tracing::debug!("Fetched {} properties", properties.len());

        Ok(properties)
    }

    pub async fn get_property(&self, id: i32) -> Result<Option<Property>, PostgresError> {
        let query = format!("SELECT {} FROM properties WHERE id = $1", PROPERTY_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(property_from_row))
    }

    pub async fn list_properties_by_user(&self, user_id: i32) -> Result<Vec<Property>, PostgresError> {
        let query = format!(
            "SELECT {} FROM properties WHERE user_id = $1 ORDER BY id",
            PROPERTY_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(property_from_row).collect())
    }

    /// Insert a listing; new listings always start out active
    pub async fn create_property(&self, property: NewProperty) -> Result<Property, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO properties (
                user_id, title, description, price, size, location, latitude, longitude,
                images, phone, condition, amenities, facilities, property_type, bedrooms,
                bathrooms, furnished, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, NOW())
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(property.user_id)
            .bind(&property.title)
            .bind(&property.description)
            .bind(property.price)
            .bind(property.size)
            .bind(&property.location)
            .bind(property.latitude)
            .bind(property.longitude)
            .bind(&property.images)
            .bind(&property.phone)
            .bind(&property.condition)
            .bind(&property.amenities)
            .bind(&property.facilities)
            .bind(&property.property_type)
            .bind(property.bedrooms)
            .bind(property.bathrooms)
            .bind(property.furnished)
            .bind(PropertyStatus::Active)
            .fetch_one(&self.pool)
            .await?;

        let created = property_from_row(&row);
        tracing::info!("Created property {} for user {}", created.id, created.user_id);

        Ok(created)
    }

    /// Apply a partial update; fields left as `None` keep their value
    pub async fn update_property(
        &self,
        id: i32,
        changes: PropertyChanges,
    ) -> Result<Property, PostgresError> {
        let query = format!(
            r#"
            UPDATE properties SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                size = COALESCE($5, size),
                location = COALESCE($6, location),
                latitude = COALESCE($7, latitude),
                longitude = COALESCE($8, longitude),
                images = COALESCE($9, images),
                phone = COALESCE($10, phone),
                condition = COALESCE($11, condition),
                amenities = COALESCE($12, amenities),
                facilities = COALESCE($13, facilities),
                property_type = COALESCE($14, property_type),
                bedrooms = COALESCE($15, bedrooms),
                bathrooms = COALESCE($16, bathrooms),
                furnished = COALESCE($17, furnished),
                status = COALESCE($18, status)
            WHERE id = $1
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(changes.title)
            .bind(changes.description)
            .bind(changes.price)
            .bind(changes.size)
            .bind(changes.location)
            .bind(changes.latitude)
            .bind(changes.longitude)
            .bind(changes.images)
            .bind(changes.phone)
            .bind(changes.condition)
            .bind(changes.amenities)
            .bind(changes.facilities)
            .bind(changes.property_type)
            .bind(changes.bedrooms)
            .bind(changes.bathrooms)
            .bind(changes.furnished)
            .bind(changes.status)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(property_from_row)
            .ok_or_else(|| PostgresError::NotFound(format!("property {}", id)))
    }

    pub async fn set_property_status(
        &self,
        id: i32,
        status: PropertyStatus,
    ) -> Result<Property, PostgresError> {
        let changes = PropertyChanges {
            status: Some(status),
            ..PropertyChanges::default()
        };

        let updated = self.update_property(id, changes).await?;
        tracing::info!("Property {} status set to {:?}", id, status);

        Ok(updated)
    }

    /// Delete a listing, returning whether a row was removed
    pub async fn delete_property(&self, id: i32) -> Result<bool, PostgresError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All registered users, for the admin dashboard
    pub async fn list_users(&self) -> Result<Vec<User>, PostgresError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
