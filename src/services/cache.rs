use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::models::Property;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Two-tier cache for fetched listing sets
///
/// L1 is a per-process moka cache, L2 is Redis shared by every instance.
/// Search re-scans the full listing set on every request, so the set
/// itself is what gets cached; any write invalidates it.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Arc<Vec<Property>>>,
    ttl_secs: u64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Get a listing set (L1 first, then L2)
    pub async fn get_properties(&self, key: &str) -> Result<Arc<Vec<Property>>, CacheError> {
        if let Some(properties) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(properties);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let properties = Arc::new(serde_json::from_str::<Vec<Property>>(&json)?);
                self.l1_cache.insert(key.to_string(), properties.clone()).await;
                Ok(properties)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Store a listing set in both tiers
    pub async fn put_properties(&self, key: &str, properties: &[Property]) -> Result<(), CacheError> {
        let json = serde_json::to_string(properties)?;

        self.l1_cache
            .insert(key.to_string(), Arc::new(properties.to_vec()))
            .await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;

        tracing::trace!("Cache set: {} ({} properties)", key, properties.len());
        Ok(())
    }

    /// Drop every cached listing set after a write
    pub async fn invalidate_listings(&self) -> Result<(), CacheError> {
        self.l1_cache.invalidate_all();

        let mut conn = self.redis.lock().await;
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(CacheKey::LISTINGS_PATTERN)
            .query_async(&mut *conn)
            .await?;

        if !keys.is_empty() {
            redis::cmd("DEL")
                .arg(keys)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::debug!("Invalidated cached listings");
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    pub const LISTINGS_PATTERN: &'static str = "listings:*";

    /// Every listing
    pub fn all_properties() -> String {
        "listings:all".to_string()
    }
}
