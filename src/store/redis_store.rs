//! Redis-backed store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use super::{Compute, Store};
use crate::error::{CacheError, CacheResult};
use crate::options::StoreOptions;

/// [`Store`] backed by a Redis server.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Expiration is delegated entirely to Redis: when the fetch options
/// carry an `expire_in` TTL, the value is written with `SET .. EX` and Redis
/// removes it autonomously - this layer performs no polling or background
/// sweeps.
///
/// The GET / compute / SET sequence is not atomic; concurrent callers missing
/// on the same key may each compute once. This is accepted convenience
/// caching, not a consistency guarantee.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Configuration`] if the URL is invalid, and
    /// [`CacheError::StoreUnavailable`] if the connection cannot be
    /// established or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Configuration(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::StoreUnavailable(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }

    /// Checks if the Redis server is reachable.
    pub async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn fetch(
        &self,
        key: &str,
        options: &StoreOptions,
        compute: Compute<'_>,
    ) -> CacheResult<String> {
        let mut conn = self.client.clone();

        let cached: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::Operation(format!("Redis GET error for {}: {}", key, e)))?;

        if let Some(value) = cached {
            debug!("Cache HIT: {}", key);
            return Ok(value);
        }

        debug!("Cache MISS: {}", key);
        let value = compute().await?;

        match options.expire_in() {
            Some(seconds) => {
                conn.set_ex::<_, _, ()>(key, &value, seconds)
                    .await
                    .map_err(|e| {
                        CacheError::Operation(format!("Redis SET error for {}: {}", key, e))
                    })?;
                debug!("Cache SET: {} (TTL: {}s)", key, seconds);
            }
            None => {
                conn.set::<_, _, ()>(key, &value).await.map_err(|e| {
                    CacheError::Operation(format!("Redis SET error for {}: {}", key, e))
                })?;
                debug!("Cache SET: {}", key);
            }
        }

        Ok(value)
    }
}
