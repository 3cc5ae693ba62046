//! Redis cache implementation.
//!
//! TTLs map to `SET .. EX`, so expiry is enforced by the server.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use collabgraph_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using a connection manager.
///
/// The manager reconnects on its own; each call clones the cheap handle.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the server is unreachable.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabgraph_core::cache::profile_key;
    use uuid::Uuid;

    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url()).await.ok()
    }

    #[tokio::test]
    async fn test_redis_set_get_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = profile_key(Uuid::new_v4());

        cache.set(&key, b"{\"name\":\"A\"}", None).await.unwrap();
        assert_eq!(
            cache.get(&key).await.unwrap(),
            Some(b"{\"name\":\"A\"}".to_vec())
        );

        cache.delete(&key).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = profile_key(Uuid::new_v4());

        cache
            .set(&key, b"expiring", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_sub_second_ttl_rounds_up() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = profile_key(Uuid::new_v4());

        cache
            .set(&key, b"v", Some(Duration::from_millis(10)))
            .await
            .unwrap();

        assert!(cache.get(&key).await.unwrap().is_some());
        cache.delete(&key).await.unwrap();
    }
}
