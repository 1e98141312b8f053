use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::cache::KeyValueCache;
use crate::errors::{GeoIpError, Result};

/// Redis 缓存
pub struct RedisKvCache {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl RedisKvCache {
    /// 创建客户端并 PING 一次，连接失败视为缓存不可用
    pub fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            GeoIpError::cache_connection(format!("Invalid Redis URL '{}': {}", url, e))
        })?;

        // 测试 Redis 连接 - 使用同步连接进行简单测试
        let mut conn = client.get_connection().map_err(|e| {
            error!(
                "Failed to connect to Redis server: {}. Check Redis server status and URL: {}",
                e, url
            );
            GeoIpError::cache_connection(format!("Redis connection failed: {e}"))
        })?;
        let response: String = redis::cmd("PING").query(&mut conn).map_err(|e| {
            error!("Failed to ping Redis server: {}. URL: {}", e, url);
            GeoIpError::cache_connection(format!("Redis ping failed: {e}"))
        })?;
        debug!("Redis connection test successful: {}", response);

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
        })
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    async fn connection_or_reset(&self) -> Option<MultiplexedConnection> {
        match self.get_connection().await {
            Ok(c) => Some(c),
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                None
            }
        }
    }
}

#[async_trait]
impl KeyValueCache for RedisKvCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut conn = self.connection_or_reset().await?;

        let result: redis::RedisResult<Option<Vec<u8>>> = conn.get(key).await;
        match result {
            Ok(Some(data)) => {
                trace!("Successfully retrieved key: {}", key);
                Some(data)
            }
            Ok(None) => {
                trace!("Key not found in cache: {}", key);
                None
            }
            Err(e) => {
                error!("Failed to get key '{}': {}", key, e);
                // 连接可能已断开，重置连接
                self.reset_connection().await;
                None
            }
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) {
        let Some(mut conn) = self.connection_or_reset().await else {
            return;
        };

        let result: redis::RedisResult<()> = if ttl_secs > 0 {
            conn.set_ex(key, value, ttl_secs).await
        } else {
            conn.set(key, value).await
        };

        match result {
            Ok(()) => trace!("Successfully inserted key into cache: {}", key),
            Err(e) => {
                error!("Failed to insert key '{}' into cache: {}", key, e);
                self.reset_connection().await;
            }
        }
    }

    async fn delete(&self, key: &str) {
        let Some(mut conn) = self.connection_or_reset().await else {
            return;
        };

        match conn.del::<&str, i32>(key).await {
            Ok(deleted_count) => {
                if deleted_count > 0 {
                    trace!("Successfully removed key from cache: {}", key);
                } else {
                    trace!("Key not found in cache for removal: {}", key);
                }
            }
            Err(e) => {
                error!("Failed to remove key '{}': {}", key, e);
                self.reset_connection().await;
            }
        }
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = RedisKvCache::new("not-a-redis-url");
        assert!(matches!(result, Err(GeoIpError::CacheConnection(_))));
    }

    #[test]
    fn test_unreachable_server_is_rejected() {
        // 端口 1 上不会有 Redis
        let result = RedisKvCache::new("redis://127.0.0.1:1/");
        assert!(matches!(result, Err(GeoIpError::CacheConnection(_))));
    }
}
