use std::sync::Arc;

use tracing::info;

use crate::cache::KeyValueCache;
use crate::cache::moka::MokaKvCache;
use crate::cache::redis::RedisKvCache;
use crate::config::CacheConfig;
use crate::errors::{GeoIpError, Result};

pub struct CacheFactory;

impl CacheFactory {
    /// 根据 `cache.type` 创建缓存后端
    pub fn create(config: &CacheConfig) -> Result<Arc<dyn KeyValueCache>> {
        let backend: Arc<dyn KeyValueCache> = match config.cache_type.as_str() {
            "memory" | "moka" => Arc::new(MokaKvCache::new(config.memory.max_capacity)),
            "redis" => Arc::new(RedisKvCache::new(&config.redis.url)?),
            other => {
                return Err(GeoIpError::cache_backend_not_found(format!(
                    "Unknown cache type: {}",
                    other
                )));
            }
        };

        info!("Using cache backend: {}", backend.name());
        Ok(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_memory() {
        let config = CacheConfig::default();
        let cache = CacheFactory::create(&config).unwrap();
        assert_eq!(cache.name(), "memory");
    }

    #[test]
    fn test_create_unknown_type() {
        let config = CacheConfig {
            cache_type: "memcached".to_string(),
            ..CacheConfig::default()
        };
        let result = CacheFactory::create(&config);
        assert!(matches!(result, Err(GeoIpError::CacheBackendNotFound(_))));
    }
}
