//! 地理数据缓存
//!
//! 以 `<key_prefix><ip>` 为键，将 `GeoRecord` 序列化为 JSON 存入底层缓存。
//! 写入 `None` 时删除已有条目，不写占位值。

use std::sync::Arc;

use tracing::{trace, warn};

use crate::cache::KeyValueCache;
use crate::config::CacheConfig;
use crate::services::geoip::GeoRecord;

#[derive(Clone)]
pub struct GeoCache {
    backend: Arc<dyn KeyValueCache>,
    key_prefix: String,
    ttl_secs: u64,
}

impl GeoCache {
    pub fn new(backend: Arc<dyn KeyValueCache>, key_prefix: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            backend,
            key_prefix: key_prefix.into(),
            ttl_secs,
        }
    }

    pub fn from_config(backend: Arc<dyn KeyValueCache>, config: &CacheConfig) -> Self {
        Self::new(backend, config.key_prefix.clone(), config.default_ttl)
    }

    pub fn cache_key(&self, ip: &str) -> String {
        format!("{}{}", self.key_prefix, ip)
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn get(&self, ip: &str) -> Option<GeoRecord> {
        let key = self.cache_key(ip);
        let bytes = self.backend.get(&key).await?;

        match serde_json::from_slice::<GeoRecord>(&bytes) {
            Ok(record) => {
                trace!("GeoIP2 cache hit: {}", key);
                Some(record)
            }
            Err(e) => {
                warn!("Discarding unreadable GeoIP2 cache entry {}: {}", key, e);
                None
            }
        }
    }

    pub async fn set(&self, ip: &str, record: Option<&GeoRecord>) {
        let key = self.cache_key(ip);

        let Some(record) = record else {
            self.backend.delete(&key).await;
            trace!("GeoIP2 cache entry removed: {}", key);
            return;
        };

        match serde_json::to_vec(record) {
            Ok(bytes) => {
                self.backend.set(&key, bytes, self.ttl_secs).await;
                trace!("GeoIP2 cache entry stored: {}", key);
            }
            Err(e) => warn!("Failed to serialize GeoIP2 record for {}: {}", key, e),
        }
    }
}
