use async_trait::async_trait;
use moka::future::Cache;
use moka::policy::Expiry;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::cache::KeyValueCache;

/// 缓存条目，携带写入时指定的 TTL
#[derive(Clone)]
struct CachedValue {
    data: Vec<u8>,
    ttl: Option<Duration>,
}

/// 按条目 TTL 计算过期时间
struct PerEntryExpiry;

impl Expiry<String, CachedValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    // 覆盖写入时重新计时
    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// 进程内缓存（moka）
pub struct MokaKvCache {
    inner: Cache<String, CachedValue>,
}

impl MokaKvCache {
    pub fn new(max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        debug!(
            "MokaKvCache initialized with max capacity: {}",
            max_capacity
        );
        Self { inner }
    }

    /// 执行挂起的维护任务（过期、淘汰）
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

#[async_trait]
impl KeyValueCache for MokaKvCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.inner.get(key).await;
        if value.is_none() {
            trace!("Key not found in memory cache: {}", key);
        }
        value.map(|v| v.data)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) {
        let ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs));
        self.inner
            .insert(key.to_string(), CachedValue { data: value, ttl })
            .await;
        trace!("Inserted key into memory cache: {} (ttl: {:?})", key, ttl);
    }

    async fn delete(&self, key: &str) {
        self.inner.invalidate(key).await;
        trace!("Removed key from memory cache: {}", key);
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
