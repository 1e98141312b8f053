//! 地理数据解析器
//!
//! cache-aside 流程：
//! 1. 先查缓存，命中直接返回
//! 2. 未命中时查询数据库（有城市库查城市库，否则查国家库）
//! 3. 按结果分类：
//!    - 查询成功 → 写入缓存并返回
//!    - 地址不存在 → 生成 "XX"/"unknown" 哨兵记录，写入缓存并返回
//!    - 数据库错误 → 不写缓存，返回空

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, trace};

use super::maxmind::MaxMindDatabase;
use super::provider::{GeoDatabase, LookupError};
use super::record::{GeoFields, GeoRecord};
use crate::cache::{CacheFactory, GeoCache};
use crate::config::StaticConfig;
use crate::errors::{self, GeoIpError};
use crate::metrics_core::MetricsRecorder;

/// 一次解析的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// 数据库命中（或缓存命中）
    Resolved(GeoRecord),
    /// 地址合法但数据库中没有，返回哨兵记录
    Unknown(GeoRecord),
    /// 数据库错误，无记录
    Failed,
}

impl Resolution {
    pub fn into_record(self) -> Option<GeoRecord> {
        match self {
            Resolution::Resolved(record) | Resolution::Unknown(record) => Some(record),
            Resolution::Failed => None,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Resolved(_) => "resolved",
            Resolution::Unknown(_) => "unknown",
            Resolution::Failed => "failed",
        }
    }
}

/// GeoIP 解析器
#[derive(Clone)]
pub struct GeoResolver {
    cache: GeoCache,
    database: Arc<dyn GeoDatabase>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl GeoResolver {
    pub fn new(
        cache: GeoCache,
        database: Arc<dyn GeoDatabase>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            cache,
            database,
            metrics,
        }
    }

    /// 根据配置打开数据库并创建缓存
    ///
    /// 未配置 `geoip.path`、数据库不可读或缓存后端不可用时返回错误。
    pub fn from_config(
        config: &StaticConfig,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> errors::Result<Self> {
        let path = config.geoip.path.as_deref().ok_or_else(|| {
            GeoIpError::config("geoip.path is not set, no GeoIP2 database to load")
        })?;
        let database = MaxMindDatabase::open(
            path,
            &config.geoip.city_file,
            &config.geoip.country_file,
        )?;
        let backend = CacheFactory::create(&config.cache)?;
        let cache = GeoCache::from_config(backend, &config.cache);

        Ok(Self::new(cache, Arc::new(database), metrics))
    }

    pub fn cache(&self) -> &GeoCache {
        &self.cache
    }

    pub fn database(&self) -> &Arc<dyn GeoDatabase> {
        &self.database
    }

    /// 解析 IP 地址，返回记录或空
    pub async fn geo_data(&self, ip: &str) -> Option<GeoRecord> {
        self.resolve(ip).await.into_record()
    }

    /// 解析 IP 地址并区分结果类型
    pub async fn resolve(&self, ip: &str) -> Resolution {
        if let Some(record) = self.cache.get(ip).await {
            self.metrics.inc_geo_cache_hit();
            return if record.is_unknown() {
                Resolution::Unknown(record)
            } else {
                Resolution::Resolved(record)
            };
        }
        self.metrics.inc_geo_cache_miss();
        trace!("GeoIP2 cache miss for {}", ip);

        let start = Instant::now();
        let lookup = self.city_or_country(ip);
        self.metrics
            .observe_geo_lookup(start.elapsed().as_secs_f64());

        let resolution = match lookup {
            Ok(fields) => Resolution::Resolved(GeoRecord::new(ip, fields)),
            Err(LookupError::AddressNotFound(_)) => {
                debug!("IP not found in GeoIP2 database: {}", ip);
                Resolution::Unknown(GeoRecord::unknown(ip))
            }
            Err(LookupError::Database(msg)) => {
                error!("Error fetching GeoIP2 data for {}: {}", ip, msg);
                Resolution::Failed
            }
        };
        self.metrics.inc_geo_lookup(resolution.outcome());

        match &resolution {
            Resolution::Resolved(record) | Resolution::Unknown(record) => {
                self.cache.set(ip, Some(record)).await;
            }
            Resolution::Failed => {}
        }

        resolution
    }

    /// 有城市库时只查城市库，否则查国家库
    pub fn city_or_country(&self, ip: &str) -> Result<GeoFields, LookupError> {
        if self.database.has_city_db() {
            self.database.lookup_city(ip)
        } else if self.database.has_country_db() {
            self.database.lookup_country(ip)
        } else {
            Err(LookupError::database("no GeoIP2 database loaded"))
        }
    }
}
