//! 集成测试共享工具

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use geoip2_extras::cache::GeoCache;
use geoip2_extras::cache::moka::MokaKvCache;
use geoip2_extras::metrics_core::NoopMetrics;
use geoip2_extras::services::geoip::{GeoDatabase, GeoFields, GeoResolver, LookupError};

/// 内存中的城市库：
/// - 8.8.8.8 → 美国城市记录
/// - 私有地址 → 不存在
/// - 其他 → 数据库错误
pub struct FakeCityDatabase {
    pub calls: AtomicUsize,
}

impl FakeCityDatabase {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn google_dns_fields() -> GeoFields {
    GeoFields {
        country_code: Some("US".to_string()),
        country_name: Some("United States".to_string()),
        city: Some("Mountain View".to_string()),
        region: Some("CA".to_string()),
        postal_code: Some("94043".to_string()),
        latitude: Some(37.751),
        longitude: Some(-97.822),
        dma_code: Some(807),
        time_zone: Some("America/Chicago".to_string()),
        continent_code: Some("NA".to_string()),
        continent_name: Some("North America".to_string()),
        is_in_european_union: Some(false),
    }
}

impl GeoDatabase for FakeCityDatabase {
    fn has_city_db(&self) -> bool {
        true
    }

    fn has_country_db(&self) -> bool {
        false
    }

    fn lookup_city(&self, ip: &str) -> Result<GeoFields, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match ip {
            "8.8.8.8" => Ok(google_dns_fields()),
            "10.0.0.1" | "192.168.0.1" | "127.0.0.1" => {
                Err(LookupError::AddressNotFound(ip.to_string()))
            }
            _ => Err(LookupError::database("simulated decoding failure")),
        }
    }

    fn lookup_country(&self, _ip: &str) -> Result<GeoFields, LookupError> {
        Err(LookupError::database("country database not loaded"))
    }

    fn name(&self) -> &'static str {
        "fake-city"
    }
}

pub fn memory_cache() -> GeoCache {
    GeoCache::new(Arc::new(MokaKvCache::new(1000)), "geoip2-extras::", 3600)
}

pub fn resolver_with(db: Arc<FakeCityDatabase>) -> GeoResolver {
    GeoResolver::new(memory_cache(), db, NoopMetrics::arc())
}
