//! GeoIP2 服务模块
//!
//! 提供 IP 地址地理位置解析：
//! - MaxMind GeoIP2 / GeoLite2 本地数据库（城市库优先，国家库兜底）
//! - cache-aside 解析器，缓存命中与"地址不存在"哨兵记录

mod maxmind;
mod provider;
mod record;
mod resolver;

pub use maxmind::{DatabaseEdition, MaxMindDatabase};
pub use provider::{GeoDatabase, LookupError};
pub use record::{GeoFields, GeoRecord, UNKNOWN_COUNTRY_CODE, UNKNOWN_COUNTRY_NAME};
pub use resolver::{GeoResolver, Resolution};
