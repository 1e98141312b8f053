//! GeoIP 数据库抽象层
//!
//! 统一的数据库查询接口，解析器只依赖此 trait：
//! - `lookup_city` / `lookup_country` 返回固定结构的 `GeoFields`
//! - 地址不在库中 → `LookupError::AddressNotFound`
//! - 其他任何失败 → `LookupError::Database`

use std::fmt;

use super::record::GeoFields;

/// 单次查询失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// 地址合法，但数据库中没有记录
    AddressNotFound(String),
    /// 数据库或解码错误，可能是暂时性的
    Database(String),
}

impl LookupError {
    pub fn database<T: Into<String>>(msg: T) -> Self {
        LookupError::Database(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::AddressNotFound(_))
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::AddressNotFound(ip) => {
                write!(f, "address {} not found in GeoIP2 database", ip)
            }
            LookupError::Database(msg) => write!(f, "GeoIP2 database error: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

/// GeoIP 数据库 trait
///
/// 实现必须可在多个 worker 间并发读取。
pub trait GeoDatabase: Send + Sync {
    /// 是否加载了城市库
    fn has_city_db(&self) -> bool;

    /// 是否加载了国家库
    fn has_country_db(&self) -> bool;

    /// 城市级查询
    fn lookup_city(&self, ip: &str) -> Result<GeoFields, LookupError>;

    /// 国家级查询
    fn lookup_country(&self, ip: &str) -> Result<GeoFields, LookupError>;

    /// 获取实现名称（用于日志）
    fn name(&self) -> &'static str;
}
