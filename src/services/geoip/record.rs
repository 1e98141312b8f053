//! GeoIP 数据模型
//!
//! `GeoFields` 是数据库读取层返回的固定结构，`GeoRecord` 在其上附加产生该记录的
//! IP 地址。未知地址统一使用 `GeoRecord::unknown` 构造的哨兵记录。

use serde::{Deserialize, Serialize};

/// 未知地址的国家代码
pub const UNKNOWN_COUNTRY_CODE: &str = "XX";
/// 未知地址的国家名称
pub const UNKNOWN_COUNTRY_NAME: &str = "unknown";

/// 数据库查询得到的地理字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// 一级行政区 ISO 代码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// MaxMind metro code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dma_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_european_union: Option<bool>,
}

/// 解析后的地理记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    /// 产生该记录的 IP 地址
    pub remote_addr: String,
    #[serde(flatten)]
    pub fields: GeoFields,
}

impl GeoRecord {
    pub fn new(remote_addr: impl Into<String>, fields: GeoFields) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            fields,
        }
    }

    /// 数据库中不存在的地址
    pub fn unknown(remote_addr: impl Into<String>) -> Self {
        Self::new(
            remote_addr,
            GeoFields {
                country_code: Some(UNKNOWN_COUNTRY_CODE.to_string()),
                country_name: Some(UNKNOWN_COUNTRY_NAME.to_string()),
                ..GeoFields::default()
            },
        )
    }

    pub fn is_unknown(&self) -> bool {
        self.fields.country_code.as_deref() == Some(UNKNOWN_COUNTRY_CODE)
    }

    /// 按固定顺序列出所有字段，缺失的字段值为 `None`
    ///
    /// 用于生成请求头和响应头。
    pub fn header_fields(&self) -> Vec<(&'static str, Option<String>)> {
        let f = &self.fields;
        vec![
            ("country_code", f.country_code.clone()),
            ("country_name", f.country_name.clone()),
            ("city", f.city.clone()),
            ("region", f.region.clone()),
            ("postal_code", f.postal_code.clone()),
            ("latitude", f.latitude.map(|v| v.to_string())),
            ("longitude", f.longitude.map(|v| v.to_string())),
            ("dma_code", f.dma_code.map(|v| v.to_string())),
            ("time_zone", f.time_zone.clone()),
            ("continent_code", f.continent_code.clone()),
            ("continent_name", f.continent_name.clone()),
            (
                "is_in_european_union",
                f.is_in_european_union.map(|v| v.to_string()),
            ),
            ("remote_addr", Some(self.remote_addr.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_record() {
        let record = GeoRecord::unknown("8.8.8.8");
        assert_eq!(record.remote_addr, "8.8.8.8");
        assert_eq!(record.fields.country_code.as_deref(), Some("XX"));
        assert_eq!(record.fields.country_name.as_deref(), Some("unknown"));
        assert!(record.fields.city.is_none());
        assert!(record.is_unknown());
    }

    #[test]
    fn test_is_unknown() {
        let mut record = GeoRecord::new(
            "8.8.8.8",
            GeoFields {
                country_code: Some("US".to_string()),
                ..GeoFields::default()
            },
        );
        assert!(!record.is_unknown());
        record.fields.country_code = Some(UNKNOWN_COUNTRY_CODE.to_string());
        assert!(record.is_unknown());
    }

    #[test]
    fn test_json_is_flat() {
        let record = GeoRecord::new(
            "8.8.8.8",
            GeoFields {
                country_code: Some("US".to_string()),
                latitude: Some(37.751),
                ..GeoFields::default()
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["remote_addr"], "8.8.8.8");
        assert_eq!(value["country_code"], "US");
        assert_eq!(value["latitude"], 37.751);
        // 缺失字段不写入
        assert!(value.get("city").is_none());

        let back: GeoRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_header_fields_cover_every_field() {
        let record = GeoRecord::unknown("10.0.0.1");
        let fields = record.header_fields();
        assert_eq!(fields.len(), 13);
        assert_eq!(fields[0], ("country_code", Some("XX".to_string())));
        assert!(fields.contains(&("city", None)));
        assert_eq!(
            fields.last(),
            Some(&("remote_addr", Some("10.0.0.1".to_string())))
        );
    }
}
