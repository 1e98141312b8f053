//! GeoIP2 请求头 / 响应头写入
//!
//! - 请求头：`X-GEOIP2-<FIELD>`，记录中的每个字段都写入，缺失字段写空值
//! - 响应头：`X-GeoIP2-<Field>`，只写入非空字段，是否写入由 `ResponseHeaderPolicy` 决定

use actix_web::HttpRequest;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use crate::config::StaticConfig;
use crate::services::geoip::GeoRecord;

/// 中间件解析出的客户端地址，可从 request extensions 中提取
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteAddr(pub String);

/// 请求头名前缀（小写，HeaderName 统一为小写）
const REQUEST_HEADER_PREFIX: &str = "x-geoip2-";

/// `country_code` → `X-GEOIP2-COUNTRY-CODE`
pub fn request_header_name(field: &str) -> String {
    format!("X-GEOIP2-{}", field.replace('_', "-").to_ascii_uppercase())
}

/// `country_code` → `X-GeoIP2-Country-Code`
pub fn response_header_name(field: &str) -> String {
    let title = field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-");
    format!("X-GeoIP2-{}", title)
}

fn header_pair(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    let header_name = match HeaderName::from_bytes(name.as_bytes()) {
        Ok(n) => n,
        Err(e) => {
            warn!("Skipping invalid GeoIP2 header name {}: {}", name, e);
            return None;
        }
    };
    match HeaderValue::from_bytes(value.as_bytes()) {
        Ok(v) => Some((header_name, v)),
        Err(e) => {
            warn!("Skipping GeoIP2 header {} with invalid value {:?}: {}", name, value, e);
            None
        }
    }
}

/// 移除客户端自带的 `X-GEOIP2-*` 请求头
pub fn strip_request_headers(headers: &mut HeaderMap) {
    let forged: Vec<HeaderName> = headers
        .keys()
        .filter(|name| name.as_str().starts_with(REQUEST_HEADER_PREFIX))
        .cloned()
        .collect();
    for name in forged {
        debug!("Removing client-supplied GeoIP2 request header {}", name);
        headers.remove(name);
    }
}

/// 写入请求头，缺失字段写空值
///
/// 值不是合法头部字节时同样写空值，保证每个字段的键都存在。
pub fn annotate_request(headers: &mut HeaderMap, record: &GeoRecord) {
    for (field, value) in record.header_fields() {
        let name = request_header_name(field);
        let value = value.unwrap_or_default();
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            warn!("Skipping invalid GeoIP2 header name {}", name);
            continue;
        };
        let header_value = HeaderValue::from_bytes(value.as_bytes()).unwrap_or_else(|e| {
            warn!(
                "GeoIP2 header {} has invalid value {:?}, writing empty value: {}",
                name, value, e
            );
            HeaderValue::from_static("")
        });
        headers.insert(header_name, header_value);
    }
}

/// 写入响应头，跳过空字段
pub fn annotate_response(headers: &mut HeaderMap, record: &GeoRecord) {
    for (field, value) in record.header_fields() {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };
        if let Some((name, value)) = header_pair(&response_header_name(field), &value) {
            headers.insert(name, value);
        }
    }
}

/// 是否为"关闭"值：0、false、no、off（不区分大小写）
fn is_false_value(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// 响应头写入策略
#[derive(Clone, Debug, Default)]
pub struct ResponseHeaderPolicy {
    /// 总是写入
    pub always: bool,
    /// 请求携带此头（且值不为关闭值）时写入
    pub debug_header: Option<HeaderName>,
    /// 请求携带此查询参数（且值不为关闭值）时写入
    pub debug_query_param: Option<String>,
}

impl ResponseHeaderPolicy {
    pub fn new(
        always: bool,
        debug_header: Option<HeaderName>,
        debug_query_param: Option<String>,
    ) -> Self {
        Self {
            always,
            debug_header,
            debug_query_param,
        }
    }

    pub fn from_config(config: &StaticConfig) -> Self {
        let debug_header = config.geoip.debug_header.as_deref().and_then(|name| {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| warn!("Ignoring invalid geoip.debug_header {}: {}", name, e))
                .ok()
        });
        Self::new(
            config.add_response_headers(),
            debug_header,
            config
                .geoip
                .debug_query_param
                .clone()
                .filter(|p| !p.is_empty()),
        )
    }

    /// 当前请求是否需要写入响应头
    pub fn add_response_headers(&self, req: &HttpRequest) -> bool {
        if self.always {
            return true;
        }

        if let Some(ref header) = self.debug_header
            && let Some(value) = req.headers().get(header)
        {
            // 非 ASCII 值视为开启
            if !value.to_str().is_ok_and(is_false_value) {
                return true;
            }
        }

        if let Some(ref param) = self.debug_query_param {
            let query = req.query_string();
            if url::form_urlencoded::parse(query.as_bytes())
                .any(|(key, value)| key == param.as_str() && !is_false_value(&value))
            {
                return true;
            }
        }

        false
    }
}
