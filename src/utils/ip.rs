//! 客户端 IP 提取
//!
//! 规则：
//! - 有非空的 X-Forwarded-For 时取最后一项（去除空白）
//! - 否则使用连接地址
//! - 都没有时返回 "0.0.0.0"

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// 无法确定客户端地址时的返回值
pub const UNSPECIFIED_ADDR: &str = "0.0.0.0";

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// 由转发头和直连地址计算客户端 IP
pub fn remote_addr(forwarded_for: Option<&str>, direct: Option<&str>) -> String {
    if let Some(forwarded) = forwarded_for.map(str::trim).filter(|s| !s.is_empty()) {
        // 最后一项由最近的代理追加
        let last = forwarded.rsplit(',').next().unwrap_or(forwarded);
        return last.trim().to_string();
    }

    match direct.map(str::trim).filter(|s| !s.is_empty()) {
        Some(addr) => addr.to_string(),
        None => UNSPECIFIED_ADDR.to_string(),
    }
}

/// 从 HeaderMap 读取 X-Forwarded-For
pub fn forwarded_for_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(X_FORWARDED_FOR)
        .and_then(|h| h.to_str().ok())
}

/// 从 HttpRequest 提取客户端 IP
pub fn remote_addr_from_request(req: &HttpRequest) -> String {
    let peer_ip = req.peer_addr().map(|addr| addr.ip().to_string());
    remote_addr(forwarded_for_from_headers(req.headers()), peer_ip.as_deref())
}
