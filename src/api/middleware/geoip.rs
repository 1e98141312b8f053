//! GeoIP2 middleware
//!
//! 每个请求：
//! 1. 提取客户端 IP（X-Forwarded-For 最后一项，或连接地址）
//! 2. 解析地理数据（缓存 → 数据库）
//! 3. 移除客户端自带的 `X-GEOIP2-*` 请求头，有记录时写入 `X-GEOIP2-*` 请求头和 request extensions
//! 4. 调用下游 handler
//! 5. 策略允许时写入 `X-GeoIP2-*` 响应头
//!
//! 初始化失败时中间件被禁用，所有请求原样透传。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{info, warn};

use super::annotate::{
    RemoteAddr, ResponseHeaderPolicy, annotate_request, annotate_response, strip_request_headers,
};
use crate::config::StaticConfig;
use crate::errors::Result;
use crate::metrics_core::MetricsRecorder;
use crate::services::geoip::GeoResolver;
use crate::utils::ip::remote_addr_from_request;

struct GeoIp2State {
    resolver: GeoResolver,
    policy: ResponseHeaderPolicy,
}

/// GeoIP2 中间件工厂
#[derive(Clone)]
pub struct GeoIp2 {
    state: Option<Arc<GeoIp2State>>,
}

impl GeoIp2 {
    pub fn new(resolver: GeoResolver, policy: ResponseHeaderPolicy) -> Self {
        Self {
            state: Some(Arc::new(GeoIp2State { resolver, policy })),
        }
    }

    /// 透传所有请求
    pub fn disabled() -> Self {
        Self { state: None }
    }

    /// 根据配置加载数据库和缓存
    pub fn try_from_config(
        config: &StaticConfig,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self> {
        let resolver = GeoResolver::from_config(config, metrics)?;
        let policy = ResponseHeaderPolicy::from_config(config);
        info!(
            "GeoIP2 middleware enabled (database: {}, cache: {}, response headers: {})",
            resolver.database().name(),
            resolver.cache().backend_name(),
            if policy.always { "always" } else { "on request" }
        );
        Ok(Self::new(resolver, policy))
    }

    /// 同 `try_from_config`，失败时记录警告并禁用
    pub fn from_config(config: &StaticConfig, metrics: Arc<dyn MetricsRecorder>) -> Self {
        match Self::try_from_config(config, metrics) {
            Ok(middleware) => middleware,
            Err(e) => {
                warn!("GeoIP2 middleware disabled: {}", e.format_simple());
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn resolver(&self) -> Option<&GeoResolver> {
        self.state.as_ref().map(|s| &s.resolver)
    }
}

impl<S, B> Transform<S, ServiceRequest> for GeoIp2
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = GeoIp2Middleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GeoIp2Middleware {
            service: Rc::new(service),
            state: self.state.clone(),
        }))
    }
}

pub struct GeoIp2Middleware<S> {
    service: Rc<S>,
    state: Option<Arc<GeoIp2State>>,
}

impl<S, B> Service<ServiceRequest> for GeoIp2Middleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        let Some(state) = self.state.clone() else {
            return Box::pin(async move { srv.call(req).await });
        };

        Box::pin(async move {
            let ip = remote_addr_from_request(req.request());
            // 先于请求头写入判断，避免读到自己写入的头
            let add_headers = state.policy.add_response_headers(req.request());
            // 下游只能看到本中间件写入的 X-GEOIP2-* 头
            strip_request_headers(req.headers_mut());
            let geo_data = state.resolver.geo_data(&ip).await;

            req.extensions_mut().insert(RemoteAddr(ip));
            if let Some(ref record) = geo_data {
                annotate_request(req.headers_mut(), record);
                req.extensions_mut().insert(record.clone());
            }

            let mut response = srv.call(req).await?;

            if add_headers && let Some(ref record) = geo_data {
                annotate_response(response.headers_mut(), record);
            }

            Ok(response)
        })
    }
}
