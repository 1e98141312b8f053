use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use std::time::Instant;
use tracing::trace;

/// 示例服务器的共享状态
#[derive(Clone, Debug)]
pub struct AppState {
    pub started_at: Instant,
    pub geoip_enabled: bool,
}

impl AppState {
    pub fn new(geoip_enabled: bool) -> Self {
        Self {
            started_at: Instant::now(),
            geoip_enabled,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    geoip: &'static str,
    uptime: u64,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
        trace!("Received health check request");

        // GeoIP2 被禁用不影响服务可用性
        let body = HealthResponse {
            status: "healthy",
            geoip: if state.geoip_enabled {
                "enabled"
            } else {
                "disabled"
            },
            uptime: state.started_at.elapsed().as_secs(),
        };

        HttpResponse::Ok().json(body)
    }

    // 活跃性检查
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
}
