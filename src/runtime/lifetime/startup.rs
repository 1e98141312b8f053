use std::sync::Arc;

use tracing::{debug, info};

use crate::api::middleware::GeoIp2;
use crate::config::StaticConfig;
use crate::metrics_core::MetricsRecorder;

#[cfg(feature = "metrics")]
use crate::metrics::PrometheusMetricsWrapper;
#[cfg(not(feature = "metrics"))]
use crate::metrics_core::NoopMetrics;

pub struct StartupContext {
    pub geoip: GeoIp2,
}

/// 创建 metrics 实例（依赖注入）
pub fn create_metrics() -> Arc<dyn MetricsRecorder> {
    #[cfg(feature = "metrics")]
    let metrics: Arc<dyn MetricsRecorder> = Arc::new(PrometheusMetricsWrapper);
    #[cfg(not(feature = "metrics"))]
    let metrics: Arc<dyn MetricsRecorder> = NoopMetrics::arc();
    metrics
}

/// 准备服务器启动的上下文
///
/// GeoIP2 初始化失败不会阻止服务器启动，中间件以禁用状态运行。
pub fn prepare_server_startup(config: &StaticConfig) -> StartupContext {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let geoip = GeoIp2::from_config(config, create_metrics());

    info!(
        "Pre-startup processing completed in {:?} (GeoIP2 {})",
        start_time.elapsed(),
        if geoip.is_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );

    StartupContext { geoip }
}
